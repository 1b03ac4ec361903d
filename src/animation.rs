//! Count-up and smoothing animations driven by an injectable clock

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, at: Duration) {
        self.millis.store(at.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

/// Fixed-step linear count from 0 to `target`
///
/// The first increment is shown immediately; after `k` further step
/// intervals the value is `floor((k + 1) * target / steps)`, and once all
/// steps have elapsed it is exactly `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUp {
    pub target: u64,
    pub duration: Duration,
    pub steps: u32,
}

impl CountUp {
    /// Estimator result figures
    pub fn estimate(target: u64) -> Self {
        Self {
            target,
            duration: Duration::from_millis(1000),
            steps: 30,
        }
    }

    /// Landing-page stat counters
    pub fn stat(target: u64) -> Self {
        Self {
            target,
            duration: Duration::from_millis(2000),
            steps: 60,
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.duration / self.steps.max(1)
    }

    /// Increments applied after `elapsed`, capped at `steps`
    fn applied_steps(&self, elapsed: Duration) -> u64 {
        let interval = self.step_interval().as_nanos().max(1);
        let ticks = (elapsed.as_nanos() / interval) as u64 + 1;
        ticks.min(self.steps.max(1) as u64)
    }

    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let steps = self.steps.max(1) as u64;
        let applied = self.applied_steps(elapsed);
        if applied >= steps {
            return self.target;
        }
        (applied as u128 * self.target as u128 / steps as u128) as u64
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.applied_steps(elapsed) >= self.steps.max(1) as u64
    }

    /// Every distinct displayed value, in order, ending with `target`
    pub fn frames(&self) -> Vec<u64> {
        let steps = self.steps.max(1) as u64;
        (1..=steps)
            .map(|n| {
                if n == steps {
                    self.target
                } else {
                    (n as u128 * self.target as u128 / steps as u128) as u64
                }
            })
            .collect()
    }
}

/// A [`CountUp`] pinned to the moment it started
#[derive(Debug, Clone, Copy)]
pub struct AnimatedValue {
    counter: CountUp,
    started_at: Duration,
}

impl AnimatedValue {
    pub fn start(counter: CountUp, clock: &dyn Clock) -> Self {
        Self {
            counter,
            started_at: clock.now(),
        }
    }

    pub fn target(&self) -> u64 {
        self.counter.target
    }

    pub fn value(&self, clock: &dyn Clock) -> u64 {
        self.counter.value_at(self.elapsed(clock))
    }

    pub fn is_finished(&self, clock: &dyn Clock) -> bool {
        self.counter.is_finished(self.elapsed(clock))
    }

    fn elapsed(&self, clock: &dyn Clock) -> Duration {
        clock.now().saturating_sub(self.started_at)
    }
}

/// Exponential approach toward a moving target, one frame at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    pub current: f64,
    pub factor: f64,
}

impl Smoother {
    pub const PARALLAX: f64 = 0.05;
    pub const CURSOR: f64 = 0.1;

    pub fn new(factor: f64) -> Self {
        Self {
            current: 0.0,
            factor,
        }
    }

    pub fn step(&mut self, target: f64) -> f64 {
        self.current += (target - self.current) * self.factor;
        self.current
    }
}
