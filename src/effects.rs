//! Pointer-driven effects: card tilt, magnetic buttons, parallax orbs

use crate::animation::Smoother;

/// Divisor turning pixel distance from center into tilt degrees
const TILT_DIVISOR: f64 = 20.0;
const MAGNETIC_STRENGTH: f64 = 0.1;
/// Parallax travel in pixels per orb index
const PARALLAX_SPEED: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn offset_from_center(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (
            client_x - self.left - self.width / 2.0,
            client_y - self.top - self.height / 2.0,
        )
    }
}

/// Rotation in degrees around each axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

pub fn card_tilt(rect: &Rect, client_x: f64, client_y: f64) -> Tilt {
    let (dx, dy) = rect.offset_from_center(client_x, client_y);
    Tilt {
        rotate_x: dy / TILT_DIVISOR,
        rotate_y: -dx / TILT_DIVISOR,
    }
}

pub fn magnetic_offset(rect: &Rect, client_x: f64, client_y: f64) -> (f64, f64) {
    let (dx, dy) = rect.offset_from_center(client_x, client_y);
    (dx * MAGNETIC_STRENGTH, dy * MAGNETIC_STRENGTH)
}

/// Map a pointer coordinate to `-1.0..=1.0` across the viewport
pub fn normalize_pointer(client: f64, viewport: f64) -> f64 {
    if viewport <= 0.0 {
        return 0.0;
    }
    (client / viewport - 0.5) * 2.0
}

/// Smoothed pointer position shared by all parallax orbs
#[derive(Debug, Clone, Copy)]
pub struct Parallax {
    x: Smoother,
    y: Smoother,
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            x: Smoother::new(Smoother::PARALLAX),
            y: Smoother::new(Smoother::PARALLAX),
        }
    }
}

impl Parallax {
    /// Advance one frame toward the normalized pointer position
    pub fn frame(&mut self, pointer_x: f64, pointer_y: f64) {
        self.x.step(pointer_x);
        self.y.step(pointer_y);
    }

    /// Translation for the orb at `index`; deeper orbs move further
    pub fn orb_offset(&self, index: usize) -> (f64, f64) {
        let speed = (index as f64 + 1.0) * PARALLAX_SPEED;
        (self.x.current * speed, self.y.current * speed)
    }
}
