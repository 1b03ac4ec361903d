use colored::Colorize;
use devreon_estimator::animation::CountUp;
use devreon_estimator::pricing::{format_amount, Estimate};
use devreon_estimator::providers::ReasoningProvider;
use devreon_estimator::reasoning::Reasoning;
use devreon_estimator::session::{DisplayedFigures, EstimatorSession};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Run "Get Estimate" with a spinner shown while reasoning is in flight
pub async fn run_estimate(
    session: &mut EstimatorSession,
    provider: &dyn ReasoningProvider,
) -> Estimate {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("🤖 AI is analyzing your requirements...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let estimate = session.get_estimate(provider).await;

    spinner.finish_and_clear();
    estimate
}

fn range_line(total: u64, total_max: u64) -> String {
    format!("₹{} - ₹{}", format_amount(total), format_amount(total_max))
}

/// Count the headline range up from zero, then print the breakdown
pub async fn show_figures(session: &EstimatorSession, animate: bool) -> std::io::Result<()> {
    let Some(mut figures) = session.displayed_figures() else {
        return Ok(());
    };

    if animate {
        let interval = CountUp::estimate(0).step_interval();
        while !session.animation_finished() {
            print!("\r  {}  ", range_line(figures.total, figures.total_max).bold());
            std::io::stdout().flush()?;
            tokio::time::sleep(interval).await;
            if let Some(next) = session.displayed_figures() {
                figures = next;
            }
        }
        print!("\r");
    }

    print_figures(&figures);
    Ok(())
}

fn print_figures(figures: &DisplayedFigures) {
    println!(
        "  {}  {}",
        "Estimated Cost:".cyan(),
        range_line(figures.total, figures.total_max).bold().green()
    );
    println!("    Base Cost:           {}", figures.base_cost);
    println!("    Features:            {}", figures.features_cost);
    println!("    Timeline Adjustment: {}", figures.timeline_adjustment);
    println!();
}

pub fn print_reasoning(reasoning: &Reasoning) {
    println!("  {}", reasoning.title.bold());
    for paragraph in &reasoning.paragraphs {
        println!("    {}", paragraph);
    }
    println!();
}
