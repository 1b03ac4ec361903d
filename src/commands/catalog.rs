use anyhow::Result;
use colored::Colorize;
use devreon_estimator::catalog::OptionCatalog;
use devreon_estimator::config;
use devreon_estimator::pricing::{format_rupees, TimelineAdjustment};
use std::path::Path;

/// Execute the catalog command
pub fn execute(config_path: &Path) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    print_catalog(&cfg.catalog);
    Ok(())
}

pub fn print_catalog(catalog: &OptionCatalog) {
    println!("{}", "Project Types:".cyan());
    for p in &catalog.project_types {
        println!("    {:<12} {:<24} {}", p.id, p.label, format_rupees(p.cost));
    }
    println!();

    println!("{}", "Features:".cyan());
    for f in &catalog.features {
        println!("    {:<12} {:<24} +{}", f.id, f.label, format_rupees(f.cost));
    }
    println!();

    println!("{}", "Timelines:".cyan());
    for t in &catalog.timelines {
        println!(
            "    {:<12} {:<24} {}",
            t.id,
            t.label,
            TimelineAdjustment::from_multiplier(t.multiplier)
        );
    }
}
