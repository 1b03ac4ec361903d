use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use devreon_estimator::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    init_tracing();

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Wizard { offline } => {
            commands::wizard::execute(&args.config, offline).await?;
        }
        cli::Commands::Estimate {
            project_type,
            features,
            timeline,
            offline,
            json,
            no_animate,
        } => {
            let request = commands::estimate::EstimateArgs {
                project_type,
                features,
                timeline,
                offline,
                json,
                animate: !no_animate,
            };
            commands::estimate::execute(&args.config, request).await?;
        }
        cli::Commands::Catalog => commands::catalog::execute(&args.config)?,
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Devreon Estimator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
