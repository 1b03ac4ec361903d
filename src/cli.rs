use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "devreon-estimator", version, about = "Project cost estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Step through the estimator interactively (default)
    Wizard {
        /// Skip the AI request and use the local pricing breakdown
        #[arg(long)]
        offline: bool,
    },

    /// Price a selection given on the command line
    Estimate {
        /// Project type id (omitted means no base cost)
        #[arg(short, long)]
        project_type: Option<String>,

        /// Feature id, repeatable
        #[arg(short, long = "feature")]
        features: Vec<String>,

        /// Timeline id (omitted means standard pricing)
        #[arg(short, long)]
        timeline: Option<String>,

        /// Skip the AI request and use the local pricing breakdown
        #[arg(long)]
        offline: bool,

        /// Print the estimate and reasoning as JSON
        #[arg(long)]
        json: bool,

        /// Print final figures without the count-up animation
        #[arg(long)]
        no_animate: bool,
    },

    /// List the available options
    Catalog,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Wizard if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Wizard { offline: false })
    }
}
