//! Command implementations for the CLI
//!
//! - wizard: Step through the estimator interactively
//! - estimate: Price a selection given as flags
//! - catalog: List available options
//! - config: Configuration display and validation

pub mod catalog;
pub mod config;
pub mod estimate;
pub mod render;
pub mod wizard;
