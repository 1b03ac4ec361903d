pub mod animation;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod pricing;
pub mod providers;
pub mod reasoning;
pub mod session;

pub use logging::init_tracing;
