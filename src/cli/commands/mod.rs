//! CLI command implementations

pub mod cache;
pub mod clean;
pub mod config;

pub use cache::execute as cache;
pub use clean::execute as clean;
pub use config::execute as config;
