pub mod config;
pub mod entry;
pub mod logging;
pub mod monitor;
pub mod stats;
