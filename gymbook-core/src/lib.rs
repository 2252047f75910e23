pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod parser;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timer;
pub mod tracker;

pub use config::Config;
pub use errors::{GymbookError, Result};
pub use store::EntityStore;
pub use tracker::Tracker;
