pub mod cli;
pub mod database;
pub mod embedding;
pub mod models;
pub mod services;
pub mod storage;

pub mod config;
pub mod env;
pub mod error;
pub mod logging;

pub use error::{Result, VoiceprintError};
pub use logging::{init_logging, LoggingConfig};
