pub mod bounded;
pub mod config;
pub mod error;
pub mod types;
