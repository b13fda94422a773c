pub mod config;
pub mod error;
pub mod models;
pub mod ollama;
pub mod provision;
pub mod summarize;

pub use error::{Result, SumsumError};
