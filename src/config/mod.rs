//! Configuration module for sumsum
//!
//! Loads config from `$XDG_CONFIG_HOME/sumsum/config.toml` or `~/.config/sumsum/config.toml`.
//! Falls back to embedded defaults if file doesn't exist.
//! Partial configs are merged with defaults using serde's default attributes.
//!
//! # Example
//!
//! ```no_run
//! use sumsum::config::Config;
//!
//! let config = Config::load().expect("Failed to load config");
//! println!("Model name: {}", config.model.name);
//! println!("Ollama host: {}", config.runtime.host);
//! ```

pub mod schema;

pub use schema::Config;
