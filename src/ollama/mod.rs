//! Client for the local Ollama control API.
//!
//! Ollama is an opaque external collaborator: this module only wraps the
//! three endpoints sumsum needs (list tags, create model, chat) and the
//! presence check for the installed binary.

pub mod client;
pub mod types;

pub use client::OllamaClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse};
