use thiserror::Error;

/// Main error type for sumsum
#[derive(Error, Debug)]
pub enum SumsumError {
    #[error("Runtime error: {0}\n\nTroubleshooting:\n- Install Ollama from: https://ollama.com/download\n- Make sure 'ollama' is on your PATH\n- Verify the install: ollama --version")]
    Runtime(String),

    #[error("Download error: {0}\n\nTroubleshooting:\n- Check internet connection\n- Check free disk space in the model directory\n- Re-run 'sumsum init' to retry (completed steps are skipped)")]
    Download(String),

    #[error("Modelfile error: {0}\n\nTroubleshooting:\n- Re-run 'sumsum init' and confirm the overwrite prompt\n- Inspect the file under ~/.ollama/local_summarization/")]
    Modelfile(String),

    #[error("Ollama API error: {0}")]
    Ollama(#[from] OllamaError),

    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/sumsum/config.toml\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the local Ollama control API
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Model is not registered\n\nTroubleshooting:\n- Provision it first: sumsum init\n- List registered models: ollama list")]
    ModelMissing,

    #[error("Network error: {0}\n\nTroubleshooting:\n- Is the Ollama service running? Start with: ollama serve\n- Check the host in config (default http://localhost:11434)")]
    Network(String),

    #[error("API error: {0}\n\nTroubleshooting:\n- Check the Ollama server logs\n- Try the request manually: curl http://localhost:11434/api/tags")]
    Api(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, SumsumError>;
