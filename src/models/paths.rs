use crate::config::schema::ModelConfig;
use crate::error::{Result, SumsumError};
use std::path::PathBuf;

/// Get the model directory (config override or ~/.ollama/local_summarization)
pub fn model_dir(config: &ModelConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.dir {
        return Ok(dir.clone());
    }

    let home = dirs::home_dir()
        .ok_or_else(|| SumsumError::Config("Could not determine home directory".to_string()))?;

    Ok(home.join(".ollama").join("local_summarization"))
}

/// Get the weight file path inside the model directory
pub fn weights_path(config: &ModelConfig) -> Result<PathBuf> {
    Ok(model_dir(config)?.join(&config.weights_filename))
}

/// Get the Modelfile path inside the model directory
pub fn modelfile_path(config: &ModelConfig) -> Result<PathBuf> {
    Ok(model_dir(config)?.join("Modelfile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_model_dir() {
        let config = ModelConfig::default();
        let dir = model_dir(&config).unwrap();
        assert!(dir.ends_with(".ollama/local_summarization"));
    }

    #[test]
    fn test_dir_override() {
        let config = ModelConfig {
            dir: Some(PathBuf::from("/tmp/sumsum-models")),
            ..ModelConfig::default()
        };
        assert_eq!(
            model_dir(&config).unwrap(),
            Path::new("/tmp/sumsum-models")
        );
    }

    #[test]
    fn test_weights_path() {
        let config = ModelConfig {
            dir: Some(PathBuf::from("/tmp/sumsum-models")),
            ..ModelConfig::default()
        };
        let path = weights_path(&config).unwrap();
        assert_eq!(
            path,
            Path::new("/tmp/sumsum-models/Llama_3.2_3B_fine_tune_summarization.gguf")
        );
    }

    #[test]
    fn test_modelfile_path() {
        let config = ModelConfig {
            dir: Some(PathBuf::from("/tmp/sumsum-models")),
            ..ModelConfig::default()
        };
        let path = modelfile_path(&config).unwrap();
        assert_eq!(path, Path::new("/tmp/sumsum-models/Modelfile"));
    }
}
