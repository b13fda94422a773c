//! Provisioning operation: verify the runtime, fetch model artifacts,
//! and register the model with Ollama.
//!
//! Apart from the initial runtime check, each step is independent: a
//! failure is printed and the next step still runs, so a re-run picks up
//! wherever the last one left off. Presence on disk (weights, Modelfile)
//! and presence in the registry are the only idempotency signals.

use crate::config::Config;
use crate::error::{Result, SumsumError};
use crate::models::download::{format_bytes, WeightsDownloader};
use crate::models::{modelfile, paths};
use crate::ollama::OllamaClient;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

/// Verify the Ollama binary is installed and report its version
pub fn check_runtime() -> Result<String> {
    which::which("ollama")
        .map_err(|_| SumsumError::Runtime("'ollama' not found on PATH".to_string()))?;

    let output = Command::new("ollama")
        .arg("--version")
        .output()
        .map_err(|e| SumsumError::Runtime(format!("Failed to run 'ollama --version': {e}")))?;

    if !output.status.success() {
        return Err(SumsumError::Runtime(
            "'ollama --version' exited with an error".to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Provision the environment: runtime check, weights, Modelfile, registry.
pub async fn init(config: &Config) -> Result<()> {
    println!("Checking for Ollama...");
    let version = check_runtime()?;
    println!("Ollama is installed! ({version})");

    let weights = paths::weights_path(&config.model)?;
    println!("Checking if the model is already downloaded...");
    if weights.exists() {
        println!("Model already downloaded at {}", weights.display());
    } else {
        println!("Downloading model...");
        match download_weights(config, &weights).await {
            Ok(bytes) => println!(
                "Model downloaded successfully and saved as {} ({})",
                weights.display(),
                format_bytes(bytes)
            ),
            Err(e) => {
                tracing::warn!("Weight download failed: {e}");
                eprintln!("An error occurred while downloading: {e}");
            }
        }
    }

    println!("Checking for the Modelfile...");
    let modelfile_path = paths::modelfile_path(&config.model)?;
    let generate = if modelfile_path.exists() {
        println!("Modelfile already exists at {}.", modelfile_path.display());
        let overwrite = confirm("Do you want to overwrite the existing Modelfile?")?;
        if !overwrite {
            println!("Using the existing Modelfile.");
        }
        overwrite
    } else {
        println!(
            "Modelfile not found! Generating Modelfile at {}.",
            modelfile_path.display()
        );
        true
    };

    if generate {
        match modelfile::generate(
            &config.model.modelfile_url,
            &modelfile_path,
            &weights,
            config.runtime.timeout_secs,
        )
        .await
        {
            Ok(()) => println!("Modelfile generated!"),
            Err(e) => {
                tracing::warn!("Modelfile generation failed: {e}");
                eprintln!("An error occurred while creating the Modelfile: {e}");
            }
        }
    }

    println!("Checking the Ollama model registry...");
    match register_model(config, &modelfile_path).await {
        Ok(true) => println!("Model '{}' registered with Ollama!", config.model.name),
        Ok(false) => println!("Model '{}' is already registered.", config.model.name),
        Err(e) => {
            tracing::warn!("Model registration failed: {e}");
            eprintln!("An error occurred while registering the model: {e}");
        }
    }

    Ok(())
}

/// Report what is provisioned so far
pub async fn status(config: &Config) -> Result<()> {
    match check_runtime() {
        Ok(version) => println!("Runtime:   {version}"),
        Err(_) => println!("Runtime:   not installed"),
    }

    let weights = paths::weights_path(&config.model)?;
    if weights.exists() {
        let metadata = std::fs::metadata(&weights)?;
        let modified = metadata
            .modified()
            .map(chrono::DateTime::<chrono::Local>::from)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        println!(
            "Weights:   {} ({}, downloaded {modified})",
            weights.display(),
            format_bytes(metadata.len())
        );
    } else {
        println!("Weights:   missing ({})", weights.display());
    }

    let modelfile_path = paths::modelfile_path(&config.model)?;
    if modelfile_path.exists() {
        println!("Modelfile: {}", modelfile_path.display());
    } else {
        println!("Modelfile: missing ({})", modelfile_path.display());
    }

    let client = OllamaClient::new(&config.runtime)?;
    match client.list_models().await {
        Ok(names) if is_registered(&names, &config.model.name) => {
            println!("Registry:  '{}' registered", config.model.name);
        }
        Ok(_) => println!("Registry:  '{}' not registered", config.model.name),
        Err(_) => println!("Registry:  unreachable (is 'ollama serve' running?)"),
    }

    Ok(())
}

async fn download_weights(config: &Config, weights: &Path) -> Result<u64> {
    let model_dir = paths::model_dir(&config.model)?;
    let downloader = WeightsDownloader::new(&model_dir, config.runtime.timeout_secs)?;
    downloader.download(&config.model.weights_url, weights).await
}

/// Create the model in the registry unless it is already listed.
/// Returns true if a create call was made.
async fn register_model(config: &Config, modelfile_path: &Path) -> Result<bool> {
    let client = OllamaClient::new(&config.runtime)?;

    let names = client.list_models().await?;
    if is_registered(&names, &config.model.name) {
        return Ok(false);
    }

    let content = std::fs::read_to_string(modelfile_path).map_err(|e| {
        SumsumError::Modelfile(format!(
            "Cannot read {} for registration: {e}",
            modelfile_path.display()
        ))
    })?;

    client.create_model(&config.model.name, &content).await?;
    Ok(true)
}

/// Ollama lists untagged models as `name:latest`; accept both spellings
fn is_registered(names: &[String], model_name: &str) -> bool {
    names
        .iter()
        .any(|n| n == model_name || n.strip_suffix(":latest") == Some(model_name))
}

/// Prompt on stdout, read a y/N answer from stdin (default no)
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
