use std::fs;
use std::path::PathBuf;
use sumsum::config::schema::{Config, ModelConfig, RuntimeConfig};
use sumsum::error::SumsumError;
use sumsum::models::{modelfile, paths};

fn sandboxed_model_config(dir: &tempfile::TempDir) -> ModelConfig {
    ModelConfig {
        dir: Some(dir.path().to_path_buf()),
        ..ModelConfig::default()
    }
}

#[test]
fn modelfile_generation_rewrites_from_directive() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = sandboxed_model_config(&temp_dir);

    let dest = paths::modelfile_path(&config).unwrap();
    let weights = paths::weights_path(&config).unwrap();

    // Remote Modelfile layout: header comment first, FROM on the second line
    let remote = "# Llama 3.2 3B summarization fine-tune\nFROM unsloth.Q8_0.gguf\nPARAMETER temperature 0.2\n";
    modelfile::write_local(remote, &dest, &weights).unwrap();

    let written = fs::read_to_string(&dest).unwrap();
    let second_line = written.lines().nth(1).unwrap();
    assert_eq!(second_line, format!("FROM {}", weights.display()));
}

#[test]
fn modelfile_regeneration_is_stable() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = sandboxed_model_config(&temp_dir);

    let dest = paths::modelfile_path(&config).unwrap();
    let weights = paths::weights_path(&config).unwrap();

    let remote = "# header\nFROM unsloth.Q8_0.gguf\n";
    modelfile::write_local(remote, &dest, &weights).unwrap();
    let first = fs::read_to_string(&dest).unwrap();

    // Overwriting with the already-localized content changes nothing
    modelfile::write_local(&first, &dest, &weights).unwrap();
    let second = fs::read_to_string(&dest).unwrap();
    assert_eq!(first, second);
}

#[test]
fn weight_presence_is_the_idempotency_signal() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = sandboxed_model_config(&temp_dir);

    let weights = paths::weights_path(&config).unwrap();
    assert!(!weights.exists());

    // A provisioned weight file is detected on the next run by presence alone
    fs::write(&weights, b"placeholder weights").unwrap();
    assert!(weights.exists());
}

#[tokio::test]
async fn run_rejects_missing_file_before_any_network_call() {
    // Point at a host nothing listens on: if validation did not come first,
    // the error would be a network error rather than NotFound
    let config = Config {
        runtime: RuntimeConfig {
            host: "http://localhost:1".to_string(),
            timeout_secs: 1,
        },
        model: ModelConfig::default(),
    };

    let missing = PathBuf::from("/definitely/not/a/real/input.txt");
    let result = sumsum::summarize::run(&config, &missing, true).await;

    match result {
        Err(SumsumError::NotFound(msg)) => assert!(msg.contains("input.txt")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
