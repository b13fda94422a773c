//! Invocation operation: send a text file to the registered model and
//! print the summary.

use crate::config::Config;
use crate::error::{Result, SumsumError};
use crate::ollama::types::ChatResponse;
use crate::ollama::OllamaClient;
use std::fs;
use std::path::Path;

/// Summarize the contents of `file`. The file must exist; the model is
/// assumed to be registered (errors from the runtime propagate as-is).
pub async fn run(config: &Config, file: &Path, verbose: bool) -> Result<()> {
    if !file.exists() {
        return Err(SumsumError::NotFound(format!(
            "Input file does not exist: {}",
            file.display()
        )));
    }

    let text = fs::read_to_string(file)?;

    tracing::debug!("Summarizing {} ({} bytes)", file.display(), text.len());

    let client = OllamaClient::new(&config.runtime)?;
    let response = client.chat(&config.model.name, &text).await?;

    println!("{}", response.message.content);

    if verbose {
        for line in stats_lines(&response) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Timing/token statistics printed with `--verbose`
fn stats_lines(response: &ChatResponse) -> Vec<String> {
    vec![
        format!(
            "Load duration:    {}",
            format_duration_ns(response.load_duration.unwrap_or(0))
        ),
        format!(
            "Total duration:   {}",
            format_duration_ns(response.total_duration.unwrap_or(0))
        ),
        format!(
            "Tokens evaluated: {}",
            response.eval_count.unwrap_or(0)
        ),
    ]
}

/// Convert Ollama's nanosecond durations to two-decimal seconds
#[allow(clippy::cast_precision_loss)]
fn format_duration_ns(nanos: u64) -> String {
    format!("{:.2} s", nanos as f64 / 1e9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama::types::ChatMessage;

    fn response(total: Option<u64>, load: Option<u64>, tokens: Option<u64>) -> ChatResponse {
        ChatResponse {
            message: ChatMessage {
                role: "assistant".to_string(),
                content: "A summary.".to_string(),
            },
            total_duration: total,
            load_duration: load,
            eval_count: tokens,
        }
    }

    #[test]
    fn test_format_duration_ns() {
        assert_eq!(format_duration_ns(0), "0.00 s");
        assert_eq!(format_duration_ns(1_500_000_000), "1.50 s");
        assert_eq!(format_duration_ns(5_000_000_000), "5.00 s");
        // Sub-centisecond values round down to 0.00
        assert_eq!(format_duration_ns(1_000_000), "0.00 s");
        assert_eq!(format_duration_ns(12_345_678_900), "12.35 s");
    }

    #[test]
    fn test_stats_lines() {
        let lines = stats_lines(&response(
            Some(5_000_000_000),
            Some(1_500_000_000),
            Some(42),
        ));

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Load duration:    1.50 s");
        assert_eq!(lines[1], "Total duration:   5.00 s");
        assert_eq!(lines[2], "Tokens evaluated: 42");
    }

    #[test]
    fn test_stats_lines_missing_fields_default_to_zero() {
        let lines = stats_lines(&response(None, None, None));
        assert_eq!(lines[0], "Load duration:    0.00 s");
        assert_eq!(lines[1], "Total duration:   0.00 s");
        assert_eq!(lines[2], "Tokens evaluated: 0");
    }

    #[tokio::test]
    async fn test_run_missing_file_fails_before_network() {
        let config = Config::default();
        let result = run(&config, Path::new("/nonexistent/input.txt"), false).await;

        assert!(matches!(result, Err(SumsumError::NotFound(_))));
    }
}
