//! Modelfile download and localization.
//!
//! The remote Modelfile references the weights by repository path. After
//! download, its `FROM` directive is rewritten to the absolute path of the
//! locally stored weight file. The directive is located by parsing rather
//! than by line index, so upstream reformatting does not break the rewrite.

use crate::error::{Result, SumsumError};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Download the Modelfile from `url` and write it to `dest` with its
/// `FROM` directive pointing at `weights_path`.
pub async fn generate(
    url: &str,
    dest: &Path,
    weights_path: &Path,
    timeout_secs: u64,
) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SumsumError::Modelfile(format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SumsumError::Modelfile(format!("Failed to download Modelfile: {e}")))?;

    if !response.status().is_success() {
        return Err(SumsumError::Modelfile(format!(
            "Server returned HTTP {} for {url}",
            response.status()
        )));
    }

    let content = response
        .text()
        .await
        .map_err(|e| SumsumError::Modelfile(format!("Failed to read Modelfile body: {e}")))?;

    write_local(&content, dest, weights_path)
}

/// Rewrite `content` for local use and write it to `dest` atomically.
pub fn write_local(content: &str, dest: &Path, weights_path: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let localized = rewrite_from_directive(content, weights_path);

    // Write atomically (tmp + rename)
    let tmp_path = dest.with_extension("tmp");
    fs::write(&tmp_path, localized)?;
    fs::rename(&tmp_path, dest)?;

    Ok(())
}

/// Replace the first `FROM` directive with one referencing `weights_path`.
/// If the content has no `FROM` directive, one is prepended.
pub fn rewrite_from_directive(content: &str, weights_path: &Path) -> String {
    let local_from = format!("FROM {}", weights_path.display());
    let mut rewritten = false;

    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let first_token = line.split_whitespace().next();
            if !rewritten && first_token.is_some_and(|t| t.eq_ignore_ascii_case("FROM")) {
                rewritten = true;
                local_from.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !rewritten {
        lines.insert(0, local_from);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
