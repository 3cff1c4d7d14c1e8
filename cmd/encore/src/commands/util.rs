//! Utility functions for CLI commands.

use std::path::{Path, PathBuf};

use crate::Cli;

/// Environment variable holding the Sonauto API key.
pub const SONAUTO_API_KEY_VAR: &str = "SONAUTO_API_KEY";

/// Environment variable holding the Lemon Slice API key.
pub const LEMONSLICE_API_KEY_VAR: &str = "LEMONSLICE_API_KEY";

// Placeholder values from the sample .env; they must never reach the wire.
const SONAUTO_PLACEHOLDER: &str = "your_sonauto_api_key";
const LEMONSLICE_PLACEHOLDER: &str = "your_lemonslice_api_key";

/// Reads the Sonauto API key from the environment.
pub fn sonauto_api_key() -> anyhow::Result<String> {
    let value = std::env::var(SONAUTO_API_KEY_VAR).ok();
    validate_api_key(SONAUTO_API_KEY_VAR, value, SONAUTO_PLACEHOLDER)
}

/// Reads the Lemon Slice API key from the environment.
pub fn lemonslice_api_key() -> anyhow::Result<String> {
    let value = std::env::var(LEMONSLICE_API_KEY_VAR).ok();
    validate_api_key(LEMONSLICE_API_KEY_VAR, value, LEMONSLICE_PLACEHOLDER)
}

/// Rejects missing keys and the documented placeholder values, so a bad
/// configuration fails before any network call is attempted.
fn validate_api_key(
    var: &str,
    value: Option<String>,
    placeholder: &str,
) -> anyhow::Result<String> {
    match value {
        Some(value) if !value.is_empty() && value != placeholder => Ok(value),
        _ => anyhow::bail!(
            "please set your {} in the .env file or environment variables",
            var
        ),
    }
}

/// Creates a Sonauto client from the environment.
pub fn sonauto_client() -> anyhow::Result<encore_sonauto::Client> {
    Ok(encore_sonauto::Client::new(sonauto_api_key()?)?)
}

/// Creates a Lemon Slice client from the environment.
pub fn lemonslice_client() -> anyhow::Result<encore_lemonslice::Client> {
    Ok(encore_lemonslice::Client::new(lemonslice_api_key()?)?)
}

/// Writes an artifact to disk and returns its absolute path.
pub fn write_artifact(data: &[u8], path: &str) -> anyhow::Result<PathBuf> {
    std::fs::write(path, data)?;
    Ok(absolute_path(Path::new(path)))
}

/// Returns the absolute form of a path, falling back to the path itself.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints error message.
#[allow(dead_code)]
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m✗\x1b[0m {}", msg);
}

/// Formats bytes to human readable string.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_rejected() {
        assert!(validate_api_key("X_KEY", None, "your_x_api_key").is_err());
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(validate_api_key("X_KEY", Some(String::new()), "your_x_api_key").is_err());
    }

    #[test]
    fn placeholder_key_is_rejected() {
        let err = validate_api_key(
            "X_KEY",
            Some("your_x_api_key".to_string()),
            "your_x_api_key",
        )
        .unwrap_err();
        assert!(err.to_string().contains("X_KEY"));
    }

    #[test]
    fn real_key_is_accepted() {
        let key = validate_api_key("X_KEY", Some("sk-123".to_string()), "your_x_api_key").unwrap();
        assert_eq!(key, "sk-123");
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(36 * 1024 * 1024), "36.00 MB");
    }
}
