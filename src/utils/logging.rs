//! Structured logging and secret-masking utilities.
//!
//! This module configures the `tracing` ecosystem for the application and
//! provides helpers that keep the provider API key out of logs and responses.

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Redacts Stability API keys (`sk-...`) and bearer tokens from a string.
///
/// Upstream error bodies occasionally echo request headers back, so anything
/// logged from the provider passes through here first.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    for (marker, replacement) in [("Bearer ", "Bearer [REDACTED]"), ("sk-", "[REDACTED_API_KEY]")] {
        let mut search_from = 0;
        while let Some(offset) = result[search_from..].find(marker) {
            let start = search_from + offset;
            let end = result[start + marker.len()..]
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
                .map(|i| start + marker.len() + i)
                .unwrap_or(result.len());

            let mid_word = result[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric());

            // A bare marker, or one inside another word, is not a secret
            if mid_word || end == start + marker.len() {
                search_from = end;
                continue;
            }

            result.replace_range(start..end, replacement);
            search_from = start + replacement.len();
        }
    }

    result
}

/// Short, non-reversible preview of a key for diagnostics (`sk-abc...`).
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(6).collect();
    if key.chars().count() <= 6 {
        "*".repeat(key.chars().count())
    } else {
        format!("{}...", prefix)
    }
}
