//! Tracing/logging initialization.
//!
//! Filtering follows `RUST_LOG`; the output format follows
//! `IRONCLAD_LOG_FORMAT` (`json` or `text`).

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "IRONCLAD_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Compact human-readable lines.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "plain" => Ok(Self::Text),
            other => Err(format!("unknown log format {other:?} (expected json or text)")),
        }
    }
}

/// Settings for the process-wide subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `EnvFilter` directives, e.g. `info,ironclad_core=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl TracingConfig {
    /// Reads `RUST_LOG` and `IRONCLAD_LOG_FORMAT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
            std::env::var(LOG_FORMAT_ENV).ok(),
        )
    }

    fn from_vars(filter: Option<String>, format: Option<String>) -> Self {
        let defaults = Self::default();
        let filter = filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.filter);
        // An unrecognised format is not worth failing startup over.
        let format = format
            .and_then(|f| f.parse().ok())
            .unwrap_or(defaults.format);
        Self { filter, format }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(config: &TracingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.compact().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_at_info() {
        let config = TracingConfig::from_vars(None, None);
        assert_eq!(config, TracingConfig::default());
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn reads_filter_and_format() {
        let config = TracingConfig::from_vars(
            Some("ironclad_core=trace".to_string()),
            Some(" TEXT ".to_string()),
        );
        assert_eq!(config.filter, "ironclad_core=trace");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn ignores_blank_filter_and_unknown_format() {
        let config =
            TracingConfig::from_vars(Some("   ".to_string()), Some("yaml".to_string()));
        assert_eq!(config, TracingConfig::default());
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn init_is_idempotent() {
        init_with(&TracingConfig::default());
        init_with(&TracingConfig {
            filter: "debug".to_string(),
            format: LogFormat::Text,
        });
    }
}
