//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; anything but `json` selects text.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Filtering comes from `RUST_LOG` (default `info`). Safe to call multiple
/// times (subsequent calls are no-ops).
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_json_selects_json() {
        assert_eq!(LogFormat::from_param(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_param(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::from_param(Some("pretty")), LogFormat::Text);
        assert_eq!(LogFormat::from_param(None), LogFormat::Text);
    }

    #[test]
    fn init_twice_is_harmless() {
        init(LogFormat::Text);
        init(LogFormat::Json);
    }
}
