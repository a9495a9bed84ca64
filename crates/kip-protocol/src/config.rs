use thiserror::Error;

pub const MAX_LINE_BYTES_ENV: &str = "KIP_MAX_LINE_BYTES";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive byte count, got '{value}'")]
    InvalidByteCount { var: &'static str, value: String },
}

/// Settings for receiving line-delimited envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveConfig {
    /// Lines longer than this are rejected as malformed without being parsed.
    pub max_line_bytes: usize,
    /// Ignore empty and whitespace-only lines instead of reporting them.
    pub skip_blank_lines: bool,
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 16 * 1024 * 1024, // 16MB
            skip_blank_lines: true,
        }
    }
}

impl ReceiveConfig {
    /// Defaults overridden by `KIP_MAX_LINE_BYTES` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(MAX_LINE_BYTES_ENV) {
            config.max_line_bytes = match value.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    return Err(ConfigError::InvalidByteCount {
                        var: MAX_LINE_BYTES_ENV,
                        value,
                    });
                }
            };
        }
        Ok(config)
    }
}
