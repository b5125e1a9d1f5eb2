use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("Usage: {program} path increment total sleep")]
    Usage { program: String },

    #[error("Invalid {name} `{value}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid JSON format: missing array brackets")]
    MissingBrackets,

    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Record {index}: field `{field}` is not a number")]
    NonNumericField { index: usize, field: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TickerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TickerError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_name_their_direction() {
        let source = || serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let read = TickerError::Parse(source()).to_string();
        let write = TickerError::Serialize(source()).to_string();
        assert!(read.starts_with("JSON parse error: "), "{read}");
        assert!(write.starts_with("JSON serialization error: "), "{write}");
    }
}
