use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::TickerError;

/// Field incremented on every record that carries it.
pub const DEFAULT_FIELD: &str = "distance";

/// Inputs for one process lifetime, taken from the four positional arguments:
///  ```text
/// distance_ticker <path> <increment> <total> <sleep>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub path: PathBuf,
    pub increment: i64,
    pub total: i64,
    pub sleep: Duration,
    pub field: String,
}

impl RunConfig {
    pub fn new(path: impl Into<PathBuf>, increment: i64, total: i64, sleep: Duration) -> Self {
        Self {
            path: path.into(),
            increment,
            total,
            sleep,
            field: DEFAULT_FIELD.to_string(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Builds a config from `argv` including the program name at index 0.
    /// Anything other than exactly four positional values is a usage error.
    /// The path is taken as raw OS bytes; only the numeric values must be UTF-8.
    pub fn from_args<I, S>(args: I) -> Result<Self, TickerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);
        let program = args
            .next()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "distance_ticker".to_string());
        let positional: Vec<OsString> = args.collect();

        let [path, increment, total, sleep] = <[OsString; 4]>::try_from(positional)
            .map_err(|_| TickerError::Usage { program })?;

        Ok(Self::new(
            PathBuf::from(path),
            parse_int("increment", utf8_arg("increment", &increment)?)?,
            parse_int("total", utf8_arg("total", &total)?)?,
            parse_sleep(utf8_arg("sleep", &sleep)?)?,
        ))
    }
}

fn utf8_arg<'a>(name: &'static str, raw: &'a OsString) -> Result<&'a str, TickerError> {
    raw.to_str().ok_or_else(|| TickerError::InvalidArgument {
        name,
        value: raw.to_string_lossy().into_owned(),
        reason: "not valid UTF-8".to_string(),
    })
}

fn parse_int(name: &'static str, raw: &str) -> Result<i64, TickerError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| TickerError::InvalidArgument {
            name,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

fn parse_sleep(raw: &str) -> Result<Duration, TickerError> {
    let invalid = |reason: String| TickerError::InvalidArgument {
        name: "sleep",
        value: raw.to_string(),
        reason,
    };

    let secs = raw.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    Duration::try_from_secs_f64(secs).map_err(|e| invalid(e.to_string()))
}
