//! Runtime settings read from `STYLE_*` environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::ParseSinkError;
use crate::sheet_sink::SheetSinkConfig;

pub const DEFAULT_DB_URL: &str = "sqlite://results.sqlite3";

/// Where finished results go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    #[default]
    Sqlite,
    Sheet,
    None,
}

impl SinkKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SinkKind::Sqlite => "sqlite",
            SinkKind::Sheet => "sheet",
            SinkKind::None => "none",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = ParseSinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "db" => Ok(SinkKind::Sqlite),
            "sheet" | "webhook" => Ok(SinkKind::Sheet),
            "none" | "off" => Ok(SinkKind::None),
            other => Err(ParseSinkError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentConfig {
    pub db_url: String,
    /// `None` uses the bank compiled into the binary.
    pub bank_path: Option<PathBuf>,
    pub sink: SinkKind,
    pub sheet: Option<SheetSinkConfig>,
    /// Upper bound on a single sink call.
    pub persist_timeout: Duration,
    /// Pause after an answer before the next question is shown.
    pub advance_delay: Duration,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.to_string(),
            bank_path: None,
            sink: SinkKind::default(),
            sheet: None,
            persist_timeout: Duration::from_millis(5000),
            advance_delay: Duration::from_millis(250),
        }
    }
}

impl AssessmentConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values are logged and replaced
    /// by their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sink = match value("STYLE_SINK") {
            Some(raw) => raw.parse().unwrap_or_else(|err: ParseSinkError| {
                warn!(error = %err, "ignoring STYLE_SINK");
                defaults.sink
            }),
            None => defaults.sink,
        };

        Self {
            db_url: value("STYLE_DB_URL").unwrap_or(defaults.db_url),
            bank_path: value("STYLE_BANK_PATH").map(PathBuf::from),
            sink,
            sheet: SheetSinkConfig::from_lookup(&lookup),
            persist_timeout: millis(
                "STYLE_PERSIST_TIMEOUT_MS",
                value("STYLE_PERSIST_TIMEOUT_MS"),
                defaults.persist_timeout,
            ),
            advance_delay: millis(
                "STYLE_ADVANCE_DELAY_MS",
                value("STYLE_ADVANCE_DELAY_MS"),
                defaults.advance_delay,
            ),
        }
    }
}

fn millis(key: &str, raw: Option<String>, default: Duration) -> Duration {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) => Duration::from_millis(ms),
        Err(_) => {
            warn!(key, value = %raw, "expected milliseconds, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AssessmentConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AssessmentConfig::default());
        assert_eq!(config.db_url, DEFAULT_DB_URL);
        assert_eq!(config.persist_timeout, Duration::from_secs(5));
        assert_eq!(config.advance_delay, Duration::from_millis(250));
    }

    #[test]
    fn reads_every_setting() {
        let config = AssessmentConfig::from_lookup(lookup(&[
            ("STYLE_DB_URL", "sqlite::memory:"),
            ("STYLE_BANK_PATH", "/tmp/bank.json"),
            ("STYLE_SINK", "Sheet"),
            ("STYLE_SHEET_WEBHOOK_URL", "https://hooks.example.test/append"),
            ("STYLE_PERSIST_TIMEOUT_MS", "1500"),
            ("STYLE_ADVANCE_DELAY_MS", "0"),
        ]));

        assert_eq!(config.db_url, "sqlite::memory:");
        assert_eq!(config.bank_path, Some(PathBuf::from("/tmp/bank.json")));
        assert_eq!(config.sink, SinkKind::Sheet);
        assert_eq!(
            config.sheet.map(|s| s.webhook_url),
            Some("https://hooks.example.test/append".to_string())
        );
        assert_eq!(config.persist_timeout, Duration::from_millis(1500));
        assert_eq!(config.advance_delay, Duration::ZERO);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AssessmentConfig::from_lookup(lookup(&[
            ("STYLE_SINK", "carrier-pigeon"),
            ("STYLE_PERSIST_TIMEOUT_MS", "soon"),
            ("STYLE_BANK_PATH", "   "),
        ]));
        assert_eq!(config.sink, SinkKind::Sqlite);
        assert_eq!(config.persist_timeout, Duration::from_secs(5));
        assert_eq!(config.bank_path, None);
    }

    #[test]
    fn sink_kind_parses_aliases() {
        assert_eq!("none".parse::<SinkKind>().unwrap(), SinkKind::None);
        assert_eq!(" DB ".parse::<SinkKind>().unwrap(), SinkKind::Sqlite);
        assert_eq!("webhook".parse::<SinkKind>().unwrap(), SinkKind::Sheet);
        assert!("csv".parse::<SinkKind>().is_err());
        assert_eq!(SinkKind::Sheet.to_string(), "sheet");
    }
}
