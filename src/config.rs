//! Converter configuration
//!
//! A fixed table of default values substituted whenever a source document
//! omits the corresponding field. Supplied once at converter construction
//! and immutable thereafter; the CLI can load overrides from a TOML file.

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Default values for fields a source document may omit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterDefaults {
    pub operator: String,
    pub operation_type_code: String,
    pub part_number: String,
    pub serial_number: String,
    pub part_revision: String,
    pub sequence_name: String,
    pub sequence_version: String,
    pub station_name: String,
    /// UTC-offset string such as "+02:00"; absent or invalid falls back to
    /// the system-local offset
    pub timezone: Option<String>,
    pub location: String,
    pub purpose: String,
}

impl Default for ConverterDefaults {
    fn default() -> Self {
        Self {
            operator: "oper".to_string(),
            operation_type_code: "10".to_string(),
            part_number: "PN123".to_string(),
            serial_number: "SN123456".to_string(),
            part_revision: "1.0".to_string(),
            sequence_name: "Sequence Name".to_string(),
            sequence_version: "1.0.0.0".to_string(),
            station_name: "Test Machine".to_string(),
            timezone: None,
            location: "Drammen".to_string(),
            purpose: "Test".to_string(),
        }
    }
}

impl ConverterDefaults {
    /// Load defaults from a TOML file; fields absent in the file keep their
    /// built-in values.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("config error: {}", e)))
    }

    /// The UTC offset used to localize naive source timestamps.
    pub fn utc_offset(&self) -> FixedOffset {
        if let Some(tz) = &self.timezone {
            match tz.parse::<FixedOffset>() {
                Ok(offset) => return offset,
                Err(e) => {
                    tracing::warn!(timezone = %tz, error = %e, "invalid timezone, using local offset");
                }
            }
        }
        Local::now().offset().fix()
    }
}

/// The one canonical absent-or-empty fallback: returns `value` unless it is
/// missing or blank, in which case `default` wins.
pub fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let d = ConverterDefaults::default();
        assert_eq!(d.operator, "oper");
        assert_eq!(d.operation_type_code, "10");
        assert_eq!(d.part_number, "PN123");
        assert_eq!(d.sequence_version, "1.0.0.0");
        assert_eq!(d.timezone, None);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let d: ConverterDefaults =
            toml::from_str("operator = \"line3\"\nlocation = \"Oslo\"").unwrap();
        assert_eq!(d.operator, "line3");
        assert_eq!(d.location, "Oslo");
        // untouched fields keep their built-ins
        assert_eq!(d.part_number, "PN123");
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(Some("x".into()), "d"), "x");
        assert_eq!(or_default(Some("".into()), "d"), "d");
        assert_eq!(or_default(Some("   ".into()), "d"), "d");
        assert_eq!(or_default(None, "d"), "d");
    }

    #[test]
    fn test_utc_offset_parses_fixed_offset() {
        let d = ConverterDefaults {
            timezone: Some("+02:00".to_string()),
            ..Default::default()
        };
        assert_eq!(d.utc_offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_invalid_timezone_falls_back_to_local() {
        let d = ConverterDefaults {
            timezone: Some("Not/AZone".to_string()),
            ..Default::default()
        };
        let local = Local::now().offset().fix();
        assert_eq!(d.utc_offset(), local);
    }
}
