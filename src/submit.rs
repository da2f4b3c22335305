//! Report submission boundary
//!
//! The bridge produces the repository's JSON payload; transport lives in
//! the caller. [`ReportSink`] is the seam an HTTP client (or anything else)
//! implements, and [`JsonWriter`] is the built-in sink the CLI uses to land
//! payloads on disk or stdout.

use std::io::Write;

use trf_report::Report;

/// Submission failure at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("submission I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a report to the repository's JSON document.
pub fn payload(report: &Report) -> Result<String, SubmitError> {
    Ok(serde_json::to_string(report)?)
}

/// Pretty-printed variant of [`payload`], for humans.
pub fn payload_pretty(report: &Report) -> Result<String, SubmitError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Anything that accepts finished reports.
pub trait ReportSink {
    fn submit(&mut self, report: &Report) -> Result<(), SubmitError>;
}

/// Sink writing each report's JSON payload to a writer.
pub struct JsonWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl<W: Write> ReportSink for JsonWriter<W> {
    fn submit(&mut self, report: &Report) -> Result<(), SubmitError> {
        let json = if self.pretty {
            payload_pretty(report)?
        } else {
            payload(report)?
        };
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use trf_report::{ReportHeader, SequenceInfo};

    fn report() -> Report {
        Report::new(
            ReportHeader {
                part_number: "PN1".into(),
                serial_number: "SN1".into(),
                revision: "A".into(),
                process_code: "10".into(),
                station_name: "ST".into(),
                location: "L".into(),
                purpose: "P".into(),
                operator: "op".into(),
                start: DateTime::parse_from_rfc3339("2025-01-01T00:00:00+00:00").unwrap(),
            },
            SequenceInfo::default(),
        )
    }

    #[test]
    fn test_payload_is_json() {
        let json = payload(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pn"], "PN1");
    }

    #[test]
    fn test_json_writer_sink() {
        let mut out = Vec::new();
        JsonWriter::new(&mut out).submit(&report()).unwrap();
        assert!(out.ends_with(b"\n"));
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["sn"], "SN1");
    }
}
