//! Scalar token parsing shared by both builders
//!
//! Source documents carry numbers as free text, sometimes with trailing
//! units or locale noise. Parsing recognizes the special tokens first, then
//! falls back to extracting the leading number; anything else is `None`.

use regex_lite::Regex;
use trf_report::{CompOp, StepStatus};

/// Parse a numeric token. "nan", "inf" and "-inf" are matched
/// case-insensitively; otherwise the first number in the text is taken.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "nan" => return Some(f64::NAN),
        "inf" => return Some(f64::INFINITY),
        "-inf" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let re = Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").unwrap();
    let matched = re.find(trimmed)?;
    match matched.as_str().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::debug!(token = %trimmed, "numeric token did not parse");
            None
        }
    }
}

/// Map a sequencer comparator word to the closed comparator set. The
/// case-sensitivity word family is collapsed first; unknown words fall back
/// to LOG.
pub fn parse_comp_op(text: &str) -> CompOp {
    let upper = text.trim().to_uppercase();
    if upper.contains("CASESENSITIVE") {
        return CompOp::CaseSensitive;
    }
    if upper.contains("IGNORECASE") {
        return CompOp::IgnoreCase;
    }
    if upper == "EQUAL" {
        return CompOp::Eq;
    }
    match CompOp::from_code(&upper) {
        Some(op) => op,
        None => {
            tracing::debug!(comparator = %text, "unknown comparator, defaulting to LOG");
            CompOp::Log
        }
    }
}

/// Parse an integer token, tolerating float-formatted text ("3.0" -> 3).
pub fn parse_int(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<i32>() {
        return Some(v);
    }
    trimmed.parse::<f64>().ok().map(|v| v as i32)
}

/// Status of a single measurement. Pass/fail measurements report boolean
/// words, multi-value measurements report the status word family.
pub fn parse_measure_status(text: &str) -> StepStatus {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "passed" => StepStatus::Passed,
        "false" | "failed" => StepStatus::Failed,
        _ => StepStatus::from_text(text),
    }
}
