//! Limit comparison operators
//!
//! The closed set of comparator modes the repository understands, with
//! their wire codes. Pair codes (GELE, GTLT, ...) combine a low-bound and
//! a high-bound comparator.

use serde::{Deserialize, Serialize};

/// Comparison mode for a measurement against its limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompOp {
    /// Log only, no comparison
    #[default]
    #[serde(rename = "LOG")]
    Log,
    #[serde(rename = "EQ")]
    Eq,
    #[serde(rename = "NE")]
    Ne,
    #[serde(rename = "LT")]
    Lt,
    #[serde(rename = "LE")]
    Le,
    #[serde(rename = "GT")]
    Gt,
    #[serde(rename = "GE")]
    Ge,
    #[serde(rename = "GTLT")]
    GtLt,
    #[serde(rename = "GELE")]
    GeLe,
    #[serde(rename = "GELT")]
    GeLt,
    #[serde(rename = "GTLE")]
    GtLe,
    #[serde(rename = "LTGT")]
    LtGt,
    #[serde(rename = "LEGE")]
    LeGe,
    #[serde(rename = "LEGT")]
    LeGt,
    #[serde(rename = "LTGE")]
    LtGe,
    /// Case-sensitive string equality
    #[serde(rename = "CASESENSIT")]
    CaseSensitive,
    /// Case-insensitive string equality
    #[serde(rename = "IGNORECASE")]
    IgnoreCase,
}

impl CompOp {
    /// Returns the wire code for this comparator
    pub fn code(&self) -> &'static str {
        match self {
            CompOp::Log => "LOG",
            CompOp::Eq => "EQ",
            CompOp::Ne => "NE",
            CompOp::Lt => "LT",
            CompOp::Le => "LE",
            CompOp::Gt => "GT",
            CompOp::Ge => "GE",
            CompOp::GtLt => "GTLT",
            CompOp::GeLe => "GELE",
            CompOp::GeLt => "GELT",
            CompOp::GtLe => "GTLE",
            CompOp::LtGt => "LTGT",
            CompOp::LeGe => "LEGE",
            CompOp::LeGt => "LEGT",
            CompOp::LtGe => "LTGE",
            CompOp::CaseSensitive => "CASESENSIT",
            CompOp::IgnoreCase => "IGNORECASE",
        }
    }

    /// Parse a wire code. Returns `None` for codes outside the closed set.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "LOG" => CompOp::Log,
            "EQ" => CompOp::Eq,
            "NE" => CompOp::Ne,
            "LT" => CompOp::Lt,
            "LE" => CompOp::Le,
            "GT" => CompOp::Gt,
            "GE" => CompOp::Ge,
            "GTLT" => CompOp::GtLt,
            "GELE" => CompOp::GeLe,
            "GELT" => CompOp::GeLt,
            "GTLE" => CompOp::GtLe,
            "LTGT" => CompOp::LtGt,
            "LEGE" => CompOp::LeGe,
            "LEGT" => CompOp::LeGt,
            "LTGE" => CompOp::LtGe,
            "CASESENSIT" => CompOp::CaseSensitive,
            "IGNORECASE" => CompOp::IgnoreCase,
            _ => return None,
        })
    }

    /// True for comparators that check a single upper bound. When a source
    /// document supplies only a high limit for one of these, the bound is
    /// stored as the low limit (the repository reads the single bound there).
    pub fn is_single_upper_bound(&self) -> bool {
        matches!(self, CompOp::Lt | CompOp::Le)
    }
}

impl std::fmt::Display for CompOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
