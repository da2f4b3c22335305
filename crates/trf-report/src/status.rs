//! Status and grouping codes
//!
//! Single-letter wire codes are what the downstream repository accepts;
//! the enums here keep the closed sets explicit.

use serde::{Deserialize, Serialize};

/// Execution status of a step or a single measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    #[serde(rename = "P")]
    Passed,
    #[serde(rename = "F")]
    Failed,
    #[serde(rename = "S")]
    Skipped,
    #[serde(rename = "T")]
    Terminated,
    #[serde(rename = "D")]
    Done,
    #[serde(rename = "E")]
    Error,
}

impl StepStatus {
    /// Returns the single-letter wire code
    pub fn code(&self) -> &'static str {
        match self {
            StepStatus::Passed => "P",
            StepStatus::Failed => "F",
            StepStatus::Skipped => "S",
            StepStatus::Terminated => "T",
            StepStatus::Done => "D",
            StepStatus::Error => "E",
        }
    }

    /// Map a sequencer status word ("Passed", "Failed", ...) to a status.
    /// Unknown words map to Passed.
    pub fn from_text(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "failed" => StepStatus::Failed,
            "skipped" => StepStatus::Skipped,
            "terminated" => StepStatus::Terminated,
            "done" => StepStatus::Done,
            "error" => StepStatus::Error,
            _ => StepStatus::Passed,
        }
    }

    /// Terminal statuses are never overwritten by failure propagation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Skipped | StepStatus::Terminated)
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Overall result of a whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UutStatus {
    #[serde(rename = "P")]
    Passed,
    #[serde(rename = "F")]
    Failed,
    #[serde(rename = "E")]
    Error,
    #[serde(rename = "T")]
    Terminated,
}

impl UutStatus {
    pub fn code(&self) -> &'static str {
        match self {
            UutStatus::Passed => "P",
            UutStatus::Failed => "F",
            UutStatus::Error => "E",
            UutStatus::Terminated => "T",
        }
    }
}

impl std::fmt::Display for UutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which execution group a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepGroup {
    #[serde(rename = "S")]
    Setup,
    #[serde(rename = "C")]
    Cleanup,
    #[default]
    #[serde(rename = "M")]
    Main,
}

impl StepGroup {
    pub fn code(&self) -> &'static str {
        match self {
            StepGroup::Setup => "S",
            StepGroup::Cleanup => "C",
            StepGroup::Main => "M",
        }
    }

    /// Map a sequencer group word to a group; anything but Setup/Cleanup is Main.
    pub fn from_text(text: &str) -> Self {
        match text {
            "Setup" => StepGroup::Setup,
            "Cleanup" => StepGroup::Cleanup,
            _ => StepGroup::Main,
        }
    }
}
