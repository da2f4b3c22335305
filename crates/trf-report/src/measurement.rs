//! Measurement payloads for value-carrying steps
//!
//! Field limits enforced here: measurement names and string values are
//! clipped to 100 characters, units to 20. Clipping is silent; over-long
//! source text is not an error.

use crate::comp::CompOp;
use crate::status::StepStatus;
use crate::text::clip;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_VALUE_LEN: usize = 100;
pub const MAX_UNIT_LEN: usize = 20;

/// One numeric measurement with limits.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericMeasurement {
    /// Measurement name; set for multi-valued steps, `None` for single ones
    pub name: Option<String>,
    /// The measured value; `None` when the source token was unparseable
    pub value: Option<f64>,
    pub unit: String,
    pub comp: CompOp,
    pub low_limit: Option<f64>,
    pub high_limit: Option<f64>,
    pub status: StepStatus,
}

impl NumericMeasurement {
    pub fn new(value: Option<f64>, unit: &str, comp: CompOp) -> Self {
        Self {
            name: None,
            value,
            unit: clip(unit, MAX_UNIT_LEN),
            comp,
            low_limit: None,
            high_limit: None,
            status: StepStatus::Passed,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(clip(name, MAX_NAME_LEN));
        self
    }

    pub fn with_limits(mut self, low: Option<f64>, high: Option<f64>) -> Self {
        self.low_limit = low;
        self.high_limit = high;
        self
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.status = status;
        self
    }

    /// Re-apply the field limits and the single-bound remap. Called on every
    /// insertion path so directly-constructed values obey the invariants too.
    pub(crate) fn normalize(&mut self) {
        self.unit = clip(&self.unit, MAX_UNIT_LEN);
        if let Some(name) = self.name.take() {
            self.name = Some(clip(&name, MAX_NAME_LEN));
        }
        // Single-bound remap: a lone upper bound under a less-than comparator
        // is stored as the low limit.
        if self.comp.is_single_upper_bound() && self.low_limit.is_none() && self.high_limit.is_some()
        {
            self.low_limit = self.high_limit.take();
        }
    }
}

/// One string measurement with an optional expected-value limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringMeasurement {
    pub name: Option<String>,
    pub value: String,
    pub comp: CompOp,
    pub limit: Option<String>,
    pub status: StepStatus,
}

impl StringMeasurement {
    pub fn new(value: &str, comp: CompOp) -> Self {
        Self {
            name: None,
            value: clip(value, MAX_VALUE_LEN),
            comp,
            limit: None,
            status: StepStatus::Passed,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(clip(name, MAX_NAME_LEN));
        self
    }

    pub fn with_limit(mut self, limit: &str) -> Self {
        self.limit = Some(clip(limit, MAX_VALUE_LEN));
        self
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn normalize(&mut self) {
        self.value = clip(&self.value, MAX_VALUE_LEN);
        if let Some(name) = self.name.take() {
            self.name = Some(clip(&name, MAX_NAME_LEN));
        }
        if let Some(limit) = self.limit.take() {
            self.limit = Some(clip(&limit, MAX_VALUE_LEN));
        }
    }
}

/// One pass/fail measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanMeasurement {
    pub name: Option<String>,
    pub status: StepStatus,
}

impl BooleanMeasurement {
    pub fn new(status: StepStatus) -> Self {
        Self { name: None, status }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(clip(name, MAX_NAME_LEN));
        self
    }

    pub(crate) fn normalize(&mut self) {
        if let Some(name) = self.name.take() {
            self.name = Some(clip(&name, MAX_NAME_LEN));
        }
    }
}
