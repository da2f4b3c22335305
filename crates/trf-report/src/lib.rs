//! Canonical hierarchical test-report model
//!
//! This crate holds the report structure the converters populate and the
//! downstream repository accepts: a [`Report`] header plus one step tree
//! rooted in a single SequenceCall. The tree is arena-backed: nodes are
//! addressed by [`StepId`] handles and children keep a non-owning handle to
//! their parent, so the hierarchy serializes and drops without cycles.
//!
//! Reports can also be hand-assembled through the `add_*` methods on
//! [`StepTree`] for synthetic-report generation.

mod chart;
mod comp;
mod measurement;
mod report;
mod serialize;
mod status;
mod step;
mod text;
mod tree;

pub use chart::{Chart, ChartSeries};
pub use comp::CompOp;
pub use measurement::{
    BooleanMeasurement, NumericMeasurement, StringMeasurement, MAX_NAME_LEN, MAX_UNIT_LEN,
    MAX_VALUE_LEN,
};
pub use report::{Asset, MiscInfo, Report, ReportHeader, SubUnit};
pub use status::{StepGroup, StepStatus, UutStatus};
pub use step::{
    CallExeData, FlowType, MessagePopupData, SequenceCallData, SequenceInfo, StepKind, StepNode,
};
pub use tree::{StepId, StepTree};
