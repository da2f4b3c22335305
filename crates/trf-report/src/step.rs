//! Step nodes and the closed set of step variants

use crate::chart::Chart;
use crate::measurement::{BooleanMeasurement, NumericMeasurement, StringMeasurement};
use crate::status::{StepGroup, StepStatus};
use crate::tree::StepId;

/// Flow-control step codes. The sequencer emits these as step-type strings;
/// they carry no payload beyond the common step fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    Statement,
    Wait,
    Goto,
    Label,
    If,
    ElseIf,
    Else,
    End,
    For,
    ForEach,
    While,
    DoWhile,
    Break,
    Continue,
    Select,
    Case,
}

impl FlowType {
    /// Returns the source step-type code
    pub fn code(&self) -> &'static str {
        match self {
            FlowType::Statement => "Statement",
            FlowType::Wait => "Wait",
            FlowType::Goto => "Goto",
            FlowType::Label => "Label",
            FlowType::If => "If",
            FlowType::ElseIf => "ElseIf",
            FlowType::Else => "Else",
            FlowType::End => "End",
            FlowType::For => "For",
            FlowType::ForEach => "ForEach",
            FlowType::While => "While",
            FlowType::DoWhile => "DoWhile",
            FlowType::Break => "Break",
            FlowType::Continue => "Continue",
            FlowType::Select => "Select",
            FlowType::Case => "Case",
        }
    }

    /// Parse a step-type code. Returns `None` for codes outside the set.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Statement" => FlowType::Statement,
            "Wait" => FlowType::Wait,
            "Goto" => FlowType::Goto,
            "Label" => FlowType::Label,
            "If" => FlowType::If,
            "ElseIf" => FlowType::ElseIf,
            "Else" => FlowType::Else,
            "End" => FlowType::End,
            "For" => FlowType::For,
            "ForEach" => FlowType::ForEach,
            "While" => FlowType::While,
            "DoWhile" => FlowType::DoWhile,
            "Break" => FlowType::Break,
            "Continue" => FlowType::Continue,
            "Select" => FlowType::Select,
            "Case" => FlowType::Case,
            _ => return None,
        })
    }
}

/// Identity of the sequence file a SequenceCall invokes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceInfo {
    pub file_name: String,
    pub path: String,
    pub version: String,
}

impl SequenceInfo {
    pub fn new(file_name: &str, path: &str, version: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            path: path.to_string(),
            version: version.to_string(),
        }
    }
}

/// Payload of a SequenceCall node; the only variant that owns children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceCallData {
    pub sequence: SequenceInfo,
    pub children: Vec<StepId>,
}

/// Payload of a message-popup step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePopupData {
    /// Index of the button the operator pressed
    pub button: Option<i32>,
    /// Free-text operator response
    pub response: Option<String>,
}

/// Payload of a call-executable step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallExeData {
    pub exit_code: Option<i32>,
}

/// The closed set of step variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    SequenceCall(SequenceCallData),
    Numeric(NumericMeasurement),
    MultiNumeric(Vec<NumericMeasurement>),
    StringValue(StringMeasurement),
    MultiString(Vec<StringMeasurement>),
    Boolean(BooleanMeasurement),
    MultiBoolean(Vec<BooleanMeasurement>),
    Action,
    Flow(FlowType),
    Chart(Chart),
    MessagePopup(MessagePopupData),
    CallExe(CallExeData),
}

impl StepKind {
    /// The step-type wire code the repository expects for this variant.
    pub fn type_code(&self) -> &'static str {
        match self {
            StepKind::SequenceCall(_) => "SequenceCall",
            StepKind::Numeric(_) => "NumericLimitTest",
            StepKind::MultiNumeric(_) => "NI_MultipleNumericLimitTest",
            StepKind::StringValue(_) => "StringValueTest",
            StepKind::MultiString(_) => "ET_MSVT",
            StepKind::Boolean(_) => "PassFailTest",
            StepKind::MultiBoolean(_) => "ET_MPFT",
            StepKind::Action => "Action",
            StepKind::Flow(flow) => flow.code(),
            StepKind::Chart(_) => "WATS_XYGMNLT",
            StepKind::MessagePopup(_) => "MessagePopup",
            StepKind::CallExe(_) => "CallExecutable",
        }
    }

    pub fn is_sequence_call(&self) -> bool {
        matches!(self, StepKind::SequenceCall(_))
    }
}

/// One node in the step tree. Common fields live here; the variant payload
/// is in `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepNode {
    pub name: String,
    pub group: StepGroup,
    pub status: StepStatus,
    /// Total elapsed time in seconds
    pub tot_time: Option<f64>,
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
    pub report_text: Option<String>,
    /// Handle of the owning SequenceCall; `None` only for the root
    pub parent: Option<StepId>,
    pub kind: StepKind,
}

impl StepNode {
    /// Attach an error code/message pair, ignoring empty messages.
    pub fn set_error(&mut self, code: Option<i32>, message: Option<&str>) {
        if let Some(code) = code {
            self.error_code = Some(code);
        }
        match message {
            Some(msg) if !msg.is_empty() => self.error_message = Some(msg.to_string()),
            _ => {}
        }
    }
}
