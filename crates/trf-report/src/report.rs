//! The report root: UUT identity, station context, auxiliary records, and
//! the step tree.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::status::UutStatus;
use crate::step::SequenceInfo;
use crate::tree::{StepId, StepTree};

/// Arbitrary key/value note attached to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiscInfo {
    pub description: String,
    pub text: String,
}

/// Identity of a constituent part of the UUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubUnit {
    pub part_type: String,
    pub serial_number: String,
    pub part_number: String,
    pub revision: String,
}

/// A tool or fixture used during the test, with its usage counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub serial_number: String,
    pub usage_count: i32,
}

/// Header fields required to create a report.
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub part_number: String,
    pub serial_number: String,
    pub revision: String,
    pub process_code: String,
    pub station_name: String,
    pub location: String,
    pub purpose: String,
    pub operator: String,
    pub start: DateTime<FixedOffset>,
}

/// One canonical test report: header, auxiliary records, and exactly one
/// root SequenceCall owning the step hierarchy.
#[derive(Debug, Clone)]
pub struct Report {
    /// Report GUID; generated when the source supplies none
    pub id: Uuid,
    pub part_number: String,
    pub serial_number: String,
    pub revision: String,
    pub process_code: String,
    pub station_name: String,
    pub location: String,
    pub purpose: String,
    pub operator: String,
    pub fixture_id: Option<String>,
    /// Start timestamp with its UTC offset
    pub start: DateTime<FixedOffset>,
    /// Execution time in seconds
    pub exec_time: f64,
    pub result: UutStatus,
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
    pub misc_info: Vec<MiscInfo>,
    pub sub_units: Vec<SubUnit>,
    pub assets: Vec<Asset>,
    tree: StepTree,
}

impl Report {
    /// Create a report with a freshly generated id and an empty root
    /// SequenceCall.
    pub fn new(header: ReportHeader, root_sequence: SequenceInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            part_number: header.part_number,
            serial_number: header.serial_number,
            revision: header.revision,
            process_code: header.process_code,
            station_name: header.station_name,
            location: header.location,
            purpose: header.purpose,
            operator: header.operator,
            fixture_id: None,
            start: header.start,
            exec_time: 0.0,
            result: UutStatus::Passed,
            error_code: None,
            error_message: None,
            misc_info: Vec::new(),
            sub_units: Vec::new(),
            assets: Vec::new(),
            tree: StepTree::new("MainSequence Callback", root_sequence),
        }
    }

    pub fn tree(&self) -> &StepTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut StepTree {
        &mut self.tree
    }

    /// Handle of the root SequenceCall.
    pub fn root(&self) -> StepId {
        self.tree.root()
    }

    pub fn add_misc_info(&mut self, description: &str, text: &str) {
        self.misc_info.push(MiscInfo {
            description: description.to_string(),
            text: text.to_string(),
        });
    }

    pub fn add_sub_unit(&mut self, part_type: &str, serial_number: &str, part_number: &str, revision: &str) {
        self.sub_units.push(SubUnit {
            part_type: part_type.to_string(),
            serial_number: serial_number.to_string(),
            part_number: part_number.to_string(),
            revision: revision.to_string(),
        });
    }

    pub fn add_asset(&mut self, serial_number: &str, usage_count: i32) {
        self.assets.push(Asset {
            serial_number: serial_number.to_string(),
            usage_count,
        });
    }

    /// Pull a Failed root status up into the report result. Error and
    /// Terminated results set explicitly by a builder are kept.
    pub fn sync_result_with_root(&mut self) {
        use crate::status::StepStatus;
        if self.tree.node(self.tree.root()).status == StepStatus::Failed
            && self.result == UutStatus::Passed
        {
            self.result = UutStatus::Failed;
        }
    }

    /// Structural equality ignoring the report id, for idempotence checks.
    pub fn same_content(&self, other: &Report) -> bool {
        self.part_number == other.part_number
            && self.serial_number == other.serial_number
            && self.revision == other.revision
            && self.process_code == other.process_code
            && self.station_name == other.station_name
            && self.location == other.location
            && self.purpose == other.purpose
            && self.operator == other.operator
            && self.fixture_id == other.fixture_id
            && self.start == other.start
            && self.exec_time == other.exec_time
            && self.result == other.result
            && self.error_code == other.error_code
            && self.error_message == other.error_message
            && self.misc_info == other.misc_info
            && self.sub_units == other.sub_units
            && self.assets == other.assets
            && self.tree == other.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{StepGroup, StepStatus};

    fn header() -> ReportHeader {
        ReportHeader {
            part_number: "PN123".into(),
            serial_number: "SN123456".into(),
            revision: "1.0".into(),
            process_code: "10".into(),
            station_name: "STATION01".into(),
            location: "Drammen".into(),
            purpose: "Test".into(),
            operator: "oper".into(),
            start: DateTime::parse_from_rfc3339("2025-02-25T13:40:30+01:00").unwrap(),
        }
    }

    #[test]
    fn test_new_report_has_root() {
        let r = Report::new(header(), SequenceInfo::new("Name", "Path", "1.0.0.1"));
        assert!(r.tree().node(r.root()).kind.is_sequence_call());
        assert_eq!(r.result, UutStatus::Passed);
        assert!(!r.id.is_nil());
    }

    #[test]
    fn test_sync_result_with_failed_root() {
        let mut r = Report::new(header(), SequenceInfo::default());
        let root = r.root();
        let leaf = r
            .tree_mut()
            .add_boolean_step(root, "b", StepGroup::Main, StepStatus::Failed);
        r.tree_mut().mark_failed(leaf);
        r.sync_result_with_root();
        assert_eq!(r.result, UutStatus::Failed);
    }

    #[test]
    fn test_sync_keeps_explicit_error_result() {
        let mut r = Report::new(header(), SequenceInfo::default());
        r.result = UutStatus::Error;
        let root = r.root();
        let leaf = r
            .tree_mut()
            .add_boolean_step(root, "b", StepGroup::Main, StepStatus::Failed);
        r.tree_mut().mark_failed(leaf);
        r.sync_result_with_root();
        assert_eq!(r.result, UutStatus::Error);
    }

    #[test]
    fn test_auxiliary_records_keep_order() {
        let mut r = Report::new(header(), SequenceInfo::default());
        r.add_misc_info("first", "1");
        r.add_misc_info("second", "2");
        r.add_sub_unit("PCB", "1234", "ABC123", "1.0");
        r.add_asset("73957657222", 10);
        assert_eq!(r.misc_info[0].description, "first");
        assert_eq!(r.misc_info[1].description, "second");
        assert_eq!(r.sub_units[0].part_type, "PCB");
        assert_eq!(r.assets[0].usage_count, 10);
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = Report::new(header(), SequenceInfo::default());
        let mut b = Report::new(header(), SequenceInfo::default());
        b.id = Uuid::new_v4();
        assert!(a.same_content(&b));
        b.serial_number = "OTHER".into();
        assert!(!a.same_content(&b));
    }
}
