//! Index over a sequencer-dump report root
//!
//! Thin wrapper locating the report-level entries of a dump document: the
//! report GUID and timestamps from `ReportInfo` attributes, the main
//! TEResult subtree (possibly behind one Array wrapper), and the UUT /
//! station info property groups.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use roxmltree::Node;
use uuid::Uuid;

use super::prop_tree::{prop_child, prop_child_of_type, PropView};

/// Index over one `TSReport`/`Report` element.
#[derive(Debug, Clone, Copy)]
pub struct DumpIndex<'a, 'input> {
    root: Node<'a, 'input>,
}

impl<'a, 'input> DumpIndex<'a, 'input> {
    pub fn new(root: Node<'a, 'input>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Node<'a, 'input> {
        self.root
    }

    /// Value of the `ReportInfo` entry with the given key attribute.
    pub fn report_info(&self, key: &str) -> Option<&'a str> {
        self.root
            .children()
            .find(|c| c.has_tag_name("ReportInfo") && c.attribute("key") == Some(key))
            .and_then(|n| n.attribute("value"))
    }

    /// The report GUID. Absent or nil ids yield a freshly generated one.
    pub fn report_id(&self) -> Uuid {
        match self.report_info("ID").and_then(|s| Uuid::parse_str(s).ok()) {
            Some(id) if !id.is_nil() => id,
            _ => Uuid::new_v4(),
        }
    }

    pub fn start(&self, fallback_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.timestamp("Start", fallback_offset)
    }

    pub fn start_utc(&self, fallback_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.timestamp("StartUTC", fallback_offset)
    }

    pub fn engine_started(&self, fallback_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.timestamp("EngineStarted", fallback_offset)
    }

    pub fn report_written(&self, fallback_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.timestamp("ReportWritten", fallback_offset)
    }

    fn timestamp(&self, key: &str, fallback_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        let text = self.report_info(key)?;
        parse_iso_datetime(text, fallback_offset)
    }

    /// The main TEResult node. Prefers a `MainSequenceResults` property;
    /// otherwise the first child Prop typed TEResult, looking one level into
    /// an Array wrapper when necessary.
    pub fn main_result(&self) -> Option<Node<'a, 'input>> {
        let candidate = prop_child(self.root, "MainSequenceResults")
            .or_else(|| prop_child_of_type(self.root, "TEResult"))
            .or_else(|| prop_child_of_type(self.root, "Array"))?;
        match candidate.attribute("Type") {
            Some("TEResult") => Some(candidate),
            Some("Array") => candidate
                .children()
                .find(|c| c.has_tag_name("Value"))
                .and_then(|v| prop_child_of_type(v, "TEResult")),
            _ => {
                // MainSequenceResults itself may be the array wrapper
                match candidate.children().find(|c| c.has_tag_name("Value")) {
                    Some(v) => prop_child_of_type(v, "TEResult"),
                    None => Some(candidate),
                }
            }
        }
    }

    pub fn uut_info(&self) -> PropView<'a, 'input> {
        PropView::new(self.root).view("UUT")
    }

    pub fn station_info(&self) -> PropView<'a, 'input> {
        PropView::new(self.root).view("StationInfo")
    }
}

/// Parse an ISO-8601 timestamp. Offset-carrying text keeps its offset;
/// naive text is localized with `fallback_offset`.
pub fn parse_iso_datetime(text: &str, fallback_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return fallback_offset.from_local_datetime(&naive).single();
        }
    }
    tracing::debug!(text = %trimmed, "timestamp did not parse");
    None
}
