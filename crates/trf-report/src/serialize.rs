//! JSON wire shape for report submission
//!
//! Serialization is implemented by hand over the arena: steps serialize
//! recursively through a borrowed view, so the flat node storage never
//! shows up in the payload. Absent optional fields are omitted.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::chart::Chart;
use crate::measurement::{BooleanMeasurement, NumericMeasurement, StringMeasurement};
use crate::report::{Asset, MiscInfo, Report, SubUnit};
use crate::step::StepKind;
use crate::tree::{StepId, StepTree};

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "T")?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("pn", &self.part_number)?;
        map.serialize_entry("sn", &self.serial_number)?;
        map.serialize_entry("rev", &self.revision)?;
        map.serialize_entry("processCode", &self.process_code)?;
        map.serialize_entry("result", &self.result)?;
        map.serialize_entry("stationName", &self.station_name)?;
        map.serialize_entry("location", &self.location)?;
        map.serialize_entry("purpose", &self.purpose)?;
        map.serialize_entry("start", &self.start.to_rfc3339())?;
        map.serialize_entry("uut", &UutInfoView(self))?;
        if !self.misc_info.is_empty() {
            map.serialize_entry("miscInfos", &self.misc_info)?;
        }
        if !self.sub_units.is_empty() {
            map.serialize_entry("subUnits", &self.sub_units)?;
        }
        if !self.assets.is_empty() {
            map.serialize_entry("assets", &self.assets)?;
        }
        map.serialize_entry(
            "root",
            &StepView {
                tree: self.tree(),
                id: self.root(),
            },
        )?;
        map.end()
    }
}

/// Operator/execution block nested under `uut`.
struct UutInfoView<'a>(&'a Report);

impl Serialize for UutInfoView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("operator", &report.operator)?;
        map.serialize_entry("execTime", &report.exec_time)?;
        if let Some(fixture_id) = &report.fixture_id {
            map.serialize_entry("fixtureId", fixture_id)?;
        }
        if let Some(code) = &report.error_code {
            map.serialize_entry("errorCode", code)?;
        }
        if let Some(message) = &report.error_message {
            map.serialize_entry("errorMessage", message)?;
        }
        map.end()
    }
}

impl Serialize for MiscInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("text", &self.text)?;
        map.end()
    }
}

impl Serialize for SubUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("partType", &self.part_type)?;
        map.serialize_entry("pn", &self.part_number)?;
        map.serialize_entry("sn", &self.serial_number)?;
        map.serialize_entry("rev", &self.revision)?;
        map.end()
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("sn", &self.serial_number)?;
        map.serialize_entry("usageCount", &self.usage_count)?;
        map.end()
    }
}

/// Borrowed view of one step node; serializes the subtree below it.
struct StepView<'a> {
    tree: &'a StepTree,
    id: StepId,
}

impl Serialize for StepView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("stepType", node.kind.type_code())?;
        map.serialize_entry("name", &node.name)?;
        map.serialize_entry("group", &node.group)?;
        map.serialize_entry("status", &node.status)?;
        if let Some(tot_time) = &node.tot_time {
            map.serialize_entry("totTime", tot_time)?;
        }
        if let Some(code) = &node.error_code {
            map.serialize_entry("errorCode", code)?;
        }
        if let Some(message) = &node.error_message {
            map.serialize_entry("errorMessage", message)?;
        }
        if let Some(text) = &node.report_text {
            map.serialize_entry("reportText", text)?;
        }
        match &node.kind {
            StepKind::SequenceCall(data) => {
                map.serialize_entry("seqCall", &SequenceInfoView(&data.sequence))?;
                let steps: Vec<StepView<'_>> = data
                    .children
                    .iter()
                    .map(|&id| StepView { tree: self.tree, id })
                    .collect();
                map.serialize_entry("steps", &steps)?;
            }
            StepKind::Numeric(m) => {
                map.serialize_entry("numericMeas", &[NumericView(m)])?;
            }
            StepKind::MultiNumeric(list) => {
                let views: Vec<NumericView<'_>> = list.iter().map(NumericView).collect();
                map.serialize_entry("numericMeas", &views)?;
            }
            StepKind::StringValue(m) => {
                map.serialize_entry("stringMeas", &[StringView(m)])?;
            }
            StepKind::MultiString(list) => {
                let views: Vec<StringView<'_>> = list.iter().map(StringView).collect();
                map.serialize_entry("stringMeas", &views)?;
            }
            StepKind::Boolean(m) => {
                map.serialize_entry("booleanMeas", &[BooleanView(m)])?;
            }
            StepKind::MultiBoolean(list) => {
                let views: Vec<BooleanView<'_>> = list.iter().map(BooleanView).collect();
                map.serialize_entry("booleanMeas", &views)?;
            }
            StepKind::Chart(chart) => {
                map.serialize_entry("chart", &ChartView(chart))?;
                if !chart.measurements.is_empty() {
                    let views: Vec<NumericView<'_>> =
                        chart.measurements.iter().map(NumericView).collect();
                    map.serialize_entry("numericMeas", &views)?;
                }
            }
            StepKind::MessagePopup(popup) => {
                map.serialize_entry("messagePopup", &MessagePopupView(popup))?;
            }
            StepKind::CallExe(call_exe) => {
                map.serialize_entry("callExe", &CallExeView(call_exe))?;
            }
            StepKind::Action | StepKind::Flow(_) => {}
        }
        map.end()
    }
}

struct SequenceInfoView<'a>(&'a crate::step::SequenceInfo);

impl Serialize for SequenceInfoView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("path", &self.0.path)?;
        map.serialize_entry("name", &self.0.file_name)?;
        map.serialize_entry("version", &self.0.version)?;
        map.end()
    }
}

struct NumericView<'a>(&'a NumericMeasurement);

impl Serialize for NumericView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let m = self.0;
        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &m.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry("value", &m.value)?;
        map.serialize_entry("unit", &m.unit)?;
        map.serialize_entry("compOp", &m.comp)?;
        if let Some(low) = &m.low_limit {
            map.serialize_entry("lowLimit", low)?;
        }
        if let Some(high) = &m.high_limit {
            map.serialize_entry("highLimit", high)?;
        }
        map.serialize_entry("status", &m.status)?;
        map.end()
    }
}

struct StringView<'a>(&'a StringMeasurement);

impl Serialize for StringView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let m = self.0;
        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &m.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry("value", &m.value)?;
        map.serialize_entry("compOp", &m.comp)?;
        if let Some(limit) = &m.limit {
            map.serialize_entry("limit", limit)?;
        }
        map.serialize_entry("status", &m.status)?;
        map.end()
    }
}

struct BooleanView<'a>(&'a BooleanMeasurement);

impl Serialize for BooleanView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let m = self.0;
        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &m.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry("status", &m.status)?;
        map.end()
    }
}

struct ChartView<'a>(&'a Chart);

impl Serialize for ChartView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let chart = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("chartType", &chart.chart_type)?;
        map.serialize_entry("label", &chart.label)?;
        map.serialize_entry("xLabel", &chart.x_label)?;
        map.serialize_entry("xUnit", &chart.x_unit)?;
        map.serialize_entry("yLabel", &chart.y_label)?;
        map.serialize_entry("yUnit", &chart.y_unit)?;
        let series: Vec<SeriesView<'_>> = chart.series.iter().map(SeriesView).collect();
        map.serialize_entry("series", &series)?;
        map.end()
    }
}

struct SeriesView<'a>(&'a crate::chart::ChartSeries);

impl Serialize for SeriesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.0.name)?;
        map.serialize_entry("xdata", &self.0.x_data())?;
        map.serialize_entry("ydata", &self.0.y_data())?;
        map.end()
    }
}

struct MessagePopupView<'a>(&'a crate::step::MessagePopupData);

impl Serialize for MessagePopupView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let popup = self.0;
        let mut map = serializer.serialize_map(None)?;
        if let Some(button) = &popup.button {
            map.serialize_entry("button", button)?;
        }
        if let Some(response) = &popup.response {
            map.serialize_entry("response", response)?;
        }
        map.end()
    }
}

struct CallExeView<'a>(&'a crate::step::CallExeData);

impl Serialize for CallExeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(exit_code) = &self.0.exit_code {
            map.serialize_entry("exitCode", exit_code)?;
        }
        map.end()
    }
}
