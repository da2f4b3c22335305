//! Sequencer-dump report builder
//!
//! Walks the ResultList tree of a property-dump document depth-first,
//! left-to-right, and produces the canonical report. Each result node
//! carries a "TS" extension block naming the step type; dispatch is over
//! the closed code set below. Unknown codes are logged and skipped, never
//! silently dropped into another variant.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use roxmltree::Node;
use tracing::debug;

use trf_report::{
    CallExeData, Chart, ChartSeries, CompOp, FlowType, MessagePopupData, NumericMeasurement,
    Report, ReportHeader, SequenceInfo, StepGroup, StepId, StepStatus, StringMeasurement,
    UutStatus,
};

use super::dump::DumpIndex;
use super::prop_tree::{prop_child, prop_child_of_type, prop_child_of_type_name, PropView};
use super::value::{parse_comp_op, parse_int, parse_measure_status, parse_numeric};
use crate::config::{or_default, ConverterDefaults};

/// Fallback sequence-file version when the dump omits one.
const DEFAULT_ROOT_SEQUENCE_VERSION: &str = "1.0.0.1";

/// Step-type dispatch for the dump dialect.
enum DumpStepCode {
    SequenceCall,
    StringValue,
    MultiString,
    PassFail,
    MultiPassFail,
    NumericLimit,
    MultiNumericLimit,
    Flow(FlowType),
    MessagePopup,
    CallExecutable,
    Chart,
    Unrecognized,
}

fn classify_step_code(code: &str) -> DumpStepCode {
    match code {
        "SequenceCall" | "WATS_SeqCall" => DumpStepCode::SequenceCall,
        "StringValueTest" | "ET_SVT" => DumpStepCode::StringValue,
        "ET_MSVT" => DumpStepCode::MultiString,
        "PassFailTest" | "ET_PFT" => DumpStepCode::PassFail,
        "ET_MPFT" => DumpStepCode::MultiPassFail,
        "NumericLimitTest" | "ET_NLT" => DumpStepCode::NumericLimit,
        "NI_MultipleNumericLimitTest" | "ET_MNLT" => DumpStepCode::MultiNumericLimit,
        "MessagePopup" => DumpStepCode::MessagePopup,
        "CallExecutable" => DumpStepCode::CallExecutable,
        "WATS_XYGMNLT" => DumpStepCode::Chart,
        other => match FlowType::from_code(other) {
            Some(flow) => DumpStepCode::Flow(flow),
            None => DumpStepCode::Unrecognized,
        },
    }
}

/// Builder for the sequencer property-dump dialect.
pub struct TestStandBuilder<'c> {
    defaults: &'c ConverterDefaults,
}

impl<'c> TestStandBuilder<'c> {
    pub fn new(defaults: &'c ConverterDefaults) -> Self {
        Self { defaults }
    }

    /// Convert one located `TSReport`/`Report` element into a report.
    pub fn build(&self, report_element: Node) -> Report {
        let index = DumpIndex::new(report_element);
        let offset = self.defaults.utc_offset();
        let station_info = index.station_info();
        let uut_info = index.uut_info();

        let operator = or_default(
            station_info.get_opt_string("LoginName"),
            &self.defaults.operator,
        );
        let station_name = station_info.get_string("StationID", "");
        let location = or_default(
            station_info.get_opt_string("Location"),
            &self.defaults.location,
        );
        let purpose = or_default(
            station_info.get_opt_string("Purpose"),
            &self.defaults.purpose,
        );

        let header = ReportHeader {
            part_number: or_default(
                uut_info.get_opt_string("UUTPartNumber"),
                &self.defaults.part_number,
            ),
            serial_number: or_default(
                uut_info.get_opt_string("SerialNumber"),
                &self.defaults.serial_number,
            ),
            revision: or_default(
                uut_info.get_opt_string("UUTPartRevisionNumber"),
                &self.defaults.part_revision,
            ),
            process_code: or_default(
                uut_info.get_opt_string("UUTOperationType"),
                &self.defaults.operation_type_code,
            ),
            station_name,
            location,
            purpose,
            operator,
            start: self.start_timestamp(report_element, &index, offset),
        };

        let mut report = Report::new(header, SequenceInfo::default());
        report.id = index.report_id();
        report.fixture_id = Some(uut_info.get_string("UUT_Fixture_ID", "NA"));

        self.read_misc_records(&mut report, &uut_info);

        if let Some(main_result) = index.main_result() {
            self.read_root_result(&mut report, main_result);
        } else {
            debug!("dump document has no main TEResult; report keeps header defaults");
        }

        report.sync_result_with_root();
        let result = report.result;
        let root = report.root();
        report.tree_mut().node_mut(root).status = match result {
            UutStatus::Failed => StepStatus::Failed,
            UutStatus::Error => StepStatus::Error,
            UutStatus::Terminated => StepStatus::Terminated,
            UutStatus::Passed => StepStatus::Passed,
        };
        report
    }

    /// `Report`-rooted dumps spell the start out as StartDate/StartTime
    /// property groups; `TSReport` dumps carry it in the report info.
    fn start_timestamp(
        &self,
        report_element: Node,
        index: &DumpIndex,
        offset: FixedOffset,
    ) -> DateTime<FixedOffset> {
        let view = PropView::new(report_element);
        if report_element.has_tag_name("Report") && view.exists("StartDate") {
            let hours = view.get_int("StartTime.Hours", 0);
            let minutes = view.get_int("StartTime.Minutes", 0);
            let seconds = view.get_int("StartTime.Seconds", 0);
            let year = view.get_int("StartDate.Year", 1970);
            let month = view.get_int("StartDate.Month", 1);
            let day = view.get_int("StartDate.MonthDay", 1);
            if let Some(naive) = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
                .and_then(|d| d.and_hms_opt(hours as u32, minutes as u32, seconds as u32))
            {
                if let Some(start) = offset.from_local_datetime(&naive).single() {
                    return start;
                }
            }
            debug!("StartDate/StartTime did not form a valid timestamp");
        }
        index
            .start(offset)
            .or_else(|| index.start_utc(offset))
            .unwrap_or_else(|| epoch(offset))
    }

    /// Misc-info, sub-unit and asset records from the UUT info block.
    fn read_misc_records(&self, report: &mut Report, uut_info: &PropView) {
        let Some(misc_result) = uut_info.get("MiscUUTResult") else {
            return;
        };
        let misc = PropView::new(misc_result);

        for value in misc.values("Misc_UUT_Info") {
            let Some(obj) = prop_child_of_type(value, "Obj") else {
                continue;
            };
            let obj = PropView::new(obj);
            report.add_misc_info(
                &obj.get_string("Description", ""),
                &obj.get_string("Data_String", ""),
            );
        }

        for value in misc.values("UUT_Part_Info") {
            let Some(part) = prop_child_of_type_name(value, "ET_UUT_Part_Info") else {
                continue;
            };
            let part = PropView::new(part);
            report.add_sub_unit(
                &part.get_string("Part_Type", ""),
                &part.get_string("Part_Serial_Number", ""),
                &part.get_string("Part_Number", ""),
                &part.get_string("Part_Revision_Number", ""),
            );
        }

        for value in misc.values("Asset_Info") {
            let Some(asset) = prop_child_of_type_name(value, "WATS_Asset_Info") else {
                continue;
            };
            let asset = PropView::new(asset);
            report.add_asset(
                &asset.get_string("AssetSerialNumber", ""),
                asset.get_int("UsageCount", 0),
            );
        }
    }

    /// Root sequence identity, overall result, exec time and the step walk.
    fn read_root_result(&self, report: &mut Report, main_result: Node) {
        let root_view = PropView::new(main_result);

        let file_name = root_view.get_string("TS.SequenceCall.Sequence", "Name");
        let path = root_view.get_string("TS.SequenceCall.SequenceFile", "Path");
        let version = or_default(
            root_view.get_opt_string("TS.SequenceCall.SequenceFileVersion"),
            DEFAULT_ROOT_SEQUENCE_VERSION,
        );
        let root = report.root();
        if let Some(sequence) = report.tree_mut().sequence_mut(root) {
            *sequence = SequenceInfo::new(&file_name, &path, &version);
        }

        report.exec_time = root_view.get_double("TS.TotalTime", 0.0);
        if root_view.get_string("Status", "Passed") != "Passed" {
            report.result = UutStatus::Failed;
        }
        if let Some(code) = root_view.get_opt_string("Error.Code").as_deref().and_then(parse_int) {
            report.error_code = Some(code);
        }
        report.error_message = root_view
            .get_opt_string("Error.Msg")
            .filter(|m| !m.is_empty());

        let result_values: Vec<Node> = root_view.values("TS.SequenceCall.ResultList");
        self.add_steps(report, root, &result_values);
    }

    /// One pass over the pending result nodes of `current`, recursing into
    /// nested sequence calls.
    fn add_steps(&self, report: &mut Report, current: StepId, values: &[Node]) {
        for value in values {
            let Some(te_result) = prop_child_of_type(*value, "TEResult") else {
                continue;
            };
            let te = PropView::new(te_result);
            let status_text = te.get_string("Status", "");
            let Some(ts_node) = prop_child(te_result, "TS") else {
                continue;
            };
            let ts = PropView::new(ts_node);
            let Some(step_type) = ts.get_opt_string("StepType") else {
                continue;
            };

            let step_name = ts.get_string("StepName", "");
            let group = StepGroup::from_text(&ts.get_string("StepGroup", ""));
            let tot_time = ts
                .get_opt_string("TotalTime")
                .and_then(|t| t.parse::<f64>().ok());
            let status = StepStatus::from_text(&status_text);

            let created = match classify_step_code(&step_type) {
                DumpStepCode::SequenceCall => {
                    self.parse_sequence_call(report, current, &ts, &step_name, group, status)
                }
                DumpStepCode::StringValue => {
                    Some(self.parse_string_step(report, current, &te, &step_name, group, status))
                }
                DumpStepCode::MultiString => {
                    Some(self.parse_multi_string_step(report, current, &te, &step_name, group, status))
                }
                DumpStepCode::PassFail => Some(report.tree_mut().add_boolean_step(
                    current,
                    &step_name,
                    group,
                    status,
                )),
                DumpStepCode::MultiPassFail => {
                    Some(self.parse_multi_boolean_step(report, current, &te, &step_name, group, status))
                }
                DumpStepCode::NumericLimit => {
                    Some(self.parse_numeric_step(report, current, &te, &step_name, group, status))
                }
                DumpStepCode::MultiNumericLimit => {
                    Some(self.parse_multi_numeric_step(report, current, &te, &step_name, group, status))
                }
                DumpStepCode::Flow(flow) => Some(report.tree_mut().add_flow_step(
                    current,
                    &step_name,
                    group,
                    status,
                    flow,
                )),
                DumpStepCode::MessagePopup => {
                    let popup = MessagePopupData {
                        button: te.get_opt_string("ButtonHit").as_deref().and_then(parse_int),
                        response: te.get_opt_string("Response"),
                    };
                    Some(report.tree_mut().add_message_popup_step(
                        current, &step_name, group, status, popup,
                    ))
                }
                DumpStepCode::CallExecutable => {
                    let call_exe = CallExeData {
                        exit_code: te.get_opt_string("ExitCode").as_deref().and_then(parse_int),
                    };
                    Some(report.tree_mut().add_call_exe_step(
                        current, &step_name, group, status, call_exe,
                    ))
                }
                DumpStepCode::Chart => {
                    Some(self.parse_chart_step(report, current, &te, &step_name, group, status))
                }
                DumpStepCode::Unrecognized => {
                    debug!(step_type = %step_type, step_name = %step_name, "unrecognized step type, skipped");
                    None
                }
            };

            let Some(step_id) = created else {
                continue;
            };

            {
                let tree = report.tree_mut();
                let node = tree.node_mut(step_id);
                node.tot_time = tot_time;
                let code = te.get_opt_string("Error.Code").as_deref().and_then(parse_int);
                let message = te.get_opt_string("Error.Msg");
                node.set_error(code, message.as_deref());
                if let Some(text) = te.get_opt_string("ReportText").filter(|t| !t.is_empty()) {
                    node.report_text = Some(text);
                }
            }

            if status == StepStatus::Failed {
                report.tree_mut().mark_failed(step_id);
            }
        }
    }

    /// A nested sequence call: append, descend into its ResultList, return
    /// the cursor to the parent. Skipped calls are recorded without
    /// descending.
    fn parse_sequence_call(
        &self,
        report: &mut Report,
        current: StepId,
        ts: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> Option<StepId> {
        if status == StepStatus::Skipped {
            let id = report.tree_mut().add_sequence_call(
                current,
                step_name,
                group,
                SequenceInfo::default(),
            );
            report.tree_mut().node_mut(id).status = StepStatus::Skipped;
            return Some(id);
        }

        let seq_view = ts.view("SequenceCall");
        let path = seq_view.get_string("SequenceFile", " ");
        let version = seq_view.get_string("SequenceFileVersion", " ");
        let sequence = SequenceInfo::new("SequenceFilename.seq", &path, &version);

        let id = report
            .tree_mut()
            .add_sequence_call(current, step_name, group, sequence);
        report.tree_mut().node_mut(id).status = status;

        let nested: Vec<Node> = seq_view.values("ResultList");
        self.add_steps(report, id, &nested);
        Some(id)
    }

    fn parse_string_step(
        &self,
        report: &mut Report,
        current: StepId,
        te: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        let value = te.get_string("String", "");
        let comp = match te.get_opt_string("Comp") {
            Some(text) => parse_comp_op(&text),
            None => CompOp::Log,
        };

        let mut measurement = StringMeasurement::new(&value, comp);
        if comp != CompOp::Log {
            let limit = te.get_string("Limits.String", "");
            measurement = measurement.with_limit(&limit);
        }

        report
            .tree_mut()
            .add_string_step(current, step_name, group, status, measurement)
    }

    fn parse_multi_string_step(
        &self,
        report: &mut Report,
        current: StepId,
        te: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        let id = report
            .tree_mut()
            .add_multi_string_step(current, step_name, group, status);

        for value in te.values("Measurement") {
            let Some(obj) = prop_child_of_type(value, "Obj") else {
                continue;
            };
            let obj = PropView::new(obj);
            let comp = parse_comp_op(&obj.get_string("Comp", "LOG"));
            let mut measurement = StringMeasurement::new(&obj.get_string("StringData", ""), comp)
                .with_name(&obj.get_string("MeasName", ""))
                .with_status(parse_measure_status(&obj.get_string("Status", "")));
            match obj.get_opt_string("StringLimit") {
                Some(limit) => measurement = measurement.with_limit(&limit),
                None if comp != CompOp::Log => measurement = measurement.with_limit(""),
                None => {}
            }
            report.tree_mut().push_string_measurement(id, measurement);
        }
        id
    }

    fn parse_multi_boolean_step(
        &self,
        report: &mut Report,
        current: StepId,
        te: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        let id = report
            .tree_mut()
            .add_multi_boolean_step(current, step_name, group, status);

        for value in te.values("Measurement") {
            let Some(obj) = prop_child_of_type(value, "Obj") else {
                continue;
            };
            let obj = PropView::new(obj);
            let measurement = trf_report::BooleanMeasurement::new(parse_measure_status(
                &obj.get_string("PassFail", ""),
            ))
            .with_name(&obj.get_string("MeasName", ""));
            report.tree_mut().push_boolean_measurement(id, measurement);
        }
        id
    }

    fn parse_numeric_step(
        &self,
        report: &mut Report,
        current: StepId,
        te: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        // An unparseable reading degrades to 0.0, not an error
        let value = te
            .get_opt_string("Numeric")
            .as_deref()
            .and_then(parse_numeric)
            .unwrap_or(0.0);

        let low = te.get_opt_string("Limits.Low").as_deref().and_then(parse_numeric);
        let high = te.get_opt_string("Limits.High").as_deref().and_then(parse_numeric);
        let unit = te.get_string("Units", "");
        let comp = parse_comp_op(&te.get_string("Comp", "LOG"));

        let measurement = NumericMeasurement::new(Some(value), &unit, comp).with_limits(low, high);
        report
            .tree_mut()
            .add_numeric_step(current, step_name, group, status, measurement)
    }

    fn parse_multi_numeric_step(
        &self,
        report: &mut Report,
        current: StepId,
        te: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        let id = report
            .tree_mut()
            .add_multi_numeric_step(current, step_name, group, status);
        if status == StepStatus::Skipped {
            return id;
        }

        for value in te.values("Measurement") {
            let Some(measure_node) = prop_child_of_type_name(value, "NI_LimitMeasurement") else {
                continue;
            };
            let name = measure_node.attribute("Name").unwrap_or("");
            let measure = PropView::new(measure_node);

            let data = measure
                .get_opt_string("Data")
                .as_deref()
                .and_then(parse_numeric);
            let low = measure
                .get_opt_string("Limits.Low")
                .as_deref()
                .and_then(parse_numeric);
            let high = measure
                .get_opt_string("Limits.High")
                .as_deref()
                .and_then(parse_numeric);
            let unit = measure.get_string("Units", "");
            let comp = parse_comp_op(&measure.get_string("Comp", "LOG"));
            let measure_status = parse_measure_status(&measure.get_string("Status", ""));

            let measurement = NumericMeasurement::new(data, &unit, comp)
                .with_name(name)
                .with_limits(low, high)
                .with_status(measure_status);
            report.tree_mut().push_numeric_measurement(id, measurement);
        }
        id
    }

    fn parse_chart_step(
        &self,
        report: &mut Report,
        current: StepId,
        te: &PropView,
        step_name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        let chart_view = te.view("Chart");
        let mut chart = Chart {
            label: chart_view.get_string("ChartLabel", ""),
            chart_type: chart_view.get_string("ChartType", ""),
            x_label: chart_view.get_string("Xlabel", ""),
            y_label: chart_view.get_string("Ylabel", ""),
            x_unit: chart_view.get_string("Xunit", ""),
            y_unit: chart_view.get_string("Yunit", ""),
            series: Vec::new(),
            measurements: Vec::new(),
        };

        for plot_value in chart_view.values("Plots") {
            let Some(obj) = prop_child_of_type(plot_value, "Obj") else {
                continue;
            };
            let obj = PropView::new(obj);
            let mut series = ChartSeries::new(&obj.get_string("PlotName", ""));
            if let Some(plot_data) = obj.get("PlotData") {
                // Samples are paired by the positional index prefix of the
                // Value ID attribute: [0]... is x, [1]... is y.
                for sample in plot_data.children().filter(|c| c.has_tag_name("Value")) {
                    let Some(id_attr) = sample.attribute("ID") else {
                        continue;
                    };
                    let sample_value = sample
                        .text()
                        .and_then(parse_numeric)
                        .unwrap_or(f64::NAN);
                    if id_attr.starts_with("[0]") {
                        series.x.push(sample_value);
                    } else if id_attr.starts_with("[1]") {
                        series.y.push(sample_value);
                    }
                }
            }
            chart.series.push(series);
        }

        let id = report
            .tree_mut()
            .add_chart_step(current, step_name, group, status, chart);

        // Per-series limit measurements; a single entry is the plot's own
        // aggregate and is not copied.
        let measurements: Vec<Node> = te
            .node()
            .map(|n| {
                n.descendants()
                    .filter(|d| {
                        d.has_tag_name("Prop")
                            && d.attribute("Type") == Some("Obj")
                            && d.attribute("TypeName") == Some("NI_LimitMeasurement")
                    })
                    .collect()
            })
            .unwrap_or_default();
        if measurements.len() > 1 {
            for measure_node in measurements {
                let name = measure_node.attribute("Name").unwrap_or("");
                let measure = PropView::new(measure_node);
                let data = measure
                    .get_opt_string("Data")
                    .as_deref()
                    .and_then(parse_numeric);
                let comp = parse_comp_op(&measure.get_string("Comp", "LOG"));
                let low = measure
                    .get_opt_string("Limits.Low")
                    .as_deref()
                    .and_then(parse_numeric);
                let high = measure
                    .get_opt_string("Limits.High")
                    .as_deref()
                    .and_then(parse_numeric);
                let measure_status = parse_measure_status(&measure.get_string("Status", ""));

                let measurement = NumericMeasurement::new(data, "", comp)
                    .with_name(name)
                    .with_limits(low, high)
                    .with_status(measure_status);
                report.tree_mut().push_numeric_measurement(id, measurement);
            }
        }
        id
    }
}

fn epoch(offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::<chrono::Utc>::UNIX_EPOCH.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;
    use trf_report::StepKind;

    fn build(xml: &str) -> Report {
        let doc = Document::parse(xml).unwrap();
        let defaults = ConverterDefaults {
            timezone: Some("+01:00".to_string()),
            ..Default::default()
        };
        let builder = TestStandBuilder::new(&defaults);
        let element = doc
            .descendants()
            .find(|n| n.has_tag_name("TSReport") || n.has_tag_name("Report"))
            .unwrap();
        builder.build(element)
    }

    #[test]
    fn test_header_defaults_when_dump_is_bare() {
        let report = build("<TSReport/>");
        assert_eq!(report.part_number, "PN123");
        assert_eq!(report.serial_number, "SN123456");
        assert_eq!(report.operator, "oper");
        assert_eq!(report.location, "Drammen");
        assert_eq!(report.purpose, "Test");
        assert_eq!(report.fixture_id.as_deref(), Some("NA"));
        assert_eq!(report.result, UutStatus::Passed);
    }

    #[test]
    fn test_empty_purpose_gets_default() {
        let report = build(
            r#"<TSReport>
                 <Prop Name="StationInfo" Type="Obj">
                   <Prop Name="Purpose" Type="String"><Value></Value></Prop>
                 </Prop>
               </TSReport>"#,
        );
        assert_eq!(report.purpose, "Test");
    }

    #[test]
    fn test_station_fields_read() {
        let report = build(
            r#"<TSReport>
                 <Prop Name="StationInfo" Type="Obj">
                   <Prop Name="LoginName" Type="String"><Value>tech7</Value></Prop>
                   <Prop Name="StationID" Type="String"><Value>LINE-3</Value></Prop>
                   <Prop Name="Location" Type="String"><Value>Oslo</Value></Prop>
                 </Prop>
               </TSReport>"#,
        );
        assert_eq!(report.operator, "tech7");
        assert_eq!(report.station_name, "LINE-3");
        assert_eq!(report.location, "Oslo");
    }

    #[test]
    fn test_report_tag_start_date_time() {
        let report = build(
            r#"<Report>
                 <Prop Name="StartDate" Type="Obj">
                   <Prop Name="Year" Type="Number"><Value>2024</Value></Prop>
                   <Prop Name="Month" Type="Number"><Value>9</Value></Prop>
                   <Prop Name="MonthDay" Type="Number"><Value>28</Value></Prop>
                 </Prop>
                 <Prop Name="StartTime" Type="Obj">
                   <Prop Name="Hours" Type="Number"><Value>10</Value></Prop>
                   <Prop Name="Minutes" Type="Number"><Value>49</Value></Prop>
                   <Prop Name="Seconds" Type="Number"><Value>46</Value></Prop>
                 </Prop>
               </Report>"#,
        );
        assert_eq!(report.start.to_rfc3339(), "2024-09-28T10:49:46+01:00");
    }

    #[test]
    fn test_misc_records() {
        let report = build(
            r#"<TSReport>
                 <Prop Name="UUT" Type="Obj">
                   <Prop Name="MiscUUTResult" Type="Obj">
                     <Prop Name="Misc_UUT_Info" Type="Array">
                       <Value>
                         <Prop Type="Obj" Name="x">
                           <Prop Name="Description" Type="String"><Value>Batch</Value></Prop>
                           <Prop Name="Data_String" Type="String"><Value>B42</Value></Prop>
                         </Prop>
                       </Value>
                     </Prop>
                     <Prop Name="UUT_Part_Info" Type="Array">
                       <Value>
                         <Prop TypeName="ET_UUT_Part_Info" Type="Obj" Name="y">
                           <Prop Name="Part_Type" Type="String"><Value>PCB</Value></Prop>
                           <Prop Name="Part_Number" Type="String"><Value>ABC123</Value></Prop>
                           <Prop Name="Part_Serial_Number" Type="String"><Value>1234</Value></Prop>
                           <Prop Name="Part_Revision_Number" Type="String"><Value>1.0</Value></Prop>
                         </Prop>
                       </Value>
                     </Prop>
                     <Prop Name="Asset_Info" Type="Array">
                       <Value>
                         <Prop TypeName="WATS_Asset_Info" Type="Obj" Name="z">
                           <Prop Name="AssetSerialNumber" Type="String"><Value>739</Value></Prop>
                           <Prop Name="UsageCount" Type="Number"><Value>10</Value></Prop>
                         </Prop>
                       </Value>
                     </Prop>
                   </Prop>
                 </Prop>
               </TSReport>"#,
        );
        assert_eq!(report.misc_info.len(), 1);
        assert_eq!(report.misc_info[0].description, "Batch");
        assert_eq!(report.sub_units[0].part_number, "ABC123");
        assert_eq!(report.assets[0].usage_count, 10);
    }

    #[test]
    fn test_unrecognized_step_type_skipped() {
        let report = build(
            r#"<TSReport>
                 <Prop Type="TEResult" Name="R">
                   <Prop Name="Status" Type="String"><Value>Passed</Value></Prop>
                   <Prop Name="TS" Type="Obj">
                     <Prop Name="SequenceCall" Type="Obj">
                       <Prop Name="ResultList" Type="Array">
                         <Value>
                           <Prop Type="TEResult" Name="c0">
                             <Prop Name="Status" Type="String"><Value>Passed</Value></Prop>
                             <Prop Name="TS" Type="Obj">
                               <Prop Name="StepType" Type="String"><Value>SomeVendorThing</Value></Prop>
                               <Prop Name="StepName" Type="String"><Value>odd</Value></Prop>
                               <Prop Name="StepGroup" Type="String"><Value>Main</Value></Prop>
                               <Prop Name="TotalTime" Type="Number"><Value>0.1</Value></Prop>
                             </Prop>
                           </Prop>
                         </Value>
                       </Prop>
                     </Prop>
                   </Prop>
                 </Prop>
               </TSReport>"#,
        );
        assert!(report.tree().children(report.root()).is_empty());
    }

    #[test]
    fn test_exit_code_and_button_hit() {
        let report = build(
            r#"<TSReport>
                 <Prop Type="TEResult" Name="R">
                   <Prop Name="Status" Type="String"><Value>Passed</Value></Prop>
                   <Prop Name="TS" Type="Obj">
                     <Prop Name="SequenceCall" Type="Obj">
                       <Prop Name="ResultList" Type="Array">
                         <Value>
                           <Prop Type="TEResult" Name="c0">
                             <Prop Name="Status" Type="String"><Value>Done</Value></Prop>
                             <Prop Name="ExitCode" Type="Number"><Value>2</Value></Prop>
                             <Prop Name="TS" Type="Obj">
                               <Prop Name="StepType" Type="String"><Value>CallExecutable</Value></Prop>
                               <Prop Name="StepName" Type="String"><Value>run tool</Value></Prop>
                               <Prop Name="StepGroup" Type="String"><Value>Main</Value></Prop>
                               <Prop Name="TotalTime" Type="Number"><Value>0.5</Value></Prop>
                             </Prop>
                           </Prop>
                         </Value>
                         <Value>
                           <Prop Type="TEResult" Name="c1">
                             <Prop Name="Status" Type="String"><Value>Passed</Value></Prop>
                             <Prop Name="ButtonHit" Type="Number"><Value>1</Value></Prop>
                             <Prop Name="Response" Type="String"><Value>OK</Value></Prop>
                             <Prop Name="TS" Type="Obj">
                               <Prop Name="StepType" Type="String"><Value>MessagePopup</Value></Prop>
                               <Prop Name="StepName" Type="String"><Value>confirm</Value></Prop>
                               <Prop Name="StepGroup" Type="String"><Value>Main</Value></Prop>
                               <Prop Name="TotalTime" Type="Number"><Value>1.5</Value></Prop>
                             </Prop>
                           </Prop>
                         </Value>
                       </Prop>
                     </Prop>
                   </Prop>
                 </Prop>
               </TSReport>"#,
        );
        let tree = report.tree();
        let children = tree.children(report.root());
        assert_eq!(children.len(), 2);
        match &tree.node(children[0]).kind {
            StepKind::CallExe(data) => assert_eq!(data.exit_code, Some(2)),
            other => panic!("unexpected kind: {other:?}"),
        }
        match &tree.node(children[1]).kind {
            StepKind::MessagePopup(data) => {
                assert_eq!(data.button, Some(1));
                assert_eq!(data.response.as_deref(), Some("OK"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(tree.node(children[0]).status, StepStatus::Done);
        assert_eq!(tree.node(children[0]).tot_time, Some(0.5));
    }
}
