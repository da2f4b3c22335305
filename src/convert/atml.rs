//! ATML-family report builder
//!
//! Structurally mirrors the dump builder but walks the namespace-qualified
//! `TestGroup`/`Test`/`SessionAction` element set of the IEEE test-results
//! schemas. The namespace tuple comes from the resolved schema revision.

use chrono::{DateTime, FixedOffset};
use roxmltree::{Document, Node};
use tracing::debug;

use trf_report::{
    CompOp, FlowType, MessagePopupData, NumericMeasurement, Report, ReportHeader, SequenceInfo,
    StepGroup, StepId, StepStatus, StringMeasurement,
};

use super::dump::parse_iso_datetime;
use super::namespaces::AtmlNamespaces;
use super::value::{parse_int, parse_numeric};
use crate::config::{or_default, ConverterDefaults};
use crate::error::ConvertError;

/// Builder for the ATML test-results dialect.
pub struct AtmlBuilder<'c> {
    defaults: &'c ConverterDefaults,
}

impl<'c> AtmlBuilder<'c> {
    pub fn new(defaults: &'c ConverterDefaults) -> Self {
        Self { defaults }
    }

    /// Convert a parsed ATML document into a report. Fails only when the
    /// root namespace is not a supported revision or no TestResults element
    /// exists.
    pub fn build(&self, doc: &Document) -> Result<Report, ConvertError> {
        let root = doc.root_element();
        let ns = AtmlNamespaces::resolve(root.tag_name().namespace().unwrap_or(""))?;

        let test_results = match ns.collection {
            // No collection container: the root element is TestResults
            None => root,
            Some(collection) => root
                .descendants()
                .find(|n| n.has_tag_name((collection, "TestResults")))
                .ok_or(ConvertError::ReportElementNotFound)?,
        };

        Ok(self.build_report(test_results, &ns))
    }

    fn build_report(&self, test_results: Node, ns: &AtmlNamespaces) -> Report {
        let offset = self.defaults.utc_offset();
        let result_set = find_desc(test_results, ns.results, "ResultSet");

        let part_number = self.part_number(test_results, ns);
        let serial_number = self.serial_number(test_results, ns);
        let operator = self.operator(test_results, ns);
        let station_name = self.station_name(test_results, ns);
        let sequence_name = or_default(
            result_set.and_then(|rs| rs.attribute("name")).map(String::from),
            &self.defaults.sequence_name,
        );

        let start = result_set
            .and_then(|rs| rs.attribute("startDateTime"))
            .and_then(|text| parse_iso_datetime(text, offset));
        let end = result_set
            .and_then(|rs| rs.attribute("endDateTime"))
            .and_then(|text| parse_iso_datetime(text, offset));

        let header = ReportHeader {
            part_number,
            serial_number,
            revision: self.defaults.part_revision.clone(),
            process_code: self.defaults.operation_type_code.clone(),
            station_name,
            location: self.defaults.location.clone(),
            purpose: self.defaults.purpose.clone(),
            operator,
            start: start.unwrap_or_else(|| epoch(offset)),
        };

        // The ResultSet name ahead of the '#' is the sequence-file path
        let path = sequence_name.split('#').next().unwrap_or("").to_string();
        let root_sequence =
            SequenceInfo::new(&sequence_name, &path, &self.defaults.sequence_version);

        let mut report = Report::new(header, root_sequence);
        if let (Some(start), Some(end)) = (start, end) {
            report.exec_time = exec_seconds(start, end);
        }

        if let Some(result_set) = result_set {
            let root = report.root();
            self.add_steps(&mut report, root, result_set, ns);
        } else {
            debug!("ATML document has no ResultSet; report keeps header defaults");
        }

        report.sync_result_with_root();
        report
    }

    /// One pass over the child elements of a ResultSet or TestGroup.
    fn add_steps(&self, report: &mut Report, current: StepId, element: Node, ns: &AtmlNamespaces) {
        for child in element.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "TestGroup" => self.parse_test_group(report, current, child, ns),
                "SessionAction" => self.parse_session_action(report, current, child, ns),
                "Test" => self.parse_test(report, current, child, ns),
                _ => {}
            }
        }
    }

    fn parse_test_group(
        &self,
        report: &mut Report,
        current: StepId,
        element: Node,
        ns: &AtmlNamespaces,
    ) {
        let full_name = element.attribute("name").unwrap_or("");
        let sequence_name = match element.attribute("callerName") {
            Some(caller) => caller.to_string(),
            None => full_name
                .split('#')
                .nth(1)
                .unwrap_or(full_name)
                .to_string(),
        };
        let file_path = full_name.split('#').next().unwrap_or("").to_string();

        let (_, group, tot_time) = self.step_properties(element, ns);
        let outcome = self.outcome(element, ns, "Outcome");

        let sequence = SequenceInfo::new(&file_path, &file_path, &self.defaults.sequence_version);
        let id = report
            .tree_mut()
            .add_sequence_call(current, &sequence_name, group, sequence);

        if outcome == Some(StepStatus::Skipped) {
            // Recorded but never descended into
            let node = report.tree_mut().node_mut(id);
            node.status = StepStatus::Skipped;
            node.tot_time = tot_time;
            return;
        }

        let status = outcome.unwrap_or(StepStatus::Passed);
        {
            let node = report.tree_mut().node_mut(id);
            node.status = status;
            node.tot_time = tot_time;
        }
        if status == StepStatus::Failed {
            report.tree_mut().mark_failed(id);
        }

        self.add_steps(report, id, element, ns);
    }

    fn parse_session_action(
        &self,
        report: &mut Report,
        current: StepId,
        element: Node,
        ns: &AtmlNamespaces,
    ) {
        let name = element.attribute("name").unwrap_or("");
        let (step_type, group, tot_time) = self.step_properties(element, ns);
        let status = self
            .outcome(element, ns, "ActionOutcome")
            .unwrap_or(StepStatus::Passed);

        let step_type = step_type.unwrap_or_default();
        let id = match step_type.as_str() {
            "Action" | "AdditionalResults" => Some(
                report
                    .tree_mut()
                    .add_action_step(current, name, group, status),
            ),
            "MessagePopup" => {
                let popup = MessagePopupData {
                    button: self.button_hit(element, ns),
                    response: None,
                };
                Some(report.tree_mut().add_message_popup_step(
                    current, name, group, status, popup,
                ))
            }
            other => match FlowType::from_code(other) {
                Some(flow) => Some(
                    report
                        .tree_mut()
                        .add_flow_step(current, name, group, status, flow),
                ),
                None => {
                    debug!(step_type = %other, name = %name, "unrecognized session action, skipped");
                    None
                }
            },
        };

        if let Some(id) = id {
            report.tree_mut().node_mut(id).tot_time = tot_time;
            if status == StepStatus::Failed {
                report.tree_mut().mark_failed(id);
            }
        }
    }

    fn parse_test(&self, report: &mut Report, current: StepId, element: Node, ns: &AtmlNamespaces) {
        let name = element.attribute("name").unwrap_or("");
        let (step_type, group, tot_time) = self.step_properties(element, ns);
        let status = self
            .outcome(element, ns, "Outcome")
            .unwrap_or(StepStatus::Passed);

        let step_type = step_type.unwrap_or_default();
        let id = match step_type.as_str() {
            "NumericLimitTest" => {
                let measurement = self.numeric_test_measurement(element, ns);
                Some(report.tree_mut().add_numeric_step(
                    current, name, group, status, measurement,
                ))
            }
            "PassFailTest" => Some(
                report
                    .tree_mut()
                    .add_boolean_step(current, name, group, status),
            ),
            "StringValueTest" => {
                let measurement = self.string_test_measurement(element, ns);
                Some(report.tree_mut().add_string_step(
                    current, name, group, status, measurement,
                ))
            }
            other => {
                debug!(step_type = %other, name = %name, "unrecognized test type, skipped");
                None
            }
        };

        if let Some(id) = id {
            report.tree_mut().node_mut(id).tot_time = tot_time;
            if status == StepStatus::Failed {
                report.tree_mut().mark_failed(id);
            }
        }
    }

    /// Reads the limit structure of a numeric test. The three shapes are a
    /// single bound, a bound pair, and an "Expected" value; when no limits
    /// element exists at all, the extension's log-comparator marker applies.
    fn numeric_test_measurement(&self, element: Node, ns: &AtmlNamespaces) -> NumericMeasurement {
        let mut value = None;
        let mut unit = " ".to_string();
        let mut comp = CompOp::Log;
        let mut low = None;
        let mut high = None;

        let Some(test_result) = find_child(element, ns.results, "TestResult") else {
            return NumericMeasurement::new(value, &unit, comp);
        };

        if let Some(datum) = find_child(test_result, ns.results, "TestData")
            .and_then(|td| find_child(td, ns.common, "Datum"))
        {
            value = datum.attribute("value").and_then(parse_numeric);
            unit = datum.attribute("nonStandardUnit").unwrap_or(" ").to_string();
        }

        if let Some(limits) = find_child(test_result, ns.results, "TestLimits")
            .and_then(|tl| find_child(tl, ns.results, "Limits"))
        {
            for limit in limits.children().filter(|n| n.is_element()) {
                match limit.tag_name().name() {
                    "SingleLimit" => {
                        comp = comp_from_attr(limit.attribute("comparator"));
                        low = find_child(limit, ns.common, "Datum")
                            .and_then(|d| d.attribute("value"))
                            .and_then(parse_numeric);
                    }
                    "LimitPair" => {
                        let mut pair_code = String::new();
                        let mut bounds = Vec::new();
                        for bound in limit.children().filter(|n| n.is_element()) {
                            if let Some(comparator) = bound.attribute("comparator") {
                                pair_code.push_str(comparator);
                            }
                            bounds.push(
                                find_child(bound, ns.common, "Datum")
                                    .and_then(|d| d.attribute("value"))
                                    .and_then(parse_numeric),
                            );
                        }
                        comp = comp_from_attr(Some(pair_code.as_str()));
                        low = bounds.first().copied().flatten();
                        high = bounds.get(1).copied().flatten();
                    }
                    "Expected" => {
                        comp = comp_from_attr(limit.attribute("comparator"));
                        low = find_child(limit, ns.common, "Datum")
                            .and_then(|d| d.attribute("value"))
                            .and_then(parse_numeric);
                    }
                    _ => {}
                }
            }
        } else if let Some(limit_properties) = find_child(test_result, ns.results, "Extension")
            .and_then(|ext| find_child(ext, ns.teststand, "TSLimitProperties"))
        {
            let is_log = find_child(limit_properties, ns.teststand, "IsComparisonTypeLog")
                .and_then(|n| n.attribute("value"))
                == Some("true");
            if is_log {
                comp = CompOp::Log;
            }
        }

        NumericMeasurement::new(value, &unit, comp).with_limits(low, high)
    }

    /// String tests carry their expected value in the common-namespace
    /// "Expected" form; CIEQ maps to the case-insensitive comparator.
    fn string_test_measurement(&self, element: Node, ns: &AtmlNamespaces) -> StringMeasurement {
        let mut value = String::new();
        let mut comp = CompOp::Log;
        let mut limit = None;

        let Some(test_result) = find_child(element, ns.results, "TestResult") else {
            return StringMeasurement::new(&value, comp);
        };

        if let Some(text) = find_child(test_result, ns.results, "TestData")
            .and_then(|td| find_child(td, ns.common, "Datum"))
            .and_then(|d| find_child(d, ns.common, "Value"))
            .and_then(|v| v.text())
        {
            value = text.to_string();
        }

        if let Some(expected) = find_child(test_result, ns.results, "TestLimits")
            .and_then(|tl| find_child(tl, ns.results, "Limits"))
            .and_then(|l| find_child(l, ns.common, "Expected"))
        {
            comp = match expected.attribute("comparator") {
                Some("CIEQ") => CompOp::IgnoreCase,
                other => comp_from_attr(other),
            };
            limit = find_child(expected, ns.common, "Datum")
                .and_then(|d| find_child(d, ns.common, "Value"))
                .and_then(|v| v.text())
                .map(String::from);
        }

        let mut measurement = StringMeasurement::new(&value, comp);
        if let Some(limit) = limit {
            measurement = measurement.with_limit(&limit);
        }
        measurement
    }

    /// StepType / StepGroup / TotalTime from the sequencer extension block.
    fn step_properties(
        &self,
        element: Node,
        ns: &AtmlNamespaces,
    ) -> (Option<String>, StepGroup, Option<f64>) {
        let Some(step_properties) = find_child(element, ns.results, "Extension")
            .and_then(|ext| find_child(ext, ns.teststand, "TSStepProperties"))
        else {
            return (None, StepGroup::Main, None);
        };

        let step_type = find_child(step_properties, ns.teststand, "StepType")
            .and_then(|n| n.text())
            .map(|t| t.trim().to_string());
        let group = find_child(step_properties, ns.teststand, "StepGroup")
            .and_then(|n| n.text())
            .map(|t| StepGroup::from_text(t.trim()))
            .unwrap_or_default();
        let tot_time = find_child(step_properties, ns.teststand, "TotalTime")
            .and_then(|n| n.attribute("value"))
            .and_then(|v| v.trim().parse::<f64>().ok());

        (step_type, group, tot_time)
    }

    /// The outcome code set is closed; UserDefined defers to the qualifier
    /// attribute, where only a "Skipped" qualifier resolves.
    fn outcome(&self, element: Node, ns: &AtmlNamespaces, tag: &str) -> Option<StepStatus> {
        let outcome = find_child(element, ns.results, tag)
            .or_else(|| find_desc(element, ns.results, tag))?;
        match outcome.attribute("value")? {
            "Passed" => Some(StepStatus::Passed),
            "Failed" => Some(StepStatus::Failed),
            "Error" => Some(StepStatus::Error),
            "Skipped" => Some(StepStatus::Skipped),
            "Done" => Some(StepStatus::Done),
            "Terminated" => Some(StepStatus::Terminated),
            "UserDefined" => match outcome.attribute("qualifier") {
                Some("Skipped") => Some(StepStatus::Skipped),
                qualifier => {
                    debug!(?qualifier, "unresolved UserDefined outcome");
                    None
                }
            },
            other => {
                debug!(outcome = %other, "unknown outcome value");
                None
            }
        }
    }

    fn button_hit(&self, element: Node, ns: &AtmlNamespaces) -> Option<i32> {
        find_desc(element, ns.results, "Data")
            .and_then(|data| find_child(data, ns.common, "Collection"))
            .and_then(|collection| find_child(collection, ns.common, "Item"))
            .and_then(|item| find_child(item, ns.common, "Datum"))
            .and_then(|datum| datum.attribute("value"))
            .and_then(parse_int)
    }

    fn part_number(&self, test_results: Node, ns: &AtmlNamespaces) -> String {
        let number = find_desc(test_results, ns.results, "UUT")
            .and_then(|uut| find_desc(uut, ns.common, "Definition"))
            .and_then(|def| find_desc(def, ns.common, "Identification"))
            .and_then(|ident| find_desc(ident, ns.common, "IdentificationNumbers"))
            .and_then(|nums| find_desc(nums, ns.common, "IdentificationNumber"))
            .and_then(|num| num.attribute("number"))
            .map(String::from);
        or_default(number, &self.defaults.part_number)
    }

    fn serial_number(&self, test_results: Node, ns: &AtmlNamespaces) -> String {
        let serial = find_desc(test_results, ns.results, "UUT")
            .and_then(|uut| find_desc(uut, ns.common, "SerialNumber"))
            .and_then(|n| n.text())
            .map(String::from);
        or_default(serial, &self.defaults.serial_number)
    }

    fn operator(&self, test_results: Node, ns: &AtmlNamespaces) -> String {
        let operator = find_desc(test_results, ns.results, "Personnel")
            .and_then(|p| find_desc(p, ns.results, "SystemOperator"))
            .and_then(|op| op.attribute("name"))
            .map(String::from);
        or_default(operator, &self.defaults.operator)
    }

    fn station_name(&self, test_results: Node, ns: &AtmlNamespaces) -> String {
        let station = find_desc(test_results, ns.results, "TestStation")
            .and_then(|st| find_desc(st, ns.common, "SerialNumber"))
            .and_then(|n| n.text())
            .map(String::from);
        or_default(station, &self.defaults.station_name)
    }
}

fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.has_tag_name((namespace, name)))
}

fn find_desc<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| *n != node && n.has_tag_name((namespace, name)))
}

fn comp_from_attr(attr: Option<&str>) -> CompOp {
    match attr.and_then(CompOp::from_code) {
        Some(op) => op,
        None => {
            debug!(comparator = ?attr, "unknown limit comparator, defaulting to LOG");
            CompOp::Log
        }
    }
}

fn exec_seconds(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

fn epoch(offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::<chrono::Utc>::UNIX_EPOCH.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trf_report::StepKind;

    const TR: &str = "urn:IEEE-1636.1:2011:01:TestResults";
    const TRC: &str = "urn:IEEE-1636.1:2011:01:TestResultsCollection";
    const TS: &str = "www.ni.com/TestStand/ATMLTestResults/2.0";
    const C: &str = "urn:IEEE-1671:2010:Common";

    fn doc_2011(result_set_body: &str) -> String {
        format!(
            r#"<trc:TestResultsCollection xmlns:trc="{TRC}" xmlns:tr="{TR}" xmlns:ts="{TS}" xmlns:c="{C}">
  <trc:TestResults>
    <tr:UUT>
      <c:Definition>
        <c:Identification>
          <c:IdentificationNumbers>
            <c:IdentificationNumber number="PN-900"/>
          </c:IdentificationNumbers>
        </c:Identification>
      </c:Definition>
      <c:SerialNumber>SN-777</c:SerialNumber>
    </tr:UUT>
    <tr:Personnel><tr:SystemOperator name="atml-op"/></tr:Personnel>
    <tr:TestStation><c:SerialNumber>ST-ATML</c:SerialNumber></tr:TestStation>
    <tr:ResultSet name="C:\seq\Main.seq#MainSequence" startDateTime="2024-05-02T08:00:00.000000" endDateTime="2024-05-02T08:00:12.500000">
      {result_set_body}
    </tr:ResultSet>
  </trc:TestResults>
</trc:TestResultsCollection>"#
        )
    }

    fn build(xml: &str) -> Report {
        let doc = Document::parse(xml).unwrap();
        let defaults = ConverterDefaults {
            timezone: Some("+02:00".to_string()),
            ..Default::default()
        };
        AtmlBuilder::new(&defaults).build(&doc).unwrap()
    }

    #[test]
    fn test_header_extraction() {
        let report = build(&doc_2011(""));
        assert_eq!(report.part_number, "PN-900");
        assert_eq!(report.serial_number, "SN-777");
        assert_eq!(report.operator, "atml-op");
        assert_eq!(report.station_name, "ST-ATML");
        assert_eq!(report.exec_time, 12.5);
        assert_eq!(report.start.to_rfc3339(), "2024-05-02T08:00:00+02:00");
        let root = report.root();
        match &report.tree().node(root).kind {
            StepKind::SequenceCall(data) => {
                assert_eq!(data.sequence.path, "C:\\seq\\Main.seq");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_missing_header_fields_get_defaults() {
        let xml = format!(
            r#"<trc:TestResultsCollection xmlns:trc="{TRC}" xmlns:tr="{TR}">
  <trc:TestResults>
    <tr:ResultSet name="Main.seq#Main"/>
  </trc:TestResults>
</trc:TestResultsCollection>"#
        );
        let report = build(&xml);
        assert_eq!(report.part_number, "PN123");
        assert_eq!(report.serial_number, "SN123456");
        assert_eq!(report.operator, "oper");
        assert_eq!(report.station_name, "Test Machine");
    }

    #[test]
    fn test_numeric_limit_pair() {
        let body = format!(
            r#"<tr:Test name="Voltage check">
  <tr:Extension><ts:TSStepProperties>
    <ts:StepType>NumericLimitTest</ts:StepType>
    <ts:StepGroup>Main</ts:StepGroup>
    <ts:TotalTime value="0.25"/>
  </ts:TSStepProperties></tr:Extension>
  <tr:TestResult>
    <tr:TestData><c:Datum value="3.3" nonStandardUnit="V"/></tr:TestData>
    <tr:TestLimits><tr:Limits><tr:LimitPair>
      <tr:Limit comparator="GE"><c:Datum value="3.0"/></tr:Limit>
      <tr:Limit comparator="LE"><c:Datum value="3.6"/></tr:Limit>
    </tr:LimitPair></tr:Limits></tr:TestLimits>
  </tr:TestResult>
  <tr:Outcome value="Passed"/>
</tr:Test>"#
        );
        let report = build(&doc_2011(&body));
        let tree = report.tree();
        let children = tree.children(report.root());
        assert_eq!(children.len(), 1);
        let node = tree.node(children[0]);
        assert_eq!(node.tot_time, Some(0.25));
        match &node.kind {
            StepKind::Numeric(m) => {
                assert_eq!(m.value, Some(3.3));
                assert_eq!(m.unit, "V");
                assert_eq!(m.comp, CompOp::GeLe);
                assert_eq!(m.low_limit, Some(3.0));
                assert_eq!(m.high_limit, Some(3.6));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_single_limit_under_le() {
        let body = format!(
            r#"<tr:Test name="Ripple">
  <tr:Extension><ts:TSStepProperties>
    <ts:StepType>NumericLimitTest</ts:StepType>
  </ts:TSStepProperties></tr:Extension>
  <tr:TestResult>
    <tr:TestData><c:Datum value="0.02" nonStandardUnit="V"/></tr:TestData>
    <tr:TestLimits><tr:Limits>
      <tr:SingleLimit comparator="LE"><c:Datum value="0.05"/></tr:SingleLimit>
    </tr:Limits></tr:TestLimits>
  </tr:TestResult>
  <tr:Outcome value="Passed"/>
</tr:Test>"#
        );
        let report = build(&doc_2011(&body));
        let tree = report.tree();
        match &tree.node(tree.children(report.root())[0]).kind {
            StepKind::Numeric(m) => {
                assert_eq!(m.comp, CompOp::Le);
                // single bound lands in the low limit
                assert_eq!(m.low_limit, Some(0.05));
                assert_eq!(m.high_limit, None);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_string_test_cieq() {
        let body = format!(
            r#"<tr:Test name="Firmware id">
  <tr:Extension><ts:TSStepProperties>
    <ts:StepType>StringValueTest</ts:StepType>
  </ts:TSStepProperties></tr:Extension>
  <tr:TestResult>
    <tr:TestData><c:Datum><c:Value>FW-1.2</c:Value></c:Datum></tr:TestData>
    <tr:TestLimits><tr:Limits>
      <c:Expected comparator="CIEQ"><c:Datum><c:Value>fw-1.2</c:Value></c:Datum></c:Expected>
    </tr:Limits></tr:TestLimits>
  </tr:TestResult>
  <tr:Outcome value="Passed"/>
</tr:Test>"#
        );
        let report = build(&doc_2011(&body));
        let tree = report.tree();
        match &tree.node(tree.children(report.root())[0]).kind {
            StepKind::StringValue(m) => {
                assert_eq!(m.value, "FW-1.2");
                assert_eq!(m.comp, CompOp::IgnoreCase);
                assert_eq!(m.limit.as_deref(), Some("fw-1.2"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_skipped_test_group_has_no_children() {
        let body = format!(
            r#"<tr:TestGroup name="Sub.seq#Sub" callerName="Sub">
  <tr:Test name="inner"><tr:Outcome value="Passed"/></tr:Test>
  <tr:Outcome value="UserDefined" qualifier="Skipped"/>
</tr:TestGroup>"#
        );
        let report = build(&doc_2011(&body));
        let tree = report.tree();
        let children = tree.children(report.root());
        assert_eq!(children.len(), 1);
        let group = tree.node(children[0]);
        assert_eq!(group.status, StepStatus::Skipped);
        assert!(tree.children(children[0]).is_empty());
        assert_eq!(report.result, trf_report::UutStatus::Passed);
    }

    #[test]
    fn test_failed_group_fails_report() {
        let body = format!(
            r#"<tr:TestGroup name="Sub.seq#Sub">
  <tr:Test name="inner">
    <tr:Extension><ts:TSStepProperties>
      <ts:StepType>PassFailTest</ts:StepType>
    </ts:TSStepProperties></tr:Extension>
    <tr:Outcome value="Failed"/>
  </tr:Test>
  <tr:Outcome value="Failed"/>
</tr:TestGroup>"#
        );
        let report = build(&doc_2011(&body));
        assert_eq!(report.result, trf_report::UutStatus::Failed);
        let tree = report.tree();
        assert_eq!(tree.node(tree.root()).status, StepStatus::Failed);
    }

    #[test]
    fn test_session_action_flow_step() {
        let body = format!(
            r#"<tr:SessionAction name="pause">
  <tr:Extension><ts:TSStepProperties>
    <ts:StepType>Wait</ts:StepType>
    <ts:StepGroup>Setup</ts:StepGroup>
  </ts:TSStepProperties></tr:Extension>
  <tr:ActionOutcome value="Done"/>
</tr:SessionAction>"#
        );
        let report = build(&doc_2011(&body));
        let tree = report.tree();
        let node = tree.node(tree.children(report.root())[0]);
        assert_eq!(node.status, StepStatus::Done);
        assert_eq!(node.group, StepGroup::Setup);
        assert_eq!(node.kind, StepKind::Flow(FlowType::Wait));
    }

    #[test]
    fn test_2007_document_without_collection() {
        let tr07 = "http://www.ieee.org/ATML/2007/TestResults";
        let c06 = "http://www.ieee.org/ATML/2006/Common";
        let xml = format!(
            r#"<tr:TestResults xmlns:tr="{tr07}" xmlns:c="{c06}">
  <tr:UUT><c:SerialNumber>SN-07</c:SerialNumber></tr:UUT>
  <tr:ResultSet name="Main.seq#Main"/>
</tr:TestResults>"#
        );
        let report = build(&xml);
        assert_eq!(report.serial_number, "SN-07");
    }

    #[test]
    fn test_unsupported_namespace() {
        let xml = r#"<x:TestResults xmlns:x="urn:not:a:supported:ns"/>"#;
        let doc = Document::parse(xml).unwrap();
        let defaults = ConverterDefaults::default();
        let err = AtmlBuilder::new(&defaults).build(&doc).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedNamespace { .. }));
    }
}
