//! Shared document builders for conversion tests
//!
//! Assemble sequencer-dump documents from result-value snippets so each
//! test spells out only the structure it cares about.

/// A complete TSReport dump with the given root-level ResultList values.
pub fn dump_doc(result_values: &str) -> String {
    dump_doc_with_status("Passed", result_values)
}

pub fn dump_doc_with_status(root_status: &str, result_values: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<TSReport>
  <ReportInfo key="Start" value="2025-02-25T13:40:30"/>
  <Prop Name="StationInfo" Type="Obj">
    <Prop Name="LoginName" Type="String"><Value>tech1</Value></Prop>
    <Prop Name="StationID" Type="String"><Value>LINE-1</Value></Prop>
  </Prop>
  <Prop Name="UUT" Type="Obj">
    <Prop Name="UUTPartNumber" Type="String"><Value>PN-555</Value></Prop>
    <Prop Name="SerialNumber" Type="String"><Value>SN-001</Value></Prop>
  </Prop>
  <Prop Type="TEResult" Name="MainSequenceResult">
    <Prop Name="Status" Type="String"><Value>{root_status}</Value></Prop>
    <Prop Name="TS" Type="Obj">
      <Prop Name="TotalTime" Type="Number"><Value>42.5</Value></Prop>
      <Prop Name="SequenceCall" Type="Obj">
        <Prop Name="Sequence" Type="String"><Value>MainSequence</Value></Prop>
        <Prop Name="SequenceFile" Type="String"><Value>C:\seq\main.seq</Value></Prop>
        <Prop Name="SequenceFileVersion" Type="String"><Value>2.1.0.0</Value></Prop>
        <Prop Name="ResultList" Type="Array">
{result_values}
        </Prop>
      </Prop>
    </Prop>
  </Prop>
</TSReport>"#
    )
}

/// One result-list value: the TEResult wrapper with its TS block and any
/// extra payload placed at the TEResult level.
pub fn result_value(step_type: &str, name: &str, status: &str, payload: &str) -> String {
    format!(
        r#"<Value>
  <Prop Type="TEResult" Name="r">
    <Prop Name="Status" Type="String"><Value>{status}</Value></Prop>
    <Prop Name="TS" Type="Obj">
      <Prop Name="StepType" Type="String"><Value>{step_type}</Value></Prop>
      <Prop Name="StepName" Type="String"><Value>{name}</Value></Prop>
      <Prop Name="StepGroup" Type="String"><Value>Main</Value></Prop>
      <Prop Name="TotalTime" Type="Number"><Value>0.1</Value></Prop>
    </Prop>
    {payload}
  </Prop>
</Value>"#
    )
}

pub fn boolean_step(name: &str, status: &str) -> String {
    result_value(
        "PassFailTest",
        name,
        status,
        r#"<Prop Name="PassFail" Type="Boolean"><Value>True</Value></Prop>"#,
    )
}

pub fn numeric_step(
    name: &str,
    status: &str,
    value: &str,
    comp: &str,
    low: Option<&str>,
    high: Option<&str>,
    unit: &str,
) -> String {
    let mut limits = String::new();
    if let Some(low) = low {
        limits.push_str(&format!(
            r#"<Prop Name="Low" Type="Number"><Value>{low}</Value></Prop>"#
        ));
    }
    if let Some(high) = high {
        limits.push_str(&format!(
            r#"<Prop Name="High" Type="Number"><Value>{high}</Value></Prop>"#
        ));
    }
    let payload = format!(
        r#"<Prop Name="Numeric" Type="Number"><Value>{value}</Value></Prop>
    <Prop Name="Units" Type="String"><Value>{unit}</Value></Prop>
    <Prop Name="Comp" Type="String"><Value>{comp}</Value></Prop>
    <Prop Name="Limits" Type="Obj">{limits}</Prop>"#
    );
    result_value("NumericLimitTest", name, status, &payload)
}

/// A nested sequence call whose own ResultList holds `nested` values.
pub fn sequence_call(name: &str, status: &str, nested: &str) -> String {
    format!(
        r#"<Value>
  <Prop Type="TEResult" Name="r">
    <Prop Name="Status" Type="String"><Value>{status}</Value></Prop>
    <Prop Name="TS" Type="Obj">
      <Prop Name="StepType" Type="String"><Value>SequenceCall</Value></Prop>
      <Prop Name="StepName" Type="String"><Value>{name}</Value></Prop>
      <Prop Name="StepGroup" Type="String"><Value>Main</Value></Prop>
      <Prop Name="TotalTime" Type="Number"><Value>1.0</Value></Prop>
      <Prop Name="SequenceCall" Type="Obj">
        <Prop Name="SequenceFile" Type="String"><Value>C:\seq\sub.seq</Value></Prop>
        <Prop Name="SequenceFileVersion" Type="String"><Value>1.0.0.0</Value></Prop>
        <Prop Name="ResultList" Type="Array">
{nested}
        </Prop>
      </Prop>
    </Prop>
  </Prop>
</Value>"#
    )
}
