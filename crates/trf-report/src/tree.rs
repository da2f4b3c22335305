//! Arena-backed step tree
//!
//! Nodes live in a flat arena and reference each other by [`StepId`] handle:
//! children are ordered id lists on SequenceCall payloads, and every
//! non-root node stores its parent's handle as a plain (non-owning) id.
//! Child order is insertion order and matches source-document order.

use crate::measurement::{
    BooleanMeasurement, NumericMeasurement, StringMeasurement, MAX_NAME_LEN,
};
use crate::status::{StepGroup, StepStatus};
use crate::step::{
    CallExeData, FlowType, MessagePopupData, SequenceCallData, SequenceInfo, StepKind, StepNode,
};
use crate::text::clip;
use crate::comp::CompOp;

/// Handle of a node in a [`StepTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(u32);

impl StepId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The step hierarchy of one report. Always holds at least the root
/// SequenceCall at id 0.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTree {
    nodes: Vec<StepNode>,
}

impl StepTree {
    /// Create a tree holding only a root SequenceCall.
    pub fn new(root_name: &str, sequence: SequenceInfo) -> Self {
        let root = StepNode {
            name: clip(root_name, MAX_NAME_LEN),
            group: StepGroup::Main,
            status: StepStatus::Passed,
            tot_time: None,
            error_code: None,
            error_message: None,
            report_text: None,
            parent: None,
            kind: StepKind::SequenceCall(SequenceCallData {
                sequence,
                children: Vec::new(),
            }),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> StepId {
        StepId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: StepId) -> &StepNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: StepId) -> &mut StepNode {
        &mut self.nodes[id.index()]
    }

    /// Ordered children of a SequenceCall node; empty for leaf nodes.
    pub fn children(&self, id: StepId) -> &[StepId] {
        match &self.node(id).kind {
            StepKind::SequenceCall(data) => &data.children,
            _ => &[],
        }
    }

    /// Sequence identity of a SequenceCall node.
    pub fn sequence_mut(&mut self, id: StepId) -> Option<&mut SequenceInfo> {
        match &mut self.node_mut(id).kind {
            StepKind::SequenceCall(data) => Some(&mut data.sequence),
            _ => None,
        }
    }

    /// Append a new node under `parent`. `parent` must be a SequenceCall.
    pub fn add_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        kind: StepKind,
    ) -> StepId {
        debug_assert!(self.node(parent).kind.is_sequence_call());
        let id = StepId(self.nodes.len() as u32);
        let mut kind = kind;
        normalize_kind(&mut kind);
        self.nodes.push(StepNode {
            name: clip(name, MAX_NAME_LEN),
            group,
            status,
            tot_time: None,
            error_code: None,
            error_message: None,
            report_text: None,
            parent: Some(parent),
            kind,
        });
        if let StepKind::SequenceCall(data) = &mut self.nodes[parent.index()].kind {
            data.children.push(id);
        }
        id
    }

    /// Append a child SequenceCall and return its handle.
    pub fn add_sequence_call(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        sequence: SequenceInfo,
    ) -> StepId {
        self.add_step(
            parent,
            name,
            group,
            StepStatus::Passed,
            StepKind::SequenceCall(SequenceCallData {
                sequence,
                children: Vec::new(),
            }),
        )
    }

    /// Append a numeric limit step. A Skipped step is normalized the way the
    /// repository expects: NaN value, LOG comparator, empty unit, no limits.
    pub fn add_numeric_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        measurement: NumericMeasurement,
    ) -> StepId {
        let mut measurement = measurement;
        if status == StepStatus::Skipped {
            measurement = NumericMeasurement::new(Some(f64::NAN), "", CompOp::Log);
        }
        measurement.status = status;
        self.add_step(parent, name, group, status, StepKind::Numeric(measurement))
    }

    pub fn add_multi_numeric_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::MultiNumeric(Vec::new()))
    }

    /// Append a string value step. Skipped steps get a null value and LOG
    /// comparator.
    pub fn add_string_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        measurement: StringMeasurement,
    ) -> StepId {
        let mut measurement = measurement;
        if status == StepStatus::Skipped {
            measurement = StringMeasurement::new("Null", CompOp::Log);
        }
        measurement.status = status;
        self.add_step(parent, name, group, status, StepKind::StringValue(measurement))
    }

    pub fn add_multi_string_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::MultiString(Vec::new()))
    }

    pub fn add_boolean_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        self.add_step(
            parent,
            name,
            group,
            status,
            StepKind::Boolean(BooleanMeasurement::new(status)),
        )
    }

    pub fn add_multi_boolean_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::MultiBoolean(Vec::new()))
    }

    pub fn add_action_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::Action)
    }

    pub fn add_flow_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        flow: FlowType,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::Flow(flow))
    }

    pub fn add_chart_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        chart: crate::chart::Chart,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::Chart(chart))
    }

    pub fn add_message_popup_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        popup: MessagePopupData,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::MessagePopup(popup))
    }

    pub fn add_call_exe_step(
        &mut self,
        parent: StepId,
        name: &str,
        group: StepGroup,
        status: StepStatus,
        call_exe: CallExeData,
    ) -> StepId {
        self.add_step(parent, name, group, status, StepKind::CallExe(call_exe))
    }

    /// Append a measurement to a multi-valued or chart step. Measurement
    /// invariants (clipping, single-bound remap) are applied on insert.
    pub fn push_numeric_measurement(&mut self, step: StepId, mut m: NumericMeasurement) {
        m.normalize();
        let failed = m.status == StepStatus::Failed;
        match &mut self.node_mut(step).kind {
            StepKind::MultiNumeric(list) => list.push(m),
            StepKind::Chart(chart) => chart.measurements.push(m),
            _ => return,
        }
        if failed {
            self.mark_failed(step);
        }
    }

    pub fn push_string_measurement(&mut self, step: StepId, mut m: StringMeasurement) {
        m.normalize();
        let failed = m.status == StepStatus::Failed;
        if let StepKind::MultiString(list) = &mut self.node_mut(step).kind {
            list.push(m);
        } else {
            return;
        }
        if failed {
            self.mark_failed(step);
        }
    }

    pub fn push_boolean_measurement(&mut self, step: StepId, mut m: BooleanMeasurement) {
        m.normalize();
        let failed = m.status == StepStatus::Failed;
        if let StepKind::MultiBoolean(list) = &mut self.node_mut(step).kind {
            list.push(m);
        } else {
            return;
        }
        if failed {
            self.mark_failed(step);
        }
    }

    /// Mark a node Failed and force every ancestor up to the root to Failed.
    /// Ancestors carrying an explicit terminal status (Skipped, Terminated)
    /// keep it; propagation continues past them.
    pub fn mark_failed(&mut self, id: StepId) {
        if !self.nodes[id.index()].status.is_terminal() {
            self.nodes[id.index()].status = StepStatus::Failed;
        }
        let mut cursor = self.nodes[id.index()].parent;
        while let Some(ancestor) = cursor {
            let node = &mut self.nodes[ancestor.index()];
            if !node.status.is_terminal() {
                node.status = StepStatus::Failed;
            }
            cursor = node.parent;
        }
    }

    /// Depth-first, source-order walk over all node handles.
    pub fn walk(&self) -> Vec<StepId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

fn normalize_kind(kind: &mut StepKind) {
    match kind {
        StepKind::Numeric(m) => m.normalize(),
        StepKind::MultiNumeric(list) => list.iter_mut().for_each(NumericMeasurement::normalize),
        StepKind::StringValue(m) => m.normalize(),
        StepKind::MultiString(list) => list.iter_mut().for_each(StringMeasurement::normalize),
        StepKind::Boolean(m) => m.normalize(),
        StepKind::MultiBoolean(list) => list.iter_mut().for_each(BooleanMeasurement::normalize),
        StepKind::Chart(chart) => chart
            .measurements
            .iter_mut()
            .for_each(NumericMeasurement::normalize),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> StepTree {
        StepTree::new("MainSequence Callback", SequenceInfo::new("Name", "Path", "1.0"))
    }

    #[test]
    fn test_root_is_sequence_call() {
        let t = tree();
        assert!(t.node(t.root()).kind.is_sequence_call());
        assert_eq!(t.node(t.root()).parent, None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_child_order_is_insertion_order() {
        let mut t = tree();
        let root = t.root();
        let a = t.add_boolean_step(root, "a", StepGroup::Main, StepStatus::Passed);
        let b = t.add_boolean_step(root, "b", StepGroup::Main, StepStatus::Passed);
        let c = t.add_boolean_step(root, "c", StepGroup::Main, StepStatus::Passed);
        assert_eq!(t.children(root), &[a, b, c]);
    }

    #[test]
    fn test_parent_handles() {
        let mut t = tree();
        let root = t.root();
        let seq = t.add_sequence_call(root, "sub", StepGroup::Main, SequenceInfo::default());
        let leaf = t.add_boolean_step(seq, "leaf", StepGroup::Main, StepStatus::Passed);
        assert_eq!(t.node(seq).parent, Some(root));
        assert_eq!(t.node(leaf).parent, Some(seq));
    }

    #[test]
    fn test_name_clipped_to_hundred() {
        let mut t = tree();
        let root = t.root();
        let long = "n".repeat(150);
        let id = t.add_boolean_step(root, &long, StepGroup::Main, StepStatus::Passed);
        assert_eq!(t.node(id).name.chars().count(), 100);
    }

    #[test]
    fn test_failure_propagates_three_levels() {
        let mut t = tree();
        let root = t.root();
        let l1 = t.add_sequence_call(root, "l1", StepGroup::Main, SequenceInfo::default());
        let l2 = t.add_sequence_call(l1, "l2", StepGroup::Main, SequenceInfo::default());
        let l3 = t.add_sequence_call(l2, "l3", StepGroup::Main, SequenceInfo::default());
        let leaf = t.add_boolean_step(l3, "leaf", StepGroup::Main, StepStatus::Failed);
        t.mark_failed(leaf);
        for id in [l1, l2, l3, root] {
            assert_eq!(t.node(id).status, StepStatus::Failed);
        }
    }

    #[test]
    fn test_terminal_ancestor_keeps_status() {
        let mut t = tree();
        let root = t.root();
        let skipped = t.add_sequence_call(root, "sk", StepGroup::Main, SequenceInfo::default());
        t.node_mut(skipped).status = StepStatus::Skipped;
        let leaf = t.add_boolean_step(skipped, "leaf", StepGroup::Main, StepStatus::Failed);
        t.mark_failed(leaf);
        assert_eq!(t.node(skipped).status, StepStatus::Skipped);
        // propagation continues past the terminal ancestor
        assert_eq!(t.node(root).status, StepStatus::Failed);
    }

    #[test]
    fn test_failed_measurement_fails_step_and_ancestors() {
        let mut t = tree();
        let root = t.root();
        let step = t.add_multi_numeric_step(root, "mn", StepGroup::Main, StepStatus::Passed);
        t.push_numeric_measurement(
            step,
            NumericMeasurement::new(Some(1.0), "V", CompOp::GeLe)
                .with_name("m1")
                .with_status(StepStatus::Failed),
        );
        assert_eq!(t.node(step).status, StepStatus::Failed);
        assert_eq!(t.node(root).status, StepStatus::Failed);
    }

    #[test]
    fn test_skipped_numeric_step_normalized() {
        let mut t = tree();
        let root = t.root();
        let m = NumericMeasurement::new(Some(3.3), "V", CompOp::GeLe).with_limits(Some(1.0), Some(5.0));
        let id = t.add_numeric_step(root, "n", StepGroup::Main, StepStatus::Skipped, m);
        match &t.node(id).kind {
            StepKind::Numeric(m) => {
                assert!(m.value.unwrap().is_nan());
                assert_eq!(m.comp, CompOp::Log);
                assert_eq!(m.unit, "");
                assert_eq!(m.low_limit, None);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_remap_applied_on_insert() {
        let mut t = tree();
        let root = t.root();
        let m = NumericMeasurement::new(Some(3.0), "V", CompOp::Lt).with_limits(None, Some(4.0));
        let id = t.add_numeric_step(root, "n", StepGroup::Main, StepStatus::Passed, m);
        match &t.node(id).kind {
            StepKind::Numeric(m) => {
                assert_eq!(m.low_limit, Some(4.0));
                assert_eq!(m.high_limit, None);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_walk_depth_first_source_order() {
        let mut t = tree();
        let root = t.root();
        let s1 = t.add_sequence_call(root, "s1", StepGroup::Main, SequenceInfo::default());
        let a = t.add_boolean_step(s1, "a", StepGroup::Main, StepStatus::Passed);
        let b = t.add_boolean_step(root, "b", StepGroup::Main, StepStatus::Passed);
        assert_eq!(t.walk(), vec![root, s1, a, b]);
    }
}
