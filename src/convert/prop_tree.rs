//! Generic accessor over the sequencer "Prop/Value" property tree
//!
//! Dump documents nest properties as `<Prop Name="..."><Value>...</Value>`
//! with arbitrary depth. A [`PropView`] roots a dotted-path lookup at one
//! node; every getter resolves misses and conversion failures to the given
//! default instead of raising. Pure traversal, no mutation.

use roxmltree::Node;

/// Read-only view over one Prop subtree. A view can be rooted at an absent
/// node, in which case every lookup yields its default.
#[derive(Debug, Clone, Copy)]
pub struct PropView<'a, 'input> {
    node: Option<Node<'a, 'input>>,
}

impl<'a, 'input> PropView<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node: Some(node) }
    }

    /// A view with no backing node.
    pub fn absent() -> Self {
        Self { node: None }
    }

    pub fn is_present(&self) -> bool {
        self.node.is_some()
    }

    /// The node backing this view, if any.
    pub fn node(&self) -> Option<Node<'a, 'input>> {
        self.node
    }

    /// Resolve a dot-separated path of Prop names to the final node.
    pub fn get(&self, path: &str) -> Option<Node<'a, 'input>> {
        let mut current = self.node?;
        for segment in path.split('.') {
            match prop_child(current, segment) {
                Some(next) => current = next,
                None => {
                    tracing::debug!(path, segment, "property path segment not found");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// A sub-view rooted at `path`; absent when the path does not resolve.
    pub fn view(&self, path: &str) -> PropView<'a, 'input> {
        PropView {
            node: self.get(path),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Text of the final node's Value child, trimmed. Missing node, missing
    /// Value, and empty text all yield the default.
    pub fn get_string(&self, path: &str, default: &str) -> String {
        match self.get(path).and_then(value_text) {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => default.to_string(),
        }
    }

    /// Like [`get_string`](Self::get_string) but distinguishing absence.
    pub fn get_opt_string(&self, path: &str) -> Option<String> {
        self.get(path)
            .and_then(value_text)
            .map(|text| text.trim().to_string())
    }

    pub fn get_int(&self, path: &str, default: i32) -> i32 {
        match self.get_opt_string(path) {
            Some(text) => text
                .parse::<i32>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|v| v as i32))
                .unwrap_or(default),
            None => default,
        }
    }

    pub fn get_double(&self, path: &str, default: f64) -> f64 {
        match self.get_opt_string(path) {
            Some(text) => text.parse::<f64>().unwrap_or(default),
            None => default,
        }
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        match self.get_opt_string(path) {
            Some(text) => matches!(text.to_ascii_lowercase().as_str(), "true" | "1"),
            None => default,
        }
    }

    /// Repeated Value children of the resolved node (array/collection
    /// entries), in document order.
    pub fn values(&self, path: &str) -> Vec<Node<'a, 'input>> {
        match self.get(path) {
            Some(node) => value_children(node),
            None => Vec::new(),
        }
    }
}

/// Child `<Prop>` of `node` whose Name attribute is `name`.
pub fn prop_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.has_tag_name("Prop") && c.attribute("Name") == Some(name))
}

/// Child `<Prop>` of `node` whose Type attribute is `type_name`.
pub fn prop_child_of_type<'a, 'input>(
    node: Node<'a, 'input>,
    type_name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.has_tag_name("Prop") && c.attribute("Type") == Some(type_name))
}

/// Child `<Prop>` of `node` whose TypeName attribute is `type_name`.
pub fn prop_child_of_type_name<'a, 'input>(
    node: Node<'a, 'input>,
    type_name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.has_tag_name("Prop") && c.attribute("TypeName") == Some(type_name))
}

/// Text of the `<Value>` child of `node`.
pub fn value_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name("Value"))
        .and_then(|v| v.text())
}

/// All `<Value>` children of `node`, in document order.
pub fn value_children<'a, 'input>(node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    node.children().filter(|c| c.has_tag_name("Value")).collect()
}
