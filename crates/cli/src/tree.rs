//! The typed merged tree.
//!
//! Nodes live in a flat arena and refer to each other by index, so parent
//! relationships can be walked by name lookup without back-pointers. The
//! root is implicit: an ordered list of top-level suite ids with no
//! attributes of its own.

use crate::document::ResultDetail;

/// Attributes retained verbatim regardless of position.
pub const META_ATTRIBUTES: [&str; 2] = ["name", "file"];

/// Counters subject to aggregation and the sanitization policy.
pub const NUMERIC_ATTRIBUTES: [&str; 5] = ["errors", "warnings", "failures", "skipped", "tests"];

/// Index of a node in the merge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// An attribute value, classified once at ingestion.
///
/// Numeric values keep both the verbatim source text (for output) and the
/// parsed number (for aggregation). A value is numeric iff it parses as a
/// finite `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number { raw: String, value: f64 },
}

impl AttrValue {
    /// Classify a raw attribute value.
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => AttrValue::Number {
                raw: raw.to_string(),
                value,
            },
            _ => AttrValue::Text(raw.to_string()),
        }
    }

    /// A numeric value rendered in canonical form.
    pub fn number(value: f64) -> Self {
        AttrValue::Number {
            raw: format_number(value),
            value,
        }
    }

    /// The text to serialize for this value.
    pub fn raw(&self) -> &str {
        match self {
            AttrValue::Text(raw) => raw,
            AttrValue::Number { raw, .. } => raw,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Text(_) => None,
            AttrValue::Number { value, .. } => Some(*value),
        }
    }
}

/// Render an aggregated value the way counters appear in reports:
/// integral sums print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Insertion-ordered attribute map.
///
/// Attribute counts are small, so a vector scan beats a hash map here and
/// keeps serialization order stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttrMap {
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Set a value, replacing in place or appending at the end.
    pub fn set(&mut self, key: &str, value: AttrValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Add `delta` to the numeric value stored under `key`.
    ///
    /// A missing or non-numeric current value counts as 0.
    pub fn add_number(&mut self, key: &str, delta: f64) {
        let current = self.get(key).and_then(AttrValue::as_number).unwrap_or(0.0);
        self.set(key, AttrValue::number(current + delta));
    }

    /// The non-empty `name` attribute, if any.
    pub fn name(&self) -> Option<&str> {
        self.get("name")
            .map(AttrValue::raw)
            .filter(|name| !name.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A test suite in the merged tree.
#[derive(Debug)]
pub struct SuiteNode {
    pub attrs: AttrMap,
    /// Name of the parent container at creation time (empty string under
    /// the root). Aggregation walks ancestors through this; finalization
    /// strips it.
    pub(crate) parent_name: Option<String>,
    /// Child suites and cases, in first-seen order.
    pub children: Vec<NodeId>,
}

/// A test case in the merged tree.
#[derive(Debug)]
pub struct CaseNode {
    pub attrs: AttrMap,
    pub details: Vec<ResultDetail>,
}

#[derive(Debug)]
pub enum Node {
    Suite(SuiteNode),
    Case(CaseNode),
}

impl Node {
    pub fn as_suite(&self) -> Option<&SuiteNode> {
        match self {
            Node::Suite(suite) => Some(suite),
            Node::Case(_) => None,
        }
    }

    pub fn as_case(&self) -> Option<&CaseNode> {
        match self {
            Node::Suite(_) => None,
            Node::Case(case) => Some(case),
        }
    }
}

/// The finalized merge output: arena plus the ordered top-level suite ids.
///
/// Produced by [`crate::merge::Merger::finalize`]; carries no transient
/// bookkeeping.
#[derive(Debug)]
pub struct MergedTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

impl MergedTree {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Top-level suites in first-seen order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
