//! Tree merge and metric aggregation.
//!
//! The merge context folds parsed documents one at a time into an
//! arena-backed tree. Suites and test cases share a single name registry
//! spanning the whole tree: the first occurrence of a name wins, wherever
//! it appeared. A suite seen again folds new children into the existing
//! node; a test case seen again is dropped outright.
//!
//! Numeric test-case attributes propagate additively up the ancestor
//! chain, so suite counters are derived from the cases below them rather
//! than trusted from the input.

use std::collections::HashMap;

use crate::document::{CaseDescriptor, DetailKind, Document, SuiteDescriptor};
use crate::tree::{
    AttrMap, AttrValue, CaseNode, META_ATTRIBUTES, MergedTree, NUMERIC_ATTRIBUTES, Node, NodeId,
    SuiteNode,
};

/// Whether a suite attribute keeps its reported value at this position.
///
/// Top-level suites keep only the meta attributes; nested suites may also
/// seed the five counters from their own reported totals. Everything else
/// is forced to zero so counters come out of aggregation alone.
fn attribute_allowed(key: &str, top_level: bool) -> bool {
    META_ATTRIBUTES.contains(&key) || (!top_level && NUMERIC_ATTRIBUTES.contains(&key))
}

/// One merge invocation: the growing tree plus the global name registry.
///
/// Two states, one-way: accumulating while documents are folded in, then
/// finalized by [`Merger::finalize`], which consumes the context.
#[derive(Debug, Default)]
pub struct Merger {
    nodes: Vec<Node>,
    registry: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed document into the tree.
    pub fn fold(&mut self, document: &Document) {
        self.merge_suite_group(None, &document.suites);
    }

    /// Strip transient bookkeeping and hand over the finished tree.
    pub fn finalize(mut self) -> MergedTree {
        for node in &mut self.nodes {
            if let Node::Suite(suite) = node {
                suite.parent_name = None;
            }
        }
        MergedTree {
            nodes: self.nodes,
            roots: self.roots,
        }
    }

    /// Fold a group of suite descriptors into `parent` (`None` = root).
    fn merge_suite_group(&mut self, parent: Option<NodeId>, descriptors: &[SuiteDescriptor]) {
        for descriptor in descriptors {
            let Some(name) = descriptor.name() else {
                // Nameless wrapper level: some serializations wrap a lone
                // child suite in an unnamed element. Flatten it into the
                // same parent.
                self.merge_suite_group(parent, &descriptor.suites);
                continue;
            };

            let id = match self.registry.get(name) {
                Some(&existing) => {
                    if self.nodes[existing.0].as_suite().is_none() {
                        // Name already taken by a test case; there is no
                        // suite to fold into.
                        continue;
                    }
                    existing
                }
                None => self.create_suite(parent, descriptor, name),
            };

            self.merge_suite_group(Some(id), &descriptor.suites);
            self.merge_test_cases(id, &descriptor.cases);
        }
    }

    fn create_suite(
        &mut self,
        parent: Option<NodeId>,
        descriptor: &SuiteDescriptor,
        name: &str,
    ) -> NodeId {
        let parent_name = parent
            .and_then(|id| self.nodes[id.0].as_suite())
            .and_then(|suite| suite.attrs.name())
            .unwrap_or("")
            .to_string();

        let top_level = parent.is_none();
        let mut attrs = AttrMap::default();
        for (key, raw) in &descriptor.attributes {
            if attribute_allowed(key, top_level) {
                attrs.set(key, AttrValue::classify(raw));
            } else {
                attrs.set(key, AttrValue::number(0.0));
            }
        }

        let id = self.push(Node::Suite(SuiteNode {
            attrs,
            parent_name: Some(parent_name),
            children: Vec::new(),
        }));
        self.attach(parent, id);
        self.registry.insert(name.to_string(), id);
        id
    }

    /// Fold a group of test-case descriptors into `parent`.
    fn merge_test_cases(&mut self, parent: NodeId, descriptors: &[CaseDescriptor]) {
        for descriptor in descriptors {
            let Some(name) = descriptor.name() else {
                continue;
            };
            if self.registry.contains_key(name) {
                // First occurrence won; later duplicates contribute
                // nothing, not even their numbers.
                continue;
            }

            let mut attrs = AttrMap::default();
            for (key, raw) in &descriptor.attributes {
                let value = AttrValue::classify(raw);
                if let AttrValue::Number { value: delta, .. } = value {
                    self.aggregate(parent, key, delta);
                }
                attrs.set(key, value);
            }

            // Details are emitted kind-major, preserving item order within
            // each kind.
            let mut details = Vec::new();
            for kind in DetailKind::ALL {
                details.extend(
                    descriptor
                        .details
                        .iter()
                        .filter(|detail| detail.kind == kind)
                        .cloned(),
                );
            }

            let id = self.push(Node::Case(CaseNode { attrs, details }));
            self.attach(Some(parent), id);
            self.registry.insert(name.to_string(), id);
        }
    }

    /// Add `delta` to `key` on the suite and every resolvable ancestor.
    ///
    /// The walk stops at a suite whose recorded parent name does not
    /// resolve to a suite in the registry; top-level suites record the
    /// root's empty name, which never resolves.
    fn aggregate(&mut self, start: NodeId, key: &str, delta: f64) {
        let mut current = Some(start);
        while let Some(id) = current {
            let Node::Suite(suite) = &mut self.nodes[id.0] else {
                break;
            };
            suite.attrs.add_number(key, delta);
            current = suite
                .parent_name
                .as_deref()
                .and_then(|parent| self.registry.get(parent).copied());
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, parent: Option<NodeId>, id: NodeId) {
        match parent {
            Some(pid) => {
                if let Node::Suite(suite) = &mut self.nodes[pid.0] {
                    suite.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
