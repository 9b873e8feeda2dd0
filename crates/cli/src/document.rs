//! Generic parsed-document model handed from the reader to the merger.
//!
//! One `Document` per input file. Descriptors carry attributes and child
//! collections exactly as they appeared in the source; all dedup and
//! sanitization decisions happen later, in the merger.

/// Kind of a result-detail entry on a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Skipped,
    Failure,
    Error,
}

impl DetailKind {
    /// All kinds, in the order they are emitted under a test case.
    pub const ALL: [DetailKind; 3] = [DetailKind::Skipped, DetailKind::Failure, DetailKind::Error];

    /// Element tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            DetailKind::Skipped => "skipped",
            DetailKind::Failure => "failure",
            DetailKind::Error => "error",
        }
    }

    /// Recognize a detail element tag.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"skipped" => Some(DetailKind::Skipped),
            b"failure" => Some(DetailKind::Failure),
            b"error" => Some(DetailKind::Error),
            _ => None,
        }
    }
}

/// A skipped/failure/error marker with a text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDetail {
    pub kind: DetailKind,
    pub text: String,
}

/// One `<testsuite>` element as parsed: attributes plus nested suites and
/// test cases in document order.
#[derive(Debug, Clone, Default)]
pub struct SuiteDescriptor {
    pub attributes: Vec<(String, String)>,
    pub suites: Vec<SuiteDescriptor>,
    pub cases: Vec<CaseDescriptor>,
}

impl SuiteDescriptor {
    /// Look up an attribute by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The suite's dedup key. `None` when the `name` attribute is missing
    /// or empty, which marks the descriptor as a nameless wrapper level.
    pub fn name(&self) -> Option<&str> {
        self.attr("name").filter(|name| !name.is_empty())
    }
}

/// One `<testcase>` element as parsed: attributes plus result details in
/// document order.
#[derive(Debug, Clone, Default)]
pub struct CaseDescriptor {
    pub attributes: Vec<(String, String)>,
    pub details: Vec<ResultDetail>,
}

impl CaseDescriptor {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The case's dedup key, if it carries a non-empty `name`.
    pub fn name(&self) -> Option<&str> {
        self.attr("name").filter(|name| !name.is_empty())
    }
}

/// One parsed input file: the suite descriptors found under the document
/// root.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub suites: Vec<SuiteDescriptor>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}
