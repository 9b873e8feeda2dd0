pub mod cli;
pub mod discover;
pub mod document;
pub mod error;
pub mod merge;
pub mod reader;
pub mod tree;
pub mod writer;

pub use cli::{Cli, Command, MergeArgs};
pub use document::{CaseDescriptor, DetailKind, Document, ResultDetail, SuiteDescriptor};
pub use error::{Error, ExitCode, Result};
pub use merge::Merger;
pub use tree::{AttrMap, AttrValue, MergedTree, Node, NodeId};
