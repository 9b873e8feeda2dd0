//! XML serialization of the merged tree.
//!
//! Writes the finalized tree as an indented JUnit-style document rooted at
//! `<testsuites>`. Missing parent directories of the output path are
//! created on the way.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};
use crate::tree::{MergedTree, Node, NodeId};

/// Serialize `tree` to `path`.
pub fn write_tree(tree: &MergedTree, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let file = File::create(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);
    write_document(&mut writer, tree)?;

    let mut inner = writer.into_inner();
    inner.flush().map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Serialize `tree` to any writer. Split out for tests.
pub fn write_document<W: Write>(writer: &mut Writer<W>, tree: &MergedTree) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if tree.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("testsuites")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("testsuites")))?;
    for &id in tree.roots() {
        write_node(writer, tree, id)?;
    }
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, tree: &MergedTree, id: NodeId) -> Result<()> {
    match tree.node(id) {
        Node::Suite(suite) => {
            let mut start = BytesStart::new("testsuite");
            for (key, value) in suite.attrs.iter() {
                start.push_attribute((key, value.raw()));
            }
            if suite.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for &child in &suite.children {
                    write_node(writer, tree, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
            }
        }
        Node::Case(case) => {
            let mut start = BytesStart::new("testcase");
            for (key, value) in case.attrs.iter() {
                start.push_attribute((key, value.raw()));
            }
            if case.details.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for detail in &case.details {
                    let tag = detail.kind.tag();
                    if detail.text.is_empty() {
                        writer.write_event(Event::Empty(BytesStart::new(tag)))?;
                    } else {
                        writer.write_event(Event::Start(BytesStart::new(tag)))?;
                        writer.write_event(Event::Text(BytesText::new(&detail.text)))?;
                        writer.write_event(Event::End(BytesEnd::new(tag)))?;
                    }
                }
                writer.write_event(Event::End(BytesEnd::new("testcase")))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
