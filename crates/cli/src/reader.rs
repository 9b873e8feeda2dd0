//! Per-file document parsing.
//!
//! Turns one JUnit-style XML file into the generic [`Document`] structure
//! the merger consumes. Any fault here is per-file: the caller skips the
//! file and moves on.
//!
//! The document root is treated loosely: a `<testsuites>` container (or
//! any unrecognized wrapper) contributes its `<testsuite>` descendants; a
//! bare `<testsuite>` root is a single-suite document.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::document::{CaseDescriptor, DetailKind, Document, ResultDetail, SuiteDescriptor};
use crate::error::{Error, Result};

/// Parse one input file into a [`Document`].
pub fn read_document(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(&bytes)
}

/// Parse a serialized document from memory.
pub fn parse_document(bytes: &[u8]) -> Result<Document> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);

    let mut suites = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) if tag.name().as_ref() == b"testsuite" => {
                let attributes = attributes_of(&tag)?;
                suites.push(parse_suite(&mut reader, attributes)?);
            }
            Event::Empty(tag) if tag.name().as_ref() == b"testsuite" => {
                suites.push(SuiteDescriptor {
                    attributes: attributes_of(&tag)?,
                    ..SuiteDescriptor::default()
                });
            }
            Event::Eof => break,
            // Wrapper elements (`testsuites` or anything unknown at this
            // level) are descended into looking for suites.
            _ => {}
        }
        buf.clear();
    }

    Ok(Document { suites })
}

/// Parse the body of a `<testsuite>` whose start tag was just consumed.
fn parse_suite(
    reader: &mut Reader<&[u8]>,
    attributes: Vec<(String, String)>,
) -> Result<SuiteDescriptor> {
    let mut suite = SuiteDescriptor {
        attributes,
        ..SuiteDescriptor::default()
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) => match tag.name().as_ref() {
                b"testsuite" => {
                    let attributes = attributes_of(&tag)?;
                    suite.suites.push(parse_suite(reader, attributes)?);
                }
                b"testcase" => {
                    let attributes = attributes_of(&tag)?;
                    suite.cases.push(parse_case(reader, attributes)?);
                }
                // `properties`, `system-out` and friends carry nothing the
                // merge uses.
                _ => skip_element(reader, &tag)?,
            },
            Event::Empty(tag) => match tag.name().as_ref() {
                b"testsuite" => suite.suites.push(SuiteDescriptor {
                    attributes: attributes_of(&tag)?,
                    ..SuiteDescriptor::default()
                }),
                b"testcase" => suite.cases.push(CaseDescriptor {
                    attributes: attributes_of(&tag)?,
                    ..CaseDescriptor::default()
                }),
                _ => {}
            },
            Event::End(tag) if tag.name().as_ref() == b"testsuite" => break,
            Event::Eof => return Err(Error::UnexpectedEof),
            _ => {}
        }
        buf.clear();
    }
    Ok(suite)
}

/// Parse the body of a `<testcase>` whose start tag was just consumed.
fn parse_case(
    reader: &mut Reader<&[u8]>,
    attributes: Vec<(String, String)>,
) -> Result<CaseDescriptor> {
    let mut case = CaseDescriptor {
        attributes,
        ..CaseDescriptor::default()
    };
    let mut buf = Vec::new();
    let mut current: Option<(DetailKind, String)> = None;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) => match DetailKind::from_tag(tag.name().as_ref()) {
                Some(kind) if current.is_none() => current = Some((kind, String::new())),
                _ => skip_element(reader, &tag)?,
            },
            Event::Empty(tag) => {
                if let Some(kind) = DetailKind::from_tag(tag.name().as_ref()) {
                    if current.is_none() {
                        case.details.push(ResultDetail {
                            kind,
                            text: String::new(),
                        });
                    }
                }
            }
            Event::Text(text) => {
                if let Some((_, payload)) = current.as_mut() {
                    payload.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some((_, payload)) = current.as_mut() {
                    payload.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(tag) => {
                if DetailKind::from_tag(tag.name().as_ref()).is_some() {
                    if let Some((kind, text)) = current.take() {
                        case.details.push(ResultDetail { kind, text });
                    }
                } else if tag.name().as_ref() == b"testcase" {
                    break;
                }
            }
            Event::Eof => return Err(Error::UnexpectedEof),
            _ => {}
        }
        buf.clear();
    }
    Ok(case)
}

/// Skip an element and everything inside it.
fn skip_element(reader: &mut Reader<&[u8]>, tag: &BytesStart<'_>) -> Result<()> {
    let mut buf = Vec::new();
    reader.read_to_end_into(tag.to_end().name(), &mut buf)?;
    Ok(())
}

/// Decode an element's attributes in document order.
fn attributes_of(tag: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in tag.attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
