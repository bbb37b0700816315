use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::compare::options::DEFAULT_MAX_DEPTH;
use crate::tree::{NodeKind, XmlNode};

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
    /// Elements nest deeper than the configured limit.
    #[error("tree depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Parse XML bytes into a document node, nesting at most
/// [`DEFAULT_MAX_DEPTH`] elements below the root.
///
/// Text is kept verbatim, including whitespace-only runs between elements.
/// Empty or whitespace-only input yields a document with no children.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    parse_with_limit(xml, Some(DEFAULT_MAX_DEPTH))
}

/// Parse XML bytes, rejecting elements nested deeper than `max_depth`
/// below the root element (depth 0). `None` or `Some(0)` disables the limit.
pub fn parse_with_limit(xml: &[u8], max_depth: Option<usize>) -> Result<XmlNode, ParseError> {
    let limit = max_depth.filter(|limit| *limit > 0);
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut document = XmlNode::document();
    let mut stack: Vec<XmlNode> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                check_depth(stack.len(), limit)?;
                stack.push(build_element(&e, &reader)?);
            }
            Event::Empty(e) => {
                check_depth(stack.len(), limit)?;
                let node = build_element(&e, &reader)?;
                attach(node, &mut stack, &mut document)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(node, &mut stack, &mut document)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                match stack.last_mut() {
                    Some(current) => current.children.push(XmlNode::text(text)),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::Malformed(
                            "text content outside the root element".to_string(),
                        ))
                    }
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?.to_string();
                attach(XmlNode::cdata(text), &mut stack, &mut document)?;
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(&e)?.to_string();
                attach(XmlNode::comment(text), &mut stack, &mut document)?;
            }
            Event::PI(e) => {
                let target = std::str::from_utf8(e.target())?.to_string();
                let data = std::str::from_utf8(e.content())?.trim_start().to_string();
                attach(
                    XmlNode::processing_instruction(target, data),
                    &mut stack,
                    &mut document,
                )?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    Ok(document)
}

/// Parse an XML string into a document node.
pub fn parse_str(xml: &str) -> Result<XmlNode, ParseError> {
    parse(xml.as_bytes())
}

/// Parse an XML file into a document node.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn check_depth(depth: usize, limit: Option<usize>) -> Result<(), ParseError> {
    match limit {
        Some(limit) if depth > limit => Err(ParseError::DepthLimitExceeded { limit }),
        _ => Ok(()),
    }
}

fn attach(
    node: XmlNode,
    stack: &mut [XmlNode],
    document: &mut XmlNode,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    if node.kind == NodeKind::Element && document.root_element().is_some() {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    document.children.push(node);
    Ok(())
}

fn build_element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut node = XmlNode::element(qname_to_string(e.name())?);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}
