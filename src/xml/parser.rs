use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::xml::node::{XmlElement, XmlNode};

// ============================================================================
// Parse errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// The reader rejected the markup (bad syntax, mismatched end tag,
    /// duplicate attribute, unknown entity, invalid UTF-8).
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("document has no root element")]
    MissingRoot,

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("content outside the root element at byte {position}")]
    OutsideRoot { position: u64 },

    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("content is not valid {0}")]
    Decode(&'static str),
}

// ============================================================================
// Byte decoding
// ============================================================================

/// Decode raw document bytes to text.
///
/// A byte-order mark wins; otherwise the `encoding` of the XML declaration
/// is used, and UTF-8 when there is none. Undecodable bytes are an error,
/// never replaced.
pub fn decode_document(bytes: &[u8]) -> Result<String, XmlError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?, bytes),
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or(XmlError::Decode(encoding.name()))
}

/// Decode and parse raw document bytes.
pub fn parse_bytes(bytes: &[u8]) -> Result<XmlElement, XmlError> {
    parse_document(&decode_document(bytes)?)
}

fn declared_encoding(bytes: &[u8]) -> Result<&'static Encoding, XmlError> {
    let mut reader = Reader::from_reader(bytes);
    let label = match reader.read_event() {
        Ok(Event::Decl(decl)) => match decl.encoding() {
            Some(Ok(label)) => label.into_owned(),
            _ => return Ok(UTF_8),
        },
        _ => return Ok(UTF_8),
    };
    let encoding = Encoding::for_label(&label).ok_or_else(|| {
        XmlError::UnsupportedEncoding(String::from_utf8_lossy(&label).into_owned())
    })?;
    // A UTF-16 label on a declaration we just read as ASCII is wrong.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(UTF_8);
    }
    Ok(encoding)
}

// ============================================================================
// Document parsing
// ============================================================================

/// Parse a complete document into its root element.
///
/// Whitespace text is kept as-is so child content round-trips unchanged.
/// The XML declaration and DOCTYPE are dropped; comments and processing
/// instructions outside the root are dropped too.
pub fn parse_document(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax(&reader, e))?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(outside_root(&reader));
                }
                let element = element_from(&start).map_err(|e| syntax(&reader, e))?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = element_from(&start).map_err(|e| syntax(&reader, e))?;
                attach(&mut stack, &mut root, element, &reader)?;
            }
            Event::End(_) => {
                // End-tag names are matched by the reader itself.
                let element = stack.pop().ok_or_else(|| outside_root(&reader))?;
                attach(&mut stack, &mut root, element, &reader)?;
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(|e| syntax(&reader, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Text(value.into_owned())),
                    None if value.trim().is_empty() => {}
                    None => return Err(outside_root(&reader)),
                }
            }
            Event::CData(data) => {
                let value = utf8(&data).map_err(|e| syntax(&reader, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::CData(value)),
                    None => return Err(outside_root(&reader)),
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let value = utf8(&comment).map_err(|e| syntax(&reader, e))?;
                    parent.children.push(XmlNode::Comment(value));
                }
            }
            Event::PI(pi) => {
                if let Some(parent) = stack.last_mut() {
                    let value = utf8(&pi).map_err(|e| syntax(&reader, e))?;
                    parent.children.push(XmlNode::ProcessingInstruction(value));
                }
            }
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.name));
    }
    root.ok_or(XmlError::MissingRoot)
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let mut element = XmlElement::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Hang a finished element on its parent, or make it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    reader: &Reader<&[u8]>,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(outside_root(reader)),
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<String, String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| e.to_string())
}

fn syntax(reader: &Reader<&[u8]>, message: impl ToString) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        message: message.to_string(),
    }
}

fn outside_root(reader: &Reader<&[u8]>) -> XmlError {
    XmlError::OutsideRoot {
        position: reader.buffer_position() as u64,
    }
}
