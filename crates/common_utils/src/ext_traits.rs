//!
//! This module holds traits for extending functionalities for existing datatypes
//! & inbuilt datatypes.
//!

use error_stack::{report, ResultExt};
use indexmap::IndexMap;
use quick_xml::{events::Event, Reader};
use serde::Serialize;

use crate::errors::{CustomResult, ParsingError};

///
/// Encode interface
/// An interface for serializing request payloads into the wire format a connector expects
///
pub trait Encode
where
    Self: std::fmt::Debug,
{
    ///
    /// Functionality, for specifically encoding `Self` into an XML `String`
    /// after serialization by using `serde::Serialize`
    ///
    fn encode_to_string_of_xml(&self) -> CustomResult<String, ParsingError>
    where
        Self: Serialize;
}

impl<A> Encode for A
where
    Self: std::fmt::Debug,
{
    fn encode_to_string_of_xml(&self) -> CustomResult<String, ParsingError>
    where
        Self: Serialize,
    {
        quick_xml::se::to_string(self)
            .change_context(ParsingError::EncodeError("xml"))
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to an XML string"))
    }
}

/// A flat view over an XML document: the root element name and the text content of every
/// direct child of the root that has no children of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlLeaves {
    /// Name of the document root element, as written on the wire
    pub root: String,
    /// Leaf name to text content, in document order. Empty elements map to an empty string.
    pub leaves: IndexMap<String, String>,
}

///
/// Extending functionalities of raw response bodies for XML documents
///
pub trait XmlExt {
    ///
    /// Parse the document and collect the leaf children of the root element
    ///
    fn parse_xml_leaves(&self) -> CustomResult<XmlLeaves, ParsingError>;
}

fn malformed(reason: impl Into<String>) -> error_stack::Report<ParsingError> {
    report!(ParsingError::MalformedDocument {
        format: "xml",
        reason: reason.into(),
    })
}

impl<T> XmlExt for T
where
    T: AsRef<[u8]> + ?Sized,
{
    fn parse_xml_leaves(&self) -> CustomResult<XmlLeaves, ParsingError> {
        let mut reader = Reader::from_reader(self.as_ref());
        reader.trim_text(true);

        let mut buf = Vec::new();
        let mut root: Option<String> = None;
        let mut leaves = IndexMap::new();
        let mut depth = 0_usize;
        // Direct child of the root currently open, with its accumulated text
        let mut current: Option<(String, String)> = None;
        let mut current_has_children = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(start)) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    match depth {
                        0 if root.is_some() => return Err(malformed("multiple root elements")),
                        0 => root = Some(name),
                        1 => {
                            current = Some((name, String::new()));
                            current_has_children = false;
                        }
                        _ => current_has_children = true,
                    }
                    depth += 1;
                }
                Ok(Event::Empty(start)) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    match depth {
                        0 if root.is_some() => return Err(malformed("multiple root elements")),
                        0 => root = Some(name),
                        1 => {
                            leaves.insert(name, String::new());
                        }
                        _ => current_has_children = true,
                    }
                }
                Ok(Event::Text(text)) if depth == 2 => {
                    let text = text
                        .unescape()
                        .map_err(|error| malformed(error.to_string()))?;
                    if let Some((_, value)) = current.as_mut() {
                        value.push_str(&text);
                    }
                }
                Ok(Event::CData(cdata)) if depth == 2 => {
                    if let Some((_, value)) = current.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| malformed("unbalanced closing tag"))?;
                    if depth == 1 {
                        if let Some((name, value)) = current.take() {
                            if !current_has_children {
                                leaves.insert(name, value);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(error) => return Err(malformed(error.to_string())),
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(malformed("unexpected end of document"));
        }

        root.map(|root| XmlLeaves { root, leaves })
            .ok_or_else(|| malformed("document has no root element"))
    }
}
