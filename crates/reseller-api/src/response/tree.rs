//! XML document to typed field tree.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::coerce::coerce_leaf;
use super::value::{Fields, Value};
use crate::error::{Error, Result};

/// An open element while reading.
#[derive(Debug)]
struct Element {
    name: String,
    text: String,
    children: Vec<(String, Value)>,
}

impl Element {
    /// Opens an element. Attribute values are dropped but their syntax is checked.
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        for attr in start.attributes() {
            attr.map_err(|e| Error::malformed(e.to_string()))?;
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn into_value(self) -> Result<(String, Value)> {
        let value = if self.children.is_empty() {
            coerce_leaf(&self.name, self.text.trim())?
        } else {
            Value::Object(group(self.children))
        };
        Ok((self.name, value))
    }
}

/// Groups children by name; repeated names become a list in document order.
fn group(children: Vec<(String, Value)>) -> Fields {
    let mut grouped: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for (name, value) in children {
        grouped.entry(name).or_default().push(value);
    }

    grouped
        .into_iter()
        .map(|(name, mut values)| {
            let value = if values.len() == 1 {
                values.swap_remove(0)
            } else {
                Value::List(values)
            };
            (name, value)
        })
        .collect()
}

/// Reads a document and returns the root element's fields.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] for anything that is not a single
/// well-formed root element, and [`Error::SchemaViolation`] if a typed leaf
/// cannot be coerced.
pub(crate) fn read_document(xml: &str) -> Result<Fields> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Fields> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(Error::malformed("content after root element"));
                }
                stack.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(Error::malformed("content after root element"));
                }
                close(Element::open(&start)?, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::malformed("unexpected closing tag"))?;
                close(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                match stack.last_mut() {
                    Some(element) => element.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(Error::malformed("text outside root element")),
                }
            }
            Event::CData(cdata) => {
                match stack.last_mut() {
                    Some(element) => element.text.push_str(&String::from_utf8_lossy(&cdata)),
                    None => return Err(Error::malformed("CDATA outside root element")),
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::malformed(format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| Error::malformed("no root element"))
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Fields>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            let (name, value) = element.into_value()?;
            parent.children.push((name, value));
        }
        None => *root = Some(group(element.children)),
    }
    Ok(())
}
