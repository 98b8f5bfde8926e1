//! XML text to model.
//!
//! Documents are read into a small [`Element`] tree first; models then pick
//! the children they know about and ignore the rest.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::value::XmlValue;
use crate::error::DeserializationError;

pub type ReadResult<T> = std::result::Result<T, DeserializationError>;

/// Deepest element nesting accepted by [`parse_document`], root included.
pub const MAX_DEPTH: usize = 256;

/// A model that can be read back from its XML element.
pub trait XmlDeserialize: Sized {
    /// Element name expected for the value
    const ELEMENT: &'static str;

    fn from_element(element: &Element) -> ReadResult<Self>;
}

/// One parsed XML element. Names are local names; namespace prefixes and
/// `xmlns` declarations are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> ReadResult<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| DeserializationError::InvalidAttribute {
                tag: name.clone(),
                details: e.to_string(),
            })?;
            if attribute.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| DeserializationError::InvalidAttribute {
                    tag: name.clone(),
                    details: format!("{key}: {e}"),
                })?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Attribute value, or empty when the attribute is missing.
    pub fn attribute_or_default(&self, name: &str) -> String {
        self.attribute(name).unwrap_or_default().to_string()
    }

    /// Required string element: missing reads as empty.
    pub fn text_or_default(&self, tag: &str) -> String {
        self.child(tag)
            .map(|child| child.text.clone())
            .unwrap_or_default()
    }

    /// Optional string element: present-but-empty reads as `Some("")`.
    pub fn optional_text(&self, tag: &str) -> Option<String> {
        self.child(tag).map(|child| child.text.clone())
    }

    /// Required scalar element: missing reads as the type default, present
    /// text must parse.
    pub fn value_or_default<V: XmlValue + Default>(&self, tag: &str) -> ReadResult<V> {
        match self.child(tag) {
            Some(child) => parse_value(tag, &child.text),
            None => Ok(V::default()),
        }
    }

    /// Optional scalar element: missing or blank reads as `None`.
    pub fn optional_value<V: XmlValue>(&self, tag: &str) -> ReadResult<Option<V>> {
        match self.child(tag) {
            Some(child) if !child.text.trim().is_empty() => parse_value(tag, &child.text).map(Some),
            _ => Ok(None),
        }
    }

    pub fn optional_nested<T: XmlDeserialize>(&self) -> ReadResult<Option<T>> {
        self.child(T::ELEMENT).map(T::from_element).transpose()
    }

    /// Every child named after `T`, in document order.
    pub fn nested_list<T: XmlDeserialize>(&self) -> ReadResult<Vec<T>> {
        self.children_named(T::ELEMENT)
            .map(T::from_element)
            .collect()
    }
}

fn parse_value<V: XmlValue>(tag: &str, text: &str) -> ReadResult<V> {
    V::parse_xml_text(text).ok_or_else(|| DeserializationError::InvalidValue {
        tag: tag.to_string(),
        value: text.to_string(),
        expected: V::TYPE_NAME,
    })
}

/// Parse a whole document into its root element.
pub fn parse_document(xml: &str) -> ReadResult<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    let malformed = |reader: &Reader<&[u8]>, details: String| DeserializationError::Malformed {
        position: reader.buffer_position() as u64,
        details,
    };
    let too_deep = |reader: &Reader<&[u8]>| {
        malformed(reader, format!("elements nested deeper than {MAX_DEPTH} levels"))
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(too_deep(&reader));
                }
                stack.push(Element::open(&start)?);
            }
            Ok(Event::Empty(start)) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(too_deep(&reader));
                }
                let element = Element::open(&start)?;
                attach(&mut stack, &mut root, element)
                    .map_err(|details| malformed(&reader, details))?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed(&reader, "unmatched closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)
                    .map_err(|details| malformed(&reader, details))?;
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| malformed(&reader, e.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(malformed(
                            &reader,
                            "text outside of the root element".to_string(),
                        ));
                    }
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(&reader, e.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(&reader, format!("unclosed element <{}>", open.name)));
    }
    root.ok_or(DeserializationError::EmptyDocument)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_some() => Err(format!(
            "second root element <{}> after the document root",
            element.name
        )),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

/// Parse `xml` as a `T`, checking the root element name.
pub fn from_xml<T: XmlDeserialize>(xml: &str) -> ReadResult<T> {
    let root = parse_document(xml)?;
    if root.name != T::ELEMENT {
        return Err(DeserializationError::UnexpectedRoot {
            expected: T::ELEMENT.to_string(),
            found: root.name,
        });
    }
    T::from_element(&root)
}
