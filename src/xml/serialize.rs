//! Model to XML text.

use std::borrow::Cow;

use quick_xml::Writer;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::value::XmlValue;
use crate::error::SerializationError;

pub type WriteResult = std::result::Result<(), SerializationError>;

/// A model that maps onto one XML element.
pub trait XmlSerialize {
    /// Element name used for the value, both as a document root and when nested
    const ELEMENT: &'static str;

    /// Attributes of the element, always written in this order
    fn attributes(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }

    /// Write the child elements, applying each field's presence rule
    fn write_children(&self, writer: &mut XmlWriter) -> WriteResult;
}

/// Thin wrapper over the quick-xml writer with one method per presence rule.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> WriteResult {
        self.inner
            .write_event(event)
            .map_err(|e| SerializationError::new(e.to_string()))
    }

    pub fn declaration(&mut self) -> WriteResult {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
    }

    /// Write `value` as a complete element including its attributes and children.
    pub fn nested<T: XmlSerialize>(&mut self, value: &T) -> WriteResult {
        let mut start = BytesStart::new(T::ELEMENT);
        for (name, attribute) in value.attributes() {
            let escaped = escape_attribute(attribute);
            start.push_attribute((name.as_bytes(), escaped.as_bytes()));
        }
        self.write(Event::Start(start))?;
        value.write_children(self)?;
        self.write(Event::End(BytesEnd::new(T::ELEMENT)))
    }

    /// Always written, even when `text` is empty.
    pub fn text(&mut self, tag: &str, text: &str) -> WriteResult {
        self.write(Event::Start(BytesStart::new(tag)))?;
        if !text.is_empty() {
            self.write(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        }
        self.write(Event::End(BytesEnd::new(tag)))
    }

    /// Always written.
    pub fn value<V: XmlValue>(&mut self, tag: &str, value: &V) -> WriteResult {
        self.text(tag, &value.to_xml_text())
    }

    /// Written only when `Some`, whatever the value.
    pub fn optional_value<V: XmlValue>(&mut self, tag: &str, value: &Option<V>) -> WriteResult {
        match value {
            Some(value) => self.value(tag, value),
            None => Ok(()),
        }
    }

    /// Written only when `Some`; an empty string still produces the element.
    pub fn optional_text(&mut self, tag: &str, text: &Option<String>) -> WriteResult {
        match text {
            Some(text) => self.text(tag, text),
            None => Ok(()),
        }
    }

    /// Written only when `Some` and non-empty.
    pub fn non_empty_text(&mut self, tag: &str, text: &Option<String>) -> WriteResult {
        match text.as_deref() {
            Some(text) if !text.is_empty() => self.text(tag, text),
            _ => Ok(()),
        }
    }

    pub fn optional_nested<T: XmlSerialize>(&mut self, value: &Option<T>) -> WriteResult {
        match value {
            Some(value) => self.nested(value),
            None => Ok(()),
        }
    }

    /// One element per item, in order.
    pub fn each<T: XmlSerialize>(&mut self, items: &[T]) -> WriteResult {
        items.iter().try_for_each(|item| self.nested(item))
    }

    pub fn into_string(self) -> std::result::Result<String, SerializationError> {
        String::from_utf8(self.inner.into_inner())
            .map_err(|e| SerializationError::new(format!("writer produced invalid UTF-8: {e}")))
    }
}

/// Markup characters plus `\r`, which readers would otherwise fold into `\n`.
fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#xD;"))
    } else {
        escaped
    }
}

/// Attribute values also keep tabs and line breaks, which readers normalize to spaces.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\t', "&#x9;")
        .replace('\n', "&#xA;")
        .replace('\r', "&#xD;")
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize `value` as an XML fragment rooted at its element.
pub fn to_xml<T: XmlSerialize>(value: &T) -> std::result::Result<String, SerializationError> {
    let mut writer = XmlWriter::new();
    writer.nested(value)?;
    writer.into_string()
}

/// Serialize `value` as a standalone document with an XML declaration.
pub fn to_xml_document<T: XmlSerialize>(
    value: &T,
) -> std::result::Result<String, SerializationError> {
    let mut writer = XmlWriter::new();
    writer.declaration()?;
    writer.nested(value)?;
    writer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        kind: String,
        label: Option<String>,
        note: Option<String>,
        count: Option<i32>,
    }

    impl XmlSerialize for Sample {
        const ELEMENT: &'static str = "Sample";

        fn attributes(&self) -> Vec<(&'static str, &str)> {
            vec![("Kind", self.kind.as_str())]
        }

        fn write_children(&self, writer: &mut XmlWriter) -> WriteResult {
            writer.optional_text("Label", &self.label)?;
            writer.non_empty_text("Note", &self.note)?;
            writer.optional_value("Count", &self.count)
        }
    }

    #[test]
    fn test_presence_rules() {
        let sample = Sample {
            kind: String::new(),
            label: Some(String::new()),
            note: Some(String::new()),
            count: None,
        };
        assert_eq!(
            to_xml(&sample).unwrap(),
            r#"<Sample Kind=""><Label></Label></Sample>"#
        );
    }

    #[test]
    fn test_escaping() {
        let sample = Sample {
            kind: "a\"b".to_string(),
            label: Some("Sand & <Gravel>".to_string()),
            note: None,
            count: Some(0),
        };
        assert_eq!(
            to_xml(&sample).unwrap(),
            "<Sample Kind=\"a&quot;b\"><Label>Sand &amp; &lt;Gravel&gt;</Label><Count>0</Count></Sample>"
        );
    }

    #[test]
    fn test_line_breaks_survive_reader_normalization() {
        let sample = Sample {
            kind: "a\tb\r\nc".to_string(),
            label: Some("line one\r\nline two\n".to_string()),
            note: None,
            count: None,
        };
        assert_eq!(
            to_xml(&sample).unwrap(),
            "<Sample Kind=\"a&#x9;b&#xD;&#xA;c\"><Label>line one&#xD;\nline two\n</Label></Sample>"
        );
    }

    #[test]
    fn test_document_has_declaration() {
        let sample = Sample {
            kind: "X".to_string(),
            label: None,
            note: None,
            count: None,
        };
        assert_eq!(
            to_xml_document(&sample).unwrap(),
            r#"<?xml version="1.0" encoding="utf-8"?><Sample Kind="X"></Sample>"#
        );
    }
}
