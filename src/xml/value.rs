//! Scalar text formats used on the wire.
//!
//! The upstream service speaks the XML Schema lexical forms: `true`/`false`
//! booleans, `INF`/`-INF`/`NaN` for non-finite doubles and
//! `YYYY-MM-DDTHH:MM:SS[.fffffff]` date-times without an offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A scalar that can be written as element text and parsed back.
pub trait XmlValue: Sized {
    /// Name of the type as reported in deserialization errors
    const TYPE_NAME: &'static str;

    fn to_xml_text(&self) -> String;

    /// Parse the element text. Returns `None` when the text is not a valid
    /// lexical form for the type.
    fn parse_xml_text(text: &str) -> Option<Self>;
}

impl XmlValue for i32 {
    const TYPE_NAME: &'static str = "int";

    fn to_xml_text(&self) -> String {
        self.to_string()
    }

    fn parse_xml_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

impl XmlValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn to_xml_text(&self) -> String {
        if self.is_nan() {
            "NaN".to_string()
        } else if *self == f64::INFINITY {
            "INF".to_string()
        } else if *self == f64::NEG_INFINITY {
            "-INF".to_string()
        } else {
            self.to_string()
        }
    }

    fn parse_xml_text(text: &str) -> Option<Self> {
        match text.trim() {
            "INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            other => other.parse().ok(),
        }
    }
}

impl XmlValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn to_xml_text(&self) -> String {
        self.to_string()
    }

    fn parse_xml_text(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl XmlValue for NaiveDateTime {
    const TYPE_NAME: &'static str = "dateTime";

    fn to_xml_text(&self) -> String {
        self.format(DATE_TIME_FORMAT).to_string()
    }

    fn parse_xml_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(value) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
            return Some(value);
        }
        // Offsets are dropped; the wall-clock time is what the service meant.
        if let Ok(value) = DateTime::parse_from_rfc3339(text) {
            return Some(value.naive_local());
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}
