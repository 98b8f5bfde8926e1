//! Reason code query response.

use serde::{Deserialize, Serialize};

use crate::xml::{Element, ReadResult, WriteResult, XmlDeserialize, XmlSerialize, XmlWriter};

/// `<ReasonCodeQueryRs>` response document.
///
/// `reason_code_ret` is `None` when the document carried no `ReasonCodeRet`
/// element at all. Both `None` and an empty list encode to zero children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReasonCodeResponse {
    pub reason_code_ret: Option<Vec<ReasonCodeRet>>,
}

impl ReasonCodeResponse {
    /// The reason codes, treating an absent list as empty.
    pub fn reason_codes(&self) -> &[ReasonCodeRet] {
        self.reason_code_ret.as_deref().unwrap_or_default()
    }
}

impl XmlSerialize for ReasonCodeResponse {
    const ELEMENT: &'static str = "ReasonCodeQueryRs";

    fn write_children(&self, writer: &mut XmlWriter) -> WriteResult {
        writer.each(self.reason_codes())
    }
}

impl XmlDeserialize for ReasonCodeResponse {
    const ELEMENT: &'static str = "ReasonCodeQueryRs";

    fn from_element(element: &Element) -> ReadResult<Self> {
        let reason_codes: Vec<ReasonCodeRet> = element.nested_list()?;
        Ok(Self {
            reason_code_ret: (!reason_codes.is_empty()).then_some(reason_codes),
        })
    }
}

/// One `<ReasonCodeRet>` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReasonCodeRet {
    #[serde(rename = "ID")]
    pub id: i32,
    pub code: String,
    /// Written only when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Written only when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub reason_usage: String,
}

impl XmlSerialize for ReasonCodeRet {
    const ELEMENT: &'static str = "ReasonCodeRet";

    fn write_children(&self, writer: &mut XmlWriter) -> WriteResult {
        writer.value("ID", &self.id)?;
        writer.text("Code", &self.code)?;
        writer.non_empty_text("Description", &self.description)?;
        writer.non_empty_text("ShortDescription", &self.short_description)?;
        writer.text("ReasonUsage", &self.reason_usage)
    }
}

impl XmlDeserialize for ReasonCodeRet {
    const ELEMENT: &'static str = "ReasonCodeRet";

    fn from_element(element: &Element) -> ReadResult<Self> {
        Ok(Self {
            id: element.value_or_default("ID")?,
            code: element.text_or_default("Code"),
            description: element.optional_text("Description"),
            short_description: element.optional_text("ShortDescription"),
            reason_usage: element.text_or_default("ReasonUsage"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_xml, to_xml};

    #[test]
    fn test_required_fields_always_written() {
        let ret = ReasonCodeRet::default();
        assert_eq!(
            to_xml(&ret).unwrap(),
            "<ReasonCodeRet><ID>0</ID><Code></Code><ReasonUsage></ReasonUsage></ReasonCodeRet>"
        );
    }

    #[test]
    fn test_absent_and_empty_lists_encode_alike() {
        let absent = ReasonCodeResponse::default();
        let empty = ReasonCodeResponse {
            reason_code_ret: Some(Vec::new()),
        };
        assert_eq!(to_xml(&absent).unwrap(), "<ReasonCodeQueryRs></ReasonCodeQueryRs>");
        assert_eq!(to_xml(&absent).unwrap(), to_xml(&empty).unwrap());
    }

    #[test]
    fn test_no_entries_decode_as_absent() {
        let response: ReasonCodeResponse =
            from_xml("<ReasonCodeQueryRs><Other/></ReasonCodeQueryRs>").unwrap();
        assert_eq!(response.reason_code_ret, None);
        assert!(response.reason_codes().is_empty());
    }

    #[test]
    fn test_missing_required_elements_use_defaults() {
        let ret: ReasonCodeRet = from_xml("<ReasonCodeRet/>").unwrap();
        assert_eq!(ret, ReasonCodeRet::default());
    }
}
