//! Charge table settings and sundry charges sent with order and customer updates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::xml::{Element, ReadResult, WriteResult, XmlDeserialize, XmlSerialize, XmlWriter};

/// `<Charges>` request block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChargesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_load_charge_table_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_charge_table_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unloading_charge_table_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_minimum_load_charge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_seasonal_charge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_unloading_charge: Option<bool>,
    #[serde(
        rename = "PrintMinimumLoadChargeOnSeperateInvoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub print_minimum_load_charge_on_separate_invoice: Option<bool>,
    #[serde(
        rename = "PrintSeasonalChargeOnSeperateInvoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub print_seasonal_charge_on_separate_invoice: Option<bool>,
    #[serde(
        rename = "PrintUnloadingChargeOnSeperateInvoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub print_unloading_charge_on_separate_invoice: Option<bool>,
    #[serde(
        rename = "PrintAutomaticSundryChargeOnSeperateInvoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub print_automatic_sundry_charge_on_separate_invoice: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sundry_charges: Option<SundryChargesRequest>,
}

impl XmlSerialize for ChargesRequest {
    const ELEMENT: &'static str = "Charges";

    fn write_children(&self, writer: &mut XmlWriter) -> WriteResult {
        writer.optional_text(
            "MinimumLoadChargeTableCode",
            &self.minimum_load_charge_table_code,
        )?;
        writer.optional_text("SeasonalChargeTableCode", &self.seasonal_charge_table_code)?;
        writer.optional_text("UnloadingChargeTableCode", &self.unloading_charge_table_code)?;
        writer.optional_value("ApplyMinimumLoadCharge", &self.apply_minimum_load_charge)?;
        writer.optional_value("ApplySeasonalCharge", &self.apply_seasonal_charge)?;
        writer.optional_value("ApplyUnloadingCharge", &self.apply_unloading_charge)?;
        writer.optional_value(
            "PrintMinimumLoadChargeOnSeperateInvoice",
            &self.print_minimum_load_charge_on_separate_invoice,
        )?;
        writer.optional_value(
            "PrintSeasonalChargeOnSeperateInvoice",
            &self.print_seasonal_charge_on_separate_invoice,
        )?;
        writer.optional_value(
            "PrintUnloadingChargeOnSeperateInvoice",
            &self.print_unloading_charge_on_separate_invoice,
        )?;
        writer.optional_value(
            "PrintAutomaticSundryChargeOnSeperateInvoice",
            &self.print_automatic_sundry_charge_on_separate_invoice,
        )?;
        writer.optional_nested(&self.sundry_charges)
    }
}

impl XmlDeserialize for ChargesRequest {
    const ELEMENT: &'static str = "Charges";

    fn from_element(element: &Element) -> ReadResult<Self> {
        Ok(Self {
            minimum_load_charge_table_code: element.optional_text("MinimumLoadChargeTableCode"),
            seasonal_charge_table_code: element.optional_text("SeasonalChargeTableCode"),
            unloading_charge_table_code: element.optional_text("UnloadingChargeTableCode"),
            apply_minimum_load_charge: element.optional_value("ApplyMinimumLoadCharge")?,
            apply_seasonal_charge: element.optional_value("ApplySeasonalCharge")?,
            apply_unloading_charge: element.optional_value("ApplyUnloadingCharge")?,
            print_minimum_load_charge_on_separate_invoice: element
                .optional_value("PrintMinimumLoadChargeOnSeperateInvoice")?,
            print_seasonal_charge_on_separate_invoice: element
                .optional_value("PrintSeasonalChargeOnSeperateInvoice")?,
            print_unloading_charge_on_separate_invoice: element
                .optional_value("PrintUnloadingChargeOnSeperateInvoice")?,
            print_automatic_sundry_charge_on_separate_invoice: element
                .optional_value("PrintAutomaticSundryChargeOnSeperateInvoice")?,
            sundry_charges: element.optional_nested()?,
        })
    }
}

/// `<SundryCharges Method="...">` collection.
///
/// `method` is carried verbatim; see [`SundryChargesMethod`] for the values
/// the service documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SundryChargesRequest {
    pub method: String,
    pub sundry_charge: Vec<SundryChargeRequest>,
}

impl SundryChargesRequest {
    pub fn new(method: SundryChargesMethod) -> Self {
        Self {
            method: method.as_str().to_string(),
            sundry_charge: Vec::new(),
        }
    }

    pub fn with_charge(mut self, charge: SundryChargeRequest) -> Self {
        self.sundry_charge.push(charge);
        self
    }
}

impl XmlSerialize for SundryChargesRequest {
    const ELEMENT: &'static str = "SundryCharges";

    fn attributes(&self) -> Vec<(&'static str, &str)> {
        vec![("Method", self.method.as_str())]
    }

    fn write_children(&self, writer: &mut XmlWriter) -> WriteResult {
        writer.each(&self.sundry_charge)
    }
}

impl XmlDeserialize for SundryChargesRequest {
    const ELEMENT: &'static str = "SundryCharges";

    fn from_element(element: &Element) -> ReadResult<Self> {
        Ok(Self {
            method: element.attribute_or_default("Method"),
            sundry_charge: element.nested_list()?,
        })
    }
}

/// `<SundryCharge Action="...">` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SundryChargeRequest {
    pub action: String,
    #[serde(rename = "SundryChargeID", skip_serializing_if = "Option::is_none")]
    pub sundry_charge_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sundry_charge_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_sundry_charge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "PriceUnitID", skip_serializing_if = "Option::is_none")]
    pub price_unit_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_unit_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_extension_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<f64>,
    #[serde(rename = "PreviousPriceUnitID", skip_serializing_if = "Option::is_none")]
    pub previous_price_unit_id: Option<i32>,
    /// Numeric on the wire, unlike `price_unit_code`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_price_unit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_price_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_price_extension_code: Option<String>,
    #[serde(
        rename = "CreateSeperateInvoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_separate_invoice: Option<bool>,
}

impl SundryChargeRequest {
    pub fn new(action: SundryChargeAction) -> Self {
        Self {
            action: action.as_str().to_string(),
            ..Default::default()
        }
    }
}

impl XmlSerialize for SundryChargeRequest {
    const ELEMENT: &'static str = "SundryCharge";

    fn attributes(&self) -> Vec<(&'static str, &str)> {
        vec![("Action", self.action.as_str())]
    }

    fn write_children(&self, writer: &mut XmlWriter) -> WriteResult {
        writer.optional_value("SundryChargeID", &self.sundry_charge_id)?;
        writer.optional_text("SundryChargeCode", &self.sundry_charge_code)?;
        writer.optional_value("ApplySundryCharge", &self.apply_sundry_charge)?;
        writer.optional_value("Price", &self.price)?;
        writer.optional_value("PriceUnitID", &self.price_unit_id)?;
        writer.optional_text("PriceUnitCode", &self.price_unit_code)?;
        writer.optional_text("PriceUnit", &self.price_unit)?;
        writer.optional_text("PriceExtensionCode", &self.price_extension_code)?;
        writer.optional_value("EffectiveDate", &self.effective_date)?;
        writer.optional_value("PreviousPrice", &self.previous_price)?;
        writer.optional_value("PreviousPriceUnitID", &self.previous_price_unit_id)?;
        writer.optional_value("PreviousPriceUnitCode", &self.previous_price_unit_code)?;
        writer.optional_text("PreviousPriceUnit", &self.previous_price_unit)?;
        writer.optional_text(
            "PreviousPriceExtensionCode",
            &self.previous_price_extension_code,
        )?;
        writer.optional_value("CreateSeperateInvoice", &self.create_separate_invoice)
    }
}

impl XmlDeserialize for SundryChargeRequest {
    const ELEMENT: &'static str = "SundryCharge";

    fn from_element(element: &Element) -> ReadResult<Self> {
        Ok(Self {
            action: element.attribute_or_default("Action"),
            sundry_charge_id: element.optional_value("SundryChargeID")?,
            sundry_charge_code: element.optional_text("SundryChargeCode"),
            apply_sundry_charge: element.optional_value("ApplySundryCharge")?,
            price: element.optional_value("Price")?,
            price_unit_id: element.optional_value("PriceUnitID")?,
            price_unit_code: element.optional_text("PriceUnitCode"),
            price_unit: element.optional_text("PriceUnit"),
            price_extension_code: element.optional_text("PriceExtensionCode"),
            effective_date: element.optional_value("EffectiveDate")?,
            previous_price: element.optional_value("PreviousPrice")?,
            previous_price_unit_id: element.optional_value("PreviousPriceUnitID")?,
            previous_price_unit_code: element.optional_value("PreviousPriceUnitCode")?,
            previous_price_unit: element.optional_text("PreviousPriceUnit"),
            previous_price_extension_code: element.optional_text("PreviousPriceExtensionCode"),
            create_separate_invoice: element.optional_value("CreateSeperateInvoice")?,
        })
    }
}

/// Documented values of the `Method` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SundryChargesMethod {
    /// Replace the whole sundry charge list
    Put,
    /// Apply the listed actions to the existing list
    Patch,
}

impl SundryChargesMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SundryChargesMethod::Put => "PUT",
            SundryChargesMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for SundryChargesMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SundryChargesMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUT" => Ok(SundryChargesMethod::Put),
            "PATCH" => Ok(SundryChargesMethod::Patch),
            other => Err(format!("Unknown sundry charges method: {other}")),
        }
    }
}

/// Documented values of the `Action` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SundryChargeAction {
    Upsert,
    Delete,
}

impl SundryChargeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SundryChargeAction::Upsert => "UPSERT",
            SundryChargeAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for SundryChargeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SundryChargeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPSERT" => Ok(SundryChargeAction::Upsert),
            "DELETE" => Ok(SundryChargeAction::Delete),
            other => Err(format!("Unknown sundry charge action: {other}")),
        }
    }
}
