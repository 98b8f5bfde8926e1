//! XML wire codec for ConcreteGo models.
//!
//! - [`XmlSerialize`] and [`to_xml`] / [`to_xml_document`] write models as XML text
//! - [`XmlDeserialize`] and [`from_xml`] read XML text back into models
//! - [`XmlValue`] holds the lexical form of every scalar on the wire
//!
//! Element and attribute names are case-sensitive and must match the service
//! byte for byte.

pub mod deserialize;
pub mod serialize;
pub mod value;

pub use deserialize::{Element, ReadResult, XmlDeserialize, from_xml, parse_document};
pub use serialize::{WriteResult, XmlSerialize, XmlWriter, to_xml, to_xml_document};
pub use value::XmlValue;
