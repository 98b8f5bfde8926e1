//! # concretego-client Library
//!
//! Typed client SDK for the ConcreteGo concrete and aggregate business API:
//! XML request/response models with the service's exact element names and
//! presence rules, plus validated client construction from configuration or
//! explicit credentials.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod options;
pub mod registration;
pub mod xml;

pub use cli::{Cli, Command, VerbosityLevel};
pub use client::ConcreteGoApiClient;
pub use config::{ConfigError, ConfigResult, Configuration, EnvProvider, SystemEnvProvider};
pub use error::{ClientError, DeserializationError, Result, SerializationError};
pub use models::{
    ChargesRequest, ReasonCodeResponse, ReasonCodeRet, SundryChargeAction, SundryChargeRequest,
    SundryChargesMethod, SundryChargesRequest,
};
pub use options::{
    ClientOptions, ClientOptionsValidator, ValidateOptions, ValidateOptionsResult,
};
pub use registration::{ClientProvider, ClientRegistration, ServiceLifetime};
pub use xml::{XmlDeserialize, XmlSerialize, from_xml, to_xml, to_xml_document};
