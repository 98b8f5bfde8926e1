use tracing::debug;

use crate::error::Result;
use crate::options::ClientOptions;
use crate::xml::{XmlDeserialize, XmlSerialize, from_xml, to_xml};

/// ConcreteGo API client.
///
/// Holds validated credentials and converts models to and from the XML
/// bodies the API exchanges. Sending those bodies is left to the caller's
/// transport.
#[derive(Debug, Clone)]
pub struct ConcreteGoApiClient {
    options: ClientOptions,
}

impl ConcreteGoApiClient {
    /// Create a client from explicit credentials, failing on the first blank one.
    pub fn new(
        username: &str,
        password: &str,
        app_id: &str,
        app_key: &str,
        slug: Option<&str>,
    ) -> Result<Self> {
        let options = ClientOptions::from_parameters(username, password, app_id, app_key, slug)?;
        Ok(Self::from_validated(options))
    }

    /// Options must already have passed validation.
    pub(crate) fn from_validated(options: ClientOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn username(&self) -> &str {
        &self.options.username
    }

    pub fn password(&self) -> &str {
        &self.options.password
    }

    pub fn app_id(&self) -> &str {
        &self.options.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.options.app_key
    }

    pub fn slug(&self) -> Option<&str> {
        self.options.slug.as_deref()
    }

    /// Serialize a request model into the XML body sent to the API.
    pub fn encode_request<T: XmlSerialize>(&self, request: &T) -> Result<String> {
        let body = to_xml(request)?;
        debug!(
            element = T::ELEMENT,
            bytes = body.len(),
            app_id = %self.options.app_id,
            "encoded request"
        );
        Ok(body)
    }

    /// Parse an XML response body into its model.
    pub fn decode_response<T: XmlDeserialize>(&self, body: &str) -> Result<T> {
        let response = from_xml(body)?;
        debug!(
            element = <T as XmlDeserialize>::ELEMENT,
            bytes = body.len(),
            "decoded response"
        );
        Ok(response)
    }
}
