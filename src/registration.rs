//! Construction entry points for [`ConcreteGoApiClient`].
//!
//! A [`ClientRegistration`] describes where the options come from and how long
//! a client lives. [`ClientRegistration::build`] validates the options once,
//! up front, and only then hands out a [`ClientProvider`]:
//!
//! | entry point                  | validation                          |
//! |------------------------------|-------------------------------------|
//! | `from_configuration`         | every blank field, at `build`       |
//! | `configure`                  | every blank field, at `build`       |
//! | `from_configuration_with`    | every blank field, at `build`       |
//! | `explicit`                   | first blank argument, immediately   |

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::ConcreteGoApiClient;
use crate::config::Configuration;
use crate::error::{ClientError, Result};
use crate::options::{ClientOptions, ClientOptionsValidator, ValidateOptions, ValidateOptionsResult};

/// How long a provided client lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceLifetime {
    /// A fresh client for every request scope
    #[default]
    Scoped,
    /// One client shared for the lifetime of the provider, for background work
    Singleton,
}

#[derive(Debug, Clone)]
enum OptionsSource {
    /// Bound or configured options, validated as a whole at build time
    Bound {
        section: String,
        options: ClientOptions,
    },
    /// Explicit parameters, already checked one by one
    Explicit(ClientOptions),
}

/// Builder for a [`ClientProvider`].
#[derive(Debug, Clone)]
pub struct ClientRegistration {
    source: OptionsSource,
    lifetime: ServiceLifetime,
}

impl ClientRegistration {
    /// Bind options from the `ConcreteGoApi` section.
    pub fn from_configuration(configuration: &Configuration) -> Result<Self> {
        Self::from_configuration_section(configuration, ClientOptions::SECTION)
    }

    /// Bind options from a named section.
    pub fn from_configuration_section(configuration: &Configuration, section: &str) -> Result<Self> {
        let options = configuration.bind(section)?;
        Ok(Self::bound(section, options))
    }

    /// Use explicit credentials. Blank arguments are rejected here, one at a
    /// time, in parameter order.
    pub fn explicit(
        username: &str,
        password: &str,
        app_id: &str,
        app_key: &str,
        slug: Option<&str>,
    ) -> Result<Self> {
        let options = ClientOptions::from_parameters(username, password, app_id, app_key, slug)?;
        Ok(Self {
            source: OptionsSource::Explicit(options),
            lifetime: ServiceLifetime::default(),
        })
    }

    /// Start from empty options and fill them in code.
    pub fn configure<F>(configure: F) -> Self
    where
        F: FnOnce(&mut ClientOptions),
    {
        let mut options = ClientOptions::default();
        configure(&mut options);
        Self::bound(ClientOptions::SECTION, options)
    }

    /// Bind the `ConcreteGoApi` section, then let `configure` override it.
    pub fn from_configuration_with<F>(configuration: &Configuration, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut ClientOptions),
    {
        let mut options = configuration.bind(ClientOptions::SECTION)?;
        configure(&mut options);
        Ok(Self::bound(ClientOptions::SECTION, options))
    }

    fn bound(section: &str, options: ClientOptions) -> Self {
        Self {
            source: OptionsSource::Bound {
                section: section.to_string(),
                options,
            },
            lifetime: ServiceLifetime::default(),
        }
    }

    /// Share one client for the provider's whole lifetime.
    pub fn singleton(mut self) -> Self {
        self.lifetime = ServiceLifetime::Singleton;
        self
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }

    /// Validate the options and produce a provider. No client can be obtained
    /// from a registration whose options fail validation.
    pub fn build(self) -> Result<ClientProvider> {
        let options = match self.source {
            OptionsSource::Explicit(options) => options,
            OptionsSource::Bound { section, options } => {
                match ClientOptionsValidator.validate(Some(section.as_str()), &options) {
                    ValidateOptionsResult::Success => options,
                    ValidateOptionsResult::Fail(failures) => {
                        warn!(section = %section, ?failures, "client options failed validation");
                        return Err(ClientError::OptionsValidation { section, failures });
                    }
                }
            }
        };

        info!(
            username = %options.username,
            app_id = %options.app_id,
            lifetime = ?self.lifetime,
            "ConcreteGo client registered"
        );

        let shared = match self.lifetime {
            ServiceLifetime::Singleton => {
                Some(Arc::new(ConcreteGoApiClient::from_validated(options.clone())))
            }
            ServiceLifetime::Scoped => None,
        };

        Ok(ClientProvider {
            options,
            lifetime: self.lifetime,
            shared,
        })
    }
}

/// Hands out clients built from validated options.
#[derive(Debug, Clone)]
pub struct ClientProvider {
    options: ClientOptions,
    lifetime: ServiceLifetime,
    shared: Option<Arc<ConcreteGoApiClient>>,
}

impl ClientProvider {
    /// The shared client for singletons, a new one otherwise.
    pub fn client(&self) -> Arc<ConcreteGoApiClient> {
        match &self.shared {
            Some(client) => Arc::clone(client),
            None => {
                debug!("creating scoped ConcreteGo client");
                Arc::new(ConcreteGoApiClient::from_validated(self.options.clone()))
            }
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(options: &mut ClientOptions) {
        options.username = "dispatch".to_string();
        options.password = "s3cret".to_string();
        options.app_id = "app-1".to_string();
        options.app_key = "key-1".to_string();
    }

    #[test]
    fn test_scoped_clients_are_distinct() {
        let provider = ClientRegistration::configure(fill).build().unwrap();
        assert_eq!(provider.lifetime(), ServiceLifetime::Scoped);

        let first = provider.client();
        let second = provider.client();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.options(), second.options());
    }

    #[test]
    fn test_singleton_client_is_shared() {
        let provider = ClientRegistration::configure(fill)
            .singleton()
            .build()
            .unwrap();
        assert_eq!(provider.lifetime(), ServiceLifetime::Singleton);
        assert!(Arc::ptr_eq(&provider.client(), &provider.client()));
    }

    #[test]
    fn test_configure_validates_at_build() {
        let registration = ClientRegistration::configure(|options| {
            options.username = "dispatch".to_string();
        });

        match registration.build() {
            Err(ClientError::OptionsValidation { section, failures }) => {
                assert_eq!(section, "ConcreteGoApi");
                assert_eq!(
                    failures,
                    vec![
                        "Password is required",
                        "AppId is required",
                        "AppKey is required"
                    ]
                );
            }
            other => panic!("Expected OptionsValidation, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_fails_before_build() {
        let error = ClientRegistration::explicit("dispatch", "s3cret", "", "", None).unwrap_err();
        assert!(matches!(
            error,
            ClientError::InvalidArgument { param: "appId", .. }
        ));
    }

    #[test]
    fn test_explicit_singleton() {
        let provider = ClientRegistration::explicit("u", "p", "a", "k", Some("yard"))
            .unwrap()
            .singleton()
            .build()
            .unwrap();
        assert_eq!(provider.client().slug(), Some("yard"));
    }

    #[test]
    fn test_callback_overrides_configuration() {
        let configuration = Configuration::from_toml_str(
            "[ConcreteGoApi]\nusername = \"file-user\"\npassword = \"file-pass\"\nappId = \"a\"\n",
        )
        .unwrap();

        let provider = ClientRegistration::from_configuration_with(&configuration, |options| {
            options.username = "override".to_string();
            options.app_key = "k".to_string();
        })
        .unwrap()
        .build()
        .unwrap();

        let client = provider.client();
        assert_eq!(client.username(), "override");
        assert_eq!(client.password(), "file-pass");
        assert_eq!(client.app_key(), "k");
    }
}
