use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::options::ClientOptions;

/// Trait for abstracting environment variable access
#[cfg_attr(test, mockall::automock)]
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration section '{section}': {details}")]
    InvalidSection { section: String, details: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Option keys as they appear in a section, paired with the suffix used for
/// environment overrides (`<Section>__<Suffix>`).
const OPTION_KEYS: [(&str, &str); 5] = [
    ("username", "Username"),
    ("password", "Password"),
    ("appId", "AppId"),
    ("appKey", "AppKey"),
    ("slug", "Slug"),
];

const CONFIG_NAMES: [&str; 2] = ["concretego.toml", "concretego.json"];

/// A loaded configuration document. Sections are bound on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    root: Value,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            root: Value::Object(Default::default()),
        }
    }
}

impl Configuration {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let root: Value = toml::from_str(content)?;
        Ok(Self { root })
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let root: Value = serde_json::from_str(content)?;
        Ok(Self { root })
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading configuration file");

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = Self::from_toml_str(&content) {
                    Ok(config)
                } else {
                    Self::from_json_str(&content)
                }
            }
        }
    }

    /// Find a configuration file in the working directory, then in the user
    /// config directory.
    pub fn find_config_file() -> Option<PathBuf> {
        let local = CONFIG_NAMES.iter().map(|name| PathBuf::from(*name));
        let user = dirs::config_dir()
            .map(|dir| {
                CONFIG_NAMES
                    .iter()
                    .map(|name| dir.join("concretego").join(name))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        local.chain(user).find(|path| path.exists())
    }

    /// Load the given file, or the first standard location that exists, or an
    /// empty configuration when there is none.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::find_config_file() {
                Some(found) => Self::from_file(&found),
                None => {
                    debug!("no configuration file found, starting empty");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Apply environment variable overrides using the system environment
    pub fn with_environment_overrides(self, section: &str) -> Self {
        self.with_environment_overrides_from(&SystemEnvProvider, section)
    }

    /// Apply `<section>__<Key>` overrides with a custom environment provider
    pub fn with_environment_overrides_from(mut self, env: &impl EnvProvider, section: &str) -> Self {
        let overrides: Vec<(&str, String)> = OPTION_KEYS
            .iter()
            .filter_map(|(key, suffix)| {
                env.get(&format!("{section}__{suffix}"))
                    .map(|value| (*key, value))
            })
            .collect();
        if overrides.is_empty() {
            return self;
        }

        if !self.root.is_object() {
            self.root = Value::Object(Default::default());
        }
        if let Value::Object(root) = &mut self.root {
            let section_key = root
                .keys()
                .find(|existing| existing.eq_ignore_ascii_case(section))
                .cloned()
                .unwrap_or_else(|| section.to_string());
            let entry = root
                .entry(section_key)
                .or_insert_with(|| Value::Object(Default::default()));
            if !entry.is_object() {
                *entry = Value::Object(Default::default());
            }

            if let Value::Object(values) = entry {
                for (key, value) in overrides {
                    debug!(section, key, "applying environment override");
                    values.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
                    values.insert(key.to_string(), Value::String(value));
                }
            }
        }
        self
    }

    /// Raw value of a section, looked up case-insensitively.
    pub fn section_value(&self, section: &str) -> Option<&Value> {
        self.root.as_object().and_then(|root| {
            root.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(section))
                .map(|(_, value)| value)
        })
    }

    /// Bind a section onto client options. A missing section binds as empty
    /// options so validation can report every required field.
    pub fn bind(&self, section: &str) -> ConfigResult<ClientOptions> {
        let Some(value) = self.section_value(section) else {
            debug!(section, "configuration section not present");
            return Ok(ClientOptions::default());
        };

        let Value::Object(values) = value else {
            return Err(ConfigError::InvalidSection {
                section: section.to_string(),
                details: "expected a table of options".to_string(),
            });
        };

        // Keys match case-insensitively.
        let normalized = values
            .iter()
            .map(|(key, value)| {
                let key = OPTION_KEYS
                    .iter()
                    .find(|(known, _)| known.eq_ignore_ascii_case(key))
                    .map(|(known, _)| known.to_string())
                    .unwrap_or_else(|| key.clone());
                (key, value.clone())
            })
            .collect();

        serde_json::from_value(Value::Object(normalized)).map_err(|e| {
            ConfigError::InvalidSection {
                section: section.to_string(),
                details: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_with(vars: &[(&str, &str)]) -> MockEnvProvider {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let mut env = MockEnvProvider::new();
        env.expect_get()
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[test]
    fn test_bind_toml_section() {
        let config = Configuration::from_toml_str(
            r#"
[ConcreteGoApi]
username = "dispatch"
password = "s3cret"
appId = "app-1"
appKey = "key-1"
slug = "north-plant"
"#,
        )
        .unwrap();

        let options = config.bind(ClientOptions::SECTION).unwrap();
        assert_eq!(options.username, "dispatch");
        assert_eq!(options.password, "s3cret");
        assert_eq!(options.app_id, "app-1");
        assert_eq!(options.app_key, "key-1");
        assert_eq!(options.slug.as_deref(), Some("north-plant"));
    }

    #[test]
    fn test_bind_is_case_insensitive() {
        let config = Configuration::from_json_str(
            r#"{"concretegoapi": {"UserName": "u", "APPID": "a", "Extra": 1}}"#,
        )
        .unwrap();

        let options = config.bind("ConcreteGoApi").unwrap();
        assert_eq!(options.username, "u");
        assert_eq!(options.app_id, "a");
        assert_eq!(options.password, "");
        assert_eq!(options.slug, None);
    }

    #[test]
    fn test_missing_section_binds_empty() {
        let config = Configuration::from_toml_str("[Logging]\nlevel = \"info\"\n").unwrap();
        assert_eq!(
            config.bind(ClientOptions::SECTION).unwrap(),
            ClientOptions::default()
        );
    }

    #[test]
    fn test_invalid_section_shape() {
        let config = Configuration::from_json_str(r#"{"ConcreteGoApi": "oops"}"#).unwrap();
        assert!(matches!(
            config.bind(ClientOptions::SECTION),
            Err(ConfigError::InvalidSection { .. })
        ));

        let config =
            Configuration::from_json_str(r#"{"ConcreteGoApi": {"username": 42}}"#).unwrap();
        assert!(matches!(
            config.bind(ClientOptions::SECTION),
            Err(ConfigError::InvalidSection { .. })
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Configuration::from_toml_str(
            "[ConcreteGoApi]\nusername = \"file-user\"\npassword = \"file-pass\"\n",
        )
        .unwrap();
        let env = env_with(&[
            ("ConcreteGoApi__Password", "env-pass"),
            ("ConcreteGoApi__AppKey", "env-key"),
        ]);

        let options = config
            .with_environment_overrides_from(&env, ClientOptions::SECTION)
            .bind(ClientOptions::SECTION)
            .unwrap();
        assert_eq!(options.username, "file-user");
        assert_eq!(options.password, "env-pass");
        assert_eq!(options.app_key, "env-key");
        assert_eq!(options.app_id, "");
    }

    #[test]
    fn test_environment_overrides_create_section() {
        let env = env_with(&[("Plant__Username", "night-shift")]);

        let options = Configuration::default()
            .with_environment_overrides_from(&env, "Plant")
            .bind("Plant")
            .unwrap();
        assert_eq!(options.username, "night-shift");
    }

    #[test]
    fn test_load_from_files() {
        let temp_dir = TempDir::new().unwrap();

        let toml_path = temp_dir.path().join("concretego.toml");
        fs::write(&toml_path, "[ConcreteGoApi]\nappId = \"from-toml\"\n").unwrap();
        let options = Configuration::from_file(&toml_path)
            .unwrap()
            .bind(ClientOptions::SECTION)
            .unwrap();
        assert_eq!(options.app_id, "from-toml");

        let json_path = temp_dir.path().join("concretego.json");
        fs::write(&json_path, r#"{"ConcreteGoApi": {"appId": "from-json"}}"#).unwrap();
        let options = Configuration::load(Some(&json_path))
            .unwrap()
            .bind(ClientOptions::SECTION)
            .unwrap();
        assert_eq!(options.app_id, "from-json");

        let bare_path = temp_dir.path().join("concretego");
        fs::write(&bare_path, r#"{"ConcreteGoApi": {"appId": "bare"}}"#).unwrap();
        let options = Configuration::from_file(&bare_path)
            .unwrap()
            .bind(ClientOptions::SECTION)
            .unwrap();
        assert_eq!(options.app_id, "bare");
    }

    #[test]
    fn test_unsupported_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("concretego.yaml");
        fs::write(&path, "ConcreteGoApi: {}").unwrap();

        assert!(matches!(
            Configuration::from_file(&path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Configuration::from_file(Path::new("/nonexistent/concretego.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
