//! Project configuration management
//!
//! This module handles reading and writing the SDK configuration file.
//! Configuration is stored in TOML format at `~/.xsolla/config.toml`.
//!
//! # Examples
//!
//! ```no_run
//! use xsolla_sdk::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load config
//! let config = Config::load()?;
//!
//! println!("Store project: {}", config.store.effective_project_id());
//! println!("Store API: {}", config.api.store_url);
//!
//! // Modify and save
//! let mut config = config;
//! config.set("store.enable_sandbox", "false")?;
//! config.save()?;
//! # Ok(())
//! # }
//! ```

use crate::metadata::RequestMetadata;
use crate::settings::{LoginSettings, SettingSpec, SettingsIssue, StoreSettings};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Default Xsolla Store API root
pub const DEFAULT_STORE_URL: &str = "https://store.xsolla.com/api";

/// SDK configuration file (`~/.xsolla/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Xsolla Login settings
    #[serde(default)]
    pub login: LoginSettings,

    /// Xsolla Store settings
    #[serde(default)]
    pub store: StoreSettings,

    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Host engine identification
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Store API root (override to point at a staging or mock server)
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Per-request timeout in seconds (0 = no timeout)
    #[serde(default)]
    pub timeout_seconds: u64,
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            timeout_seconds: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine name reported in request metadata
    #[serde(default = "default_engine_name")]
    pub name: String,

    /// Engine version reported in request metadata
    #[serde(default)]
    pub version: String,

    /// Shipping build: sandbox payments only if `store.enable_sandbox_in_shipping_build`
    #[serde(default)]
    pub shipping: bool,
}

fn default_engine_name() -> String {
    "rust".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            version: String::new(),
            shipping: false,
        }
    }
}

impl EngineConfig {
    pub fn metadata(&self) -> RequestMetadata {
        RequestMetadata::new(&self.name, &self.version)
    }
}

const API_SCHEMA: &[SettingSpec] = &[
    SettingSpec {
        key: "api.store_url",
        kind: "url",
        description: "Store API root",
    },
    SettingSpec {
        key: "api.timeout_seconds",
        kind: "integer",
        description: "Per-request timeout in seconds (0 = none)",
    },
    SettingSpec {
        key: "engine.name",
        kind: "string",
        description: "Engine name sent as 'engine' metadata",
    },
    SettingSpec {
        key: "engine.version",
        kind: "string",
        description: "Engine version sent as 'engine_v' metadata",
    },
    SettingSpec {
        key: "engine.shipping",
        kind: "bool",
        description: "Treat this as a shipping build for sandbox selection",
    },
];

impl Config {
    /// Get the default config file path
    ///
    /// Uses XSOLLA_CONFIG_DIR if set, otherwise ~/.xsolla/config.toml
    pub fn default_path() -> Result<PathBuf> {
        // Check for custom config directory (useful for testing)
        if let Ok(config_dir) = std::env::var("XSOLLA_CONFIG_DIR") {
            return Ok(PathBuf::from(config_dir).join("config.toml"));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not find home directory".to_string()))?;

        Ok(home.join(".xsolla").join("config.toml"))
    }

    /// Load config from file, or use defaults if it doesn't exist
    ///
    /// Environment variable overrides:
    /// - `XSOLLA_PROJECT_ID`: Overrides `store.project_id`
    /// - `XSOLLA_CONFIG_DIR`: Overrides the config directory location
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;

        let mut config = if !path.exists() {
            Self::default()
        } else {
            let content = fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        };

        if let Ok(project_id) = std::env::var("XSOLLA_PROJECT_ID") {
            if !project_id.is_empty() {
                config.store.project_id = project_id;
            }
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, self.to_toml()?)?;
        Ok(())
    }

    /// Every recognized key, in config file order
    pub fn schema() -> Vec<SettingSpec> {
        LoginSettings::schema()
            .iter()
            .chain(StoreSettings::schema())
            .chain(API_SCHEMA)
            .copied()
            .collect()
    }

    /// Validate all sections
    pub fn validate(&self) -> Vec<SettingsIssue> {
        let mut issues = self.login.validate();
        issues.extend(self.store.validate());

        if url::Url::parse(&self.api.store_url).is_err() {
            issues.push(SettingsIssue {
                key: "api.store_url",
                problem: format!("'{}' is not a valid URL", self.api.store_url),
            });
        }

        issues
    }

    /// Like [`Config::validate`] but fails on the first invalid config
    pub fn ensure_valid(&self) -> Result<()> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidSettings(issues))
        }
    }

    /// Set a value by its dotted key (see [`Config::schema`])
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let login = &mut self.login;
        let store = &mut self.store;

        match key {
            "login.project_id" => login.project_id = value.to_string(),
            "login.login_id" => login.login_id = value.to_string(),
            "login.callback_url" => login.callback_url = value.to_string(),
            "login.user_data_storage" => login.user_data_storage = parse_value(key, value)?,
            "login.jwt_validation_url" => login.jwt_validation_url = value.to_string(),
            "login.use_cross_platform_account_linking" => {
                login.use_cross_platform_account_linking = parse_value(key, value)?
            }
            "login.account_linking_url" => login.account_linking_url = value.to_string(),
            "login.platform_authentication_url" => {
                login.platform_authentication_url = value.to_string()
            }
            "login.platform" => login.platform = parse_value(key, value)?,
            "login.platform_account_id" => login.platform_account_id = value.to_string(),
            "login.demo_project_id" => login.demo_project_id = value.to_string(),
            "login.demo_login_id" => login.demo_login_id = value.to_string(),

            "store.project_id" => store.project_id = value.to_string(),
            "store.enable_sandbox" => store.enable_sandbox = parse_value(key, value)?,
            "store.enable_sandbox_in_shipping_build" => {
                store.enable_sandbox_in_shipping_build = parse_value(key, value)?
            }
            "store.payment_interface_theme" => {
                store.payment_interface_theme = parse_value(key, value)?
            }
            "store.use_platform_browser" => store.use_platform_browser = parse_value(key, value)?,
            "store.build_for_steam" => store.build_for_steam = parse_value(key, value)?,
            "store.use_cross_platform_account_linking" => {
                store.use_cross_platform_account_linking = parse_value(key, value)?
            }
            "store.demo_project_id" => store.demo_project_id = value.to_string(),

            "api.store_url" => self.api.store_url = value.trim_end_matches('/').to_string(),
            "api.timeout_seconds" => self.api.timeout_seconds = parse_value(key, value)?,
            "engine.name" => self.engine.name = value.to_string(),
            "engine.version" => self.engine.version = value.to_string(),
            "engine.shipping" => self.engine.shipping = parse_value(key, value)?,

            _ => return Err(Error::UnknownKey(key.to_string())),
        }

        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| Error::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
