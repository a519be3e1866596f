//! Login and Store project settings
//!
//! These are the values a game project configures once, typically from the
//! Xsolla Publisher Account: project and login IDs, callback URLs, sandbox
//! flags and the cross-platform account linking options.
//!
//! Each settings struct has a `schema()` listing the recognized keys and a
//! `validate()` returning every problem found.
//!
//! # Examples
//!
//! ```
//! use xsolla_sdk::settings::{LoginSettings, TargetPlatform};
//!
//! let mut login = LoginSettings::default();
//! login.project_id = "44056".to_string();
//! login.login_id = "026201e3-7e40-11ea-a85b-42010aa80004".to_string();
//! assert!(login.validate().is_empty());
//!
//! login.use_cross_platform_account_linking = true;
//! login.platform = TargetPlatform::XboxLive;
//! assert_eq!(login.validate().len(), 3);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Where user data is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserDataStorage {
    /// Stored at Xsolla's side
    #[default]
    Xsolla,

    /// Stored on the game's side, API calls go through proxy requests
    Custom,
}

/// Platform a user account belongs to, for cross-platform account linking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPlatform {
    PlaystationNetwork,
    XboxLive,
    #[default]
    Xsolla,
    PcStandalone,
    NintendoShop,
    GooglePlay,
    AppStoreIos,
    AndroidStandalone,
    IosStandalone,
    AndroidOther,
    IosOther,
    PcOther,
}

/// Color theme of the payment UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentUiTheme {
    Default,
    DefaultDark,
    #[default]
    Dark,
}

impl UserDataStorage {
    pub const ALL: &'static [Self] = &[Self::Xsolla, Self::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xsolla => "xsolla",
            Self::Custom => "custom",
        }
    }
}

impl TargetPlatform {
    pub const ALL: &'static [Self] = &[
        Self::PlaystationNetwork,
        Self::XboxLive,
        Self::Xsolla,
        Self::PcStandalone,
        Self::NintendoShop,
        Self::GooglePlay,
        Self::AppStoreIos,
        Self::AndroidStandalone,
        Self::IosStandalone,
        Self::AndroidOther,
        Self::IosOther,
        Self::PcOther,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlaystationNetwork => "playstation_network",
            Self::XboxLive => "xbox_live",
            Self::Xsolla => "xsolla",
            Self::PcStandalone => "pc_standalone",
            Self::NintendoShop => "nintendo_shop",
            Self::GooglePlay => "google_play",
            Self::AppStoreIos => "app_store_ios",
            Self::AndroidStandalone => "android_standalone",
            Self::IosStandalone => "ios_standalone",
            Self::AndroidOther => "android_other",
            Self::IosOther => "ios_other",
            Self::PcOther => "pc_other",
        }
    }
}

impl PaymentUiTheme {
    pub const ALL: &'static [Self] = &[Self::Default, Self::DefaultDark, Self::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DefaultDark => "default_dark",
            Self::Dark => "dark",
        }
    }
}

macro_rules! str_enum_impls {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let options: Vec<_> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        format!("expected one of: {}", options.join(", "))
                    })
            }
        }
    };
}

str_enum_impls!(UserDataStorage);
str_enum_impls!(TargetPlatform);
str_enum_impls!(PaymentUiTheme);

/// One recognized setting: its dotted key, value type, and what it does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    pub key: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsIssue {
    pub key: &'static str,
    pub problem: String,
}

impl SettingsIssue {
    fn new(key: &'static str, problem: impl Into<String>) -> Self {
        Self {
            key,
            problem: problem.into(),
        }
    }
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.problem)
    }
}

/// Xsolla Login settings (`[login]` in the config file)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSettings {
    /// Project ID from your Publisher Account. Required.
    pub project_id: String,

    /// Login ID in the UUID format from your Publisher Account. Required.
    pub login_id: String,

    /// Redirect target after registration, authentication or password reset.
    /// Must match a Callback URL from the Publisher Account login settings.
    pub callback_url: String,

    pub user_data_storage: UserDataStorage,

    /// Server that validates the JWT issued to authenticated users
    pub jwt_validation_url: String,

    pub use_cross_platform_account_linking: bool,

    /// Links a platform account to the main account with a generated code
    pub account_linking_url: String,

    /// Authenticates a user on the target platform
    pub platform_authentication_url: String,

    pub platform: TargetPlatform,

    /// Alphanumeric identifier of the target platform user account
    pub platform_account_id: String,

    pub demo_project_id: String,
    pub demo_login_id: String,
}

impl LoginSettings {
    pub fn schema() -> &'static [SettingSpec] {
        &[
            SettingSpec {
                key: "login.project_id",
                kind: "string",
                description: "Project ID from your Publisher Account (required)",
            },
            SettingSpec {
                key: "login.login_id",
                kind: "uuid",
                description: "Login ID from your Publisher Account (required)",
            },
            SettingSpec {
                key: "login.callback_url",
                kind: "url",
                description: "Redirect after registration/authentication/password reset",
            },
            SettingSpec {
                key: "login.user_data_storage",
                kind: "xsolla | custom",
                description: "Custom storage routes API calls through proxy requests",
            },
            SettingSpec {
                key: "login.jwt_validation_url",
                kind: "url",
                description: "Server validating the JWT of authenticated users",
            },
            SettingSpec {
                key: "login.use_cross_platform_account_linking",
                kind: "bool",
                description: "Imitate platform authentication to try account linking",
            },
            SettingSpec {
                key: "login.account_linking_url",
                kind: "url",
                description: "Links a platform account to the main account (required with linking)",
            },
            SettingSpec {
                key: "login.platform_authentication_url",
                kind: "url",
                description: "Authenticates the target platform account (required with linking)",
            },
            SettingSpec {
                key: "login.platform",
                kind: "platform",
                description: "Target platform for account linking",
            },
            SettingSpec {
                key: "login.platform_account_id",
                kind: "alphanumeric",
                description: "Target platform account (required with linking unless platform is xsolla)",
            },
            SettingSpec {
                key: "login.demo_project_id",
                kind: "string",
                description: "Used when project_id is empty",
            },
            SettingSpec {
                key: "login.demo_login_id",
                kind: "uuid",
                description: "Used when login_id is empty",
            },
        ]
    }

    pub fn effective_project_id(&self) -> &str {
        non_empty_or(&self.project_id, &self.demo_project_id)
    }

    pub fn effective_login_id(&self) -> &str {
        non_empty_or(&self.login_id, &self.demo_login_id)
    }

    /// Check required fields and formats, returning every problem found
    pub fn validate(&self) -> Vec<SettingsIssue> {
        let mut issues = Vec::new();

        if self.effective_project_id().is_empty() {
            issues.push(SettingsIssue::new("login.project_id", "is required"));
        }

        let login_id = self.effective_login_id();
        if login_id.is_empty() {
            issues.push(SettingsIssue::new("login.login_id", "is required"));
        } else if !is_uuid(login_id) {
            issues.push(SettingsIssue::new(
                "login.login_id",
                format!("'{}' is not a UUID", login_id),
            ));
        }

        check_optional_url(&mut issues, "login.callback_url", &self.callback_url);
        check_optional_url(
            &mut issues,
            "login.jwt_validation_url",
            &self.jwt_validation_url,
        );

        if self.use_cross_platform_account_linking {
            check_required_url(
                &mut issues,
                "login.account_linking_url",
                &self.account_linking_url,
            );
            check_required_url(
                &mut issues,
                "login.platform_authentication_url",
                &self.platform_authentication_url,
            );

            if self.platform != TargetPlatform::Xsolla {
                if self.platform_account_id.is_empty() {
                    issues.push(SettingsIssue::new(
                        "login.platform_account_id",
                        format!("is required for platform '{}'", self.platform),
                    ));
                } else if !self.platform_account_id.chars().all(|c| c.is_ascii_alphanumeric()) {
                    issues.push(SettingsIssue::new(
                        "login.platform_account_id",
                        "must be alphanumeric",
                    ));
                }
            }
        }

        issues
    }
}

/// Xsolla Store settings (`[store]` in the config file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Project ID from your Publisher Account. Required.
    pub project_id: String,

    /// Payments go through the sandbox in non-shipping builds
    pub enable_sandbox: bool,

    /// Also use the sandbox in shipping builds
    pub enable_sandbox_in_shipping_build: bool,

    pub payment_interface_theme: PaymentUiTheme,

    pub use_platform_browser: bool,

    pub build_for_steam: bool,

    pub use_cross_platform_account_linking: bool,

    pub demo_project_id: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            enable_sandbox: true,
            enable_sandbox_in_shipping_build: false,
            payment_interface_theme: PaymentUiTheme::Dark,
            use_platform_browser: false,
            build_for_steam: false,
            use_cross_platform_account_linking: false,
            demo_project_id: "44056".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn schema() -> &'static [SettingSpec] {
        &[
            SettingSpec {
                key: "store.project_id",
                kind: "numeric string",
                description: "Project ID from your Publisher Account",
            },
            SettingSpec {
                key: "store.enable_sandbox",
                kind: "bool",
                description: "Use sandbox payments in non-shipping builds",
            },
            SettingSpec {
                key: "store.enable_sandbox_in_shipping_build",
                kind: "bool",
                description: "Also use sandbox payments in shipping builds",
            },
            SettingSpec {
                key: "store.payment_interface_theme",
                kind: "default | default_dark | dark",
                description: "Payment UI theme",
            },
            SettingSpec {
                key: "store.use_platform_browser",
                kind: "bool",
                description: "Open the payment UI in the system browser",
            },
            SettingSpec {
                key: "store.build_for_steam",
                kind: "bool",
                description: "Build targets Steam",
            },
            SettingSpec {
                key: "store.use_cross_platform_account_linking",
                kind: "bool",
                description: "Cross-platform account linking on the store side",
            },
            SettingSpec {
                key: "store.demo_project_id",
                kind: "numeric string",
                description: "Used when project_id is empty",
            },
        ]
    }

    pub fn effective_project_id(&self) -> &str {
        non_empty_or(&self.project_id, &self.demo_project_id)
    }

    /// Whether payments use the sandbox for the given build kind
    pub fn is_sandbox(&self, shipping: bool) -> bool {
        if shipping {
            self.enable_sandbox && self.enable_sandbox_in_shipping_build
        } else {
            self.enable_sandbox
        }
    }

    pub fn validate(&self) -> Vec<SettingsIssue> {
        let mut issues = Vec::new();

        let project_id = self.effective_project_id();
        if project_id.is_empty() {
            issues.push(SettingsIssue::new("store.project_id", "is required"));
        } else if !project_id.chars().all(|c| c.is_ascii_digit()) {
            issues.push(SettingsIssue::new(
                "store.project_id",
                format!("'{}' must be numeric", project_id),
            ));
        }

        issues
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID pattern is valid")
});

fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

fn check_optional_url(issues: &mut Vec<SettingsIssue>, key: &'static str, value: &str) {
    if !value.is_empty() && url::Url::parse(value).is_err() {
        issues.push(SettingsIssue::new(key, format!("'{}' is not a valid URL", value)));
    }
}

fn check_required_url(issues: &mut Vec<SettingsIssue>, key: &'static str, value: &str) {
    if value.is_empty() {
        issues.push(SettingsIssue::new(
            key,
            "is required when cross-platform account linking is enabled",
        ));
    } else {
        check_optional_url(issues, key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_ID: &str = "026201e3-7e40-11ea-a85b-42010aa80004";

    fn valid_login() -> LoginSettings {
        LoginSettings {
            project_id: "44056".to_string(),
            login_id: LOGIN_ID.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_defaults() {
        let store = StoreSettings::default();
        assert!(store.enable_sandbox);
        assert!(!store.enable_sandbox_in_shipping_build);
        assert!(!store.build_for_steam);
        assert_eq!(store.payment_interface_theme, PaymentUiTheme::Dark);
        assert_eq!(store.effective_project_id(), "44056");
        assert!(store.validate().is_empty());
    }

    #[test]
    fn test_sandbox_per_build() {
        let mut store = StoreSettings::default();
        assert!(store.is_sandbox(false));
        assert!(!store.is_sandbox(true));

        store.enable_sandbox_in_shipping_build = true;
        assert!(store.is_sandbox(true));

        store.enable_sandbox = false;
        assert!(!store.is_sandbox(false));
        assert!(!store.is_sandbox(true));
    }

    #[test]
    fn test_store_project_id_must_be_numeric() {
        let store = StoreSettings {
            project_id: "abc".to_string(),
            ..Default::default()
        };
        let issues = store.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "store.project_id");
    }

    #[test]
    fn test_login_requires_ids() {
        let issues = LoginSettings::default().validate();
        let keys: Vec<_> = issues.iter().map(|i| i.key).collect();
        assert_eq!(keys, vec!["login.project_id", "login.login_id"]);
    }

    #[test]
    fn test_login_demo_fallback() {
        let login = LoginSettings {
            demo_project_id: "44056".to_string(),
            demo_login_id: LOGIN_ID.to_string(),
            ..Default::default()
        };
        assert!(login.validate().is_empty());
        assert_eq!(login.effective_login_id(), LOGIN_ID);
    }

    #[test]
    fn test_login_id_must_be_uuid() {
        let mut login = valid_login();
        login.login_id = "not-a-uuid".to_string();
        let issues = login.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].problem.contains("not a UUID"));
    }

    #[test]
    fn test_uuid_format() {
        assert!(is_uuid(LOGIN_ID));
        assert!(is_uuid(&LOGIN_ID.to_uppercase()));
        assert!(!is_uuid("026201e3-7e40-11ea-a85b-42010aa8000"));
        assert!(!is_uuid("026201e37e4011eaa85b42010aa80004"));
        assert!(!is_uuid(&format!("{} ", LOGIN_ID)));
    }

    #[test]
    fn test_invalid_callback_url() {
        let mut login = valid_login();
        login.callback_url = "not a url".to_string();
        assert_eq!(login.validate()[0].key, "login.callback_url");
    }

    #[test]
    fn test_cross_platform_linking_requirements() {
        let mut login = valid_login();
        login.use_cross_platform_account_linking = true;
        login.platform = TargetPlatform::Xsolla;

        // platform_account_id is not needed for the xsolla platform
        let keys: Vec<_> = login.validate().iter().map(|i| i.key).collect();
        assert_eq!(
            keys,
            vec!["login.account_linking_url", "login.platform_authentication_url"]
        );

        login.account_linking_url = "https://linking.example.com/link".to_string();
        login.platform_authentication_url = "https://linking.example.com/auth".to_string();
        login.platform = TargetPlatform::NintendoShop;
        let issues = login.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "login.platform_account_id");

        login.platform_account_id = "user 1".to_string();
        assert_eq!(login.validate()[0].problem, "must be alphanumeric");

        login.platform_account_id = "user1".to_string();
        assert!(login.validate().is_empty());
    }

    #[test]
    fn test_linking_fields_ignored_when_disabled() {
        let mut login = valid_login();
        login.platform = TargetPlatform::XboxLive;
        assert!(login.validate().is_empty());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("XBOX_LIVE".parse::<TargetPlatform>(), Ok(TargetPlatform::XboxLive));
        assert_eq!("custom".parse::<UserDataStorage>(), Ok(UserDataStorage::Custom));
        assert_eq!(
            "default_dark".parse::<PaymentUiTheme>(),
            Ok(PaymentUiTheme::DefaultDark)
        );
        assert!("steam".parse::<TargetPlatform>().is_err());
        assert_eq!(TargetPlatform::AppStoreIos.to_string(), "app_store_ios");
    }

    #[test]
    fn test_schema_keys_are_unique() {
        let mut keys: Vec<_> = LoginSettings::schema()
            .iter()
            .chain(StoreSettings::schema())
            .map(|s| s.key)
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
