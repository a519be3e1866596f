use crate::settings::SettingsIssue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid settings:\n{}\n\n\
             Hint: Fix the values in your config file or run:\n\
             xsolla config set <key> <value>\n\n\
             List recognized keys with: xsolla config schema",
             format_issues(.0))]
    InvalidSettings(Vec<SettingsIssue>),

    #[error("Unknown configuration key: {0}\n\n\
             Hint: List recognized keys with: xsolla config schema")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("{0}")]
    Other(String),
}

fn format_issues(issues: &[SettingsIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}
