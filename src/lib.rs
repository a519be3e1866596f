//! Xsolla SDK - Login and Store web API client for games
//!
//! Exposes Xsolla's store endpoints and project settings to a host engine or tool:
//!
//! - Typed Login and Store settings with a recognized-key schema and validation
//! - Virtual item catalog fetch, decoded into typed items
//! - Payment token fetch for a signed-in user
//! - Uniform `(code, message)` errors decoded from Xsolla's JSON error envelope
//! - SDK/engine metadata stamped on every request
//!
//! # Examples
//!
//! ```no_run
//! use xsolla_sdk::{Config, StoreClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load project settings
//! let config = Config::load()?;
//! config.ensure_valid()?;
//!
//! // Fetch the catalog
//! let store = StoreClient::from_config(&config)?;
//! match store.fetch_virtual_items().await {
//!     Ok(catalog) => println!("{} items", catalog.items.len()),
//!     Err(e) => println!("Failed with code {}: {}", e.code, e.message),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`settings`] - Login and Store settings, schema and validation
//! - [`config`] - TOML config file management
//! - [`store`] - Store API client
//! - [`catalog`] - Store API payloads
//! - [`api_error`] - Decoding of Xsolla error responses
//! - [`metadata`] - SDK/engine request metadata
//! - [`error`] - Error types and result handling

pub mod api_error;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metadata;
pub mod settings;
pub mod store;

pub use api_error::{decode_error, decode_outcome, ApiError, ApiResult};
pub use catalog::{PaymentToken, VirtualItem, VirtualItems};
pub use config::Config;
pub use error::{Error, Result};
pub use metadata::{RequestMetadata, SDK_VERSION};
pub use settings::{
    LoginSettings, PaymentUiTheme, SettingsIssue, StoreSettings, TargetPlatform, UserDataStorage,
};
pub use store::StoreClient;
