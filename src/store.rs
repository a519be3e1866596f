//! Xsolla Store API client
//!
//! # Examples
//!
//! ```no_run
//! use xsolla_sdk::{Config, StoreClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let store = StoreClient::from_config(&config)?;
//!
//! let catalog = store.fetch_virtual_items().await?;
//! for item in &catalog.items {
//!     println!("{} - {}", item.sku, item.name);
//! }
//!
//! let token = store.fetch_payment_token("<user jwt>", "big_rocket").await?;
//! println!("Payment token: {}", token.token);
//! # Ok(())
//! # }
//! ```

use crate::api_error::{decode_error, ApiError, ApiResult};
use crate::catalog::{PaymentToken, VirtualItems};
use crate::config::Config;
use crate::metadata::RequestMetadata;
use crate::settings::StoreSettings;
use crate::Result;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace, warn};

#[derive(Debug, Serialize)]
struct PaymentRequest {
    sandbox: bool,
}

/// Issues Store API requests for one project
///
/// Holds no mutable state; clone it or share it between tasks freely.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    client: reqwest::Client,
    settings: StoreSettings,
    metadata: RequestMetadata,
    shipping: bool,
}

impl StoreClient {
    pub fn new(
        base_url: impl Into<String>,
        settings: StoreSettings,
        metadata: RequestMetadata,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            settings,
            metadata,
            shipping: false,
        }
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.api.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.api.timeout_seconds));
        }

        let mut store = Self::new(
            config.api.store_url.clone(),
            config.store.clone(),
            config.engine.metadata(),
        )
        .with_shipping(config.engine.shipping);
        store.client = builder.build()?;

        Ok(store)
    }

    /// Mark the host build as shipping, which affects sandbox selection
    pub fn with_shipping(mut self, shipping: bool) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }

    /// Whether payment tokens are requested for the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.settings.is_sandbox(self.shipping)
    }

    pub fn virtual_items_url(&self) -> String {
        format!(
            "{}/v1/project/{}/items/virtual_items",
            self.base_url,
            urlencoding::encode(self.settings.effective_project_id())
        )
    }

    pub fn payment_url(&self, item_sku: &str) -> String {
        format!(
            "{}/v1/payment/item/{}",
            self.base_url,
            urlencoding::encode(item_sku)
        )
    }

    /// Fetch the virtual item catalog of the configured project
    pub async fn fetch_virtual_items(&self) -> ApiResult<VirtualItems> {
        let request = self.client.get(self.virtual_items_url());
        self.execute(request, "fetch_virtual_items").await
    }

    /// Fetch a payment token for buying `item_sku` as the user behind `auth_token`
    pub async fn fetch_payment_token(
        &self,
        auth_token: &str,
        item_sku: &str,
    ) -> ApiResult<PaymentToken> {
        let request = self
            .client
            .post(self.payment_url(item_sku))
            .bearer_auth(auth_token)
            .json(&PaymentRequest {
                sandbox: self.is_sandbox(),
            });
        self.execute(request, "fetch_payment_token").await
    }

    /// Stamp metadata, send, and decode either the payload or the error envelope
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> ApiResult<T> {
        let request = self.metadata.apply(request);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "{}: transport failure", operation);
                return Err(report(operation, ApiError::no_response(), "invalid"));
            }
        };

        trace!(url = %response.url(), "{}: completed", operation);

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "{}: failed to read body", operation);
                return Err(report(operation, ApiError::no_response(), "invalid"));
            }
        };

        if let Some(error) = decode_error(status, &body) {
            return Err(report(operation, error, &body));
        }

        debug!(status, "{}: response: {}", operation, body);

        serde_json::from_str(&body).map_err(|e| {
            report(
                operation,
                ApiError::new(
                    status.to_string(),
                    format!("Can't deserialize response json: {}", e),
                ),
                &body,
            )
        })
    }
}

fn report(operation: &str, error: ApiError, body: &str) -> ApiError {
    warn!(
        code = %error.code,
        "{}: request failed ({}): {}",
        operation,
        error.message,
        body
    );
    error
}
