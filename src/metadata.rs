//! SDK and engine identification attached to every request
//!
//! Xsolla uses these values for server-side analytics and compatibility
//! handling. They are sent both as headers and as query parameters.

use reqwest::RequestBuilder;

/// SDK name reported to Xsolla
pub const SDK_NAME: &str = "store";

/// SDK version reported to Xsolla
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    pub engine: String,
    pub engine_version: String,
    pub sdk: String,
    pub sdk_version: String,
}

impl RequestMetadata {
    /// Metadata for the given host engine, with this crate as the SDK
    pub fn new(engine: impl Into<String>, engine_version: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            engine_version: engine_version.into(),
            sdk: SDK_NAME.to_string(),
            sdk_version: SDK_VERSION.to_string(),
        }
    }

    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("engine", self.engine.as_str()),
            ("engine_v", self.engine_version.as_str()),
            ("sdk", self.sdk.as_str()),
            ("sdk_v", self.sdk_version.as_str()),
        ]
    }

    /// Stamp the metadata onto a request as headers and query parameters
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let pairs = self.pairs();
        let request = pairs
            .iter()
            .fold(request, |request, (name, value)| request.header(*name, *value));
        request.query(&pairs)
    }
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::new("rust", "")
    }
}
