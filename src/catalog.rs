//! Store API payloads
//!
//! Only the fields the SDK exposes are modelled; unknown fields are ignored and
//! optional ones default, so catalog additions on Xsolla's side don't break decoding.

use serde::{Deserialize, Deserializer, Serialize};

// `null` is sent for empty optional fields; treat it like an absent one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `GET /v1/project/{project_id}/items/virtual_items`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualItems {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<VirtualItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualItem {
    pub sku: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Item kind, e.g. `virtual_good`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub item_type: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_free: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<ItemGroup>,

    /// Real-money price; absent for items sold only for virtual currency
    #[serde(default)]
    pub price: Option<Price>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub virtual_prices: Vec<VirtualPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub external_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Amounts are decimal strings as sent by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: String,

    #[serde(default)]
    pub amount_without_discount: Option<String>,

    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualPrice {
    pub sku: String,

    pub amount: u64,

    #[serde(default)]
    pub amount_without_discount: Option<u64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl VirtualItem {
    /// The virtual price marked as default, or the first one listed
    pub fn default_virtual_price(&self) -> Option<&VirtualPrice> {
        self.virtual_prices
            .iter()
            .find(|p| p.is_default)
            .or_else(|| self.virtual_prices.first())
    }
}

impl VirtualItems {
    pub fn find(&self, sku: &str) -> Option<&VirtualItem> {
        self.items.iter().find(|item| item.sku == sku)
    }
}

/// Response of `POST /v1/payment/item/{sku}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentToken {
    /// Access token for opening the payment UI
    pub token: String,

    #[serde(default)]
    pub order_id: Option<u64>,
}
