use serde::{Deserialize, Serialize};

/// Search constraints for the `/properties` endpoint.
///
/// Every field is independently optional; `None` means "no constraint on
/// this dimension". The whole value is compared structurally so it can act
/// as a cache key for the query layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Minimum price in whole currency units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    /// Maximum price in whole currency units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PropertyFilters {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// The committed state a fresh filter controller starts from:
    /// first page, 20 per page, no other constraints.
    pub fn with_defaults() -> Self {
        Self {
            page: Some(Self::DEFAULT_PAGE),
            page_size: Some(Self::DEFAULT_PAGE_SIZE),
            ..Self::default()
        }
    }
}

/// A single property listing as returned by the API. Never mutated
/// client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: String,
    pub id_owner: String,
    pub name: String,
    pub address: String,
    /// Price in whole currency units
    pub price: u64,
    /// May be empty when the listing has no photo
    #[serde(default)]
    pub image_url: String,
}

/// Wire envelope for a page of listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesResponse {
    pub items: Vec<PropertyResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}
