use crate::models::{PropertyFilters, PropertyResponse};
use anyhow::Result;
use async_trait::async_trait;

/// Data source for property listings.
/// Keeps the HTTP implementation swappable for stubs in tests.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Fetch all listings matching the filters, unwrapped from the paged
    /// envelope. Any transport, status, or parse failure propagates as-is.
    async fn get_all(&self, filters: Option<&PropertyFilters>) -> Result<Vec<PropertyResponse>>;

    /// Name of the backing source, for logging
    fn source_name(&self) -> &'static str;
}
