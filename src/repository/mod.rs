pub mod api;
pub mod query;
pub mod traits;
pub mod url;

pub use api::ApiPropertyRepository;
pub use traits::PropertyRepository;

use crate::models::{PropertyFilters, PropertyResponse};
use anyhow::Result;

/// Get-properties use case: pure delegation to the repository, so the data
/// source stays injectable independent of the query layer.
pub async fn get_properties(
    repository: &dyn PropertyRepository,
    filters: Option<&PropertyFilters>,
) -> Result<Vec<PropertyResponse>> {
    repository.get_all(filters).await
}
