use crate::config::Config;
use crate::models::{PropertiesResponse, PropertyFilters, PropertyResponse};
use crate::repository::query::filter_params;
use crate::repository::traits::PropertyRepository;
use crate::repository::url::UrlBuilder;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const PROPERTIES_PATH: &str = "/properties";

/// REST-backed property repository.
pub struct ApiPropertyRepository {
    client: Client,
    base_url: String,
}

impl ApiPropertyRepository {
    /// Create a repository against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into();
        if base_url.is_empty() {
            warn!("API base URL is empty; requests will be path-relative");
        }

        Ok(Self { client, base_url })
    }

    /// Create a repository from the process environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone())
    }

    fn request_url(&self, filters: Option<&PropertyFilters>) -> String {
        let params = filters.map(filter_params);
        UrlBuilder::new(&self.base_url)
            .set_path(PROPERTIES_PATH)
            .build(params.as_deref())
    }
}

#[async_trait]
impl PropertyRepository for ApiPropertyRepository {
    async fn get_all(&self, filters: Option<&PropertyFilters>) -> Result<Vec<PropertyResponse>> {
        let url = self.request_url(filters);
        debug!("Fetching properties: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch properties")?;

        if !response.status().is_success() {
            warn!("Property API returned status: {}", response.status());
            anyhow::bail!("Property API returned status: {}", response.status());
        }

        let envelope: PropertiesResponse = response
            .json()
            .await
            .context("Failed to parse properties response")?;

        // Pagination meta is not surfaced to callers yet; log it so the
        // truncation is at least visible.
        debug!(
            "Received {} of {} properties (page {}, size {})",
            envelope.items.len(),
            envelope.total,
            envelope.page,
            envelope.page_size
        );

        Ok(envelope.items)
    }

    fn source_name(&self) -> &'static str {
        "property-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ENVELOPE: &str = r#"{
        "items": [
            {
                "id": "p1",
                "idOwner": "o1",
                "name": "Casa Blanca",
                "address": "Calle 1 #2-3",
                "price": 2400000,
                "imageUrl": ""
            }
        ],
        "page": 1,
        "pageSize": 20,
        "total": 1
    }"#;

    #[test]
    fn request_url_without_filters_has_no_query() {
        let repo = ApiPropertyRepository::new("https://api.example.com").unwrap();
        assert_eq!(repo.request_url(None), "https://api.example.com/properties");
    }

    #[test]
    fn request_url_for_price_shortcut_matches_wire_format() {
        let repo = ApiPropertyRepository::new("https://api.example.com").unwrap();
        let filters = PropertyFilters {
            min_price: Some(0),
            max_price: Some(2_500_000),
            ..PropertyFilters::with_defaults()
        };
        assert_eq!(
            repo.request_url(Some(&filters)),
            "https://api.example.com/properties?minPrice=0&maxPrice=2500000&page=1&pageSize=20"
        );
    }

    #[tokio::test]
    async fn unwraps_envelope_items() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/properties")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("minPrice".into(), "0".into()),
                Matcher::UrlEncoded("maxPrice".into(), "2500000".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("pageSize".into(), "20".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ENVELOPE)
            .create_async()
            .await;

        let repo = ApiPropertyRepository::new(server.url()).unwrap();
        let filters = PropertyFilters {
            min_price: Some(0),
            max_price: Some(2_500_000),
            ..PropertyFilters::with_defaults()
        };

        let items = repo.get_all(Some(&filters)).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Casa Blanca");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/properties")
            .with_status(500)
            .create_async()
            .await;

        let repo = ApiPropertyRepository::new(server.url()).unwrap();
        let err = repo.get_all(None).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/properties")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let repo = ApiPropertyRepository::new(server.url()).unwrap();
        let err = repo.get_all(None).await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
