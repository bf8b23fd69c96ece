use anyhow::{Context, Result};
use property_scout::config::Config;
use property_scout::fetch::{PropertySession, QueryClient};
use property_scout::models::PropertyFilters;
use property_scout::repository::ApiPropertyRepository;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parse `key=value` command line arguments into filters. Unset keys stay
/// at the defaults (page 1, 20 per page).
fn filters_from_args(args: &[String]) -> Result<(PropertyFilters, bool)> {
    let mut filters = PropertyFilters::with_defaults();
    let mut as_json = false;

    for arg in args {
        if arg == "json" {
            as_json = true;
            continue;
        }

        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", arg))?;

        match key {
            "name" => filters.name = Some(value.to_string()),
            "address" => filters.address = Some(value.to_string()),
            "min-price" => {
                filters.min_price =
                    Some(value.parse().with_context(|| format!("Bad min-price '{}'", value))?)
            }
            "max-price" => {
                filters.max_price =
                    Some(value.parse().with_context(|| format!("Bad max-price '{}'", value))?)
            }
            "page" => {
                filters.page =
                    Some(value.parse().with_context(|| format!("Bad page '{}'", value))?)
            }
            "page-size" => {
                filters.page_size =
                    Some(value.parse().with_context(|| format!("Bad page-size '{}'", value))?)
            }
            other => anyhow::bail!(
                "Unknown filter '{}'. Known: name, address, min-price, max-price, page, page-size",
                other
            ),
        }
    }

    Ok((filters, as_json))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Property Scout");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (filters, as_json) = filters_from_args(&args)?;

    let config = Config::from_env();
    let repository = Arc::new(ApiPropertyRepository::from_config(&config)?);
    let client = Arc::new(QueryClient::new(repository));
    let session = PropertySession::new(client);

    info!("Searching properties with {:?}", filters);
    session.apply(Some(filters)).await?;

    let snapshot = session.snapshot();
    if let Some(error) = snapshot.error {
        anyhow::bail!("Error loading properties: {}", error);
    }

    let properties = snapshot.data.unwrap_or_default();
    info!("✅ Loaded {} properties\n", properties.len());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&properties)?);
        return Ok(());
    }

    if properties.is_empty() {
        println!("No properties matched the filters.");
        return Ok(());
    }

    for (i, property) in properties.iter().enumerate() {
        println!("{}. {} (${})", i + 1, property.name, property.price);
        println!("   {}", property.address);
        if !property.image_url.is_empty() {
            println!("   Image: {}", property.image_url);
        }
        println!("   ID: {} (owner {})", property.id, property.id_owner);
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_into_filters() {
        let args = vec![
            "name=Casa".to_string(),
            "min-price=0".to_string(),
            "max-price=2500000".to_string(),
        ];
        let (filters, as_json) = filters_from_args(&args).unwrap();
        assert_eq!(filters.name, Some("Casa".to_string()));
        assert_eq!(filters.min_price, Some(0));
        assert_eq!(filters.max_price, Some(2_500_000));
        assert_eq!(filters.page, Some(1));
        assert!(!as_json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let args = vec!["rooms=3".to_string()];
        assert!(filters_from_args(&args).is_err());
    }

    #[test]
    fn json_flag_is_recognized() {
        let (_, as_json) = filters_from_args(&["json".to_string()]).unwrap();
        assert!(as_json);
    }
}
