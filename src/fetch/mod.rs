//! Cached property queries keyed by filter value, plus the session that
//! shields a consumer from stale responses.

mod session;

pub use session::PropertySession;

use crate::models::{PropertyFilters, PropertyResponse};
use crate::repository::{get_properties, PropertyRepository};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Cache identity of a query: the structural value of its filters.
/// Deeply equal filters share one entry, distinct instances or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Option<PropertyFilters>);

impl QueryKey {
    pub fn new(filters: Option<PropertyFilters>) -> Self {
        Self(filters)
    }

    pub fn filters(&self) -> Option<&PropertyFilters> {
        self.0.as_ref()
    }
}

/// Cloneable wrapper so one failed fetch can be reported to every consumer
/// of its cache entry.
#[derive(Debug, Clone)]
pub struct QueryError(Arc<anyhow::Error>);

impl QueryError {
    fn new(err: anyhow::Error) -> Self {
        Self(Arc::new(err))
    }

    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for QueryError {}

#[derive(Debug, Clone)]
struct CachedPage {
    items: Vec<PropertyResponse>,
    fetched_at: DateTime<Utc>,
}

type QueryResult = Result<CachedPage, QueryError>;
type CacheCell = Arc<OnceCell<QueryResult>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable state of a query: data, error, and where in the
/// idle -> loading -> (success | error) lifecycle it sits.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub status: QueryStatus,
    pub data: Option<Vec<PropertyResponse>>,
    pub error: Option<QueryError>,
}

impl QuerySnapshot {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
        }
    }

    fn from_result(result: &QueryResult) -> Self {
        match result {
            Ok(page) => Self {
                status: QueryStatus::Success,
                data: Some(page.items.clone()),
                error: None,
            },
            Err(err) => Self {
                status: QueryStatus::Error,
                data: None,
                error: Some(err.clone()),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

/// Request/response cache over a [`PropertyRepository`].
///
/// At most one fetch is ever in flight per distinct filter value: concurrent
/// callers for the same key await the same cell instead of issuing duplicate
/// requests. Errors are cached alongside successes until a refetch.
pub struct QueryClient {
    repository: Arc<dyn PropertyRepository>,
    cache: Mutex<HashMap<QueryKey, CacheCell>>,
}

impl QueryClient {
    pub fn new(repository: Arc<dyn PropertyRepository>) -> Self {
        Self {
            repository,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cell_for(&self, key: &QueryKey) -> CacheCell {
        let mut cache = self.cache.lock().unwrap();
        cache
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Resolve the query for `filters`, from cache when possible.
    pub async fn fetch(&self, filters: Option<&PropertyFilters>) -> QuerySnapshot {
        let key = QueryKey::new(filters.cloned());
        let cell = self.cell_for(&key);

        if let Some(cached) = cell.get() {
            if let Ok(page) = cached {
                debug!(
                    "Cache hit for {:?} ({} items, fetched at {})",
                    key.filters(),
                    page.items.len(),
                    page.fetched_at
                );
            }
            return QuerySnapshot::from_result(cached);
        }

        let result = cell
            .get_or_init(|| async { self.run(&key).await })
            .await;
        QuerySnapshot::from_result(result)
    }

    /// Drop the cached entry for `filters` and fetch fresh, regardless of
    /// cache freshness.
    pub async fn refetch(&self, filters: Option<&PropertyFilters>) -> QuerySnapshot {
        let key = QueryKey::new(filters.cloned());
        {
            let mut cache = self.cache.lock().unwrap();
            cache.remove(&key);
        }
        self.fetch(filters).await
    }

    async fn run(&self, key: &QueryKey) -> QueryResult {
        info!(
            "Fetching properties from {} for {:?}",
            self.repository.source_name(),
            key.filters()
        );

        match get_properties(self.repository.as_ref(), key.filters()).await {
            Ok(items) => Ok(CachedPage {
                items,
                fetched_at: Utc::now(),
            }),
            Err(err) => Err(QueryError::new(err)),
        }
    }
}
