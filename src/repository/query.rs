use crate::models::PropertyFilters;

/// A scalar that can appear in a query string.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Number(u64),
    Flag(bool),
}

impl QueryValue {
    fn render(&self) -> String {
        match self {
            QueryValue::Text(s) => s.clone(),
            QueryValue::Number(n) => n.to_string(),
            QueryValue::Flag(b) => b.to_string(),
        }
    }

    /// Empty text counts the same as an absent value.
    fn is_empty(&self) -> bool {
        matches!(self, QueryValue::Text(s) if s.is_empty())
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Number(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Number(value as u64)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Flag(value)
    }
}

/// Ordered key/value pairs for a query string. Absent and empty values are
/// dropped so vacuous parameters never reach the wire.
pub type QueryParams = Vec<(&'static str, Option<QueryValue>)>;

/// Serialize params into a percent-encoded query string, preserving
/// insertion order. Returns `""` when nothing survives filtering.
pub fn build_query(params: &[(&'static str, Option<QueryValue>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in params {
        match value {
            Some(v) if !v.is_empty() => {
                serializer.append_pair(key, &v.render());
            }
            _ => {}
        }
    }

    serializer.finish()
}

/// Wire parameters for a filter value, in the order the API documents them.
pub fn filter_params(filters: &PropertyFilters) -> QueryParams {
    vec![
        ("name", filters.name.clone().map(QueryValue::from)),
        ("address", filters.address.clone().map(QueryValue::from)),
        ("minPrice", filters.min_price.map(QueryValue::from)),
        ("maxPrice", filters.max_price.map(QueryValue::from)),
        ("page", filters.page.map(QueryValue::from)),
        ("pageSize", filters.page_size.map(QueryValue::from)),
    ]
}
