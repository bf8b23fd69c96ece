use crate::repository::query::{build_query, QueryValue};

/// Composes a base URL, a path, and an optional query string.
///
/// Does not validate that the base is well formed or that the path starts
/// with `/`; that is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_url: String,
    path: String,
}

impl UrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: String::new(),
        }
    }

    pub fn set_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// `base + path`, plus `?query` when the params serialize to something
    /// non-empty. No trailing `?` otherwise.
    pub fn build(&self, params: Option<&[(&'static str, Option<QueryValue>)]>) -> String {
        let url = format!("{}{}", self.base_url, self.path);

        let Some(params) = params else {
            return url;
        };

        let query = build_query(params);
        if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        }
    }
}
