use std::collections::BTreeMap;

use http::Method;

/// Signing context for request.
///
/// Parameters are kept in a `BTreeMap` so iterating them always yields keys in
/// ascending byte order, which is the order every canonical form needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Host of the API endpoint, without scheme or port.
    pub host: String,
    /// Request path relative to the versioned API root, e.g. `/videos.json`.
    pub path: String,
    /// Request parameters.
    pub params: BTreeMap<String, String>,
}

impl SigningRequest {
    /// Create a new signing request without parameters.
    pub fn new(method: Method, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            host: host.into(),
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    /// Replace all parameters.
    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Insert a parameter, replacing any previous value under the same key.
    #[inline]
    pub fn param_insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Get a parameter value.
    #[inline]
    pub fn param_get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
