//! Transport-neutral view of an incoming HTTP request.
//!
//! [`HttpRequest`] snapshots everything the route table needs (method, path,
//! decoded query parameters, headers, collected body) so that mapping can run
//! on plain data, independent of hyper's body streams.

use bytes::Bytes;
use http::{HeaderMap, Method};
use percent_encoding::percent_decode_str;

/// A fully collected HTTP request, ready to be mapped.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Raw (still percent-encoded) path without leading or trailing `/`.
    pub path: String,
    /// Percent-decoded query parameters in request order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Collected body.
    pub body: Bytes,
}

impl HttpRequest {
    /// Create a request from a method and a path with optional query string.
    ///
    /// The path is normalized with [`normalize_path`] using no prefix.
    #[must_use]
    pub fn new(method: Method, path_and_query: &str) -> Self {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path_and_query, ""),
        };
        Self {
            method,
            path: normalize_path(path, "").unwrap_or_default(),
            query: parse_query_params(query),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Build a request from hyper request parts and a collected body.
    ///
    /// Returns `None` if the path is outside the configured prefix.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts, body: Bytes, path_prefix: &str) -> Option<Self> {
        let path = normalize_path(parts.uri.path(), path_prefix)?;
        Some(Self {
            method: parts.method.clone(),
            path,
            query: parse_query_params(parts.uri.query().unwrap_or("")),
            headers: parts.headers.clone(),
            body,
        })
    }

    /// Attach a header.
    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: &str) -> Self {
        if let Ok(hv) = http::HeaderValue::from_str(value) {
            self.headers.insert(name, hv);
        }
        self
    }

    /// Attach a body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get the first value of a query parameter.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        query_value(&self.query, name)
    }

    /// Whether a query parameter is present (with or without value).
    #[must_use]
    pub fn has_query(&self, name: &str) -> bool {
        query_has_key(&self.query, name)
    }

    /// Extract a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Content-Type` header, if present and valid UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(http::header::CONTENT_TYPE)
    }
}

/// Strip the configured prefix and surrounding slashes from a request path.
///
/// Returns `None` when a non-empty prefix is configured and the path lies
/// outside it.
#[must_use]
pub fn normalize_path(path: &str, prefix: &str) -> Option<String> {
    let prefix = prefix.trim_matches('/');
    let trimmed = path.trim_start_matches('/');
    let rest = if prefix.is_empty() {
        trimmed
    } else {
        let rest = trimmed.strip_prefix(prefix)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        rest.trim_start_matches('/')
    };
    Some(rest.trim_end_matches('/').to_owned())
}

/// Decode a percent-encoded URI component.
#[must_use]
pub fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Parse a query string into key-value pairs.
///
/// `+` is kept literally: base64 payloads travel in query values.
#[must_use]
pub fn parse_query_params(query: &str) -> Vec<(String, String)> {
    if query.is_empty() {
        return Vec::new();
    }

    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            if let Some(pos) = pair.find('=') {
                let key = decode_uri_component(&pair[..pos]);
                let value = decode_uri_component(&pair[pos + 1..]);
                (key, value)
            } else {
                (decode_uri_component(pair), String::new())
            }
        })
        .collect()
}

/// Look up a query parameter by name.
#[must_use]
pub fn query_has_key(params: &[(String, String)], key: &str) -> bool {
    params.iter().any(|(k, _)| k == key)
}

/// Get the value of a query parameter by name.
#[must_use]
pub fn query_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Get every value of a query parameter, in request order.
pub fn query_values<'a>(
    params: &'a [(String, String)],
    key: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    params
        .iter()
        .filter(move |(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
