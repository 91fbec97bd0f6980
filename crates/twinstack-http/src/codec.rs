//! Identifier and element path codec.
//!
//! Global identifiers travel in paths and query values as URL-safe base64;
//! one legacy route family uses standard base64 instead. Both decoders accept
//! input with or without padding, and a route declares which one applies, so
//! the two alphabets are never tried interchangeably.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE};
use base64::engine::DecodePaddingMode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use twinstack_model::error::MappingError;
use twinstack_model::types::{ElementPath, Key, KeyType};

use crate::request::{decode_uri_component, query_values};

const PADDING_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// URL-safe base64, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_INDIFFERENT);

/// Standard base64, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDING_INDIFFERENT);

/// Encoding of identifiers in path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdentifierEncoding {
    /// URL-safe base64 (`-` and `_`).
    #[default]
    Base64Url,
    /// Standard base64 (`+` and `/`), used by the legacy value route.
    Base64,
}

impl IdentifierEncoding {
    /// Returns a human-readable name of this encoding.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base64Url => "base64url",
            Self::Base64 => "base64",
        }
    }

    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Self::Base64Url => &URL_SAFE_LENIENT,
            Self::Base64 => &STANDARD_LENIENT,
        }
    }
}

/// Encode an identifier as padded URL-safe base64.
#[must_use]
pub fn encode_identifier(id: &str) -> String {
    URL_SAFE.encode(id)
}

/// Decode a raw (percent-encoded) identifier token.
///
/// # Errors
///
/// Returns [`MappingError::InvalidIdentifierEncoding`] naming `parameter` and
/// the raw token if the token is not valid in `encoding` or does not decode
/// to UTF-8.
pub fn decode_identifier(
    parameter: &str,
    raw: &str,
    encoding: IdentifierEncoding,
) -> Result<String, MappingError> {
    let token = decode_uri_component(raw);
    let invalid = || MappingError::InvalidIdentifierEncoding {
        parameter: parameter.to_owned(),
        token: raw.to_owned(),
        encoding: encoding.as_str(),
    };
    if token.is_empty() {
        return Err(invalid());
    }
    let bytes = encoding.engine().decode(token.trim()).map_err(|_| invalid())?;
    String::from_utf8(bytes).map_err(|_| invalid())
}

/// Split a raw element path into keys.
///
/// The path is percent-decoded, then split on [`ElementPath::SEPARATOR`].
///
/// # Errors
///
/// Returns [`MappingError::InvalidElementPath`] for an empty path or a path
/// with an empty segment.
pub fn parse_element_path(raw: &str) -> Result<ElementPath, MappingError> {
    let decoded = decode_uri_component(raw);
    if decoded.is_empty() {
        return Err(MappingError::InvalidElementPath {
            path: decoded,
            reason: "path is empty".to_owned(),
        });
    }

    let mut keys = Vec::new();
    for (index, segment) in decoded.split(ElementPath::SEPARATOR).enumerate() {
        if segment.is_empty() {
            return Err(MappingError::InvalidElementPath {
                reason: format!("segment {index} is empty"),
                path: decoded,
            });
        }
        keys.push(Key::new(KeyType::SubmodelElement, segment));
    }
    Ok(ElementPath::new(keys))
}

/// Decode every value of an identifier-list query parameter.
///
/// Values may be repeated (`aasIds=a&aasIds=b`) or comma-separated.
///
/// # Errors
///
/// Returns [`MappingError::InvalidIdentifierEncoding`] for the first value
/// that is not valid URL-safe base64.
pub fn decode_query_identifiers(
    query: &[(String, String)],
    name: &str,
) -> Result<Vec<String>, MappingError> {
    query_values(query, name)
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| decode_identifier(name, v, IdentifierEncoding::Base64Url))
        .collect()
}

/// Decode a query parameter carrying base64url-encoded JSON.
///
/// Returns `Ok(None)` if the parameter is absent.
///
/// # Errors
///
/// Returns [`MappingError::InvalidIdentifierEncoding`] if the value is not
/// base64url, or [`MappingError::InvalidQueryParameter`] if the decoded text
/// is not the expected JSON shape.
pub fn decode_json_query<T: DeserializeOwned>(
    query: &[(String, String)],
    name: &str,
) -> Result<Option<T>, MappingError> {
    let Some(raw) = query_values(query, name).next() else {
        return Ok(None);
    };
    let json = decode_identifier(name, raw, IdentifierEncoding::Base64Url)?;
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| MappingError::InvalidQueryParameter {
            name: name.to_owned(),
            value: raw.to_owned(),
            reason: e.to_string(),
        })
}

/// Decode a query parameter carrying one or more base64url-encoded JSON objects.
///
/// Each value may encode a single object or an array of objects; values may
/// be repeated. An absent parameter yields an empty list.
///
/// # Errors
///
/// Same as [`decode_json_query`].
pub fn decode_json_query_list<T: DeserializeOwned>(
    query: &[(String, String)],
    name: &str,
) -> Result<Vec<T>, MappingError> {
    let mut items = Vec::new();
    for raw in query_values(query, name) {
        let json = decode_identifier(name, raw, IdentifierEncoding::Base64Url)?;
        let invalid = |reason: String| MappingError::InvalidQueryParameter {
            name: name.to_owned(),
            value: raw.to_owned(),
            reason,
        };
        let value: Value = serde_json::from_str(&json).map_err(|e| invalid(e.to_string()))?;
        let values = match value {
            Value::Array(values) => values,
            other => vec![other],
        };
        for value in values {
            items.push(serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?);
        }
    }
    Ok(items)
}
