//! Request body decoding.
//!
//! All failures surface as [`MappingError::InvalidBody`] with the decoder's
//! error attached as source.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use twinstack_model::error::MappingError;
use twinstack_model::modifier::Content;
use twinstack_model::types::{InMemoryFile, MergePatch, OperationArguments, OperationRequest, OperationVariable};

use crate::multipart::decode_multipart;

const INPUT_ARGUMENTS: &str = "inputArguments";
const INOUTPUT_ARGUMENTS: &str = "inoutputArguments";
const CLIENT_TIMEOUT_DURATION: &str = "clientTimeoutDuration";

/// ISO-8601 duration with day and time components (`P1DT2H3M4.5S`, `P2W`).
static ISO8601_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(?P<weeks>\d+)W)?(?:(?P<days>\d+)D)?(?:T(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+(?:[.,]\d+)?)S)?)?$",
    )
    .expect("static regex is valid")
});

fn parse_json(body: &[u8]) -> Result<Value, MappingError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(MappingError::invalid_body_reason("request body is empty"));
    }
    serde_json::from_slice(body).map_err(|e| MappingError::invalid_body("malformed JSON", e))
}

/// Decode a single JSON object into `T`.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] for an empty body, malformed JSON,
/// a non-object document, or an object that does not fit `T`.
pub fn decode_object<T: DeserializeOwned>(body: &[u8], expected: &str) -> Result<T, MappingError> {
    let value = parse_json(body)?;
    if !value.is_object() {
        return Err(MappingError::invalid_body_reason(format!(
            "expected a JSON object ({expected}), got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| MappingError::invalid_body(format!("body is not a valid {expected}"), e))
}

/// Decode a JSON array of `T`.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] for an empty body, malformed JSON,
/// a non-array document, or an element that does not fit `T`.
pub fn decode_list<T: DeserializeOwned>(body: &[u8], expected: &str) -> Result<Vec<T>, MappingError> {
    let value = parse_json(body)?;
    if !value.is_array() {
        return Err(MappingError::invalid_body_reason(format!(
            "expected a JSON array of {expected}, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| MappingError::invalid_body(format!("body is not a list of {expected}"), e))
}

/// Decode a JSON merge patch document.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] unless the body is a JSON object.
pub fn decode_merge_patch(body: &[u8]) -> Result<MergePatch, MappingError> {
    match parse_json(body)? {
        Value::Object(map) => Ok(MergePatch(map)),
        other => Err(MappingError::invalid_body_reason(format!(
            "merge patch must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode a raw value body (`$value` routes), any JSON document.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] for an empty body or malformed JSON.
pub fn decode_value(body: &[u8]) -> Result<Value, MappingError> {
    parse_json(body)
}

/// Decode an operation invocation body.
///
/// With `content` [`Content::Value`], argument members are objects mapping
/// idShort to value; otherwise they are lists of operation variables.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] if the body is not an object, an
/// argument member has the wrong shape, or `clientTimeoutDuration` is not an
/// ISO-8601 duration.
pub fn decode_operation_request(body: &[u8], content: Content) -> Result<OperationRequest, MappingError> {
    let Value::Object(mut root) = parse_json(body)? else {
        return Err(MappingError::invalid_body_reason(
            "operation request must be a JSON object",
        ));
    };

    let input_arguments = take_arguments(&mut root, INPUT_ARGUMENTS, content)?;
    let inoutput_arguments = take_arguments(&mut root, INOUTPUT_ARGUMENTS, content)?;
    let client_timeout = match root.remove(CLIENT_TIMEOUT_DURATION) {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(parse_iso8601_duration(&raw).map_err(|reason| {
            MappingError::invalid_body_reason(format!(
                "invalid value '{raw}' for {CLIENT_TIMEOUT_DURATION}: {reason}"
            ))
        })?),
        Some(other) => {
            return Err(MappingError::invalid_body_reason(format!(
                "{CLIENT_TIMEOUT_DURATION} must be a string, got {}",
                json_kind(&other)
            )));
        }
    };

    Ok(OperationRequest {
        input_arguments,
        inoutput_arguments,
        client_timeout,
    })
}

fn take_arguments(
    root: &mut Map<String, Value>,
    member: &str,
    content: Content,
) -> Result<OperationArguments, MappingError> {
    let value = root.remove(member).unwrap_or(Value::Null);
    match (content, value) {
        (Content::Value, Value::Null) => Ok(OperationArguments::Value(Map::new())),
        (Content::Value, Value::Object(map)) => Ok(OperationArguments::Value(map)),
        (_, Value::Null) => Ok(OperationArguments::Full(Vec::new())),
        (Content::Value, other) => Err(MappingError::invalid_body_reason(format!(
            "{member} must be an object of values, got {}",
            json_kind(&other)
        ))),
        (_, value @ Value::Array(_)) => serde_json::from_value::<Vec<OperationVariable>>(value)
            .map(OperationArguments::Full)
            .map_err(|e| MappingError::invalid_body(format!("{member} is not a list of operation variables"), e)),
        (_, other) => Err(MappingError::invalid_body_reason(format!(
            "{member} must be a list of operation variables, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode a `multipart/form-data` file upload.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] if the body is not multipart or
/// lacks the `fileName` or file part.
pub fn decode_file_upload(content_type: Option<&str>, body: &[u8]) -> Result<InMemoryFile, MappingError> {
    decode_multipart(content_type, body)?.into_file()
}

/// Parse an ISO-8601 duration with week, day and time components.
///
/// Year and month components are rejected: their length is not fixed.
///
/// # Errors
///
/// Returns a description of the problem if `raw` is not a supported duration.
pub fn parse_iso8601_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let caps = ISO8601_DURATION.captures(raw).ok_or_else(|| {
        if raw.starts_with('P') && raw.split('T').next().is_some_and(|d| d.contains(['Y', 'M'])) {
            "year and month components are not supported".to_owned()
        } else {
            "expected an ISO-8601 duration such as PT1H30M".to_owned()
        }
    })?;
    if raw == "P" || raw.ends_with('T') {
        return Err("duration has no components".to_owned());
    }

    let int = |name: &str| -> Result<u64, String> {
        caps.name(name)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>().map_err(|e| e.to_string()))
    };
    let (weeks, days, hours, minutes) = (int("weeks")?, int("days")?, int("hours")?, int("minutes")?);
    let whole = weeks
        .checked_mul(7)
        .and_then(|d| d.checked_add(days))
        .and_then(|d| d.checked_mul(24))
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(60))
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .ok_or_else(|| "duration overflows".to_owned())?;

    let seconds = match caps.name("seconds") {
        None => Duration::ZERO,
        Some(m) => Duration::try_from_secs_f64(
            m.as_str()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|e| e.to_string())?,
        )
        .map_err(|e| e.to_string())?,
    };

    Duration::from_secs(whole)
        .checked_add(seconds)
        .ok_or_else(|| "duration overflows".to_owned())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
