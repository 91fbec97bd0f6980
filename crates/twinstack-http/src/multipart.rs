//! Multipart form data parser for file uploads.
//!
//! Thumbnail and attachment uploads arrive as `multipart/form-data` with two
//! parts: a text part named `fileName` and the file part itself. The parser
//! works on the already-collected body bytes.

use bytes::Bytes;
use twinstack_model::error::MappingError;
use twinstack_model::types::InMemoryFile;

/// Name of the text part carrying the file name.
pub const FILE_NAME_PART: &str = "fileName";

/// Media type assumed for a file part without `Content-Type`.
pub const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// One part of a multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// `name` from `Content-Disposition`.
    pub name: String,
    /// `filename` from `Content-Disposition`, if any.
    pub file_name: Option<String>,
    /// Declared `Content-Type` of the part, if any.
    pub content_type: Option<String>,
    /// Raw part body.
    pub data: Bytes,
}

/// A parsed multipart form-data submission, parts in body order.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Parts with a `name`.
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    /// First part with the given name.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Convert the form into an uploaded file.
    ///
    /// The `fileName` part provides the file name; the first other part
    /// provides content and media type.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidBody`] if either part is missing or the
    /// file name is not UTF-8.
    pub fn into_file(self) -> Result<InMemoryFile, MappingError> {
        let mut file_name = None;
        let mut file = None;
        for part in self.parts {
            if part.name == FILE_NAME_PART {
                if file_name.is_none() {
                    let text = String::from_utf8(part.data.to_vec()).map_err(|e| {
                        MappingError::invalid_body("fileName part is not UTF-8 text", e)
                    })?;
                    file_name = Some(text.trim().to_owned());
                }
            } else if file.is_none() {
                file = Some(part);
            }
        }

        let file_name = file_name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| MappingError::invalid_body_reason("missing fileName part"))?;
        let file = file.ok_or_else(|| MappingError::invalid_body_reason("missing file part"))?;

        Ok(InMemoryFile {
            file_name,
            content_type: file
                .content_type
                .unwrap_or_else(|| DEFAULT_FILE_CONTENT_TYPE.to_owned()),
            content: file.data,
        })
    }
}

/// Extract the boundary from a `multipart/form-data; boundary=...` media type.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] if the media type is missing, not
/// `multipart/form-data`, or has no boundary.
pub fn extract_boundary(content_type: Option<&str>) -> Result<String, MappingError> {
    let raw = content_type
        .ok_or_else(|| MappingError::invalid_body_reason("missing Content-Type, expected multipart/form-data"))?;
    let media: mime::Mime = raw
        .parse()
        .map_err(|e| MappingError::invalid_body(format!("invalid Content-Type '{raw}'"), e))?;
    if media.type_() != mime::MULTIPART || media.subtype() != mime::FORM_DATA {
        return Err(MappingError::invalid_body_reason(format!(
            "expected multipart/form-data, got {}",
            media.essence_str()
        )));
    }
    let boundary = media
        .get_param(mime::BOUNDARY)
        .map(|b| b.as_str().trim_matches('"').to_owned())
        .unwrap_or_default();
    if boundary.is_empty() {
        return Err(MappingError::invalid_body_reason(
            "missing boundary in Content-Type",
        ));
    }
    Ok(boundary)
}

/// Decode a multipart body using the boundary from its `Content-Type`.
///
/// # Errors
///
/// See [`extract_boundary`] and [`parse_multipart`].
pub fn decode_multipart(content_type: Option<&str>, body: &[u8]) -> Result<MultipartForm, MappingError> {
    let boundary = extract_boundary(content_type)?;
    parse_multipart(body, &boundary)
}

/// Parse a multipart/form-data body into named parts.
///
/// # Errors
///
/// Returns [`MappingError::InvalidBody`] if the body contains no delimited
/// part at all.
pub fn parse_multipart(body: &[u8], boundary: &str) -> Result<MultipartForm, MappingError> {
    let delimiter = format!("--{boundary}");
    let raw_parts = split_multipart_parts(body, delimiter.as_bytes());
    if raw_parts.is_empty() {
        return Err(MappingError::invalid_body_reason(format!(
            "no multipart part delimited by '{boundary}'"
        )));
    }

    let mut parts = Vec::with_capacity(raw_parts.len());
    for part_bytes in raw_parts {
        let Some((headers_section, part_body)) = split_headers_body(part_bytes) else {
            continue;
        };
        let disposition = parse_content_disposition(headers_section);
        let Some(name) = disposition.name else {
            continue;
        };
        parts.push(FormPart {
            name,
            file_name: disposition.filename,
            content_type: parse_part_content_type(headers_section),
            data: Bytes::copy_from_slice(part_body),
        });
    }

    Ok(MultipartForm { parts })
}

fn split_multipart_parts<'a>(body: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut remaining = body;

    // Preamble.
    if let Some(pos) = find_bytes(remaining, delimiter) {
        remaining = skip_crlf(&remaining[pos + delimiter.len()..]);
    } else {
        return parts;
    }

    loop {
        // Closing delimiter: `--boundary--`.
        if remaining.starts_with(b"--") {
            break;
        }

        if let Some(pos) = find_bytes(remaining, delimiter) {
            parts.push(strip_trailing_crlf(&remaining[..pos]));
            remaining = skip_crlf(&remaining[pos + delimiter.len()..]);
        } else {
            let part = strip_trailing_crlf(remaining);
            if !part.is_empty() {
                parts.push(part);
            }
            break;
        }
    }

    parts
}

fn split_headers_body(part: &[u8]) -> Option<(&[u8], &[u8])> {
    let separator = b"\r\n\r\n";
    find_bytes(part, separator).map(|pos| (&part[..pos], &part[pos + separator.len()..]))
}

struct ContentDisposition {
    name: Option<String>,
    filename: Option<String>,
}

fn parse_content_disposition(headers: &[u8]) -> ContentDisposition {
    let headers_str = String::from_utf8_lossy(headers);
    let mut name = None;
    let mut filename = None;

    for line in headers_str.split("\r\n") {
        if !line.to_ascii_lowercase().starts_with("content-disposition:") {
            continue;
        }
        name = extract_param(line, "name");
        filename = extract_param(line, "filename");
    }

    ContentDisposition { name, filename }
}

fn parse_part_content_type(headers: &[u8]) -> Option<String> {
    let headers_str = String::from_utf8_lossy(headers);
    headers_str.split("\r\n").find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case("content-type")
            .then(|| value.trim().to_owned())
            .filter(|v| !v.is_empty())
    })
}

/// Extract `param="value"` or `param=value` from a header line.
///
/// Parameters are matched by exact name, so `name` never matches inside
/// `filename`.
fn extract_param(header_line: &str, param_name: &str) -> Option<String> {
    header_line.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case(param_name) {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Some(value.to_owned())
    })
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn skip_crlf(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\r\n").unwrap_or(data)
}

fn strip_trailing_crlf(data: &[u8]) -> &[u8] {
    data.strip_suffix(b"\r\n").unwrap_or(data)
}
