use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::core::models::PdfUpload;
use crate::errors::SummarizerError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Request path for both API Gateway payload versions.
pub fn request_path(payload: &Value) -> Option<&str> {
    v_str(payload, &["rawPath"]).or_else(|| v_str(payload, &["path"]))
}

/// HTTP method for both API Gateway payload versions.
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
}

pub fn query_param(payload: &Value, name: &str) -> Option<String> {
    if let Some(v) = v_str(payload, &["queryStringParameters", name]) {
        return Some(v.to_string());
    }
    v_str(payload, &["rawQueryString"]).and_then(|q| {
        q.split('&').find_map(|kv| {
            let (key, value) = kv.split_once('=')?;
            (key == name).then(|| value.replace('+', " "))
        })
    })
}

/// Filename from `Content-Disposition`, `X-Filename`, or the `filename` query parameter.
pub fn upload_filename(payload: &Value) -> Option<String> {
    static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"(?i)filename\*?\s*=\s*(?:UTF-8'')?"?([^";]+)"?"#).expect("static regex compile")
    });

    let headers = payload.get("headers");
    headers
        .and_then(|h| get_header_value(h, "Content-Disposition"))
        .and_then(|cd| FILENAME_RE.captures(cd))
        .map(|cap| cap[1].trim().to_string())
        .or_else(|| {
            headers
                .and_then(|h| get_header_value(h, "X-Filename"))
                .map(|v| v.trim().to_string())
        })
        .or_else(|| query_param(payload, "filename"))
        .filter(|name| !name.is_empty())
}

#[must_use]
pub fn is_pdf_filename(filename: &str) -> bool {
    mime_guess::from_path(filename).first_raw() == Some("application/pdf")
}

/// Validates the upload carried by an API Gateway event and decodes its body.
///
/// # Errors
///
/// Returns a validation error when the filename is missing or not a PDF, the
/// body is absent or undecodable, or it exceeds `max_bytes`.
pub fn parse_upload(payload: &Value, max_bytes: usize) -> Result<PdfUpload, SummarizerError> {
    let filename = upload_filename(payload)
        .filter(|name| is_pdf_filename(name))
        .ok_or_else(|| SummarizerError::ValidationError("File must be a PDF (.pdf)".to_string()))?;

    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Err(SummarizerError::ValidationError("Missing body".to_string()));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let bytes = if is_base64 {
        STANDARD.decode(body.trim()).map_err(|e| {
            SummarizerError::ValidationError(format!("Invalid base64 body: {e}"))
        })?
    } else {
        body.as_bytes().to_vec()
    };

    if bytes.is_empty() {
        return Err(SummarizerError::ValidationError("Empty upload".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(SummarizerError::PayloadTooLarge(max_bytes));
    }

    Ok(PdfUpload { filename, bytes })
}
