use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::{Blob, APPLICATION_JSON, IMAGE_PNG, OCTET_STREAM, TEXT_PLAIN};
use crate::{
    data_uri,
    error::{BlobError, Result},
};

/// wraps raw bytes as `application/octet-stream`
pub fn create_binary_blob(data: &[u8]) -> Result<Blob> {
    debug!("binary blob: {} bytes", data.len());
    Ok(Blob::new(data.to_vec(), OCTET_STREAM))
}

/// Builds an `application/octet-stream` blob from a JSON array of numbers.
///
/// Each number is stored the way a byte array stores it: non-finite values
/// become 0, fractions are truncated toward zero and the result wraps
/// modulo 256.
pub fn create_binary_blob_from_numbers(values: &Value) -> Result<Blob> {
    let items = values.as_array().ok_or_else(|| {
        BlobError::InvalidArgument("expected an array of numbers".to_string())
    })?;

    let bytes = items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_number().map(to_uint8).ok_or_else(|| {
                BlobError::InvalidArgument(format!("element {} is not a number: {}", i, v))
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    create_binary_blob(&bytes)
}

fn to_uint8(n: &serde_json::Number) -> u8 {
    if let Some(u) = n.as_u64() {
        return (u % 256) as u8;
    }
    if let Some(i) = n.as_i64() {
        return i.rem_euclid(256) as u8;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => f.trunc().rem_euclid(256.0) as u8,
        _ => 0,
    }
}

pub fn create_text_blob(text: &str) -> Result<Blob> {
    debug!("text blob: {} bytes", text.len());
    Ok(Blob::new(text.as_bytes().to_vec(), TEXT_PLAIN))
}

/// Serializes `value` to compact JSON. Only objects and arrays are accepted.
pub fn create_json_blob<T: Serialize + ?Sized>(value: &T) -> Result<Blob> {
    let json = serde_json::to_vec(value)
        .map_err(|err| BlobError::InvalidArgument(format!("value is not serializable: {}", err)))?;

    match json.first() {
        Some(b'{') | Some(b'[') => {}
        _ => {
            return Err(BlobError::InvalidArgument(
                "expected a JSON object or array".to_string(),
            ))
        }
    }

    debug!("json blob: {} bytes", json.len());
    Ok(Blob::new(json, APPLICATION_JSON))
}

/// Decodes a `data:image/...` URI. The result is always tagged `image/png`
/// whatever type the URI declares.
pub fn create_image_blob(base64_image: &str) -> Result<Blob> {
    if !base64_image.starts_with("data:image/") {
        return Err(BlobError::InvalidArgument(
            "expected a 'data:image/' uri".to_string(),
        ));
    }

    let data = data_uri::payload(base64_image)?;
    debug!("image blob: {} bytes", data.len());
    Ok(Blob::new(data, IMAGE_PNG))
}

/// Decodes any `data:` URI and tags the payload with `mime`.
pub fn base64_to_blob(base64: &str, mime: &str) -> Result<Blob> {
    if mime.is_empty() {
        return Err(BlobError::InvalidArgument("mime type is required".to_string()));
    }
    if !base64.starts_with("data:") {
        return Err(BlobError::InvalidArgument(
            "expected a 'data:' uri".to_string(),
        ));
    }

    let data = data_uri::payload(base64)?;
    debug!("{} blob: {} bytes", mime, data.len());
    Ok(Blob::new(data, mime))
}
