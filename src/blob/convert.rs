use log::debug;
use serde::de::DeserializeOwned;

use super::Blob;
use crate::{
    error::{require_type, BlobError, Result},
    host::Reader,
};

/// reads the blob as a `data:` uri
pub fn blob_to_base64(reader: &impl Reader, blob: &Blob) -> Result<String> {
    debug!("reading {} bytes as data url", blob.size());
    Ok(reader.read_as_data_url(blob)?)
}

/// Decodes a `text/*` blob as UTF-8.
pub fn blob_to_text(reader: &impl Reader, blob: &Blob) -> Result<String> {
    require_type(blob.mime(), "text/")?;
    read_text(reader, blob)
}

/// Parses an `application/json*` blob.
pub fn blob_to_json<T: DeserializeOwned>(reader: &impl Reader, blob: &Blob) -> Result<T> {
    require_type(blob.mime(), "application/json")?;
    let text = read_text(reader, blob)?;
    serde_json::from_str(&text).map_err(BlobError::ParseError)
}

/// Reads an `image/*` blob as a data uri ready for display.
pub fn blob_to_image(reader: &impl Reader, blob: &Blob) -> Result<String> {
    require_type(blob.mime(), "image/")?;
    blob_to_base64(reader, blob)
}

fn read_text(reader: &impl Reader, blob: &Blob) -> Result<String> {
    debug!("reading {} bytes as text", blob.size());
    Ok(reader.read_as_text(blob)?)
}
