use chrono::Utc;
use serde::Serialize;

use super::Blob;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobMetadata {
    pub size: usize,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Milliseconds since the Unix epoch at the time of the call. A payload
    /// carries no modification time, so this is not provenance.
    #[serde(rename = "lastModified")]
    pub last_modified: i64,
}

pub fn get_blob_metadata(blob: &Blob) -> BlobMetadata {
    BlobMetadata {
        size: blob.size(),
        mime_type: blob.mime().to_string(),
        last_modified: Utc::now().timestamp_millis(),
    }
}
