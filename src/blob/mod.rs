mod compress;
mod convert;
mod create;
mod metadata;

use bytes::Bytes;

pub use compress::{compress_blob, DEFAULT_QUALITY};
pub use convert::{blob_to_base64, blob_to_image, blob_to_json, blob_to_text};
pub use create::{
    base64_to_blob, create_binary_blob, create_binary_blob_from_numbers, create_image_blob,
    create_json_blob, create_text_blob,
};
pub use metadata::{get_blob_metadata, BlobMetadata};

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";
pub const IMAGE_PNG: &str = "image/png";

/// An immutable, MIME-typed byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    mime: String,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>, mime: impl Into<String>) -> Self {
        Blob {
            data: data.into(),
            mime: mime.into(),
        }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// declared content type, possibly empty
    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}
