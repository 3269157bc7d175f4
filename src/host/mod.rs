//! Host environment capabilities.
//!
//! Every operation that needs something beyond plain data (reading a payload
//! through the host, object URLs, the save-as action, the network, image
//! decode/encode) takes one of these traits as an argument instead of
//! reaching for a global. [`NativeHost`] implements all of them for a desktop
//! process; tests plug in a recording mock.

mod hash;
#[cfg(test)]
pub(crate) mod mock;
mod native;

use std::{error::Error, fmt::Display};

use bytes::Bytes;
use image::{DynamicImage, RgbaImage};
use url::Url;

use crate::blob::Blob;

pub use native::NativeHost;

/// Opaque failure reported by the host, propagated unchanged.
#[derive(Debug)]
pub struct HostError(Box<dyn Error + Send + Sync>);

impl HostError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        HostError(err.into())
    }

    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads a payload's contents into another representation.
pub trait Reader {
    /// `data:<type>;base64,<payload>`
    fn read_as_data_url(&self, blob: &Blob) -> Result<String, HostError>;

    fn read_as_text(&self, blob: &Blob) -> Result<String, HostError>;
}

/// Temporary references and the save-as action.
pub trait Downloads {
    fn create_object_url(&self, blob: &Blob) -> String;

    /// revoking a url that is not live is a no-op
    fn revoke_object_url(&self, url: &str);

    /// prompts the host to persist the payload behind `url` as `filename`
    fn save_as(&self, url: &str, filename: &str) -> Result<(), HostError>;
}

#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Network {
    fn fetch(&self, url: &Url) -> Result<FetchResponse, HostError>;
}

/// 2D raster facilities used for lossy re-encoding.
pub trait Canvas {
    fn decode_image(&self, blob: &Blob) -> Result<DynamicImage, HostError>;

    /// `None` when no drawing surface can be obtained
    fn create_surface(&self, width: u32, height: u32) -> Option<RgbaImage>;

    /// `None` when the encoder cannot produce output for `mime`/`quality`
    fn encode_surface(&self, surface: &RgbaImage, mime: &str, quality: f32) -> Option<Blob>;
}
