use std::{
    collections::HashMap,
    fs::{self, create_dir_all},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use image::{
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    DynamicImage, RgbaImage,
};
use log::{debug, info, warn};
use url::Url;

use super::{hash::reference_id, Canvas, Downloads, FetchResponse, HostError, Network, Reader};
use crate::{blob::Blob, data_uri};

const OBJECT_URL_PREFIX: &str = "blob:blobkit/";

/// Desktop host: object urls live in memory, the save-as action writes into
/// `download_dir`, fetches go through a blocking reqwest client and images
/// are handled by the `image` crate.
pub struct NativeHost {
    download_dir: PathBuf,
    client: reqwest::blocking::Client,
    urls: Mutex<HashMap<String, Blob>>,
    seq: AtomicU64,
}

impl NativeHost {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        NativeHost {
            download_dir: download_dir.into(),
            client: reqwest::blocking::Client::new(),
            urls: Mutex::new(HashMap::new()),
            seq: AtomicU64::new(0),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// number of object urls created and not yet revoked
    pub fn live_object_urls(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reader for NativeHost {
    fn read_as_data_url(&self, blob: &Blob) -> Result<String, HostError> {
        Ok(data_uri::encode(blob.mime(), blob.data()))
    }

    fn read_as_text(&self, blob: &Blob) -> Result<String, HostError> {
        Ok(String::from_utf8_lossy(blob.data()).into_owned())
    }
}

impl Downloads for NativeHost {
    fn create_object_url(&self, blob: &Blob) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{}", OBJECT_URL_PREFIX, reference_id(seq, blob.data()));
        self.registry().insert(url.clone(), blob.clone());
        debug!("created object url {} ({} bytes)", url, blob.size());
        url
    }

    fn revoke_object_url(&self, url: &str) {
        if self.registry().remove(url).is_some() {
            debug!("revoked object url {}", url);
        }
    }

    fn save_as(&self, url: &str, filename: &str) -> Result<(), HostError> {
        let blob = self
            .registry()
            .get(url)
            .cloned()
            .ok_or_else(|| HostError::new(format!("no live object url '{}'", url)))?;

        // only the final path component is honored, like a browser download
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| HostError::new(format!("invalid download file name '{}'", filename)))?;

        create_dir_all(&self.download_dir).map_err(HostError::new)?;
        let path = self.download_dir.join(name);
        fs::write(&path, blob.data()).map_err(HostError::new)?;

        info!("saved {} bytes to {}", blob.size(), path.display());
        Ok(())
    }
}

impl Network for NativeHost {
    fn fetch(&self, url: &Url) -> Result<FetchResponse, HostError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(HostError::new)?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(HostError::new)?;

        Ok(FetchResponse { status, body })
    }
}

impl Canvas for NativeHost {
    fn decode_image(&self, blob: &Blob) -> Result<DynamicImage, HostError> {
        image::load_from_memory(blob.data()).map_err(HostError::new)
    }

    fn create_surface(&self, width: u32, height: u32) -> Option<RgbaImage> {
        if width == 0 || height == 0 {
            return None;
        }
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        RgbaImage::from_raw(width, height, vec![0; len])
    }

    fn encode_surface(&self, surface: &RgbaImage, mime: &str, quality: f32) -> Option<Blob> {
        let mut out = Vec::new();
        let res = match mime {
            "image/jpeg" => {
                let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
                let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
                DynamicImage::ImageRgb8(rgb)
                    .write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
            }
            "image/png" => DynamicImage::ImageRgba8(surface.clone())
                .write_with_encoder(PngEncoder::new(&mut out)),
            _ => {
                debug!("no encoder for {}", mime);
                return None;
            }
        };

        if let Err(err) = res {
            warn!("failed to encode {} surface: {}", mime, err);
            return None;
        }

        Some(Blob::new(out, mime))
    }
}
