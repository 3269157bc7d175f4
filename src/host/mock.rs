use std::cell::{Cell, RefCell};

use image::{DynamicImage, RgbaImage};
use url::Url;

use super::{Canvas, Downloads, FetchResponse, HostError, Network, Reader};
use crate::{blob::Blob, data_uri};

/// Records every host interaction; individual capabilities can be switched
/// to fail.
#[derive(Default)]
pub struct MockHost {
    pub created: Cell<usize>,
    pub revoked: RefCell<Vec<String>>,
    pub objects: RefCell<Vec<(String, Blob)>>,
    pub saved: RefCell<Vec<(String, Blob)>>,
    pub reads: Cell<usize>,
    pub decodes: Cell<usize>,
    pub fetched: RefCell<Vec<String>>,
    pub response: RefCell<Option<FetchResponse>>,
    pub fail_read: bool,
    pub fail_save: bool,
    pub no_surface: bool,
    pub no_output: bool,
}

impl MockHost {
    pub fn with_response(status: u16, body: &'static [u8]) -> Self {
        let host = MockHost::default();
        host.response.replace(Some(FetchResponse {
            status,
            body: body.into(),
        }));
        host
    }
}

impl Reader for MockHost {
    fn read_as_data_url(&self, blob: &Blob) -> Result<String, HostError> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_read {
            return Err(HostError::new("read aborted"));
        }
        Ok(data_uri::encode(blob.mime(), blob.data()))
    }

    fn read_as_text(&self, blob: &Blob) -> Result<String, HostError> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_read {
            return Err(HostError::new("read aborted"));
        }
        Ok(String::from_utf8_lossy(blob.data()).into_owned())
    }
}

impl Downloads for MockHost {
    fn create_object_url(&self, blob: &Blob) -> String {
        let n = self.created.get();
        self.created.set(n + 1);
        let url = format!("blob:mock/{}", n);
        self.objects.borrow_mut().push((url.clone(), blob.clone()));
        url
    }

    fn revoke_object_url(&self, url: &str) {
        self.revoked.borrow_mut().push(url.to_string());
    }

    fn save_as(&self, url: &str, filename: &str) -> Result<(), HostError> {
        if self.fail_save {
            return Err(HostError::new("save-as rejected"));
        }
        let blob = self
            .objects
            .borrow()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, blob)| blob.clone())
            .ok_or_else(|| HostError::new("unknown url"))?;
        self.saved.borrow_mut().push((filename.to_string(), blob));
        Ok(())
    }
}

impl Network for MockHost {
    fn fetch(&self, url: &Url) -> Result<FetchResponse, HostError> {
        self.fetched.borrow_mut().push(url.to_string());
        self.response
            .borrow()
            .clone()
            .ok_or_else(|| HostError::new("connection refused"))
    }
}

impl Canvas for MockHost {
    fn decode_image(&self, blob: &Blob) -> Result<DynamicImage, HostError> {
        self.decodes.set(self.decodes.get() + 1);
        image::load_from_memory(blob.data()).map_err(HostError::new)
    }

    fn create_surface(&self, width: u32, height: u32) -> Option<RgbaImage> {
        if self.no_surface {
            return None;
        }
        Some(RgbaImage::new(width, height))
    }

    fn encode_surface(&self, surface: &RgbaImage, mime: &str, _quality: f32) -> Option<Blob> {
        if self.no_output {
            return None;
        }
        Some(Blob::new(surface.as_raw().clone(), mime))
    }
}
