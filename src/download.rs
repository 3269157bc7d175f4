//! Delivering payloads to the user through the host's save-as action.

use log::{debug, info};
use url::Url;

use crate::{
    blob::Blob,
    error::{BlobError, Result},
    host::{Downloads, Network},
};

/// A live object url, revoked when dropped so that every exit path releases
/// the reference.
struct ObjectUrl<'a, D: Downloads + ?Sized> {
    host: &'a D,
    url: String,
}

impl<'a, D: Downloads + ?Sized> ObjectUrl<'a, D> {
    fn create(host: &'a D, blob: &Blob) -> Self {
        let url = host.create_object_url(blob);
        ObjectUrl { host, url }
    }

    fn save_as(&self, filename: &str) -> Result<()> {
        Ok(self.host.save_as(&self.url, filename)?)
    }
}

impl<D: Downloads + ?Sized> Drop for ObjectUrl<'_, D> {
    fn drop(&mut self) {
        self.host.revoke_object_url(&self.url);
    }
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BlobError::InvalidArgument(format!("{} is required", what)));
    }
    Ok(())
}

/// Copies `data` into a blob of type `mime` and saves it as `filename`.
pub fn create_and_download_blob(
    host: &impl Downloads,
    data: &[u8],
    filename: &str,
    mime: &str,
) -> Result<()> {
    if data.is_empty() {
        return Err(BlobError::InvalidArgument("data is required".to_string()));
    }
    require(filename, "file name")?;
    require(mime, "mime type")?;

    let blob = Blob::new(data.to_vec(), mime);
    let url = ObjectUrl::create(host, &blob);
    url.save_as(filename)?;

    info!("downloaded {} ({} bytes, {})", filename, blob.size(), mime);
    Ok(())
}

/// Fetches `url` and saves the response body as `filename` with every `.`
/// removed, so `report.v1.pdf` is saved as `reportv1pdf`.
pub fn fetch_and_download_blob<H>(host: &H, url: &str, filename: &str, mime: &str) -> Result<()>
where
    H: Network + Downloads,
{
    require(url, "url")?;
    require(filename, "file name")?;
    require(mime, "mime type")?;
    let filename = filename.replace('.', "");
    if filename.is_empty() {
        return Err(BlobError::InvalidArgument(
            "file name is empty once dots are removed".to_string(),
        ));
    }
    let url = Url::parse(url)
        .map_err(|err| BlobError::InvalidArgument(format!("invalid url '{}': {}", url, err)))?;

    let response = host.fetch(&url)?;
    if !response.is_ok() {
        return Err(BlobError::NetworkError {
            status: response.status,
        });
    }
    debug!("fetched {} bytes from {}", response.body.len(), url);

    let blob = Blob::new(response.body, mime);
    let object_url = ObjectUrl::create(host, &blob);
    object_url.save_as(&filename)?;

    info!("downloaded {} as {} ({} bytes)", url, filename, blob.size());
    Ok(())
}
