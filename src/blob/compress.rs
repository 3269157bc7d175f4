use image::imageops;
use log::{debug, warn};

use super::Blob;
use crate::{
    error::{require_type, BlobError, Result},
    host::Canvas,
};

pub const DEFAULT_QUALITY: f32 = 0.7;

/// Re-encodes an image blob at `quality` using its own MIME type.
///
/// The image is decoded, drawn onto a surface of its intrinsic size and
/// encoded again. `Ok(None)` means the encoder produced no output for this
/// type/quality pair, which is not an error.
pub fn compress_blob(canvas: &impl Canvas, blob: &Blob, quality: f32) -> Result<Option<Blob>> {
    require_type(blob.mime(), "image/")?;
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(BlobError::InvalidArgument(format!(
            "quality must be in (0, 1], got {}",
            quality
        )));
    }

    let bitmap = canvas.decode_image(blob)?;
    let (width, height) = (bitmap.width(), bitmap.height());
    debug!("decoded {} image {}x{}", blob.mime(), width, height);

    let mut surface = canvas
        .create_surface(width, height)
        .ok_or_else(|| BlobError::MissingCapability("2d drawing surface".to_string()))?;
    imageops::overlay(&mut surface, &bitmap.to_rgba8(), 0, 0);

    let compressed = canvas.encode_surface(&surface, blob.mime(), quality);
    match &compressed {
        Some(out) => debug!(
            "re-encoded {} at quality {}: {} -> {} bytes",
            blob.mime(),
            quality,
            blob.size(),
            out.size()
        ),
        None => warn!("encoder produced no output for {} at quality {}", blob.mime(), quality),
    }

    Ok(compressed)
}
