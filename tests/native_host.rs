use std::{fs, io::Cursor};

use blobkit::{
    blob::{self, Blob},
    download,
    host::NativeHost,
    BlobError,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

fn jpeg_blob() -> Blob {
    let img = RgbaImage::from_fn(64, 48, |x, y| Rgba([(x * 4) as u8, (y * 5) as u8, 90, 255]));
    let mut out = Cursor::new(Vec::new());
    let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    Blob::new(out.into_inner(), "image/jpeg")
}

#[test]
fn create_and_download_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let host = NativeHost::new(dir.path());

    download::create_and_download_blob(&host, b"hello world", "hello.txt", "text/plain").unwrap();

    assert_eq!(fs::read(dir.path().join("hello.txt")).unwrap(), b"hello world");
    assert_eq!(host.live_object_urls(), 0);
}

#[test]
fn save_as_keeps_only_the_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let host = NativeHost::new(dir.path().join("downloads"));

    download::create_and_download_blob(&host, b"x", "../escape.txt", "text/plain").unwrap();

    assert!(dir.path().join("downloads/escape.txt").exists());
    assert!(!dir.path().join("escape.txt").exists());
}

#[test]
fn fetch_and_download_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/files/report.v1.pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.7 body")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let host = NativeHost::new(dir.path());
    let url = format!("{}/files/report.v1.pdf", server.url());

    download::fetch_and_download_blob(&host, &url, "report.v1.pdf", "application/pdf").unwrap();

    mock.assert();
    assert_eq!(
        fs::read(dir.path().join("reportv1pdf")).unwrap(),
        b"%PDF-1.7 body"
    );
    assert!(!dir.path().join("report.v1.pdf").exists());
    assert_eq!(host.live_object_urls(), 0);
}

#[test]
fn fetch_failure_status_is_a_network_error() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/missing").with_status(404).create();

    let dir = tempfile::tempdir().unwrap();
    let host = NativeHost::new(dir.path());
    let url = format!("{}/missing", server.url());

    let res = download::fetch_and_download_blob(&host, &url, "missing.bin", "text/plain");

    mock.assert();
    assert!(matches!(res, Err(BlobError::NetworkError { status: 404 })));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(host.live_object_urls(), 0);
}

#[test]
fn compress_jpeg_at_low_quality() {
    let host = NativeHost::new(".");
    let original = jpeg_blob();

    let low = blob::compress_blob(&host, &original, 0.1).unwrap().unwrap();
    let high = blob::compress_blob(&host, &original, 1.0).unwrap().unwrap();

    assert_eq!(low.mime(), "image/jpeg");
    assert!(low.size() < high.size());

    let decoded = image::load_from_memory(low.data()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn compress_unknown_image_type_yields_nothing() {
    let host = NativeHost::new(".");
    let jpeg = jpeg_blob();
    let mut out = Cursor::new(Vec::new());
    image::load_from_memory(jpeg.data())
        .unwrap()
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    // decodable bytes, but a type the encoder does not produce
    let blob = Blob::new(out.into_inner(), "image/x-custom");

    assert_eq!(blob::compress_blob(&host, &blob, 0.7).unwrap(), None);
}

#[test]
fn compress_decodes_gif_and_webp() {
    let host = NativeHost::new(".");
    let img = RgbaImage::from_pixel(5, 4, Rgba([10, 200, 30, 255]));

    for (format, mime) in [(ImageFormat::Gif, "image/gif"), (ImageFormat::WebP, "image/webp")] {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut out, format)
            .unwrap();
        let blob = Blob::new(out.into_inner(), mime);

        // decoding works; the native encoder only produces jpeg and png
        assert_eq!(blob::compress_blob(&host, &blob, 0.7).unwrap(), None);
    }
}

#[test]
fn text_survives_native_round_trip() {
    let host = NativeHost::new(".");
    let blob = blob::create_text_blob("grüße, 世界").unwrap();
    assert_eq!(blob::blob_to_text(&host, &blob).unwrap(), "grüße, 世界");

    let uri = blob::blob_to_base64(&host, &blob).unwrap();
    assert!(uri.starts_with("data:text/plain;base64,"));
    let back = blob::base64_to_blob(&uri, "text/plain").unwrap();
    assert_eq!(back, blob);
}
