//! `data:` URI helpers.
//!
//! Decoding is as forgiving as a browser's `atob`: ASCII whitespace is
//! skipped, padding is optional and stray trailing bits are dropped.

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::error::{BlobError, Result};

const DEFAULT_MIME: &str = "application/octet-stream";

const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// encodes `data` as `data:<mime>;base64,<payload>`
pub fn encode(mime: &str, data: &[u8]) -> String {
    let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

/// decodes a base64 string the way `atob` does
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    FORGIVING
        .decode(compact)
        .map_err(|err| BlobError::InvalidArgument(format!("invalid base64 payload: {}", err)))
}

/// decodes everything after the first comma as base64
pub fn payload(uri: &str) -> Result<Vec<u8>> {
    let (_, body) = uri
        .split_once(',')
        .ok_or_else(|| BlobError::InvalidArgument("data uri has no ',' separator".to_string()))?;
    decode_base64(body)
}

/// A parsed `data:[<mime>][;param]*[;base64],<body>` URI.
#[derive(Debug, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub base64: bool,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Parses the header as well as the body. A body without the `;base64`
    /// flag is taken verbatim.
    pub fn parse(uri: &str) -> Result<DataUri> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| BlobError::InvalidArgument("missing 'data:' prefix".to_string()))?;
        let (header, body) = rest.split_once(',').ok_or_else(|| {
            BlobError::InvalidArgument("data uri has no ',' separator".to_string())
        })?;

        let mut params = header.split(';');
        let mime = match params.next() {
            Some(m) if !m.trim().is_empty() => m.trim().to_ascii_lowercase(),
            _ => DEFAULT_MIME.to_string(),
        };
        let base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

        let data = if base64 {
            decode_base64(body)?
        } else {
            body.as_bytes().to_vec()
        };

        Ok(DataUri { mime, base64, data })
    }
}
