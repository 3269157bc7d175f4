//! Helpers for building, converting, compressing and downloading MIME-typed
//! byte payloads. Anything that needs a host facility takes it through the
//! traits in [`host`].

pub mod blob;
pub mod data_uri;
pub mod download;
pub mod error;
pub mod host;

pub use blob::Blob;
pub use error::{BlobError, Result};
