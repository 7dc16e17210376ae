//! Downloaders: direct file transfer and paginated API accumulation.
//!
//! Both downloaders share one [`HttpClient`] and write atomically via a
//! `.part` temp file, so a failed download never leaves an artifact the
//! skip gate would treat as complete.

mod api;
mod client;
mod direct;
mod error;

pub use api::{DEFAULT_PAGE_SIZE, download_api};
pub use client::HttpClient;
pub use direct::download_direct;
pub use error::{DownloadError, HttpError};
