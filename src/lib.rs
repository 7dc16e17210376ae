//! CMS Open Data Bulk Downloader
//!
//! This library downloads every dataset published by a government
//! open-data portal: it fetches the portal's `data.json` catalog,
//! classifies each dataset's distributions, and downloads them into a
//! per-dataset directory tree with skip-on-rerun resume.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Catalog fetching, parsing, and distribution resolution
//! - [`download`] - Direct file and paginated API downloaders
//! - [`artifact`] - Output path derivation and the resume/skip gate
//! - [`run`] - The sequential run coordinator and its statistics

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod artifact;
pub mod catalog;
pub mod download;
pub mod run;

pub(crate) mod user_agent;

// Re-export commonly used types
pub use catalog::{
    CatalogError, Dataset, Distribution, DistributionKind, RawDistribution, fetch_catalog, resolve,
};
pub use download::{
    DEFAULT_PAGE_SIZE, DownloadError, HttpClient, HttpError, download_api, download_direct,
};
pub use run::{
    Coordinator, DEFAULT_API_BASE, DEFAULT_CATALOG_URL, DEFAULT_DELAY, RunConfig, RunReport,
    RunStats,
};
