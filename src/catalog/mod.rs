//! Dataset catalog: fetching, parsing, and distribution resolution.
//!
//! The portal publishes a `data.json` catalog describing every dataset
//! and its downloadable distributions. This module fetches that catalog
//! ([`fetch_catalog`]), models its entries ([`Dataset`],
//! [`RawDistribution`]), and classifies each distribution into something
//! a downloader can act on ([`resolve`]).

mod error;
mod fetcher;
mod model;
mod resolver;
mod temporal;

pub use error::CatalogError;
pub use fetcher::fetch_catalog;
pub use model::{Dataset, RawDistribution};
pub use resolver::{Distribution, DistributionKind, resolve};
