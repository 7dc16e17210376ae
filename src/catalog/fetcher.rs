//! Catalog retrieval: one GET, parsed into dataset descriptors.

use serde_json::Value;
use tracing::{info, instrument};

use crate::download::{HttpClient, HttpError};

use super::error::CatalogError;
use super::model::Dataset;

/// Fetches the portal catalog and parses it into dataset descriptors.
///
/// The portal's `data.json` wraps the dataset list in a top-level object
/// with a `dataset` array. No retries at this layer: the catalog is a
/// hard prerequisite, so any failure here aborts the run.
///
/// # Errors
///
/// [`CatalogError::Unavailable`] when the endpoint is unreachable or
/// returns a non-success status; [`CatalogError::Malformed`] when the
/// response is not JSON, lacks the `dataset` array, or contains an entry
/// missing its required fields.
#[instrument(skip(client))]
pub async fn fetch_catalog(client: &HttpClient, url: &str) -> Result<Vec<Dataset>, CatalogError> {
    info!("fetching dataset catalog");

    let body = client.get_json(url).await.map_err(|source| match source {
        HttpError::Body { .. } => CatalogError::malformed(source.to_string()),
        source => CatalogError::unavailable(source),
    })?;

    let entries = body
        .get("dataset")
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogError::malformed("missing top-level `dataset` array"))?;

    let datasets = entries
        .iter()
        .map(|entry| Dataset::from_entry(entry.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    info!(count = datasets.len(), "catalog fetched");
    Ok(datasets)
}
