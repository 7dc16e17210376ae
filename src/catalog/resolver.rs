//! Distribution classification.
//!
//! Turns raw catalog `distribution` entries into typed descriptors the
//! downloaders can act on. Classification precedence: explicit
//! `format == "API"`, then `text/csv`, then `application/zip`, then a
//! catch-all with an inferred extension. Entries missing what their kind
//! requires (a URL for direct formats, a dataset id for API ones) are
//! dropped with a warning; resolution itself never fails.

use tracing::warn;

use crate::artifact;

use super::model::{Dataset, RawDistribution};
use super::temporal;

/// How a distribution is downloaded, with the data its kind requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionKind {
    /// Flat CSV file at a direct URL.
    Csv {
        /// Direct download URL.
        url: String,
    },
    /// ZIP archive at a direct URL.
    Zip {
        /// Direct download URL.
        url: String,
    },
    /// API-backed table, fetched page by page.
    Api {
        /// Dataset id addressing the paginated data endpoint.
        dataset_id: String,
    },
    /// Any other flat file.
    Other {
        /// Direct download URL.
        url: String,
        /// File extension with leading dot, inferred from URL or format tag.
        extension: String,
    },
}

/// One resolved, downloadable distribution of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Distribution title from the catalog (`unknown` when absent).
    pub title: String,
    /// Temporal coverage label, when present and non-empty.
    pub temporal: Option<String>,
    /// Download method and its required addressing data.
    pub kind: DistributionKind,
}

impl Distribution {
    /// Label for log messages: title plus temporal coverage when known.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.temporal {
            Some(temporal) => format!("{} ({temporal})", self.title),
            None => self.title.clone(),
        }
    }

    /// Artifact file extension for this distribution.
    #[must_use]
    pub fn extension(&self) -> &str {
        match &self.kind {
            DistributionKind::Csv { .. } => ".csv",
            DistributionKind::Zip { .. } => ".zip",
            DistributionKind::Api { .. } => ".json",
            DistributionKind::Other { extension, .. } => extension,
        }
    }
}

/// Resolves a dataset's raw distribution entries into typed descriptors.
///
/// With `latest_only` set, entries are first narrowed to the most recent
/// temporal coverage. Unusable entries are dropped with a warning; the
/// returned order follows the catalog.
#[must_use]
pub fn resolve(dataset: &Dataset, latest_only: bool) -> Vec<Distribution> {
    let raw = if latest_only {
        temporal::filter_latest(dataset.distributions.clone())
    } else {
        dataset.distributions.clone()
    };

    raw.into_iter()
        .filter_map(|entry| classify(&dataset.identifier, entry))
        .collect()
}

fn classify(dataset_identifier: &str, entry: RawDistribution) -> Option<Distribution> {
    let title = entry.title.clone().unwrap_or_else(|| "unknown".to_string());
    let temporal = entry.temporal.clone().filter(|t| !t.is_empty());
    let format = entry.format.as_deref().unwrap_or("");
    let media_type = entry.media_type.as_deref().unwrap_or("");

    // API entries are addressed by dataset id, not a direct URL.
    if format == "API" {
        let api_url = entry.access_url.as_deref().or(entry.download_url.as_deref());
        let Some(dataset_id) = api_url.and_then(api_dataset_id) else {
            warn!(
                dataset = dataset_identifier,
                distribution = title,
                "dropping API distribution without a dataset id in its access URL"
            );
            return None;
        };
        return Some(Distribution {
            title,
            temporal,
            kind: DistributionKind::Api { dataset_id },
        });
    }

    let Some(url) = entry
        .download_url
        .clone()
        .or(entry.access_url.clone())
        .filter(|u| !u.is_empty())
    else {
        warn!(
            dataset = dataset_identifier,
            distribution = title,
            "dropping distribution without a usable access URL"
        );
        return None;
    };

    let kind = if media_type == "text/csv" || format.eq_ignore_ascii_case("csv") {
        DistributionKind::Csv { url }
    } else if media_type == "application/zip" || format.eq_ignore_ascii_case("zip") {
        DistributionKind::Zip { url }
    } else {
        let extension = artifact::extension_from_url(&url)
            .or_else(|| extension_from_format(format))
            .unwrap_or_else(|| ".bin".to_string());
        DistributionKind::Other { url, extension }
    };

    Some(Distribution { title, temporal, kind })
}

/// Extracts the dataset id from an API access URL of the form
/// `.../dataset/{id}/data`.
fn api_dataset_id(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/dataset/")?;
    let id = rest.split('/').next()?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Derives an extension from a declared format tag, keeping only
/// alphanumerics so a hostile tag cannot leak into the path.
fn extension_from_format(format: &str) -> Option<String> {
    let cleaned: String = format
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .flat_map(char::to_lowercase)
        .collect();
    (!cleaned.is_empty()).then(|| format!(".{cleaned}"))
}
