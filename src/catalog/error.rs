//! Error types for catalog retrieval.

use thiserror::Error;

use crate::download::HttpError;

/// Errors fetching or parsing the dataset catalog.
///
/// Catalog failures are fatal: the catalog is a hard prerequisite for the
/// run, so these are never caught and converted to counters like
/// per-distribution errors are.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog endpoint was unreachable or returned a non-success status.
    #[error("catalog unavailable: {source}")]
    Unavailable {
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },

    /// The catalog response does not have the expected structure.
    #[error("malformed catalog: {reason}")]
    Malformed {
        /// What was missing or wrong.
        reason: String,
    },
}

impl CatalogError {
    /// Creates an unavailable error from the underlying HTTP failure.
    pub(crate) fn unavailable(source: HttpError) -> Self {
        Self::Unavailable { source }
    }

    /// Creates a malformed-catalog error.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
