//! Error types for the download module.
//!
//! [`HttpError`] is the shared low-level cause (network, timeout, status,
//! body); [`DownloadError`] maps those onto the per-distribution failure
//! modes the run coordinator catches, logs, and counts.

use std::path::PathBuf;

use thiserror::Error;

/// Low-level HTTP failure shared by all download operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network-level error (DNS, connection refused, TLS, mid-stream drop).
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} from {url}")]
    Status {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not what the caller expected.
    #[error("invalid response body from {url}: {reason}")]
    Body {
        /// The URL whose body could not be used.
        url: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl HttpError {
    /// Classifies a reqwest request error as timeout or network failure.
    pub(crate) fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub(crate) fn status(url: &str, status: u16) -> Self {
        Self::Status {
            url: url.to_string(),
            status,
        }
    }

    /// Creates an invalid-body error.
    pub(crate) fn body(url: &str, reason: impl Into<String>) -> Self {
        Self::Body {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors downloading a single distribution.
///
/// All variants are caught at the distribution boundary by the run
/// coordinator: logged with dataset and distribution context, counted,
/// and the run continues with the next distribution.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The statistics endpoint failed or did not report a usable row count.
    #[error("stats unavailable for dataset {dataset_id}: {source}")]
    StatsUnavailable {
        /// Dataset whose stats request failed.
        dataset_id: String,
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },

    /// A page request failed; all accumulated pages are discarded.
    #[error("page fetch failed for dataset {dataset_id} at offset {offset}: {source}")]
    PageFetchFailed {
        /// Dataset whose page request failed.
        dataset_id: String,
        /// Row offset of the failed page.
        offset: u64,
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },

    /// The server returned an empty page inside the promised row range,
    /// meaning the dataset shrank between the stats call and the fetch.
    #[error(
        "dataset {dataset_id} returned an empty page at offset {offset} \
         (stats promised {total_rows} rows); dataset changed mid-download"
    )]
    PageTruncated {
        /// Dataset that mutated mid-download.
        dataset_id: String,
        /// Offset at which the empty page appeared.
        offset: u64,
        /// Row count the stats endpoint originally reported.
        total_rows: u64,
    },

    /// A direct file transfer failed (status error or mid-stream drop).
    #[error("transfer failed for {url}: {source}")]
    TransferFailed {
        /// The URL being transferred.
        url: String,
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },

    /// File system error while writing an artifact.
    #[error("IO error writing {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a stats-unavailable error.
    pub(crate) fn stats_unavailable(dataset_id: impl Into<String>, source: HttpError) -> Self {
        Self::StatsUnavailable {
            dataset_id: dataset_id.into(),
            source,
        }
    }

    /// Creates a page-fetch-failed error.
    pub(crate) fn page_fetch_failed(
        dataset_id: impl Into<String>,
        offset: u64,
        source: HttpError,
    ) -> Self {
        Self::PageFetchFailed {
            dataset_id: dataset_id.into(),
            offset,
            source,
        }
    }

    /// Creates a page-truncated error.
    pub(crate) fn page_truncated(
        dataset_id: impl Into<String>,
        offset: u64,
        total_rows: u64,
    ) -> Self {
        Self::PageTruncated {
            dataset_id: dataset_id.into(),
            offset,
            total_rows,
        }
    }

    /// Creates a transfer-failed error.
    pub(crate) fn transfer_failed(url: impl Into<String>, source: HttpError) -> Self {
        Self::TransferFailed {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
