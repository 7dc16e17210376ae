//! Paginated API downloader.
//!
//! API-backed distributions have no flat file to fetch; their rows live
//! behind a paginated data endpoint. The downloader asks the stats
//! endpoint for the total row count, then issues strictly sequential
//! page requests of `page_size` rows each, accumulating every page in
//! memory and writing the whole result as one JSON array only after the
//! last page succeeds. A fixed delay is slept after every request so the
//! pacing contract matches the rest of the run.
//!
//! Partial results are never written: any page failure discards what was
//! accumulated, and the final file is produced with a temp-then-rename
//! write so a crash can never leave a truncated artifact that the skip
//! gate would treat as complete.

use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::artifact::part_path;

use super::client::HttpClient;
use super::error::{DownloadError, HttpError};

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u64 = 5000;

/// Downloads a complete API-backed distribution to `output_path`,
/// returning bytes written.
///
/// Issues exactly `ceil(total_rows / page_size)` page requests (zero when
/// the dataset is empty, in which case an empty JSON array is written).
/// Rows keep the server's page order, within-page order, and field order.
///
/// # Errors
///
/// [`DownloadError::StatsUnavailable`] when the stats request fails or
/// reports no usable count; [`DownloadError::PageFetchFailed`] when any
/// page request fails; [`DownloadError::PageTruncated`] when the server
/// runs out of rows before the promised count (dataset mutated
/// mid-download); [`DownloadError::Io`] on filesystem errors. On every
/// error path, nothing is written to `output_path`.
#[instrument(skip(client, delay), fields(dataset_id = %dataset_id))]
pub async fn download_api(
    client: &HttpClient,
    api_base: &str,
    dataset_id: &str,
    output_path: &Path,
    page_size: u64,
    delay: Duration,
) -> Result<u64, DownloadError> {
    let total_rows = fetch_total_rows(client, api_base, dataset_id, delay).await?;
    info!(total_rows, "downloading via API");

    let mut rows: Vec<Value> = Vec::new();
    let mut offset: u64 = 0;
    while offset < total_rows {
        debug!(offset, page_size, "fetching page");
        let page_url =
            format!("{api_base}/dataset/{dataset_id}/data?size={page_size}&offset={offset}");

        let page_result = client.get_json(&page_url).await;
        tokio::time::sleep(delay).await;

        let page = page_result
            .map_err(|source| DownloadError::page_fetch_failed(dataset_id, offset, source))?;
        let Value::Array(page_rows) = page else {
            return Err(DownloadError::page_fetch_failed(
                dataset_id,
                offset,
                HttpError::body(&page_url, "expected a JSON array of rows"),
            ));
        };

        if page_rows.is_empty() {
            // Stats promised more rows than the server now has.
            warn!(offset, total_rows, "empty page inside expected range");
            return Err(DownloadError::page_truncated(dataset_id, offset, total_rows));
        }

        rows.extend(page_rows);
        offset += page_size;
    }

    let bytes = write_rows(&rows, output_path).await?;
    info!(
        path = %output_path.display(),
        rows = rows.len(),
        bytes,
        "API download complete"
    );
    Ok(bytes)
}

/// Queries the stats endpoint for the dataset's total row count.
async fn fetch_total_rows(
    client: &HttpClient,
    api_base: &str,
    dataset_id: &str,
    delay: Duration,
) -> Result<u64, DownloadError> {
    let stats_url = format!("{api_base}/dataset/{dataset_id}/data/stats");
    debug!("fetching dataset stats");

    let stats_result = client.get_json(&stats_url).await;
    tokio::time::sleep(delay).await;

    let stats =
        stats_result.map_err(|source| DownloadError::stats_unavailable(dataset_id, source))?;
    stats
        .get("total_rows")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            DownloadError::stats_unavailable(
                dataset_id,
                HttpError::body(&stats_url, "missing integer `total_rows`"),
            )
        })
}

/// Serializes the accumulated rows as one JSON array, atomically.
async fn write_rows(rows: &[Value], output_path: &Path) -> Result<u64, DownloadError> {
    let body = serde_json::to_vec_pretty(rows)
        .map_err(|e| DownloadError::io(output_path, std::io::Error::other(e)))?;

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::io(parent, e))?;
    }

    let temp = part_path(output_path);
    tokio::fs::write(&temp, &body)
        .await
        .map_err(|e| DownloadError::io(&temp, e))?;
    tokio::fs::rename(&temp, output_path)
        .await
        .map_err(|e| DownloadError::io(output_path, e))?;

    Ok(body.len() as u64)
}
