//! Run coordinator: the sequential loop over datasets and distributions.
//!
//! Only the catalog fetch is fatal. Every per-distribution failure is
//! caught here, logged with dataset and distribution context, counted,
//! and the run moves on to the next distribution. A fixed pause follows
//! every network request so the portal sees one paced, sequential client.

use std::path::Path;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::artifact;
use crate::catalog::{self, CatalogError, Dataset, Distribution, DistributionKind};
use crate::download::{self, DownloadError, HttpClient};

use super::config::RunConfig;
use super::stats::RunStats;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Counters accumulated over the run.
    pub stats: RunStats,
    /// Wall-clock duration of the run.
    pub elapsed: std::time::Duration,
}

/// Drives one bulk download run end to end.
#[derive(Debug)]
pub struct Coordinator {
    client: HttpClient,
    config: RunConfig,
}

impl Coordinator {
    /// Creates a coordinator with its own HTTP client.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            client: HttpClient::new(),
            config,
        }
    }

    /// Fetches the catalog and processes every dataset in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error only when the catalog itself cannot be fetched or
    /// parsed. Individual distribution failures are logged and counted in
    /// the returned [`RunStats`] instead.
    pub async fn run(&self) -> Result<RunReport, CatalogError> {
        let started = Instant::now();
        let mut stats = RunStats::default();

        let catalog_result = catalog::fetch_catalog(&self.client, &self.config.catalog_url).await;
        tokio::time::sleep(self.config.delay).await;
        let datasets = catalog_result?;
        info!(
            datasets = datasets.len(),
            output_dir = %self.config.output_dir.display(),
            "starting downloads"
        );

        for dataset in &datasets {
            self.process_dataset(dataset, &mut stats).await;
            stats.record_dataset();
        }

        Ok(RunReport {
            stats,
            elapsed: started.elapsed(),
        })
    }

    async fn process_dataset(&self, dataset: &Dataset, stats: &mut RunStats) {
        info!(
            dataset = %dataset.identifier,
            title = %dataset.title,
            "processing dataset"
        );

        let dataset_dir =
            artifact::dataset_dir(&self.config.output_dir, &dataset.identifier, &dataset.title);
        if let Err(err) = write_metadata(&dataset_dir, &dataset.metadata).await {
            warn!(
                dataset = %dataset.identifier,
                error = %err,
                "failed to write dataset metadata"
            );
            stats.record_error();
        }

        let distributions = catalog::resolve(dataset, self.config.latest_only);
        for distribution in &distributions {
            let file_name = artifact::artifact_file_name(
                &distribution.title,
                distribution.temporal.as_deref(),
                distribution.extension(),
            );
            let output_path = dataset_dir.join(file_name);

            // The skip gate fires before any request, so skipped artifacts
            // cost neither a request nor a pause.
            if artifact::should_skip(&output_path) {
                info!(
                    dataset = %dataset.identifier,
                    distribution = %distribution.label(),
                    path = %output_path.display(),
                    "already downloaded, skipping"
                );
                stats.record_skipped();
                continue;
            }

            match self.download_distribution(distribution, &output_path).await {
                Ok(bytes) => stats.record_downloaded(bytes),
                Err(err) => {
                    error!(
                        dataset = %dataset.identifier,
                        distribution = %distribution.label(),
                        error = %err,
                        "distribution download failed, continuing"
                    );
                    stats.record_error();
                }
            }
        }
    }

    async fn download_distribution(
        &self,
        distribution: &Distribution,
        output_path: &Path,
    ) -> Result<u64, DownloadError> {
        match &distribution.kind {
            DistributionKind::Api { dataset_id } => {
                // Paces itself: a pause follows every stats and page request.
                download::download_api(
                    &self.client,
                    &self.config.api_base,
                    dataset_id,
                    output_path,
                    self.config.page_size,
                    self.config.delay,
                )
                .await
            }
            DistributionKind::Csv { url }
            | DistributionKind::Zip { url }
            | DistributionKind::Other { url, .. } => {
                let result = download::download_direct(&self.client, url, output_path).await;
                tokio::time::sleep(self.config.delay).await;
                result
            }
        }
    }
}

/// Writes the dataset's catalog entry as `metadata.json`, refreshed on
/// every run regardless of the skip gate.
async fn write_metadata(dataset_dir: &Path, metadata: &Value) -> Result<(), DownloadError> {
    tokio::fs::create_dir_all(dataset_dir)
        .await
        .map_err(|e| DownloadError::io(dataset_dir, e))?;

    let path = dataset_dir.join("metadata.json");
    let body = serde_json::to_vec_pretty(metadata)
        .map_err(|e| DownloadError::io(&path, std::io::Error::other(e)))?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|e| DownloadError::io(&path, e))
}
