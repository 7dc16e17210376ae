//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::download::DEFAULT_PAGE_SIZE;

/// Default catalog URL for the CMS open-data portal.
pub const DEFAULT_CATALOG_URL: &str = "https://data.cms.gov/data.json";

/// Default base URL for the paginated data API.
pub const DEFAULT_API_BASE: &str = "https://data.cms.gov/data-api/v1";

/// Default pause between consecutive network requests.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Configuration for one bulk download run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// URL of the `data.json` catalog.
    pub catalog_url: String,
    /// Base URL for stats and page requests, without trailing slash.
    pub api_base: String,
    /// Directory under which all dataset directories are created.
    pub output_dir: PathBuf,
    /// Pause inserted after every network request.
    pub delay: Duration,
    /// Rows requested per API page.
    pub page_size: u64,
    /// Restrict each dataset to its most recent temporal coverage.
    pub latest_only: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("cms_data"),
            delay: DEFAULT_DELAY,
            page_size: DEFAULT_PAGE_SIZE,
            latest_only: true,
        }
    }
}
