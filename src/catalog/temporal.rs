//! Temporal label parsing and latest-distribution filtering.
//!
//! Catalog entries usually carry one distribution per quarter or year.
//! By default only the most recent one(s) are downloaded; `--all-versions`
//! disables the filter.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::model::RawDistribution;

/// Full ISO dates inside a temporal label, e.g. `2023-01-01 to 2023-12-31`.
#[allow(clippy::expect_used)]
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date regex is valid") // Static pattern, safe to panic
});

/// Bare years, used only when a label has no full dates.
#[allow(clippy::expect_used)]
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("year regex is valid"));

/// Extracts the latest date mentioned in a temporal label.
///
/// Prefers full `YYYY-MM-DD` dates, falling back to bare years. Returned
/// values compare correctly as strings (ISO ordering), which is also how
/// [`filter_latest`] ranks them.
#[must_use]
pub(crate) fn latest_date(temporal: &str) -> Option<String> {
    let latest_full = DATE_PATTERN
        .find_iter(temporal)
        .map(|m| m.as_str().to_string())
        .max();
    if latest_full.is_some() {
        return latest_full;
    }

    YEAR_PATTERN
        .find_iter(temporal)
        .map(|m| m.as_str().to_string())
        .max()
}

/// Keeps only the distributions carrying the most recent temporal date.
///
/// When no distribution has a parseable date the list is returned intact
/// (with a warning): there is no way to tell which version is latest, so
/// everything is downloaded.
#[must_use]
pub(crate) fn filter_latest(distributions: Vec<RawDistribution>) -> Vec<RawDistribution> {
    let dates: Vec<Option<String>> = distributions
        .iter()
        .map(|dist| dist.temporal.as_deref().and_then(latest_date))
        .collect();

    let Some(max_date) = dates.iter().flatten().max().cloned() else {
        if !distributions.is_empty() {
            warn!("no temporal information found, keeping all distributions");
        }
        return distributions;
    };

    distributions
        .into_iter()
        .zip(dates)
        .filter_map(|(dist, date)| (date.as_deref() == Some(max_date.as_str())).then_some(dist))
        .collect()
}
