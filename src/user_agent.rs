//! Shared User-Agent string for all portal traffic.
//!
//! Single source for the UA format so catalog, stats, page, and file
//! requests all identify the tool consistently (good citizenship; RFC 9308).

/// Default User-Agent for portal requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("cms-bulk/{version} (open-data bulk downloader)")
}
