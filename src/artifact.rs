//! Artifact path derivation and the resume/skip gate.
//!
//! Every output path is built from catalog-supplied strings (dataset
//! identifiers, titles, temporal labels) which cannot be trusted to be
//! filesystem-safe. Each component passes through [`sanitize_component`]
//! before any path is joined, so a derived path can never escape the
//! output directory.
//!
//! Resume is purely presence-based: a regular file at the final artifact
//! path larger than [`MIN_COMPLETE_BYTES`] is treated as complete and its
//! download is skipped. In-progress writes go to a `.part` sibling and
//! are renamed into place only on success, so the gate never sees a
//! truncated file at the final path.

use std::path::{Path, PathBuf};

use url::Url;

/// Maximum length of a single sanitized path component, in characters.
const MAX_COMPONENT_CHARS: usize = 200;

/// A complete artifact must be strictly larger than this many bytes.
///
/// One byte keeps zero-byte debris from a crashed run out of the skip
/// gate, while an empty API result (`[]`, two bytes) still counts as
/// complete.
pub const MIN_COMPLETE_BYTES: u64 = 1;

/// Suffix for in-progress downloads; renamed away only on success.
pub const PART_SUFFIX: &str = ".part";

/// Sanitizes one path component to be filesystem-safe.
///
/// Replaces `< > : " / \ | ? *` and control characters with `_` and
/// truncates to 200 characters. Empty input and bare dot segments map to
/// underscores so a component can never vanish or traverse upward.
#[must_use]
pub fn sanitize_component(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(MAX_COMPONENT_CHARS)
        .collect();

    if matches!(sanitized.as_str(), "" | "." | "..") {
        return "_".repeat(sanitized.len().max(1));
    }
    sanitized
}

/// Directory for one dataset's artifacts: `<output>/<identifier>_<title>/`.
#[must_use]
pub fn dataset_dir(output_dir: &Path, identifier: &str, title: &str) -> PathBuf {
    output_dir.join(sanitize_component(&format!("{identifier}_{title}")))
}

/// Filename for one distribution's artifact: `<title>[_<temporal>]<ext>`.
#[must_use]
pub fn artifact_file_name(title: &str, temporal: Option<&str>, extension: &str) -> String {
    let mut name = sanitize_component(title);
    if let Some(temporal) = temporal {
        name.push('_');
        name.push_str(&sanitize_component(temporal));
    }
    name.push_str(extension);
    name
}

/// Infers a file extension (with leading dot) from a URL's path.
///
/// Returns `None` when the last path segment has no usable extension
/// (missing, bare dot, or implausibly long).
#[must_use]
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let dot_index = last_segment.rfind('.')?;
    let ext = &last_segment[dot_index..];
    if ext.len() <= 1 || ext.len() > 12 {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Sibling temp path used while an artifact is being written.
#[must_use]
pub fn part_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| std::ffi::OsString::from("artifact"), ToOwned::to_owned);
    name.push(PART_SUFFIX);
    path.with_file_name(name)
}

/// Returns true iff a complete artifact already exists at `path`.
///
/// This is the entire resume mechanism: no checksum, timestamp, or
/// upstream-version comparison. A stale local file is never refreshed.
#[must_use]
pub fn should_skip(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > MIN_COMPLETE_BYTES)
}
