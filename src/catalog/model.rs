//! Data model for catalog entries.

use serde::Deserialize;
use serde_json::Value;

use super::error::CatalogError;

/// One raw `distribution` entry from the catalog, as the portal emits it.
///
/// Every field is optional at this level; the resolver decides which
/// entries are usable and drops the rest with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDistribution {
    /// Human-readable distribution title.
    #[serde(default)]
    pub title: Option<String>,

    /// Declared format tag (e.g. `API`, `csv`).
    #[serde(default)]
    pub format: Option<String>,

    /// Declared media type (e.g. `text/csv`).
    #[serde(default, rename = "mediaType")]
    pub media_type: Option<String>,

    /// Temporal coverage label, e.g. `2023-01-01 to 2023-12-31`.
    #[serde(default)]
    pub temporal: Option<String>,

    /// Direct download URL, when the distribution is a flat file.
    #[serde(default, rename = "downloadURL")]
    pub download_url: Option<String>,

    /// Access URL; for API distributions this addresses the data endpoint.
    #[serde(default, rename = "accessURL")]
    pub access_url: Option<String>,
}

/// One dataset entry from the catalog.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Portal-unique dataset identifier.
    pub identifier: String,
    /// Display title.
    pub title: String,
    /// Raw distribution entries, in catalog order.
    pub distributions: Vec<RawDistribution>,
    /// The full catalog entry, written out verbatim as `metadata.json`.
    pub metadata: Value,
}

impl Dataset {
    /// Parses one catalog entry.
    ///
    /// `identifier` and `title` are required strings; a missing
    /// `distribution` array is treated as empty, but a present one with
    /// the wrong shape is malformed.
    pub(crate) fn from_entry(entry: Value) -> Result<Self, CatalogError> {
        let identifier = required_string(&entry, "identifier")?;
        let title = required_string(&entry, "title")?;

        let distributions = match entry.get("distribution") {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
                CatalogError::malformed(format!("dataset {identifier}: bad distribution list: {e}"))
            })?,
        };

        Ok(Self {
            identifier,
            title,
            distributions,
            metadata: entry,
        })
    }
}

fn required_string(entry: &Value, field: &str) -> Result<String, CatalogError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| CatalogError::malformed(format!("dataset entry missing string `{field}`")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_entry_parses_full_entry() {
        let entry = json!({
            "identifier": "abcd-1234",
            "title": "Provider Enrollment",
            "description": "kept in metadata",
            "distribution": [
                {"title": "Latest", "format": "API", "accessURL": "https://portal/dataset/abcd-1234/data"},
                {"title": "2023", "mediaType": "text/csv", "downloadURL": "https://portal/f.csv", "temporal": "2023-01-01"}
            ]
        });

        let dataset = Dataset::from_entry(entry.clone()).unwrap();
        assert_eq!(dataset.identifier, "abcd-1234");
        assert_eq!(dataset.title, "Provider Enrollment");
        assert_eq!(dataset.distributions.len(), 2);
        assert_eq!(dataset.distributions[0].format.as_deref(), Some("API"));
        assert_eq!(dataset.distributions[1].temporal.as_deref(), Some("2023-01-01"));
        // Full entry retained for metadata.json
        assert_eq!(dataset.metadata, entry);
    }

    #[test]
    fn test_from_entry_missing_identifier_is_malformed() {
        let entry = json!({"title": "No id"});
        let result = Dataset::from_entry(entry);
        assert!(matches!(result, Err(CatalogError::Malformed { .. })));
    }

    #[test]
    fn test_from_entry_missing_title_is_malformed() {
        let entry = json!({"identifier": "abcd-1234"});
        let result = Dataset::from_entry(entry);
        assert!(matches!(result, Err(CatalogError::Malformed { .. })));
    }

    #[test]
    fn test_from_entry_missing_distribution_is_empty() {
        let entry = json!({"identifier": "abcd-1234", "title": "Bare"});
        let dataset = Dataset::from_entry(entry).unwrap();
        assert!(dataset.distributions.is_empty());
    }

    #[test]
    fn test_from_entry_wrong_distribution_shape_is_malformed() {
        let entry = json!({"identifier": "abcd-1234", "title": "Bad", "distribution": "nope"});
        let result = Dataset::from_entry(entry);
        assert!(matches!(result, Err(CatalogError::Malformed { .. })));
    }
}
