//! Parameters shared across resource routes

use crate::models::Metadata;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use stripe_core::Validator;

/// Largest page the API returns
pub const MAX_PAGE_SIZE: u8 = 100;

const MAX_METADATA_KEYS: usize = 50;
const MAX_METADATA_KEY_LEN: usize = 40;
const MAX_METADATA_VALUE_LEN: usize = 500;

/// Filter on object creation time; all bounds are optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatedFilter {
    /// Strictly after
    #[serde(
        rename = "created[gt]",
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub gt: Option<DateTime<Utc>>,
    /// At or after
    #[serde(
        rename = "created[gte]",
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub gte: Option<DateTime<Utc>>,
    /// Strictly before
    #[serde(
        rename = "created[lt]",
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub lt: Option<DateTime<Utc>>,
    /// At or before
    #[serde(
        rename = "created[lte]",
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub lte: Option<DateTime<Utc>>,
}

/// Cursor pagination for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// Page size (1-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
    /// Return objects after this identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    /// Return objects before this identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    /// Creation time bounds
    #[serde(flatten)]
    pub created: Option<CreatedFilter>,
}

impl ListParams {
    /// Create new params with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size
    #[must_use]
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue after the given object
    #[must_use]
    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    /// Page backwards from the given object
    #[must_use]
    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    /// Restrict by creation time
    #[must_use]
    pub fn with_created(mut self, created: CreatedFilter) -> Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn check(&self, validator: Validator) -> Validator {
        let validator = match self.limit {
            Some(limit) => validator.range("limit", limit, 1, MAX_PAGE_SIZE),
            None => validator,
        };
        validator
            .optional_identifier("starting_after", self.starting_after.as_deref())
            .optional_identifier("ending_before", self.ending_before.as_deref())
            .custom("ending_before", || {
                (self.starting_after.is_some() && self.ending_before.is_some())
                    .then(|| "Cannot be combined with starting_after".to_string())
            })
    }
}

/// Serializes metadata as `metadata[key]=value` pairs
///
/// Flattened into a form struct; `None` contributes no keys.
pub(crate) struct MetadataForm<'a>(pub Option<&'a Metadata>);

impl Serialize for MetadataForm<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.0.map_or(0, Metadata::len);
        let mut map = serializer.serialize_map(Some(entries))?;
        if let Some(metadata) = self.0 {
            for (key, value) in metadata {
                map.serialize_entry(&format!("metadata[{key}]"), value)?;
            }
        }
        map.end()
    }
}

/// Check the API's documented metadata limits
pub(crate) fn check_metadata(validator: Validator, metadata: Option<&Metadata>) -> Validator {
    let Some(metadata) = metadata else {
        return validator;
    };

    let mut validator = validator.custom("metadata", || {
        (metadata.len() > MAX_METADATA_KEYS)
            .then(|| format!("At most {MAX_METADATA_KEYS} keys are allowed"))
    });
    for (key, value) in metadata {
        let field = format!("metadata[{key}]");
        validator = validator
            .required(&field, key)
            .max_length(&field, key, MAX_METADATA_KEY_LEN)
            .max_length(&field, value, MAX_METADATA_VALUE_LEN)
            .custom(&field, || {
                key.contains(['[', ']'])
                    .then(|| "Keys cannot contain square brackets".to_string())
            });
    }
    validator
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Serialize)]
    struct Query<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        charge: Option<&'a str>,
        #[serde(flatten)]
        page: &'a ListParams,
    }

    #[derive(Serialize)]
    struct WithMetadata<'a> {
        amount: i64,
        #[serde(flatten)]
        metadata: MetadataForm<'a>,
    }

    fn pairs<T: Serialize>(value: &T) -> Vec<(String, String)> {
        let encoded = serde_urlencoded::to_string(value).unwrap();
        serde_urlencoded::from_str(&encoded).unwrap()
    }

    #[test]
    fn test_empty_list_params_encode_nothing() {
        let page = ListParams::new();
        assert!(pairs(&Query { charge: None, page: &page }).is_empty());
    }

    #[test]
    fn test_list_params_encoding() {
        let page = ListParams::new()
            .with_limit(10)
            .starting_after("re_9")
            .with_created(CreatedFilter {
                gte: Some(Utc.timestamp_opt(1_500_000_000, 0).unwrap()),
                ..CreatedFilter::default()
            });

        assert_eq!(
            pairs(&Query { charge: Some("ch_1"), page: &page }),
            vec![
                ("charge".to_string(), "ch_1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("starting_after".to_string(), "re_9".to_string()),
                ("created[gte]".to_string(), "1500000000".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_params_validation() {
        let err = ListParams::new()
            .with_limit(0)
            .check(Validator::new())
            .finish()
            .unwrap_err();
        assert_eq!(err.first_field(), Some("limit"));

        let err = ListParams::new()
            .starting_after("a")
            .ending_before("b")
            .check(Validator::new())
            .finish()
            .unwrap_err();
        assert_eq!(err.first_field(), Some("ending_before"));
    }

    #[test]
    fn test_metadata_encoding() {
        let mut metadata = Metadata::new();
        metadata.insert("order".to_string(), "42".to_string());
        metadata.insert("hello".to_string(), "world".to_string());

        assert_eq!(
            pairs(&WithMetadata { amount: 5, metadata: MetadataForm(Some(&metadata)) }),
            vec![
                ("amount".to_string(), "5".to_string()),
                ("metadata[hello]".to_string(), "world".to_string()),
                ("metadata[order]".to_string(), "42".to_string()),
            ]
        );
        assert_eq!(
            pairs(&WithMetadata { amount: 5, metadata: MetadataForm(None) }),
            vec![("amount".to_string(), "5".to_string())]
        );
    }

    #[test]
    fn test_metadata_limits() {
        let mut metadata = Metadata::new();
        metadata.insert("k".repeat(41), "v".to_string());
        metadata.insert("bad[key]".to_string(), "v".to_string());

        let err = check_metadata(Validator::new(), Some(&metadata))
            .finish()
            .unwrap_err();
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn test_metadata_key_count_limit() {
        let mut metadata: Metadata = (0..MAX_METADATA_KEYS)
            .map(|i| (format!("k{i}"), "v".to_string()))
            .collect();
        assert!(check_metadata(Validator::new(), Some(&metadata)).finish().is_ok());

        metadata.insert("one_more".to_string(), "v".to_string());
        let err = check_metadata(Validator::new(), Some(&metadata))
            .finish()
            .unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.first_field(), Some("metadata"));
    }
}
