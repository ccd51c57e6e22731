//! Paginated list wrapper

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct List<T> {
    /// Objects on this page, in API order
    #[serde(rename = "data")]
    pub items: Vec<T>,
    /// Whether more objects exist after the last item
    pub has_more: bool,
    /// Total number of objects, when the API includes it
    pub total_count: Option<u64>,
    /// URL this list was fetched from
    pub url: Option<String>,
}

impl<T> List<T> {
    /// Cursor for the next page, if there is one
    ///
    /// Pass the result as `starting_after` to continue iterating.
    pub fn next_cursor<'a>(&'a self, id: impl Fn(&'a T) -> &'a str) -> Option<&'a str> {
        if self.has_more {
            self.items.last().map(id)
        } else {
            None
        }
    }

    /// Number of items on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{decode, Refund};

    #[test]
    fn test_decode_page() {
        let json = br#"{
            "object": "list",
            "url": "/v1/refunds",
            "has_more": true,
            "data": [
                {"id": "re_1", "object": "refund", "amount": 100},
                {"id": "re_2", "object": "refund", "amount": 200}
            ]
        }"#;

        let page: List<Refund> = decode(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.total_count, None);
        assert_eq!(page.next_cursor(|r| r.id.as_str()), Some("re_2"));
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let json = br#"{"data": [{"id": "re_1", "amount": 100}], "has_more": false, "total_count": 1}"#;
        let page: List<Refund> = decode(json).unwrap();
        assert_eq!(page.total_count, Some(1));
        assert_eq!(page.next_cursor(|r| r.id.as_str()), None);
    }

    #[test]
    fn test_missing_data_is_decoding_error() {
        let result: crate::ApiResult<List<Refund>> = decode(br#"{"has_more": false}"#);
        assert!(matches!(result, Err(crate::ApiError::Decoding(_))));
    }
}
