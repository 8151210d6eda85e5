//! Key-cursor pagination for list queries.
//!
//! A cursor is the raw store key of the first item a page did *not* return,
//! so passing it back resumes exactly there. Pages are fetched with one item
//! of lookahead: if the store yields `limit + 1` items, the extra item's key
//! becomes `next_key` and the item itself is dropped.

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Page size used when the request gives no limit (or zero).
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Largest page a request may ask for; larger limits are clamped.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Pagination parameters accepted by list queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Resume cursor from a previous response's `next_key`.
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Also report how many items exist in total.
    #[serde(default)]
    pub count_total: bool,
}

impl PageRequest {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn resume(mut self, key: Option<Vec<u8>>) -> Self {
        self.key = key;
        self
    }

    pub fn counted(mut self) -> Self {
        self.count_total = true;
        self
    }
}

/// Pagination metadata returned with every list response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Cursor for the next page; absent on the last page.
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub next_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Page size bounds, configurable per service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            max_limit: MAX_PAGE_SIZE,
        }
    }
}

impl PageLimits {
    /// Resolve the effective page size for a request: absent or zero means
    /// the default, anything above the maximum is clamped.
    pub fn effective_limit(&self, page: &PageRequest) -> usize {
        let limit = match page.limit {
            None | Some(0) => self.default_limit,
            Some(n) => n,
        };
        usize::try_from(limit.clamp(1, self.max_limit.max(1))).unwrap_or(usize::MAX)
    }
}

/// Split a lookahead fetch of up to `limit + 1` items into the page and the
/// cursor of the first item left out.
pub fn split_page<T>(
    mut items: Vec<T>,
    limit: usize,
    key_of: impl Fn(&T) -> Vec<u8>,
) -> (Vec<T>, Option<Vec<u8>>) {
    if items.len() <= limit {
        return (items, None);
    }
    let next = key_of(&items[limit]);
    items.truncate(limit);
    (items, Some(next))
}

/// Decode a cursor into the UTF-8 key it must hold.
pub fn cursor_str(key: &[u8]) -> Result<&str, QueryError> {
    if key.is_empty() {
        return Err(QueryError::InvalidArgument("empty pagination key".into()));
    }
    std::str::from_utf8(key)
        .map_err(|_| QueryError::InvalidArgument("pagination key is not valid UTF-8".into()))
}

/// Standard base64 for optional byte fields.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => s.serialize_some(&STANDARD.encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(text) => STANDARD
                .decode(text.as_bytes())
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_limit_defaults() {
        let limits = PageLimits::default();
        assert_eq!(limits.effective_limit(&PageRequest::default()), 100);
        assert_eq!(limits.effective_limit(&PageRequest::with_limit(0)), 100);
        assert_eq!(limits.effective_limit(&PageRequest::with_limit(7)), 7);
    }

    #[test]
    fn effective_limit_clamps() {
        let limits = PageLimits::default();
        assert_eq!(limits.effective_limit(&PageRequest::with_limit(5000)), 1000);

        let tight = PageLimits { default_limit: 10, max_limit: 20 };
        assert_eq!(tight.effective_limit(&PageRequest::default()), 10);
        assert_eq!(tight.effective_limit(&PageRequest::with_limit(50)), 20);
    }

    #[test]
    fn split_page_sets_cursor_to_first_unreturned() {
        let (page, next) = split_page(vec!["a", "b", "c"], 2, |s| s.as_bytes().to_vec());
        assert_eq!(page, ["a", "b"]);
        assert_eq!(next.as_deref(), Some(&b"c"[..]));

        let (page, next) = split_page(vec!["a", "b"], 2, |s| s.as_bytes().to_vec());
        assert_eq!(page.len(), 2);
        assert!(next.is_none());
    }

    #[test]
    fn cursor_rejects_garbage() {
        assert!(cursor_str(b"").is_err());
        assert!(cursor_str(&[0xff, 0xfe]).is_err());
        assert_eq!(cursor_str(b"foo").unwrap(), "foo");
    }

    #[test]
    fn bytes_serialize_as_base64() {
        let resp = PageResponse {
            next_key: Some(b"foo".to_vec()),
            total: Some(2),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["next_key"], "Zm9v");
        assert_eq!(json["total"], 2);

        let req: PageRequest = serde_json::from_str(r#"{"key":"Zm9v","limit":1}"#).unwrap();
        assert_eq!(req.key.as_deref(), Some(&b"foo"[..]));
        assert!(!req.count_total);

        let last = serde_json::to_value(PageResponse::default()).unwrap();
        assert!(last.get("next_key").is_none());
    }
}
