//! List query parameters shared by every facade

use serde::{Deserialize, Serialize};

/// Optional filtering and paging for `list` operations.
///
/// The remote layer serializes this into query-string parameters; the
/// fallback layer applies the same semantics in memory so both origins
/// answer a query identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring match against the entity's display field
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListQuery {
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self { search: Some(term.into()), ..Self::default() }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Apply paging bounds to an already-filtered in-memory result set.
    #[must_use]
    pub fn page<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = self.offset.unwrap_or(0);
        let mut paged: Vec<T> = items.into_iter().skip(offset).collect();
        if let Some(limit) = self.limit {
            paged.truncate(limit);
        }
        paged
    }
}
