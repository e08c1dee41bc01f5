//! # List Queries
//!
//! Turns the raw `items(limit, offset, search)` arguments into a validated
//! [`ItemFilter`] the repository can execute.
//!
//! ## Search Semantics
//! ```text
//! search = "SOCIÉTÉ"
//!      │
//!      ▼
//! like_pattern(fold_case("SOCIÉTÉ")) = "%société%"
//!      │
//!      ▼
//! WHERE name_folded LIKE '%société%' ESCAPE '\'
//!    OR manufacturer_folded LIKE '%société%' ESCAPE '\'
//!      │
//!      ▼
//! matches "Société Générale", "SOCIÉTÉ", "Bolt (société)" ...
//! ```
//!
//! SQLite's own `LIKE` and `lower()` only fold ASCII, so both sides are folded
//! in Rust with [`fold_case`]: the search here, the stored text when a row is
//! inserted. `%` and `_` typed by the user are escaped so they match literally.

use serde::{Deserialize, Serialize};

use crate::validation::{validate_page_bound, validate_search_query, ValidationResult};

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Raw list arguments, exactly as the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

impl ItemQuery {
    /// Empty query: every item, no paging.
    pub fn new() -> Self {
        ItemQuery::default()
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of rows to skip.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the search string.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Validates the arguments.
    ///
    /// ## Rules
    /// - `limit` and `offset` must not be negative
    /// - blank `search` is treated as no search
    /// - `search` is capped at `MAX_SEARCH_LEN` characters
    pub fn into_filter(self) -> ValidationResult<ItemFilter> {
        let limit = validate_page_bound("limit", self.limit)?;
        let offset = validate_page_bound("offset", self.offset)?.unwrap_or(0);
        let search_pattern = validate_search_query(self.search.as_deref())?
            .map(|search| like_pattern(&fold_case(&search)));

        Ok(ItemFilter {
            limit,
            offset,
            search_pattern,
        })
    }
}

/// Validated list arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Page size; `None` means unlimited.
    pub limit: Option<i64>,
    /// Rows to skip before the page starts.
    pub offset: i64,
    /// Ready-to-bind `LIKE` pattern, if searching.
    pub search_pattern: Option<String>,
}

impl ItemFilter {
    /// True when the filter can only ever return nothing.
    pub fn is_empty_page(&self) -> bool {
        self.limit == Some(0)
    }

    /// Limit value for SQLite, where `-1` means "no limit".
    pub fn sql_limit(&self) -> i64 {
        self.limit.unwrap_or(-1)
    }
}

/// Case-folds text for search matching.
///
/// Used on the search string and on the `*_folded` columns written at insert,
/// so matching ignores case for any script, not just ASCII.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Builds a contains-pattern for `LIKE ... ESCAPE '\'`.
///
/// ## Example
/// Expects text already passed through [`fold_case`].
///
/// ```rust
/// use stockroom_core::query::like_pattern;
///
/// assert_eq!(like_pattern("acme"), "%acme%");
/// assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_unbounded() {
        let filter = ItemQuery::new().into_filter().unwrap();
        assert_eq!(filter.limit, None);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.search_pattern, None);
        assert_eq!(filter.sql_limit(), -1);
        assert!(!filter.is_empty_page());
    }

    #[test]
    fn test_query_builder() {
        let filter = ItemQuery::new()
            .limit(10)
            .offset(20)
            .search("Acme")
            .into_filter()
            .unwrap();

        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.offset, 20);
        assert_eq!(filter.search_pattern.as_deref(), Some("%acme%"));
    }

    #[test]
    fn test_zero_limit_is_empty_page() {
        let filter = ItemQuery::new().limit(0).into_filter().unwrap();
        assert!(filter.is_empty_page());
    }

    #[test]
    fn test_negative_bounds_rejected() {
        assert!(ItemQuery::new().limit(-1).into_filter().is_err());
        assert!(ItemQuery::new().offset(-5).into_filter().is_err());
    }

    #[test]
    fn test_empty_search_is_no_search() {
        let filter = ItemQuery::new().search("").into_filter().unwrap();
        assert_eq!(filter.search_pattern, None);

        let filter = ItemQuery::new().search(" ").into_filter().unwrap();
        assert_eq!(filter.search_pattern.as_deref(), Some("% %"));
    }

    #[test]
    fn test_fold_case_is_unicode_aware() {
        assert_eq!(fold_case("Écrou"), "écrou");
        assert_eq!(fold_case("SOCIÉTÉ Générale"), "société générale");
        assert_eq!(fold_case("ΣΤΟΚ"), fold_case("στοκ"));

        let filter = ItemQuery::new().search("ÉCROU").into_filter().unwrap();
        assert_eq!(filter.search_pattern.as_deref(), Some("%écrou%"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
