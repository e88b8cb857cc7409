use crate::filter::keywords::{FIRST, ROWS};
use crate::filter::{Filter, Relation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountsError {
    #[error("First row index must be at least 1, got {0}")]
    FirstBelowOne(u64),

    #[error("Filtered count {filtered} exceeds total count {all}")]
    FilteredExceedsAll { filtered: u64, all: u64 },

    #[error("Page length {length} exceeds filtered count {filtered}")]
    LengthExceedsFiltered { length: u64, filtered: u64 },
}

/// Counts as reported by the server, before validation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCollectionCounts {
    pub first: u64,
    pub all: u64,
    pub filtered: u64,
    pub length: u64,
    pub rows: u64,
}

/// Pagination bookkeeping returned alongside an entity list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCollectionCounts", into = "RawCollectionCounts")]
pub struct CollectionCounts {
    first: u64,
    all: u64,
    filtered: u64,
    length: u64,
    rows: u64,
}

impl CollectionCounts {
    pub fn new(
        first: u64,
        all: u64,
        filtered: u64,
        length: u64,
        rows: u64,
    ) -> Result<Self, CountsError> {
        if first < 1 {
            return Err(CountsError::FirstBelowOne(first));
        }
        if filtered > all {
            return Err(CountsError::FilteredExceedsAll { filtered, all });
        }
        if length > filtered {
            return Err(CountsError::LengthExceedsFiltered { length, filtered });
        }
        Ok(Self {
            first,
            all,
            filtered,
            length,
            rows,
        })
    }

    /// Counts for an empty collection
    pub fn empty() -> Self {
        Self {
            first: 1,
            all: 0,
            filtered: 0,
            length: 0,
            rows: 0,
        }
    }

    pub fn first(&self) -> u64 {
        self.first
    }

    pub fn all(&self) -> u64 {
        self.all
    }

    pub fn filtered(&self) -> u64 {
        self.filtered
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Index of the last row on this page; `first - 1` for an empty page
    pub fn last(&self) -> u64 {
        match self.length {
            0 => self.first - 1,
            length => self.first.saturating_add(length - 1),
        }
    }

    pub fn is_first(&self) -> bool {
        self.first == 1
    }

    pub fn is_last(&self) -> bool {
        self.last() >= self.filtered
    }

    pub fn has_next(&self) -> bool {
        !self.is_last()
    }

    pub fn has_previous(&self) -> bool {
        !self.is_first()
    }

    /// 1-based page number. A page size of zero counts as a single page.
    pub fn current_page(&self) -> u64 {
        if self.rows == 0 {
            return 1;
        }
        (self.first - 1) / self.rows + 1
    }

    pub fn page_count(&self) -> u64 {
        if self.rows == 0 {
            return 1;
        }
        self.filtered.div_ceil(self.rows).max(1)
    }

    /// `filter` moved to the page after this one
    pub fn next_filter(&self, filter: &Filter) -> Filter {
        self.page_filter(filter, self.last().saturating_add(1))
    }

    /// `filter` moved to the page before this one
    pub fn previous_filter(&self, filter: &Filter) -> Filter {
        self.page_filter(filter, self.first.saturating_sub(self.rows).max(1))
    }

    /// `filter` moved to the last page
    pub fn last_filter(&self, filter: &Filter) -> Filter {
        let first = (self.page_count() - 1) * self.rows + 1;
        self.page_filter(filter, first)
    }

    fn page_filter(&self, filter: &Filter, first: u64) -> Filter {
        let filter = filter.set(FIRST, to_filter_int(first), Relation::Equal);
        if self.rows > 0 {
            filter.set(ROWS, to_filter_int(self.rows), Relation::Equal)
        } else {
            filter
        }
    }
}

fn to_filter_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl Default for CollectionCounts {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<RawCollectionCounts> for CollectionCounts {
    type Error = CountsError;

    fn try_from(raw: RawCollectionCounts) -> Result<Self, Self::Error> {
        CollectionCounts::new(raw.first, raw.all, raw.filtered, raw.length, raw.rows)
    }
}

impl From<CollectionCounts> for RawCollectionCounts {
    fn from(counts: CollectionCounts) -> Self {
        RawCollectionCounts {
            first: counts.first,
            all: counts.all,
            filtered: counts.filtered,
            length: counts.length,
            rows: counts.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let counts = CollectionCounts::new(11, 100, 45, 10, 10).unwrap();
        assert_eq!(counts.last(), 20);
        assert!(!counts.is_first());
        assert!(!counts.is_last());
        assert!(counts.has_next());
        assert!(counts.has_previous());
        assert_eq!(counts.current_page(), 2);
        assert_eq!(counts.page_count(), 5);
    }

    #[test]
    fn test_last_partial_page() {
        let counts = CollectionCounts::new(41, 100, 45, 5, 10).unwrap();
        assert_eq!(counts.last(), 45);
        assert!(counts.is_last());
        assert!(!counts.has_next());
        assert_eq!(counts.current_page(), 5);
    }

    #[test]
    fn test_empty() {
        let counts = CollectionCounts::empty();
        assert_eq!(counts.last(), 0);
        assert!(counts.is_first());
        assert!(counts.is_last());
        assert_eq!(counts.page_count(), 1);
    }

    #[test]
    fn test_invariants() {
        assert_eq!(
            CollectionCounts::new(0, 10, 5, 5, 5),
            Err(CountsError::FirstBelowOne(0))
        );
        assert_eq!(
            CollectionCounts::new(1, 10, 11, 5, 5),
            Err(CountsError::FilteredExceedsAll {
                filtered: 11,
                all: 10
            })
        );
        assert_eq!(
            CollectionCounts::new(1, 10, 5, 6, 10),
            Err(CountsError::LengthExceedsFiltered {
                length: 6,
                filtered: 5
            })
        );
    }

    #[test]
    fn test_page_filters() {
        let counts = CollectionCounts::new(11, 100, 45, 10, 10).unwrap();
        let filter = Filter::from_string("name~web first=11 rows=10");

        assert_eq!(
            counts.next_filter(&filter).to_filter_string(),
            "name~web first=21 rows=10"
        );
        assert_eq!(counts.previous_filter(&filter).first(), Some(1));
        assert_eq!(counts.last_filter(&filter).first(), Some(41));
    }

    #[test]
    fn test_last_row_saturates() {
        let counts: CollectionCounts = serde_json::from_str(
            r#"{"first":18446744073709551615,"all":1,"filtered":1,"length":1,"rows":10}"#,
        )
        .unwrap();
        assert_eq!(counts.last(), u64::MAX);
        assert!(counts.is_last());
        assert!(!counts.has_next());

        let filter = counts.next_filter(&Filter::from_string("rows=10"));
        assert_eq!(filter.first(), Some(i64::MAX));
    }

    #[test]
    fn test_deserialize_validates() {
        let counts: CollectionCounts =
            serde_json::from_str(r#"{"first":1,"all":3,"filtered":2,"length":2,"rows":10}"#)
                .unwrap();
        assert_eq!(counts.filtered(), 2);

        let invalid = serde_json::from_str::<CollectionCounts>(
            r#"{"first":1,"all":1,"filtered":2,"length":2,"rows":10}"#,
        );
        assert!(invalid.is_err());
    }
}
