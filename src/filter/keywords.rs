use super::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const APPLY_OVERRIDES: &str = "apply_overrides";
pub const AUTOFP: &str = "autofp";
pub const DELTA_STATES: &str = "delta_states";
pub const FIRST: &str = "first";
pub const LEVELS: &str = "levels";
pub const MIN_QOD: &str = "min_qod";
pub const NOTES: &str = "notes";
pub const OVERRIDES: &str = "overrides";
pub const RESULT_HOSTS_ONLY: &str = "result_hosts_only";
pub const ROWS: &str = "rows";
pub const SEVERITY: &str = "severity";
pub const SORT: &str = "sort";
pub const SORT_REVERSE: &str = "sort-reverse";
pub const TIMEZONE: &str = "timezone";
pub const ACTIVE: &str = "active";

/// Keywords that control presentation (paging, sorting, result options)
/// rather than select entities.
pub const EXTRA_KEYWORDS: [&str; 13] = [
    APPLY_OVERRIDES,
    AUTOFP,
    DELTA_STATES,
    FIRST,
    LEVELS,
    MIN_QOD,
    NOTES,
    OVERRIDES,
    RESULT_HOSTS_ONLY,
    ROWS,
    SORT,
    SORT_REVERSE,
    TIMEZONE,
];

pub fn is_extra_keyword(keyword: &str) -> bool {
    EXTRA_KEYWORDS.contains(&keyword.to_lowercase().as_str())
}

/// Sort direction, encoded on the wire by the keyword name itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "sort")]
    Ascending,
    #[serde(rename = "sort-reverse")]
    Descending,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => SORT,
            SortOrder::Descending => SORT_REVERSE,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            SORT | "asc" | "ascending" => Ok(SortOrder::Ascending),
            SORT_REVERSE | "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(FilterError::UnknownSortOrder(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_keywords_are_case_insensitive() {
        assert!(is_extra_keyword("rows"));
        assert!(is_extra_keyword("Sort-Reverse"));
        assert!(!is_extra_keyword("name"));
        assert!(!is_extra_keyword("severity"));
    }

    #[test]
    fn test_sort_order_round_trip() {
        assert_eq!("sort".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!(
            "sort-reverse".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Descending.to_string(), "sort-reverse");
        assert_eq!(SortOrder::Ascending.reversed(), SortOrder::Descending);
    }
}
