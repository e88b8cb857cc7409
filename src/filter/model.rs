use super::convert::convert;
use super::keywords::{
    ACTIVE, APPLY_OVERRIDES, FIRST, LEVELS, MIN_QOD, ROWS, SORT, SORT_REVERSE, SortOrder,
    is_extra_keyword,
};
use super::term::{AND, FilterTerm, FilterValue, NOT, OR, Relation};
use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of filter terms describing an entity query.
///
/// `Filter` is a persistent value: every operation borrows `self` and
/// returns a new filter, leaving the original untouched.
///
/// # Examples
///
/// ```
/// use gmp_filter::filter::Filter;
///
/// let filter = Filter::from_string("severity>3").and(&Filter::from_string("severity<8"));
/// assert_eq!(filter.to_filter_string(), "severity>3 and severity<8");
///
/// let paged = filter.set("rows", 10_i64, gmp_filter::filter::Relation::Equal);
/// assert_eq!(paged.rows(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    id: Option<String>,
    terms: Vec<FilterTerm>,
}

impl Filter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a filter string. Never fails; unrecognized fragments become
    /// free-text terms.
    pub fn from_string(text: &str) -> Self {
        let terms: Vec<FilterTerm> = split_preserving_quotes(text)
            .into_iter()
            .map(FilterTerm::from_string)
            .collect();
        debug!("parsed filter {:?} into {} terms", text, terms.len());
        Self { id: None, terms }
    }

    pub fn from_terms(terms: impl IntoIterator<Item = FilterTerm>) -> Self {
        Self {
            id: None,
            terms: terms.into_iter().collect(),
        }
    }

    /// Attach the id of a saved filter
    pub fn with_id(mut self, id: Option<impl Into<String>>) -> Self {
        self.id = id.map(|i| i.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The wire form sent as the `filter` parameter
    pub fn to_filter_string(&self) -> String {
        join_terms(self.terms.iter())
    }

    /// Only the terms that select entities (no paging, sorting or options)
    pub fn to_filter_criteria_string(&self) -> String {
        join_terms(self.criteria_terms())
    }

    /// Only the paging, sorting and option terms
    pub fn to_filter_extra_string(&self) -> String {
        join_terms(self.extra_terms())
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// `self AND other`. The connective is left out when either side is
    /// empty.
    pub fn and(&self, other: &Filter) -> Self {
        self.connect(&AND, other)
    }

    /// `self OR other`. The connective is left out when either side is
    /// empty.
    pub fn or(&self, other: &Filter) -> Self {
        self.connect(&OR, other)
    }

    /// Negate the selecting part of this filter. Extra terms are moved
    /// behind the negated criteria so paging and sorting still apply.
    pub fn not(&self) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let terms = std::iter::once(NOT.clone())
            .chain(self.criteria_terms().cloned())
            .chain(self.extra_terms().cloned())
            .collect();
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    fn connect(&self, connective: &FilterTerm, other: &Filter) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len() + 1);
        terms.extend(self.terms.iter().cloned());
        if !self.is_empty() && !other.is_empty() {
            terms.push(connective.clone());
        }
        terms.extend(other.terms.iter().cloned());
        trace!(
            "combined {:?} {} {:?}",
            self.to_filter_string(),
            connective,
            other.to_filter_string()
        );
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    /// Whether an equal term is already part of this filter
    pub fn has_term(&self, term: &FilterTerm) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Whether any term uses `keyword`
    pub fn has(&self, keyword: &str) -> bool {
        self.terms.iter().any(|t| t.is_keyword(keyword))
    }

    /// The first term for `keyword`
    pub fn get_term(&self, keyword: &str) -> Option<&FilterTerm> {
        self.terms.iter().find(|t| t.is_keyword(keyword))
    }

    /// All terms for `keyword`, in order
    pub fn get_terms(&self, keyword: &str) -> Vec<&FilterTerm> {
        self.terms.iter().filter(|t| t.is_keyword(keyword)).collect()
    }

    /// The value of the first term for `keyword`
    pub fn get(&self, keyword: &str) -> Option<&FilterValue> {
        self.get_term(keyword).and_then(FilterTerm::value)
    }

    /// Set `keyword` to `value`, replacing every existing term for it. The
    /// value passes through term conversion first. Text containing
    /// whitespace is stored quoted so it stays a single term on the wire.
    pub fn set(&self, keyword: &str, value: impl Into<FilterValue>, relation: Relation) -> Self {
        let value = match value.into() {
            FilterValue::Str(text) if text.contains(char::is_whitespace) => {
                FilterValue::Quoted(text)
            }
            value => value,
        };
        let converted = convert(Some(keyword), Some(value), Some(relation));
        self.with_term(converted.into())
    }

    /// Add a term, replacing existing terms of the same keyword. Terms
    /// without a keyword are always appended.
    pub fn with_term(&self, term: FilterTerm) -> Self {
        let mut terms = self.terms.clone();
        set_term(&mut terms, term);
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    /// Append a term unconditionally
    pub fn add_term(&self, term: FilterTerm) -> Self {
        let mut terms = self.terms.clone();
        terms.push(term);
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    /// Remove all terms for `keyword`
    pub fn delete(&self, keyword: &str) -> Self {
        Self {
            id: self.id.clone(),
            terms: self
                .terms
                .iter()
                .filter(|t| !t.is_keyword(keyword))
                .cloned()
                .collect(),
        }
    }

    /// Merge all of `other`'s terms into a copy of this filter. Keyword
    /// terms replace ours; free-text terms are appended.
    pub fn merge(&self, other: &Filter) -> Self {
        self.merge_where(other, |_| true)
    }

    /// Like [`Filter::merge`] but only for terms that carry a keyword
    pub fn merge_keywords(&self, other: &Filter) -> Self {
        self.merge_where(other, FilterTerm::has_keyword)
    }

    /// Take over extra keywords from `other` that this filter does not set
    /// yet. Existing keywords win.
    pub fn merge_extra_keywords(&self, other: &Filter) -> Self {
        let mut terms = self.terms.clone();
        for term in other.extra_terms() {
            let keyword = term.keyword().unwrap_or_default();
            if !terms.iter().any(|t| t.is_keyword(keyword)) {
                terms.push(term.clone());
            }
        }
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    fn merge_where(&self, other: &Filter, include: impl Fn(&FilterTerm) -> bool) -> Self {
        let mut terms = self.terms.clone();
        for term in other.terms.iter().filter(|t| include(t)) {
            set_term(&mut terms, term.clone());
        }
        Self {
            id: self.id.clone(),
            terms,
        }
    }

    /// Index (1-based) of the first row requested
    pub fn first(&self) -> Option<i64> {
        self.get(FIRST).and_then(FilterValue::as_int)
    }

    /// Rows per page; `-1` requests all rows
    pub fn rows(&self) -> Option<i64> {
        self.get(ROWS).and_then(FilterValue::as_int)
    }

    pub fn min_qod(&self) -> Option<i64> {
        self.get(MIN_QOD).and_then(FilterValue::as_int)
    }

    /// Severity levels string such as `hml`
    pub fn levels(&self) -> Option<&str> {
        self.get(LEVELS).and_then(FilterValue::as_str)
    }

    /// Raw `apply_overrides` value, normally `0` or `1`
    pub fn apply_overrides(&self) -> Option<&FilterValue> {
        self.get(APPLY_OVERRIDES)
    }

    /// Raw `active` value, normally `0` or `1`
    pub fn active(&self) -> Option<&FilterValue> {
        self.get(ACTIVE)
    }

    fn sort_term(&self) -> Option<&FilterTerm> {
        self.terms
            .iter()
            .find(|t| t.is_keyword(SORT) || t.is_keyword(SORT_REVERSE))
    }

    /// Field the result is sorted by, from `sort` or `sort-reverse`
    pub fn sort_by(&self) -> Option<String> {
        self.sort_term()
            .and_then(FilterTerm::value)
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_term().map(|t| {
            if t.is_keyword(SORT_REVERSE) {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            }
        })
    }

    pub fn sort_reverse(&self) -> bool {
        self.sort_order() == Some(SortOrder::Descending)
    }

    /// Sort by `field`, keeping the current direction (ascending if none)
    pub fn set_sort_by(&self, field: &str) -> Self {
        let order = self.sort_order().unwrap_or_default();
        self.delete(SORT)
            .delete(SORT_REVERSE)
            .set(order.keyword(), field, Relation::Equal)
    }

    /// Change the sort direction of the current sort field. Without a sort
    /// field the filter is returned unchanged.
    pub fn set_sort_order(&self, order: SortOrder) -> Self {
        match self.sort_by() {
            Some(field) => self
                .delete(SORT)
                .delete(SORT_REVERSE)
                .set(order.keyword(), field, Relation::Equal),
            None => self.clone(),
        }
    }

    /// Jump to the first page
    pub fn first_page(&self) -> Self {
        self.set(FIRST, 1_i64, Relation::Equal)
    }

    /// Request every row, starting at the first
    pub fn all(&self) -> Self {
        self.set(FIRST, 1_i64, Relation::Equal)
            .set(ROWS, -1_i64, Relation::Equal)
    }

    /// Advance `first` by one page. Unchanged unless `rows` is positive.
    pub fn next_page(&self) -> Self {
        match self.rows() {
            Some(rows) if rows > 0 => {
                let first = self.first().unwrap_or(1);
                self.set(FIRST, first.saturating_add(rows), Relation::Equal)
            }
            _ => self.clone(),
        }
    }

    /// Go back one page, never before the first row
    pub fn previous_page(&self) -> Self {
        match self.rows() {
            Some(rows) if rows > 0 => {
                let first = self.first().unwrap_or(1);
                self.set(FIRST, first.saturating_sub(rows).max(1), Relation::Equal)
            }
            _ => self.clone(),
        }
    }

    /// A copy without id, paging and sorting
    pub fn simple(&self) -> Self {
        let stripped = self
            .delete(FIRST)
            .delete(ROWS)
            .delete(SORT)
            .delete(SORT_REVERSE);
        Self {
            id: None,
            terms: stripped.terms,
        }
    }

    /// Compare two filters ignoring the order of their extra terms.
    ///
    /// Selecting terms must match in order; paging, sorting and option
    /// terms only need to be present on both sides.
    pub fn is_equivalent(&self, other: &Filter) -> bool {
        if !self.criteria_terms().eq(other.criteria_terms()) {
            return false;
        }
        let mut ours: Vec<String> = self.extra_terms().map(ToString::to_string).collect();
        let mut theirs: Vec<String> = other.extra_terms().map(ToString::to_string).collect();
        ours.sort();
        theirs.sort();
        ours == theirs
    }

    fn criteria_terms(&self) -> impl Iterator<Item = &FilterTerm> {
        self.terms
            .iter()
            .filter(|t| !t.keyword().is_some_and(is_extra_keyword))
    }

    fn extra_terms(&self) -> impl Iterator<Item = &FilterTerm> {
        self.terms
            .iter()
            .filter(|t| t.keyword().is_some_and(is_extra_keyword))
    }
}

fn set_term(terms: &mut Vec<FilterTerm>, term: FilterTerm) {
    if let Some(keyword) = term.keyword() {
        terms.retain(|t| !t.is_keyword(keyword));
    }
    terms.push(term);
}

fn join_terms<'a>(terms: impl Iterator<Item = &'a FilterTerm>) -> String {
    terms
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a string by whitespace while preserving quoted segments
fn split_preserving_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if i > start {
                    parts.push(&s[start..i]);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if start < s.len() {
        parts.push(&s[start..]);
    }

    parts
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filter_string())
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Filter::from_string(s))
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::from_string(value)
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = &'a FilterTerm;
    type IntoIter = std::slice::Iter<'a, FilterTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_filter_string())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Filter::from_string(&text))
    }
}
