//! Term conversion
//!
//! Raw `(keyword, value, relation)` triples produced while parsing are
//! normalized here before a [`FilterTerm`] is built. Only the keywords and
//! values listed in the tables below are touched; everything else passes
//! through unchanged.

use super::keywords;
use super::term::{FilterTerm, FilterValue, Relation};

/// How the value of a reserved keyword is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordRule {
    /// Integer prefix greater than zero becomes 1, anything else numeric 0
    Boolean,
    /// Integer prefix, parsed like JavaScript `parseInt`
    Integer,
    /// Whole value must be a canonical integer, otherwise it stays text
    Severity,
}

fn keyword_rule(keyword: &str) -> Option<KeywordRule> {
    match keyword.to_lowercase().as_str() {
        keywords::APPLY_OVERRIDES
        | keywords::NOTES
        | keywords::OVERRIDES
        | keywords::RESULT_HOSTS_ONLY => Some(KeywordRule::Boolean),
        keywords::FIRST | keywords::ROWS | keywords::MIN_QOD => Some(KeywordRule::Integer),
        keywords::SEVERITY => Some(KeywordRule::Severity),
        _ => None,
    }
}

/// Bare words that stand on their own: connectives and regex markers.
fn reserved_value(value: &str) -> Option<&'static str> {
    match value.to_lowercase().as_str() {
        "and" => Some("and"),
        "or" => Some("or"),
        "not" => Some("not"),
        "re" => Some("re"),
        "regexp" => Some("regexp"),
        _ => None,
    }
}

/// Result of [`convert`], ready to become a [`FilterTerm`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedTerm {
    pub keyword: Option<String>,
    pub value: Option<FilterValue>,
    pub relation: Option<Relation>,
}

impl From<ConvertedTerm> for FilterTerm {
    fn from(converted: ConvertedTerm) -> Self {
        FilterTerm::new(
            converted.keyword.as_deref(),
            converted.value,
            converted.relation,
        )
    }
}

/// Normalize a raw term. Total and side-effect free: values that do not
/// parse under their keyword's rule are kept as they were.
pub fn convert(
    keyword: Option<&str>,
    value: Option<FilterValue>,
    relation: Option<Relation>,
) -> ConvertedTerm {
    let keyword = keyword.filter(|k| !k.is_empty());

    match keyword {
        Some(key) => {
            let value = match keyword_rule(key) {
                Some(rule) => value.map(|v| coerce(rule, v)),
                None => value,
            };
            ConvertedTerm {
                keyword: Some(key.to_lowercase()),
                value,
                relation,
            }
        }
        None => {
            if let Some(FilterValue::Str(text)) = &value
                && let Some(word) = reserved_value(text)
            {
                return ConvertedTerm {
                    keyword: None,
                    value: Some(FilterValue::Str(word.to_string())),
                    relation: None,
                };
            }
            ConvertedTerm {
                keyword: None,
                value,
                relation,
            }
        }
    }
}

fn coerce(rule: KeywordRule, value: FilterValue) -> FilterValue {
    if rule == KeywordRule::Severity {
        let parsed = match &value {
            FilterValue::Str(text) => parse_int_exact(text),
            _ => None,
        };
        return parsed.map_or(value, FilterValue::Int);
    }

    let parsed = match &value {
        FilterValue::Int(n) => Some(*n),
        FilterValue::Str(text) | FilterValue::Quoted(text) => parse_int_prefix(text),
    };

    match (rule, parsed) {
        (KeywordRule::Integer, Some(n)) => FilterValue::Int(n),
        (KeywordRule::Boolean, Some(n)) => FilterValue::Int(i64::from(n > 0)),
        _ => value,
    }
}

/// Parse a leading integer the way `parseInt(text, 10)` does: optional
/// leading whitespace and sign, then digits up to the first non-digit.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}

/// Parse an integer that prints back to exactly `text`, so `+3`, `03` and
/// `5.5` are rejected.
fn parse_int_exact(text: &str) -> Option<i64> {
    text.parse::<i64>().ok().filter(|n| n.to_string() == text)
}
