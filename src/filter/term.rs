use super::convert::convert;
use super::error::FilterError;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*""#).expect("valid quoted segment regex"));

/// Stand-in for quoted segments while a relation is selected. Must not
/// contain any relation character.
const QUOTE_PLACEHOLDER: &str = "__quoted__";

/// Operator between a keyword and its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `=` exact match
    Equal,
    /// `:` contains
    Colon,
    /// `~` contains, also used for free-text relations
    Tilde,
    /// `>` greater than
    Greater,
    /// `<` less than
    Less,
}

impl Relation {
    /// Every relation, in the order the wire grammar lists them. When a
    /// term contains several, the leftmost one wins.
    pub const ALL: [Relation; 5] = [
        Relation::Equal,
        Relation::Colon,
        Relation::Tilde,
        Relation::Greater,
        Relation::Less,
    ];

    pub fn as_char(self) -> char {
        match self {
            Relation::Equal => '=',
            Relation::Colon => ':',
            Relation::Tilde => '~',
            Relation::Greater => '>',
            Relation::Less => '<',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|rel| rel.as_char() == c)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Relation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Relation::from_char(c).ok_or_else(|| FilterError::UnknownRelation(s.to_string()))
            }
            _ => Err(FilterError::UnknownRelation(s.to_string())),
        }
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Value carried by a term after conversion.
///
/// Equality is strict: `Int(10)` and `Str("10")` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Int(i64),
    Str(String),
    /// Text that was wrapped in double quotes; stored without them.
    Quoted(String),
}

impl FilterValue {
    /// Build a value from raw wire text, recognizing a fully quoted value.
    pub fn from_raw(raw: &str) -> Self {
        match raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) if raw.len() >= 2 => FilterValue::Quoted(inner.to_string()),
            _ => FilterValue::Str(raw.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FilterValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The textual content of a string value, without surrounding quotes
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::Str(s) | FilterValue::Quoted(s) => Some(s),
            FilterValue::Int(_) => None,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, FilterValue::Quoted(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::Int(_) => "int",
            FilterValue::Str(_) => "string",
            FilterValue::Quoted(_) => "quoted",
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(n) => write!(f, "{n}"),
            FilterValue::Str(s) => f.write_str(s),
            FilterValue::Quoted(s) => write!(f, "\"{s}\""),
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Int(n) => serializer.serialize_i64(*n),
            FilterValue::Str(s) | FilterValue::Quoted(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Str(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Str(value)
    }
}

/// A single `keyword<relation>value` clause of a filter, or a degenerate
/// form of it (bare value, keyword only).
///
/// Terms are immutable once built; every transformation creates a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterTerm {
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relation: Option<Relation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<FilterValue>,
}

impl FilterTerm {
    /// Create a term. The keyword is lower-cased; an empty keyword counts as
    /// absent.
    pub fn new(
        keyword: Option<&str>,
        value: Option<FilterValue>,
        relation: Option<Relation>,
    ) -> Self {
        Self {
            keyword: keyword
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase()),
            value,
            relation,
        }
    }

    /// A value-only term, as used for free-text search tokens
    pub fn value_only(value: impl Into<FilterValue>) -> Self {
        Self::new(None, Some(value.into()), None)
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    pub fn has_keyword(&self) -> bool {
        self.keyword.is_some()
    }

    pub fn has_relation(&self) -> bool {
        self.relation.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Whether this term belongs to `keyword` (compared case-insensitively)
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.keyword
            .as_deref()
            .is_some_and(|k| k == keyword.to_lowercase())
    }

    /// Parse one term from its wire form. Never fails: anything without a
    /// relation becomes a bare value.
    pub fn from_string(text: &str) -> Self {
        let masked = QUOTED_RE.replace_all(text, QUOTE_PLACEHOLDER);

        // The leftmost relation outside quotes is selected. The split itself
        // happens on the original text at the first occurrence of that
        // character.
        let selected = Relation::ALL
            .into_iter()
            .filter_map(|relation| masked.find(relation.as_char()).map(|pos| (pos, relation)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, relation)| relation);

        let split = selected.and_then(|relation| {
            text.find(relation.as_char())
                .map(|index| (relation, &text[..index], &text[index + 1..]))
        });

        let converted = match split {
            Some((relation, key, value)) => convert(
                Some(key),
                Some(FilterValue::from_raw(value)),
                Some(relation),
            ),
            None => convert(None, Some(FilterValue::from_raw(text)), None),
        };

        converted.into()
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = &self.keyword {
            f.write_str(keyword)?;
        }
        if let Some(relation) = self.relation {
            write!(f, "{relation}")?;
        }
        if let Some(value) = &self.value {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl FromStr for FilterTerm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterTerm::from_string(s))
    }
}

/// Connective joining two filters with AND
pub static AND: LazyLock<FilterTerm> = LazyLock::new(|| FilterTerm::from_string("and"));
/// Connective joining two filters with OR
pub static OR: LazyLock<FilterTerm> = LazyLock::new(|| FilterTerm::from_string("or"));
/// Negation connective
pub static NOT: LazyLock<FilterTerm> = LazyLock::new(|| FilterTerm::from_string("not"));
