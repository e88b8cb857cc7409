//! Filter expression parsing and serialization
//!
//! A filter is a whitespace separated list of terms that the management
//! protocol receives as its `filter` parameter. Each term is written as
//! `keyword`, `relation` and `value` with nothing in between.
//!
//! # Syntax
//!
//! ```text
//! keyword=value        Exact match
//! keyword:value        Contains (older syntax)
//! keyword~value        Contains
//! keyword>value        Greater than
//! keyword<value        Less than
//! value                Free-text search
//! and / or / not       Connectives
//! name="two words"     Quoted values may contain spaces and relations
//! ```
//!
//! # Extra keywords
//!
//! `first`, `rows`, `sort`, `sort-reverse`, `levels`, `min_qod`,
//! `apply_overrides` and a few more control paging, ordering and result
//! options instead of selecting entities.
//!
//! # Examples
//!
//! ```text
//! name~web rows=10 first=1                     First ten entities matching "web"
//! severity>3 and severity<8 sort-reverse=severity
//! apply_overrides=0 levels=hml rows=100 min_qod=70 first=1 sort-reverse=severity
//! ```

pub mod convert;
pub mod error;
pub mod keywords;
pub mod model;
pub mod named;
pub mod term;

pub use convert::{ConvertedTerm, convert};
pub use error::FilterError;
pub use keywords::{SortOrder, is_extra_keyword};
pub use model::Filter;
pub use named::NamedFilter;
pub use term::{AND, FilterTerm, FilterValue, NOT, OR, Relation};
