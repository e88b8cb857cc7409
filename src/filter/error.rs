use thiserror::Error;

/// Errors raised by the few fallible filter operations.
///
/// Parsing a filter string never fails; these cover the typed surfaces
/// built around it.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Unknown relation: '{0}'. Valid relations are: = : ~ > <")]
    UnknownRelation(String),

    #[error("Unknown sort order: '{0}'. Valid values are: sort, sort-reverse")]
    UnknownSortOrder(String),

    #[error("Invalid named filter: {0}")]
    InvalidNamedFilter(#[from] serde_json::Error),
}
