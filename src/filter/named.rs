use super::error::FilterError;
use super::model::Filter;
use serde::{Deserialize, Serialize};

/// A filter saved on the server under a name, scoped to one resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Resource type the filter applies to, e.g. `task` or `result`
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Stored filter string
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NamedFilter {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>, filter: &Filter) -> Self {
        Self {
            id: filter.id().map(str::to_string),
            name: name.into(),
            resource_type: resource_type.into().to_lowercase(),
            term: filter.to_filter_string(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<impl Into<String>>) -> Self {
        self.comment = comment.map(|c| c.into());
        self
    }

    /// Parse the stored term back into a filter carrying this id
    pub fn filter(&self) -> Filter {
        Filter::from_string(&self.term).with_id(self.id.clone())
    }

    pub fn applies_to(&self, resource_type: &str) -> bool {
        self.resource_type == resource_type.to_lowercase()
    }

    pub fn from_json(text: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
