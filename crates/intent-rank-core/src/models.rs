//! Catalogue records consumed by the engine.
//!
//! These are plain data: the engine never mutates a [`Command`] after it has
//! been handed over. Optional collections default to empty so that partially
//! specified records are accepted rather than rejected.

use serde::{Deserialize, Serialize};

/// A named action a user can invoke from the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Hierarchical id, segments separated by `:` (e.g. `"infra:start"`).
    pub id: String,
    /// Human-readable display string.
    pub label: String,
    /// Grouping string.
    pub category: String,
    /// Extra searchable terms.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Alternate phrasings; each may span several words.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Command {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: category.into(),
            keywords: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// One selectable value for a command parameter (a service, a project, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_optional_fields_default_empty() {
        let cmd: Command = serde_json::from_str(
            r#"{"id": "project:test", "label": "Run Tests", "category": "Project"}"#,
        )
        .unwrap();
        assert!(cmd.keywords.is_empty());
        assert!(cmd.aliases.is_empty());
    }

    #[test]
    fn test_command_requires_id() {
        let res: Result<Command, _> =
            serde_json::from_str(r#"{"label": "Run Tests", "category": "Project"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_param_option_description_skipped_when_absent() {
        let json = serde_json::to_string(&ParamOption::new("p1", "PostgreSQL")).unwrap();
        assert!(!json.contains("description"));
    }
}
