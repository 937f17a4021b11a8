//! Command catalogue loading.
//!
//! The catalogue is static configuration: a TOML file listing the commands,
//! the named parameter lists that commands draw values from, and optional
//! seed values for dynamic keywords.
//!
//! ```toml
//! [[commands]]
//! id = "infra:start"
//! label = "Start Infrastructure Service"
//! category = "Infrastructure"
//! keywords = ["docker", "compose"]
//!
//! [[params.services.options]]
//! id = "postgres"
//! label = "PostgreSQL"
//! description = "Primary database"
//!
//! [dynamic]
//! "infra:logs" = ["redis", "kafka"]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use intent_rank_core::models::{Command, ParamOption};
use intent_rank_core::params::ParamSearcher;
use intent_rank_core::search::CommandSearch;

/// Parsed catalogue file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub params: BTreeMap<String, ParamList>,
    /// Command id → dynamic keywords applied at startup.
    #[serde(default)]
    pub dynamic: BTreeMap<String, Vec<String>>,
}

/// One named parameter list, written as `[[params.<name>.options]]`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ParamList {
    #[serde(default)]
    pub options: Vec<ParamOption>,
}

/// The loaded, indexed catalogue.
pub struct Palette {
    pub commands: CommandSearch,
    pub params: BTreeMap<String, ParamSearcher>,
}

impl Catalog {
    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: Catalog =
            toml::from_str(content).with_context(|| "Failed to parse catalogue")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject catalogues that would break the one-entry-per-id mapping.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for cmd in &self.commands {
            if cmd.id.trim().is_empty() {
                bail!("command with label '{}' has an empty id", cmd.label);
            }
            if cmd.label.trim().is_empty() {
                bail!("command '{}' has an empty label", cmd.id);
            }
            if !seen.insert(cmd.id.as_str()) {
                bail!("duplicate command id: '{}'", cmd.id);
            }
        }

        for (name, list) in &self.params {
            let mut seen = HashSet::new();
            for opt in &list.options {
                if !seen.insert(opt.id.as_str()) {
                    bail!("duplicate option id '{}' in params.{}", opt.id, name);
                }
            }
        }

        Ok(())
    }

    /// Index the commands and parameter lists, then apply dynamic-keyword seeds.
    pub fn into_palette(self) -> Palette {
        let commands = CommandSearch::new(self.commands);
        for (id, keywords) in &self.dynamic {
            if !commands.set_dynamic_keywords(id, keywords) {
                tracing::warn!(id = %id, "dynamic keywords seeded for unknown command");
            }
        }

        let params: BTreeMap<String, ParamSearcher> = self
            .params
            .into_iter()
            .map(|(name, list)| (name, ParamSearcher::new(list.options)))
            .collect();

        tracing::info!(
            commands = commands.len(),
            param_lists = params.len(),
            "catalogue indexed"
        );

        Palette { commands, params }
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalogue file: {}", path.display()))?;
    Catalog::from_toml(&content).with_context(|| format!("Invalid catalogue: {}", path.display()))
}
