//! Per-command search index.
//!
//! [`IndexEntry::build`] derives, once per [`Command`], every text feature the
//! scorer needs: normalized words for each field, id segments, the label
//! acronym, the canonical verbs and targets the command resolves to, and
//! pre-joined strings for substring checks.
//!
//! All of that is write-once. The only mutable part is the dynamic-keyword
//! slot, which collaborators fill with live vocabulary (running service
//! names, project names) and clear again when that context goes away.
//!
//! # Concurrency
//!
//! The slot holds an `Arc<DynamicKeywords>` behind a `RwLock`. A writer builds
//! the new value off-lock and swaps the `Arc`; a reader clones the `Arc` and
//! scores against that snapshot. A search therefore never observes a
//! half-written keyword list for any single command.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Command;
use crate::synonyms::{self, ReverseMap};
use crate::text::{split_all, split_words, ID_DELIMITER};

/// Runtime-injected keywords for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicKeywords {
    /// Normalized words.
    pub words: Vec<String>,
    /// `words` joined with single spaces.
    pub text: String,
}

impl DynamicKeywords {
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        let words = split_all(raw);
        let text = words.join(" ");
        Self { words, text }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The single mutable cell of an [`IndexEntry`].
#[derive(Debug, Default)]
struct DynamicSlot(RwLock<Arc<DynamicKeywords>>);

impl DynamicSlot {
    fn snapshot(&self) -> Arc<DynamicKeywords> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, value: DynamicKeywords) {
        let value = Arc::new(value);
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

/// Precomputed searchable metadata for one command.
#[derive(Debug)]
pub struct IndexEntry {
    /// Id of the command this entry was built from.
    pub id: String,
    pub label_words: Vec<String>,
    pub keywords: Vec<String>,
    pub alias_words: Vec<String>,
    pub category_words: Vec<String>,
    pub id_segments: Vec<String>,
    /// First char of each label word, in label order.
    pub acronym: String,
    /// Canonical verbs resolved from all static text.
    pub verbs: BTreeSet<String>,
    /// Canonical targets resolved from all static text.
    pub targets: BTreeSet<String>,
    /// `label_words` joined with spaces.
    pub label_text: String,
    /// `keywords` joined with spaces.
    pub keyword_text: String,
    dynamic: DynamicSlot,
}

impl IndexEntry {
    /// Build an entry using the process-wide synonym maps.
    pub fn build(command: &Command) -> Self {
        Self::build_with(command, synonyms::verbs(), synonyms::targets())
    }

    /// Build an entry against explicit synonym maps.
    pub fn build_with(command: &Command, verb_map: &ReverseMap, target_map: &ReverseMap) -> Self {
        let label_words = split_words(&command.label);
        let keywords = split_all(&command.keywords);
        let alias_words = split_all(&command.aliases);
        let category_words = split_words(&command.category);
        let id_segments: Vec<String> = command
            .id
            .split(ID_DELIMITER)
            .flat_map(split_words)
            .collect();

        let acronym: String = label_words.iter().filter_map(|w| w.chars().next()).collect();

        let all_words: BTreeSet<&str> = label_words
            .iter()
            .chain(&keywords)
            .chain(&alias_words)
            .chain(&category_words)
            .chain(&id_segments)
            .map(String::as_str)
            .collect();

        let mut verbs = BTreeSet::new();
        let mut targets = BTreeSet::new();
        for word in &all_words {
            verb_map.resolve_into(word, &mut verbs);
            target_map.resolve_into(word, &mut targets);
        }

        let label_text = label_words.join(" ");
        let keyword_text = keywords.join(" ");

        Self {
            id: command.id.clone(),
            label_words,
            keywords,
            alias_words,
            category_words,
            id_segments,
            acronym,
            verbs,
            targets,
            label_text,
            keyword_text,
            dynamic: DynamicSlot::default(),
        }
    }

    /// Current dynamic keywords. The returned snapshot is unaffected by later updates.
    pub fn dynamic_snapshot(&self) -> Arc<DynamicKeywords> {
        self.dynamic.snapshot()
    }

    /// Replace the dynamic keywords with the normalized words of `raw`.
    pub fn set_dynamic_keywords<S: AsRef<str>>(&self, raw: &[S]) {
        self.dynamic.replace(DynamicKeywords::from_raw(raw));
    }

    pub fn clear_dynamic_keywords(&self) {
        self.dynamic.replace(DynamicKeywords::default());
    }
}

/// Build one entry per command, in catalogue order.
pub fn build_index(commands: &[Command]) -> Vec<IndexEntry> {
    let entries: Vec<IndexEntry> = commands.iter().map(IndexEntry::build).collect();
    tracing::debug!(commands = entries.len(), "built command index");
    entries
}
