//! Synonym resolution for action verbs and target nouns.
//!
//! Two fixed vocabularies map a canonical term to the surface words people
//! actually type. At first use each vocabulary is inverted into a
//! [`ReverseMap`] (surface word → set of canonical terms). A surface word may
//! resolve to several canonical terms: `run` means both `start` and `test`,
//! and the ranking stage decides which reading fits a given command.
//!
//! The reverse maps are process-wide, built exactly once, and read-only
//! afterwards.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::text::normalize;

/// A vocabulary: `(canonical term, surface synonyms)` pairs.
pub type Dictionary = [(&'static str, &'static [&'static str])];

/// Action verbs.
pub const VERBS: &Dictionary = &[
    (
        "start",
        &["run", "launch", "boot", "up", "begin", "spin", "serve", "enable"],
    ),
    (
        "stop",
        &["halt", "kill", "down", "shutdown", "terminate", "end", "disable"],
    ),
    ("restart", &["reboot", "reload", "bounce", "cycle", "respawn"]),
    ("build", &["compile", "make", "bundle", "package", "assemble"]),
    (
        "test",
        &["run", "tests", "check", "verify", "spec", "specs", "validate"],
    ),
    ("deploy", &["ship", "release", "publish", "push", "rollout"]),
    ("install", &["setup", "add", "bootstrap", "init", "deps"]),
    (
        "clean",
        &["clear", "purge", "reset", "wipe", "prune", "remove", "delete"],
    ),
    ("update", &["upgrade", "pull", "sync", "refresh", "fetch", "bump"]),
    ("logs", &["log", "tail", "output", "follow", "watch"]),
    ("status", &["state", "health", "info", "ps", "list", "show", "inspect"]),
    ("lint", &["format", "fmt", "style", "tidy"]),
];

/// Target nouns.
pub const TARGETS: &Dictionary = &[
    (
        "infrastructure",
        &["infra", "docker", "compose", "container", "containers", "services", "service", "stack"],
    ),
    ("backend", &["server", "api", "service", "cargo"]),
    ("frontend", &["ui", "client", "web", "app", "browser", "assets", "npm"]),
    (
        "project",
        &["repo", "repository", "workspace", "code", "codebase"],
    ),
    (
        "database",
        &["db", "postgres", "postgresql", "mysql", "sql", "migration", "migrations", "schema"],
    ),
    (
        "git",
        &["branch", "branches", "commit", "commits", "submodule", "submodules", "checkout"],
    ),
    (
        "dependencies",
        &["deps", "packages", "modules", "libs", "libraries"],
    ),
];

/// Surface word → set of canonical terms.
#[derive(Debug, Clone, Default)]
pub struct ReverseMap {
    map: HashMap<String, BTreeSet<String>>,
}

impl ReverseMap {
    /// Invert a dictionary. Each canonical term also maps to itself.
    pub fn build(dictionary: &Dictionary) -> Self {
        let mut map: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (canonical, synonyms) in dictionary {
            let canonical = normalize(canonical);
            map.entry(canonical.clone())
                .or_default()
                .insert(canonical.clone());
            for surface in synonyms.iter() {
                map.entry(normalize(surface))
                    .or_default()
                    .insert(canonical.clone());
            }
        }
        Self { map }
    }

    /// Canonical terms for `word`, if any.
    pub fn lookup(&self, word: &str) -> Option<&BTreeSet<String>> {
        self.map.get(word)
    }

    /// Union the canonical terms for `word` into `out`.
    pub fn resolve_into(&self, word: &str, out: &mut BTreeSet<String>) {
        if let Some(canon) = self.map.get(word) {
            out.extend(canon.iter().cloned());
        }
    }

    /// Number of distinct surface words.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

static VERB_MAP: LazyLock<ReverseMap> = LazyLock::new(|| ReverseMap::build(VERBS));
static TARGET_MAP: LazyLock<ReverseMap> = LazyLock::new(|| ReverseMap::build(TARGETS));

/// The shared reverse map for [`VERBS`].
pub fn verbs() -> &'static ReverseMap {
    &VERB_MAP
}

/// The shared reverse map for [`TARGETS`].
pub fn targets() -> &'static ReverseMap {
    &TARGET_MAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_maps_to_itself() {
        let start = verbs().lookup("start").unwrap();
        assert!(start.contains("start"));
        let infra = targets().lookup("infrastructure").unwrap();
        assert!(infra.contains("infrastructure"));
    }

    #[test]
    fn test_run_is_ambiguous() {
        let run = verbs().lookup("run").unwrap();
        assert!(run.contains("start"));
        assert!(run.contains("test"));
        assert_eq!(run.len(), 2);
    }

    #[test]
    fn test_service_resolves_to_two_targets() {
        let service = targets().lookup("service").unwrap();
        assert!(service.contains("infrastructure"));
        assert!(service.contains("backend"));
    }

    #[test]
    fn test_unknown_word() {
        assert!(verbs().lookup("redis").is_none());
        assert!(targets().lookup("redis").is_none());
    }

    #[test]
    fn test_resolve_into_unions() {
        let mut out = BTreeSet::new();
        verbs().resolve_into("run", &mut out);
        verbs().resolve_into("compile", &mut out);
        verbs().resolve_into("nothing", &mut out);
        let got: Vec<&str> = out.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["build", "start", "test"]);
    }

    #[test]
    fn test_custom_dictionary() {
        const DICT: &Dictionary = &[("Open", &["Show", "view"]), ("view", &["look"])];
        let map = ReverseMap::build(DICT);
        assert!(map.lookup("show").unwrap().contains("open"));
        let view = map.lookup("view").unwrap();
        assert!(view.contains("open") && view.contains("view"));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_shared_instance() {
        assert!(std::ptr::eq(verbs(), verbs()));
        assert!(!targets().is_empty());
    }
}
