//! Ranking engine over a fixed command catalogue.
//!
//! [`CommandSearch`] owns the catalogue and its index. Each query is
//! tokenized, every command is scored token by token, and the summed score
//! is damped by how many of the tokens actually matched.
//!
//! # Ranking Algorithm
//!
//! 1. Tokenize: normalize, split, drop stop words.
//! 2. No tokens left: return the whole catalogue in catalogue order.
//! 3. For each command, sum the best token scores and count the tokens
//!    that scored above zero (`matched`).
//! 4. Multiply the sum by `0.3 + 0.7 × matched / tokens`.
//! 5. Drop commands whose final score is not positive.
//! 6. Sort by score (desc), then catalogue position (asc).

use serde::Serialize;

use crate::index::{build_index, IndexEntry};
use crate::models::Command;
use crate::score::{best_match, TokenMatch};
use crate::text::tokenize;

/// Floor of the coverage multiplier for a command matching any token.
pub const COVERAGE_FLOOR: f64 = 0.3;

/// `0.3 + 0.7 × matched / total`; 0.0 when `total` is 0.
pub fn coverage_multiplier(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    COVERAGE_FLOOR + (1.0 - COVERAGE_FLOOR) * (matched as f64 / total as f64)
}

/// A command with its final score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCommand<'a> {
    pub command: &'a Command,
    /// Coverage-adjusted score. Empty queries rank every command at 0.0.
    pub score: f64,
    /// Query tokens that scored above zero.
    pub matched: usize,
    /// Position in the catalogue.
    #[serde(skip)]
    pub position: usize,
    /// Per-token winning matcher, aligned with the query tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<Vec<TokenExplanation>>,
}

/// How one query token scored against one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenExplanation {
    pub token: String,
    #[serde(flatten)]
    pub matched: Option<TokenMatch>,
}

/// Searchable command catalogue.
#[derive(Debug)]
pub struct CommandSearch {
    commands: Vec<Command>,
    entries: Vec<IndexEntry>,
}

impl CommandSearch {
    /// Index `commands`. Catalogue order is preserved and used for ties.
    pub fn new(commands: Vec<Command>) -> Self {
        let entries = build_index(&commands);
        Self { commands, entries }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Commands relevant to `query`, best first.
    pub fn search(&self, query: &str) -> Vec<&Command> {
        self.rank_inner(query, false)
            .into_iter()
            .map(|r| r.command)
            .collect()
    }

    /// Like [`search`](Self::search); `None` behaves as an empty query.
    pub fn search_opt(&self, query: Option<&str>) -> Vec<&Command> {
        self.search(query.unwrap_or_default())
    }

    /// Ranked commands with scores.
    pub fn rank(&self, query: &str) -> Vec<RankedCommand<'_>> {
        self.rank_inner(query, false)
    }

    /// Ranked commands with a per-token breakdown of the winning matchers.
    pub fn explain(&self, query: &str) -> Vec<RankedCommand<'_>> {
        self.rank_inner(query, true)
    }

    fn rank_inner(&self, query: &str, explain: bool) -> Vec<RankedCommand<'_>> {
        let tokens = tokenize(query);

        if tokens.is_empty() {
            return self
                .commands
                .iter()
                .enumerate()
                .map(|(position, command)| RankedCommand {
                    command,
                    score: 0.0,
                    matched: 0,
                    position,
                    explain: None,
                })
                .collect();
        }

        let mut results: Vec<RankedCommand<'_>> = self
            .commands
            .iter()
            .zip(&self.entries)
            .enumerate()
            .filter_map(|(position, (command, entry))| {
                let matches: Vec<Option<TokenMatch>> =
                    tokens.iter().map(|t| best_match(t, entry)).collect();
                let raw: u32 = matches.iter().flatten().map(|m| m.score).sum();
                let matched = matches.iter().flatten().count();
                let score = f64::from(raw) * coverage_multiplier(matched, tokens.len());
                if score <= 0.0 {
                    return None;
                }
                let explain = explain.then(|| {
                    tokens
                        .iter()
                        .zip(matches)
                        .map(|(token, matched)| TokenExplanation {
                            token: token.clone(),
                            matched,
                        })
                        .collect()
                });
                Some(RankedCommand {
                    command,
                    score,
                    matched,
                    position,
                    explain,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });

        tracing::trace!(
            query,
            tokens = tokens.len(),
            results = results.len(),
            "ranked commands"
        );

        results
    }

    /// Replace the dynamic keywords of command `id`.
    ///
    /// Returns `false` (and changes nothing) when no command has that id.
    pub fn set_dynamic_keywords<S: AsRef<str>>(&self, id: &str, keywords: &[S]) -> bool {
        match self.entries.iter().find(|e| e.id == id) {
            Some(entry) => {
                entry.set_dynamic_keywords(keywords);
                tracing::debug!(id, count = keywords.len(), "set dynamic keywords");
                true
            }
            None => {
                tracing::debug!(id, "dynamic keywords for unknown command ignored");
                false
            }
        }
    }

    /// Clear dynamic keywords on every command.
    pub fn clear_dynamic_keywords(&self) {
        for entry in &self.entries {
            entry.clear_dynamic_keywords();
        }
        tracing::debug!("cleared dynamic keywords");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MatchKind;

    fn catalogue() -> CommandSearch {
        CommandSearch::new(vec![
            Command::new("infra:start", "Start Infrastructure Service", "Infrastructure")
                .with_keywords(["docker", "compose"]),
            Command::new("project:test", "Run Tests", "Project"),
        ])
    }

    fn ids(cmds: &[&Command]) -> Vec<String> {
        cmds.iter().map(|c| c.id.clone()).collect()
    }

    fn score_of(engine: &CommandSearch, query: &str, id: &str) -> Option<f64> {
        engine
            .rank(query)
            .into_iter()
            .find(|r| r.command.id == id)
            .map(|r| r.score)
    }

    #[test]
    fn test_coverage_multiplier() {
        assert!((coverage_multiplier(0, 3) - 0.3).abs() < 1e-9);
        assert!((coverage_multiplier(3, 3) - 1.0).abs() < 1e-9);
        assert!((coverage_multiplier(1, 2) - 0.65).abs() < 1e-9);
        assert_eq!(coverage_multiplier(0, 0), 0.0);
    }

    #[test]
    fn test_empty_queries_return_catalogue_in_order() {
        let engine = catalogue();
        for q in ["", "   ", "the a to", "!!!"] {
            assert_eq!(ids(&engine.search(q)), vec!["infra:start", "project:test"], "{q:?}");
        }
        assert_eq!(engine.search_opt(None).len(), 2);
    }

    #[test]
    fn test_exact_keyword_only_matches_one() {
        let engine = catalogue();
        assert_eq!(ids(&engine.search("docker")), vec!["infra:start"]);
        assert_eq!(score_of(&engine, "docker", "infra:start"), Some(90.0));
    }

    #[test]
    fn test_ambiguous_verb_matches_both() {
        let engine = catalogue();
        let mut got = ids(&engine.search("run"));
        got.sort();
        assert_eq!(got, vec!["infra:start", "project:test"]);
    }

    #[test]
    fn test_id_segment_query() {
        let engine = catalogue();
        assert_eq!(ids(&engine.search("infra")), vec!["infra:start"]);
    }

    #[test]
    fn test_synonym_without_literal_text() {
        let engine = CommandSearch::new(vec![Command::new(
            "infra:start",
            "Start Infrastructure Service",
            "Infrastructure",
        )]);
        let score = score_of(&engine, "run", "infra:start").unwrap();
        assert!(score >= 80.0);
    }

    #[test]
    fn test_partial_coverage_is_damped() {
        let engine = catalogue();
        // "docker" hits infra:start at 90, "zzz" hits nothing.
        let score = score_of(&engine, "docker zzz", "infra:start").unwrap();
        assert!((score - 90.0 * 0.65).abs() < 1e-9);
        assert!(score_of(&engine, "docker zzz", "project:test").is_none());
    }

    #[test]
    fn test_full_coverage_beats_single_strong_token() {
        let engine = CommandSearch::new(vec![
            Command::new("a:one", "Start Everything", "Misc"),
            Command::new("b:two", "Starter Backends", "Misc"),
        ]);
        // a:one: 100 × 0.65 = 65; b:two: (60 + 60) × 1.0 = 120.
        let ranked = engine.search("start backend");
        assert_eq!(ids(&ranked), vec!["b:two", "a:one"]);
    }

    #[test]
    fn test_ties_keep_catalogue_order() {
        let engine = CommandSearch::new(vec![
            Command::new("x:one", "Deploy Thing", "Misc"),
            Command::new("x:two", "Deploy Other", "Misc"),
            Command::new("x:three", "Deploy More", "Misc"),
        ]);
        assert_eq!(
            ids(&engine.search("deploy")),
            vec!["x:one", "x:two", "x:three"]
        );
    }

    #[test]
    fn test_dynamic_keyword_round_trip() {
        let engine = catalogue();
        assert!(engine.search("redis").is_empty());

        assert!(engine.set_dynamic_keywords("infra:start", &["redis"]));
        assert_eq!(ids(&engine.search("redis")), vec!["infra:start"]);
        assert_eq!(score_of(&engine, "redis", "infra:start"), Some(90.0));

        engine.clear_dynamic_keywords();
        assert!(engine.search("redis").is_empty());
    }

    #[test]
    fn test_dynamic_keywords_unknown_id_is_noop() {
        let engine = catalogue();
        assert!(!engine.set_dynamic_keywords("nope:missing", &["redis"]));
        assert!(engine.search("redis").is_empty());
    }

    #[test]
    fn test_explain_reports_winning_matchers() {
        let engine = catalogue();
        let ranked = engine.explain("docker zzz");
        let top = &ranked[0];
        let explain = top.explain.as_ref().unwrap();
        assert_eq!(explain.len(), 2);
        assert_eq!(explain[0].token, "docker");
        assert_eq!(explain[0].matched.map(|m| m.kind), Some(MatchKind::Keyword));
        assert_eq!(explain[1].matched, None);
        assert_eq!(top.matched, 1);
    }

    #[test]
    fn test_rank_without_explain() {
        let engine = catalogue();
        assert!(engine.rank("docker").iter().all(|r| r.explain.is_none()));
    }

    #[test]
    fn test_get_and_len() {
        let engine = catalogue();
        assert_eq!(engine.len(), 2);
        assert!(!engine.is_empty());
        assert_eq!(engine.get("project:test").unwrap().label, "Run Tests");
        assert!(engine.get("missing").is_none());
        assert_eq!(engine.entries().len(), engine.commands().len());
    }

    #[test]
    fn test_empty_catalogue() {
        let engine = CommandSearch::new(Vec::new());
        assert!(engine.is_empty());
        assert!(engine.search("anything").is_empty());
        assert!(engine.search("").is_empty());
    }
}
