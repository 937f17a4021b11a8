//! Token scoring: one query token against one [`IndexEntry`].
//!
//! A token is tested against twelve matchers, from the strongest signal
//! (an exact label word) down to the weakest (a character subsequence). The
//! token's score is the highest-valued matcher that fires, or 0.
//!
//! | Matcher | Score |
//! |---------|-------|
//! | exact label word | 100 |
//! | exact keyword (static or dynamic) | 90 |
//! | exact alias word | 85 |
//! | verb synonym | 80 |
//! | target synonym | 80 |
//! | exact category word | 70 |
//! | id segment | 65 |
//! | label word prefix | 60 |
//! | keyword prefix (static or dynamic) | 55 |
//! | acronym prefix (token ≥ 2 chars) | 50 |
//! | substring of label/keyword text (token ≥ 2 chars) | 35 |
//! | subsequence of a longer word (token ≥ 2 chars) | 30 |
//!
//! Matchers are evaluated in table order. Scores never increase down the
//! table, so the first matcher that fires is the maximum and the remaining
//! ones are skipped.

use serde::Serialize;

use crate::index::{DynamicKeywords, IndexEntry};
use crate::synonyms::{self, ReverseMap};
use crate::text::is_subsequence;

/// Minimum token length (in chars) for the acronym, substring, and subsequence matchers.
pub const MIN_FUZZY_LEN: usize = 2;

/// Which matcher produced a token's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    LabelWord,
    Keyword,
    AliasWord,
    VerbSynonym,
    TargetSynonym,
    CategoryWord,
    IdSegment,
    LabelPrefix,
    KeywordPrefix,
    Acronym,
    Contains,
    Subsequence,
}

impl MatchKind {
    /// All matchers in evaluation order.
    pub const ALL: [MatchKind; 12] = [
        MatchKind::LabelWord,
        MatchKind::Keyword,
        MatchKind::AliasWord,
        MatchKind::VerbSynonym,
        MatchKind::TargetSynonym,
        MatchKind::CategoryWord,
        MatchKind::IdSegment,
        MatchKind::LabelPrefix,
        MatchKind::KeywordPrefix,
        MatchKind::Acronym,
        MatchKind::Contains,
        MatchKind::Subsequence,
    ];

    pub fn score(self) -> u32 {
        match self {
            MatchKind::LabelWord => 100,
            MatchKind::Keyword => 90,
            MatchKind::AliasWord => 85,
            MatchKind::VerbSynonym | MatchKind::TargetSynonym => 80,
            MatchKind::CategoryWord => 70,
            MatchKind::IdSegment => 65,
            MatchKind::LabelPrefix => 60,
            MatchKind::KeywordPrefix => 55,
            MatchKind::Acronym => 50,
            MatchKind::Contains => 35,
            MatchKind::Subsequence => 30,
        }
    }
}

/// The winning matcher for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenMatch {
    pub kind: MatchKind,
    pub score: u32,
}

impl From<MatchKind> for TokenMatch {
    fn from(kind: MatchKind) -> Self {
        Self {
            kind,
            score: kind.score(),
        }
    }
}

/// Best match of `token` against `entry`, using the shared synonym maps.
///
/// `token` must already be normalized (see [`crate::text::tokenize`]).
pub fn best_match(token: &str, entry: &IndexEntry) -> Option<TokenMatch> {
    best_match_with(token, entry, synonyms::verbs(), synonyms::targets())
}

/// Score of `token` against `entry`; 0 if no matcher fires.
pub fn score_token(token: &str, entry: &IndexEntry) -> u32 {
    best_match(token, entry).map_or(0, |m| m.score)
}

/// [`best_match`] against explicit synonym maps.
pub fn best_match_with(
    token: &str,
    entry: &IndexEntry,
    verb_map: &ReverseMap,
    target_map: &ReverseMap,
) -> Option<TokenMatch> {
    if token.is_empty() {
        return None;
    }
    let dynamic = entry.dynamic_snapshot();
    let ctx = MatchContext {
        token,
        token_len: token.chars().count(),
        entry,
        dynamic: &dynamic,
        verb_map,
        target_map,
    };
    MatchKind::ALL
        .into_iter()
        .find(|&kind| ctx.fires(kind))
        .map(TokenMatch::from)
}

struct MatchContext<'a> {
    token: &'a str,
    token_len: usize,
    entry: &'a IndexEntry,
    dynamic: &'a DynamicKeywords,
    verb_map: &'a ReverseMap,
    target_map: &'a ReverseMap,
}

impl MatchContext<'_> {
    fn fires(&self, kind: MatchKind) -> bool {
        let t = self.token;
        let e = self.entry;
        match kind {
            MatchKind::LabelWord => contains_word(&e.label_words, t),
            MatchKind::Keyword => {
                contains_word(&e.keywords, t) || contains_word(&self.dynamic.words, t)
            }
            MatchKind::AliasWord => contains_word(&e.alias_words, t),
            MatchKind::VerbSynonym => self
                .verb_map
                .lookup(t)
                .is_some_and(|canon| canon.iter().any(|c| e.verbs.contains(c))),
            MatchKind::TargetSynonym => self
                .target_map
                .lookup(t)
                .is_some_and(|canon| canon.iter().any(|c| e.targets.contains(c))),
            MatchKind::CategoryWord => contains_word(&e.category_words, t),
            MatchKind::IdSegment => contains_word(&e.id_segments, t),
            MatchKind::LabelPrefix => e.label_words.iter().any(|w| w.starts_with(t)),
            MatchKind::KeywordPrefix => e
                .keywords
                .iter()
                .chain(&self.dynamic.words)
                .any(|w| w.starts_with(t)),
            MatchKind::Acronym => self.token_len >= MIN_FUZZY_LEN && e.acronym.starts_with(t),
            MatchKind::Contains => {
                self.token_len >= MIN_FUZZY_LEN
                    && (e.label_text.contains(t)
                        || e.keyword_text.contains(t)
                        || self.dynamic.text.contains(t))
            }
            MatchKind::Subsequence => {
                self.token_len >= MIN_FUZZY_LEN
                    && e.label_words
                        .iter()
                        .chain(&e.keywords)
                        .chain(&e.alias_words)
                        .chain(&self.dynamic.words)
                        .any(|w| self.token_len < w.chars().count() && is_subsequence(t, w))
            }
        }
    }
}

fn contains_word(words: &[String], token: &str) -> bool {
    words.iter().any(|w| w == token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Command;

    fn infra_start() -> IndexEntry {
        IndexEntry::build(
            &Command::new("infra:start", "Start Infrastructure Service", "Infrastructure")
                .with_keywords(["docker", "compose"])
                .with_aliases(["bring up stack"]),
        )
    }

    fn kind(token: &str, entry: &IndexEntry) -> Option<MatchKind> {
        best_match(token, entry).map(|m| m.kind)
    }

    #[test]
    fn test_scores_never_increase_in_evaluation_order() {
        for pair in MatchKind::ALL.windows(2) {
            assert!(pair[0].score() >= pair[1].score(), "{:?}", pair);
        }
    }

    #[test]
    fn test_exact_label_word() {
        let e = infra_start();
        assert_eq!(score_token("start", &e), 100);
        assert_eq!(kind("service", &e), Some(MatchKind::LabelWord));
    }

    #[test]
    fn test_exact_keyword() {
        let e = infra_start();
        assert_eq!(score_token("docker", &e), 90);
    }

    #[test]
    fn test_exact_dynamic_keyword() {
        let e = infra_start();
        assert_eq!(score_token("redis", &e), 0);
        e.set_dynamic_keywords(&["redis"]);
        assert_eq!(kind("redis", &e), Some(MatchKind::Keyword));
        assert_eq!(score_token("redis", &e), 90);
    }

    #[test]
    fn test_exact_alias_word() {
        let e = infra_start();
        assert_eq!(kind("bring", &e), Some(MatchKind::AliasWord));
        assert_eq!(score_token("bring", &e), 85);
    }

    #[test]
    fn test_verb_synonym() {
        let e = infra_start();
        assert_eq!(kind("launch", &e), Some(MatchKind::VerbSynonym));
        assert_eq!(score_token("run", &e), 80);
    }

    #[test]
    fn test_target_synonym() {
        let e = infra_start();
        assert_eq!(kind("containers", &e), Some(MatchKind::TargetSynonym));
        assert_eq!(score_token("containers", &e), 80);
    }

    #[test]
    fn test_category_word() {
        let e = IndexEntry::build(&Command::new("misc:thing", "Do Thing", "Utilities"));
        assert_eq!(kind("utilities", &e), Some(MatchKind::CategoryWord));
        assert_eq!(score_token("utilities", &e), 70);
    }

    #[test]
    fn test_id_segment() {
        let e = IndexEntry::build(&Command::new("misc:thing", "Do Thing", "Utilities"));
        assert_eq!(kind("misc", &e), Some(MatchKind::IdSegment));
        assert_eq!(score_token("misc", &e), 65);
    }

    #[test]
    fn test_label_prefix() {
        let e = infra_start();
        assert_eq!(kind("serv", &e), Some(MatchKind::LabelPrefix));
        assert_eq!(score_token("s", &e), 60);
    }

    #[test]
    fn test_keyword_prefix() {
        let e = infra_start();
        assert_eq!(kind("dock", &e), Some(MatchKind::KeywordPrefix));
        e.set_dynamic_keywords(&["grafana"]);
        assert_eq!(kind("graf", &e), Some(MatchKind::KeywordPrefix));
        assert_eq!(score_token("graf", &e), 55);
    }

    #[test]
    fn test_acronym() {
        let e = IndexEntry::build(&Command::new("x:y", "Open Browser Window", "View"));
        assert_eq!(kind("obw", &e), Some(MatchKind::Acronym));
        assert_eq!(score_token("ob", &e), 50);
    }

    #[test]
    fn test_single_char_never_acronym() {
        let e = IndexEntry::build(&Command::new("x:y", "Open Browser Window", "View"));
        // "o" is a label prefix, but never reaches the acronym tier.
        assert_eq!(kind("o", &e), Some(MatchKind::LabelPrefix));
        assert_eq!(score_token("q", &e), 0);
    }

    #[test]
    fn test_contains() {
        let e = IndexEntry::build(&Command::new("x:y", "Open Browser Window", "View"));
        assert_eq!(kind("rowse", &e), Some(MatchKind::Contains));
        assert_eq!(score_token("indo", &e), 35);
    }

    #[test]
    fn test_contains_dynamic_text() {
        let e = IndexEntry::build(&Command::new("x:y", "Open Browser Window", "View"));
        e.set_dynamic_keywords(&["elasticsearch"]);
        assert_eq!(kind("search", &e), Some(MatchKind::Contains));
    }

    #[test]
    fn test_subsequence() {
        let e = IndexEntry::build(&Command::new("x:y", "Open Browser Window", "View"));
        assert_eq!(kind("brwsr", &e), Some(MatchKind::Subsequence));
        assert_eq!(score_token("wndw", &e), 30);
    }

    #[test]
    fn test_subsequence_requires_order() {
        let e = IndexEntry::build(&Command::new("x:y", "Abc", "Zzz"));
        // "cba" is neither a prefix nor in order.
        assert_eq!(score_token("cba", &e), 0);
    }

    #[test]
    fn test_no_match() {
        let e = infra_start();
        assert_eq!(score_token("zzz", &e), 0);
        assert_eq!(best_match("", &e), None);
    }
}
