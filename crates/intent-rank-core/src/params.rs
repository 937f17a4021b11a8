//! Lightweight ranking for flat parameter lists.
//!
//! Parameter values (service names, project names, ...) carry no aliases,
//! categories, or synonyms, so they are scored with three tiers only:
//! exact word (100), word prefix (60), and substring (35, tokens of at
//! least two chars). Coverage damping, filtering, and ordering are the same
//! as for commands.
//!
//! # Example
//!
//! ```rust
//! use intent_rank_core::models::ParamOption;
//! use intent_rank_core::params::create_param_searcher;
//!
//! let search = create_param_searcher(vec![
//!     ParamOption::new("p1", "PostgreSQL"),
//!     ParamOption::new("p2", "Redis"),
//! ]);
//! let ids: Vec<String> = search("post").into_iter().map(|p| p.id).collect();
//! assert_eq!(ids, vec!["p1"]);
//! ```

use crate::models::ParamOption;
use crate::score::MIN_FUZZY_LEN;
use crate::search::coverage_multiplier;
use crate::text::{split_words, tokenize};

pub const EXACT_SCORE: u32 = 100;
pub const PREFIX_SCORE: u32 = 60;
pub const SUBSTRING_SCORE: u32 = 35;

struct IndexedOption {
    option: ParamOption,
    words: Vec<String>,
    text: String,
}

/// Ranks one parameter list.
pub struct ParamSearcher {
    options: Vec<IndexedOption>,
}

impl ParamSearcher {
    pub fn new(options: Vec<ParamOption>) -> Self {
        let options = options
            .into_iter()
            .map(|option| {
                let mut words = split_words(&option.label);
                if let Some(desc) = &option.description {
                    words.extend(split_words(desc));
                }
                let text = words.join(" ");
                IndexedOption {
                    option,
                    words,
                    text,
                }
            })
            .collect();
        Self { options }
    }

    pub fn options(&self) -> impl Iterator<Item = &ParamOption> {
        self.options.iter().map(|o| &o.option)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options relevant to `query`, best first. No tokens: all options in order.
    pub fn search(&self, query: &str) -> Vec<&ParamOption> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return self.options().collect();
        }

        let mut scored: Vec<(usize, f64)> = self
            .options
            .iter()
            .enumerate()
            .filter_map(|(position, opt)| {
                let scores: Vec<u32> = tokens.iter().map(|t| score_option(t, opt)).collect();
                let matched = scores.iter().filter(|&&s| s > 0).count();
                let raw: u32 = scores.iter().sum();
                let score = f64::from(raw) * coverage_multiplier(matched, tokens.len());
                (score > 0.0).then_some((position, score))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        scored
            .into_iter()
            .map(|(position, _)| &self.options[position].option)
            .collect()
    }
}

fn score_option(token: &str, opt: &IndexedOption) -> u32 {
    if opt.words.iter().any(|w| w == token) {
        EXACT_SCORE
    } else if opt.words.iter().any(|w| w.starts_with(token)) {
        PREFIX_SCORE
    } else if token.chars().count() >= MIN_FUZZY_LEN && opt.text.contains(token) {
        SUBSTRING_SCORE
    } else {
        0
    }
}

/// Build a search function closed over `options`.
pub fn create_param_searcher(options: Vec<ParamOption>) -> impl Fn(&str) -> Vec<ParamOption> {
    let searcher = ParamSearcher::new(options);
    move |query: &str| searcher.search(query).into_iter().cloned().collect()
}
