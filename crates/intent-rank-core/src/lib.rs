//! # Intent Rank Core
//!
//! Pure ranking logic for Intent Rank: text normalization, synonym
//! resolution, command indexing, token scoring, the command ranking engine,
//! and the parameter-list searcher.
//!
//! This crate performs no I/O and spawns nothing. Every operation is
//! synchronous and bounded by `commands × tokens × words per command`.
//!
//! ```rust
//! use intent_rank_core::models::Command;
//! use intent_rank_core::search::CommandSearch;
//!
//! let engine = CommandSearch::new(vec![
//!     Command::new("infra:start", "Start Infrastructure Service", "Infrastructure")
//!         .with_keywords(["docker", "compose"]),
//!     Command::new("project:test", "Run Tests", "Project"),
//! ]);
//!
//! let hits: Vec<&str> = engine.search("docker").iter().map(|c| c.id.as_str()).collect();
//! assert_eq!(hits, vec!["infra:start"]);
//! ```

pub mod index;
pub mod models;
pub mod params;
pub mod score;
pub mod search;
pub mod synonyms;
pub mod text;
