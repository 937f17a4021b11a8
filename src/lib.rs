//! # Intent Rank
//!
//! An intent-aware command ranking engine for command palettes.
//!
//! Given a free-text query and a fixed catalogue of commands, Intent Rank
//! returns the commands ordered by relevance. It understands synonyms
//! ("run" finds both *Start* and *Test* commands), partial words, acronyms,
//! and live vocabulary injected at runtime (the names of running services).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//! │  Catalogue   │──▶│  Index        │──▶│  Rank        │
//! │  (TOML)      │   │  per command  │   │  per query   │
//! └──────────────┘   └──────▲────────┘   └──────┬───────┘
//!                           │ dynamic keywords  │
//!                      ┌────┴─────┐       ┌─────▼────┐
//!                      │   HTTP   │       │   CLI    │
//!                      │ (serve)  │       │ (irank)  │
//!                      └──────────┘       └──────────┘
//! ```
//!
//! The ranking logic lives in [`intent_rank_core`]; this crate adds
//! configuration, catalogue loading, and the CLI and HTTP frontends.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Catalogue file loading and validation |
//! | [`search`] | CLI search, parameter search, and listing |
//! | [`server`] | JSON HTTP API |

pub mod catalog;
pub mod config;
pub mod search;
pub mod server;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`. Calling this twice is harmless.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
