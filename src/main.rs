//! # Intent Rank CLI (`irank`)
//!
//! ## Usage
//!
//! ```bash
//! irank --config ./config/irank.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `irank search "<query>"` | Rank catalogue commands for a query |
//! | `irank params <list> "<query>"` | Rank the options of a parameter list |
//! | `irank list` | Print the catalogue |
//! | `irank serve` | Start the JSON HTTP API |
//!
//! ## Examples
//!
//! ```bash
//! # Synonyms: finds "Start Infrastructure Service" and "Run Tests"
//! irank search "run"
//!
//! # Show which matcher fired for each token
//! irank search "start infra" --explain
//!
//! # Pretend "redis" is a running service attached to infra:logs
//! irank search "redis" --dynamic infra:logs=redis,kafka
//!
//! # Second-step parameter picking
//! irank params services "post"
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use intent_rank::config;
use intent_rank::search::{self, SearchOptions};
use intent_rank::server;

/// Intent Rank CLI: an intent-aware command ranking engine for command palettes.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file that names the catalogue to load.
#[derive(Parser)]
#[command(
    name = "irank",
    about = "Intent Rank: an intent-aware command ranking engine for command palettes",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/irank.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalogue commands for a query.
    ///
    /// An empty query (or one made only of stop words) prints the whole
    /// catalogue in catalogue order.
    Search {
        /// The query string.
        #[arg(default_value = "")]
        query: String,

        /// Maximum number of results (defaults to `[search].limit`).
        #[arg(long)]
        limit: Option<usize>,

        /// Show the winning matcher for every query token.
        #[arg(long)]
        explain: bool,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,

        /// Dynamic keywords as `<command id>=kw1,kw2`. Repeatable.
        #[arg(long = "dynamic", value_parser = parse_dynamic)]
        dynamic: Vec<(String, Vec<String>)>,
    },

    /// Rank the options of a named parameter list.
    Params {
        /// Parameter list name (a `[params.<name>]` table in the catalogue).
        list: String,

        /// The query string.
        #[arg(default_value = "")]
        query: String,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print every catalogue command.
    List,

    /// Start the JSON HTTP API on `[server].bind`.
    Serve,
}

/// Parse `id=kw1,kw2` for `--dynamic`. The id itself may contain `:`.
fn parse_dynamic(s: &str) -> Result<(String, Vec<String>), String> {
    let pos = s
        .rfind('=')
        .ok_or_else(|| format!("invalid ID=KEYWORDS: no '=' found in '{}'", s))?;
    let id = s[..pos].trim();
    if id.is_empty() {
        return Err(format!("invalid ID=KEYWORDS: empty id in '{}'", s));
    }
    let keywords = s[pos + 1..]
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();
    Ok((id.to_string(), keywords))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    intent_rank::init_tracing(&cfg.log.level);

    match cli.command {
        Commands::Search {
            query,
            limit,
            explain,
            json,
            dynamic,
        } => {
            search::run_search(
                &cfg,
                &query,
                SearchOptions {
                    limit,
                    explain,
                    json,
                    dynamic,
                },
            )?;
        }
        Commands::Params { list, query, json } => {
            search::run_params(&cfg, &list, &query, json)?;
        }
        Commands::List => {
            search::run_list(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
