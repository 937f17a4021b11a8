//! CLI frontends for `irank search`, `irank params`, and `irank list`.

use anyhow::{bail, Result};
use std::fmt::Write as _;

use intent_rank_core::models::ParamOption;
use intent_rank_core::search::RankedCommand;

use crate::catalog::{load_catalog, Palette};
use crate::config::Config;

/// Options for a single `irank search` invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub limit: Option<usize>,
    pub explain: bool,
    pub json: bool,
    /// `(command id, keywords)` applied before searching.
    pub dynamic: Vec<(String, Vec<String>)>,
}

fn load_palette(config: &Config) -> Result<Palette> {
    Ok(load_catalog(&config.catalog.path)?.into_palette())
}

pub fn run_search(config: &Config, query: &str, opts: SearchOptions) -> Result<()> {
    let palette = load_palette(config)?;

    for (id, keywords) in &opts.dynamic {
        if !palette.commands.set_dynamic_keywords(id, keywords) {
            tracing::warn!(id = %id, "--dynamic names an unknown command");
        }
    }

    let explain = opts.explain || config.search.explain;
    let mut ranked = if explain {
        palette.commands.explain(query)
    } else {
        palette.commands.rank(query)
    };
    ranked.truncate(opts.limit.unwrap_or(config.search.limit));

    print!("{}", render_commands(&ranked, opts.json)?);
    Ok(())
}

pub fn run_params(config: &Config, list: &str, query: &str, json: bool) -> Result<()> {
    let palette = load_palette(config)?;
    let Some(searcher) = palette.params.get(list) else {
        let available: Vec<&str> = palette.params.keys().map(String::as_str).collect();
        bail!(
            "Unknown parameter list: '{}'. Available: {}",
            list,
            if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            }
        );
    };

    let mut results = searcher.search(query);
    results.truncate(config.search.limit);
    print!("{}", render_options(&results, json)?);
    Ok(())
}

pub fn run_list(config: &Config) -> Result<()> {
    let palette = load_palette(config)?;
    println!("{:<28} {:<18} LABEL", "ID", "CATEGORY");
    for cmd in palette.commands.commands() {
        println!("{:<28} {:<18} {}", cmd.id, cmd.category, cmd.label);
    }
    for (name, searcher) in &palette.params {
        println!();
        println!("params.{} ({} options)", name, searcher.len());
    }
    Ok(())
}

pub fn render_commands(ranked: &[RankedCommand<'_>], json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(ranked)?));
    }
    if ranked.is_empty() {
        return Ok("No results.\n".to_string());
    }

    let mut out = String::new();
    for (i, r) in ranked.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<28} {:>7.2}  {}",
            i + 1,
            r.command.id,
            r.score,
            r.command.label
        )?;
        if let Some(tokens) = &r.explain {
            for t in tokens {
                match t.matched {
                    Some(m) => writeln!(out, "       {:<16} {:?} ({})", t.token, m.kind, m.score)?,
                    None => writeln!(out, "       {:<16} -", t.token)?,
                }
            }
        }
    }
    Ok(out)
}

pub fn render_options(options: &[&ParamOption], json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(options)?));
    }
    if options.is_empty() {
        return Ok("No results.\n".to_string());
    }

    let mut out = String::new();
    for opt in options {
        match &opt.description {
            Some(desc) => writeln!(out, "{:<24} {}  ({})", opt.id, opt.label, desc)?,
            None => writeln!(out, "{:<24} {}", opt.id, opt.label)?,
        }
    }
    Ok(out)
}
