//! CLI entry point for linkfinder.
//!
//! This binary provides the `linkfinder` command with subcommands for
//! chatting with the advisor, classifying messages in batch, and inspecting
//! the provider tables.

mod helpers;
mod repl;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linkfinder_intent::providers;
use tracing::info;

use crate::helpers::{Advisor, init_tracing, load_config};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// linkfinder: find and compare internet providers by chatting.
#[derive(Parser)]
#[command(
    name = "linkfinder",
    version,
    about = "linkfinder: conversational ISP advisor",
    long_about = "Routes chat messages about internet providers to the panel \
                  (recommendations, comparison, coverage, speed test, ...) \
                  the advisor UI should show."
)]
struct Cli {
    /// Path to the configuration file (default: $LINKFINDER_CONFIG, then
    /// config/default.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session.
    Chat,

    /// Route messages in order and print the resulting session as JSON.
    Classify {
        /// User messages, in conversation order.
        #[arg(required = true)]
        messages: Vec<String>,

        /// Print the panel after every message.
        #[arg(long)]
        steps: bool,
    },

    /// List the provider pattern table.
    Providers,

    /// Resolve a raw provider name to its site slug.
    Resolve {
        /// Provider name as filed, e.g. "Charter Communications".
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat => {
            init_tracing("info");
            let advisor = Advisor::from_config(load_config(cli.config.as_deref())?)?;
            repl::cmd_chat(&advisor)
        }
        Commands::Classify { messages, steps } => {
            init_tracing("warn");
            let advisor = Advisor::from_config(load_config(cli.config.as_deref())?)?;
            cmd_classify(&advisor, &messages, steps)
        }
        Commands::Providers => {
            init_tracing("warn");
            let advisor = Advisor::from_config(load_config(cli.config.as_deref())?)?;
            cmd_providers(&advisor)
        }
        Commands::Resolve { name } => {
            init_tracing("warn");
            cmd_resolve(&name)
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand: classify
// ---------------------------------------------------------------------------

fn cmd_classify(advisor: &Advisor, messages: &[String], steps: bool) -> Result<()> {
    let mut session = advisor.new_session()?;

    for message in messages {
        let rule = session.process_message(message);
        info!(message = %message, rule = ?rule, "classified");
        if steps {
            let rule = rule.map_or_else(|| "-".to_owned(), |r| r.to_string());
            eprintln!("  {message:?} -> {} [{rule}]", session.active_panel());
        }
    }

    let json = session
        .snapshot()
        .to_json()
        .context("failed to serialize session")?;
    println!("{json}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: providers
// ---------------------------------------------------------------------------

fn cmd_providers(advisor: &Advisor) -> Result<()> {
    println!();
    println!("  {:<16} {:<16} PATTERN", "NAME", "SLUG");
    for provider in advisor.router.tables().providers() {
        println!(
            "  {:<16} {:<16} {}",
            provider.name, provider.slug, provider.pattern
        );
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: resolve
// ---------------------------------------------------------------------------

fn cmd_resolve(name: &str) -> Result<()> {
    println!("  Name:  {}", providers::clean_display_name(name));
    match (providers::resolve_slug(name), providers::provider_href(name)) {
        (Some(slug), Some(href)) => {
            println!("  Slug:  {slug}");
            println!("  Page:  {href}");
        }
        _ => println!("  Slug:  (unknown, would use {})", providers::slugify(name)),
    }
    Ok(())
}
