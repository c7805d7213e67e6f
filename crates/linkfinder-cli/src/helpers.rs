//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization, configuration loading, and session
//! construction.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use linkfinder_intent::{AdvisorConfig, IntentRouter, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
///
/// Logs go to stderr so JSON printed on stdout stays machine-readable.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Load configuration from `explicit`, `LINKFINDER_CONFIG`, or the default
/// path, in that order.
pub fn load_config(explicit: Option<&Path>) -> Result<AdvisorConfig> {
    let path = AdvisorConfig::resolve_path(explicit);
    AdvisorConfig::load(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Everything a subcommand needs to start chatting.
pub struct Advisor {
    pub config: AdvisorConfig,
    pub router: Arc<IntentRouter>,
}

impl Advisor {
    pub fn from_config(config: AdvisorConfig) -> Result<Self> {
        let router = config
            .build_router()
            .context("failed to build intent router")?;
        info!(
            providers = router.tables().providers().len(),
            "intent router ready"
        );
        Ok(Self {
            config,
            router: Arc::new(router),
        })
    }

    /// A new session, seeded with the configured default ZIP if any.
    pub fn new_session(&self) -> Result<Session> {
        let mut session = Session::new(Arc::clone(&self.router));
        if let Some(zip) = self
            .config
            .default_zip()
            .context("invalid [session] default_zip")?
        {
            session.set_zip_code(zip.as_str())?;
        }
        Ok(session)
    }
}
