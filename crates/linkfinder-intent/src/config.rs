//! Advisor configuration loaded from `config/default.toml`.
//!
//! ```toml
//! [router]
//! extra_providers = [
//!     { name = "Sonic", pattern = '\bsonic\b' },
//!     { name = "Hill Country Fiber", pattern = '\bhill country\b', slug = "hcf" },
//! ]
//!
//! [session]
//! default_zip = "78701"
//! ```
//!
//! Every section is optional. A missing file means defaults; a file that
//! exists but does not parse is an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{AdvisorError, Result};
use crate::patterns::{PatternTables, ProviderPattern};
use crate::providers;
use crate::router::IntentRouter;
use crate::zip::ZipCode;

/// Default location of the configuration file, relative to the working
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "LINKFINDER_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub router: RouterConfig,
    pub session: SessionConfig,
}

/// The `[router]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Providers appended after the built-in table.
    pub extra_providers: Vec<ProviderEntry>,
}

/// One configured provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    pub pattern: String,
    /// Derived from the provider directory (or the name) when omitted.
    #[serde(default)]
    pub slug: Option<String>,
}

impl ProviderEntry {
    fn resolved_slug(&self) -> String {
        self.slug
            .clone()
            .or_else(|| providers::resolve_slug(&self.name).map(str::to_owned))
            .unwrap_or_else(|| providers::slugify(&self.name))
    }
}

/// The `[session]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// ZIP seeded into every new session, as a detected location would be.
    pub default_zip: Option<String>,
}

impl AdvisorConfig {
    /// Pick the config path: an explicit path, then `LINKFINDER_CONFIG`, then
    /// [`DEFAULT_CONFIG_PATH`].
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        std::env::var_os(CONFIG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| AdvisorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| AdvisorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            extra_providers = config.router.extra_providers.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build the pattern tables: built-ins followed by configured providers.
    pub fn pattern_tables(&self) -> Result<PatternTables> {
        let mut tables = PatternTables::builtin()?;
        for entry in &self.router.extra_providers {
            let slug = entry.resolved_slug();
            debug!(name = %entry.name, slug = %slug, "configured provider");
            tables.push_provider(ProviderPattern::new(&entry.pattern, &entry.name, slug)?);
        }
        Ok(tables)
    }

    pub fn build_router(&self) -> Result<IntentRouter> {
        IntentRouter::with_tables(self.pattern_tables()?)
    }

    /// The configured default ZIP, validated.
    pub fn default_zip(&self) -> Result<Option<ZipCode>> {
        self.session
            .default_zip
            .as_deref()
            .map(ZipCode::parse)
            .transpose()
    }
}
