//! Provider and technology pattern tables.
//!
//! Both tables are ordered lists scanned linearly. A scan tests every entry
//! and reports all matches in table order; brand names are disjoint in
//! practice so ordering only matters for the "first two" of a comparison.

use regex::Regex;
use serde::Serialize;

use crate::error::{AdvisorError, Result};
use crate::technology::Technology;

/// Built-in providers: `(pattern, display name, slug)`.
const BUILTIN_PROVIDERS: &[(&str, &str, &str)] = &[
    (r"\b(?:at&t|att)\b", "AT&T", "att"),
    (r"\bspectrum\b", "Spectrum", "spectrum"),
    (r"\bxfinity\b", "Xfinity", "xfinity"),
    (r"\bfrontier\b", "Frontier", "frontier"),
    (r"\b(?:t-mobile|tmobile)\b", "T-Mobile", "t-mobile"),
    (r"\bverizon\b", "Verizon", "verizon"),
    (r"\bgoogle fiber\b", "Google Fiber", "google-fiber"),
    (r"\bcox\b", "Cox", "cox"),
    (r"\bstarlink\b", "Starlink", "starlink"),
    (r"\boptimum\b", "Optimum", "optimum"),
];

/// Built-in technology keywords.
const BUILTIN_TECHNOLOGIES: &[(&str, Technology)] = &[
    (r"\bfiber\b", Technology::Fiber),
    (r"\bcable\b", Technology::Cable),
    (r"\b5g\b", Technology::FiveG),
    (r"\bsatellite\b", Technology::Satellite),
    (r"\bdsl\b", Technology::Dsl),
];

/// Compile a pattern case-insensitively.
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){pattern}")).map_err(|e| AdvisorError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A provider identity and the pattern that detects it in chat text.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderPattern {
    /// Display name, e.g. `"AT&T"`.
    pub name: String,
    /// URL slug, e.g. `"att"`.
    pub slug: String,
    /// The pattern source as supplied (without the case-insensitive flag).
    pub pattern: String,
    #[serde(skip)]
    compiled: Regex,
}

impl ProviderPattern {
    pub fn new(
        pattern: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self> {
        let pattern = pattern.into();
        let compiled = compile(&pattern)?;
        Ok(Self {
            name: name.into(),
            slug: slug.into(),
            pattern,
            compiled,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

#[derive(Debug, Clone)]
struct TechnologyPattern {
    technology: Technology,
    compiled: Regex,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// The provider and technology tables used by the router.
///
/// Immutable once built; share it between sessions behind an `Arc` through
/// the router that owns it.
#[derive(Debug, Clone)]
pub struct PatternTables {
    providers: Vec<ProviderPattern>,
    technologies: Vec<TechnologyPattern>,
}

impl PatternTables {
    /// Build the stock tables.
    pub fn builtin() -> Result<Self> {
        let providers = BUILTIN_PROVIDERS
            .iter()
            .map(|(pattern, name, slug)| ProviderPattern::new(*pattern, *name, *slug))
            .collect::<Result<Vec<_>>>()?;

        let technologies = BUILTIN_TECHNOLOGIES
            .iter()
            .map(|(pattern, technology)| -> Result<TechnologyPattern> {
                Ok(TechnologyPattern {
                    technology: *technology,
                    compiled: compile(pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            providers,
            technologies,
        })
    }

    /// Append a provider after the existing entries.
    pub fn push_provider(&mut self, provider: ProviderPattern) {
        tracing::debug!(
            name = %provider.name,
            slug = %provider.slug,
            pattern = %provider.pattern,
            "provider pattern added"
        );
        self.providers.push(provider);
    }

    pub fn providers(&self) -> &[ProviderPattern] {
        &self.providers
    }

    /// Every provider whose pattern matches `text`, in table order.
    pub fn scan_providers(&self, text: &str) -> Vec<&ProviderPattern> {
        let found: Vec<_> = self.providers.iter().filter(|p| p.is_match(text)).collect();
        tracing::trace!(count = found.len(), "provider scan");
        found
    }

    /// Every technology mentioned in `text`, in table order.
    pub fn scan_technologies(&self, text: &str) -> Vec<Technology> {
        self.technologies
            .iter()
            .filter(|t| t.compiled.is_match(text))
            .map(|t| t.technology)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(found: &[&'a ProviderPattern]) -> Vec<&'a str> {
        found.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn builtin_tables_compile() {
        let tables = PatternTables::builtin().unwrap();
        assert_eq!(tables.providers().len(), BUILTIN_PROVIDERS.len());
    }

    #[test]
    fn provider_scan_is_case_insensitive_and_ordered() {
        let tables = PatternTables::builtin().unwrap();
        let found = tables.scan_providers("Spectrum or AT&T or xfinity?");
        assert_eq!(names(&found), ["AT&T", "Spectrum", "Xfinity"]);
    }

    #[test]
    fn att_spellings() {
        let tables = PatternTables::builtin().unwrap();
        assert_eq!(names(&tables.scan_providers("compare att")), ["AT&T"]);
        assert_eq!(names(&tables.scan_providers("is at&t any good")), ["AT&T"]);
        assert!(tables.scan_providers("attach the file").is_empty());
    }

    #[test]
    fn tmobile_spellings() {
        let tables = PatternTables::builtin().unwrap();
        assert_eq!(names(&tables.scan_providers("T-Mobile home")), ["T-Mobile"]);
        assert_eq!(names(&tables.scan_providers("tmobile 5g")), ["T-Mobile"]);
    }

    #[test]
    fn provider_words_need_boundaries() {
        let tables = PatternTables::builtin().unwrap();
        assert!(tables.scan_providers("coxswain").is_empty());
        assert!(tables.scan_providers("spectrums of light").is_empty());
    }

    #[test]
    fn technology_scan() {
        let tables = PatternTables::builtin().unwrap();
        assert_eq!(
            tables.scan_technologies("fiber or 5G, not DSL"),
            [Technology::Fiber, Technology::FiveG, Technology::Dsl]
        );
        assert!(tables.scan_technologies("fibers").is_empty());
    }

    #[test]
    fn google_fiber_is_both_provider_and_technology() {
        let tables = PatternTables::builtin().unwrap();
        assert_eq!(
            names(&tables.scan_providers("google fiber")),
            ["Google Fiber"]
        );
        assert_eq!(tables.scan_technologies("google fiber"), [Technology::Fiber]);
    }

    #[test]
    fn pushed_provider_is_scanned_last() {
        let mut tables = PatternTables::builtin().unwrap();
        tables.push_provider(ProviderPattern::new(r"\bsonic\b", "Sonic", "sonic").unwrap());
        let found = tables.scan_providers("sonic vs att");
        assert_eq!(names(&found), ["AT&T", "Sonic"]);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = ProviderPattern::new("[broken(", "Broken", "broken").unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidPattern { .. }));
    }
}
