//! Conversational intent router.
//!
//! Each user message is run through a fixed, priority-ordered chain of rules.
//! The first rule that fires decides the next panel and the chain stops.
//!
//! | Order | Rule | Fires when | Panel |
//! |-------|------|------------|-------|
//! | 1 | [`Rule::Zip`] | bare 5-digit number, no ZIP stored yet | `recommendations` |
//! | - | entity extraction | always, unless rule 1 fired | - |
//! | 2 | [`Rule::AddressAvailability`] | street address or "check my address" | `addressAvailability` |
//! | 3 | [`Rule::SpeedTest`] | "speed test", "how fast", ... | `speedTest` |
//! | 4 | [`Rule::Quiz`] | "quiz", "help me choose", "which provider" | `quiz` |
//! | 5 | [`Rule::Comparison`] | compare cue and two distinct providers known | `comparison` |
//! | 6 | [`Rule::ProviderDetail`] | one provider in message plus an inquiry cue | `providerDetail` |
//! | 7 | [`Rule::Coverage`] | coverage cue and ZIP known | `coverage` |
//! | 8 | [`Rule::Recommendation`] | recommendation cue and ZIP known | `recommendations` |
//! | 9 | [`Rule::SingleProvider`] | one provider in message and ZIP known | `providerDetail` |
//!
//! A message that matches nothing leaves the panel alone.

use std::fmt;

use serde::Serialize;

use crate::context::{ConversationContext, Intent};
use crate::cues::Cues;
use crate::error::Result;
use crate::panel::ActivePanel;
use crate::patterns::{PatternTables, ProviderPattern};
use crate::zip::ZipCode;

/// A routing rule, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Zip,
    AddressAvailability,
    SpeedTest,
    Quiz,
    Comparison,
    ProviderDetail,
    Coverage,
    Recommendation,
    SingleProvider,
}

/// Rules evaluated after entity extraction, in priority order.
const CHAIN: [Rule; 8] = [
    Rule::AddressAvailability,
    Rule::SpeedTest,
    Rule::Quiz,
    Rule::Comparison,
    Rule::ProviderDetail,
    Rule::Coverage,
    Rule::Recommendation,
    Rule::SingleProvider,
];

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zip => "zip",
            Self::AddressAvailability => "address_availability",
            Self::SpeedTest => "speed_test",
            Self::Quiz => "quiz",
            Self::Comparison => "comparison",
            Self::ProviderDetail => "provider_detail",
            Self::Coverage => "coverage",
            Self::Recommendation => "recommendation",
            Self::SingleProvider => "single_provider",
        };
        f.write_str(name)
    }
}

/// The outcome of routing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    /// The rule that fired.
    pub rule: Rule,
    /// The panel that should replace the active one.
    pub panel: ActivePanel,
}

/// What one message says, extracted once and shared by all rules.
struct Message<'a> {
    text: &'a str,
    providers: Vec<&'a ProviderPattern>,
}

impl Message<'_> {
    /// The provider when exactly one was mentioned.
    fn single_provider(&self) -> Option<&ProviderPattern> {
        match self.providers.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// IntentRouter
// ---------------------------------------------------------------------------

/// Classifies chat messages and decides which panel to show.
///
/// The router holds only compiled, immutable tables; all per-conversation
/// state lives in the [`ConversationContext`] passed to [`IntentRouter::route`].
/// One router can therefore serve any number of sessions.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    tables: PatternTables,
    cues: Cues,
}

impl IntentRouter {
    /// Router with the built-in provider and technology tables.
    pub fn new() -> Result<Self> {
        Self::with_tables(PatternTables::builtin()?)
    }

    pub fn with_tables(tables: PatternTables) -> Result<Self> {
        Ok(Self {
            tables,
            cues: Cues::new()?,
        })
    }

    pub fn tables(&self) -> &PatternTables {
        &self.tables
    }

    /// Route one user message.
    ///
    /// Updates `ctx` with what the message revealed and returns the panel to
    /// show, or `None` when no rule fired.
    pub fn route(&self, text: &str, ctx: &mut ConversationContext) -> Option<Routed> {
        // Rule 1: the first ZIP of the conversation preempts everything.
        if ctx.zip_code().is_none()
            && let Some(zip) = self.cues.zip_code(text).and_then(|z| ZipCode::parse(z).ok())
        {
            tracing::info!(zip = %zip, "zip code captured from message");
            ctx.set_zip_if_unset(zip.clone());
            return Some(Routed {
                rule: Rule::Zip,
                panel: ActivePanel::Recommendations { zip_code: zip },
            });
        }

        let message = self.extract(text, ctx);

        for rule in CHAIN {
            if let Some(panel) = self.apply(rule, &message, ctx) {
                tracing::debug!(rule = %rule, panel = %panel, "rule fired");
                return Some(Routed { rule, panel });
            }
        }

        tracing::debug!("no rule matched");
        None
    }

    /// Entity extraction: record every provider and technology the message
    /// mentions.
    fn extract<'a>(&'a self, text: &'a str, ctx: &mut ConversationContext) -> Message<'a> {
        let providers = self.tables.scan_providers(text);
        let technologies = self.tables.scan_technologies(text);

        if !providers.is_empty() || !technologies.is_empty() {
            tracing::debug!(
                providers = ?providers.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
                technologies = ?technologies,
                "entities detected"
            );
        }

        ctx.record_providers(providers.iter().map(|p| p.name.as_str()));
        ctx.record_technologies(technologies);

        let message = Message { text, providers };
        if let Some(provider) = message.single_provider() {
            ctx.set_last_provider(provider.slug.as_str());
        }
        message
    }

    fn apply(
        &self,
        rule: Rule,
        message: &Message<'_>,
        ctx: &mut ConversationContext,
    ) -> Option<ActivePanel> {
        let text = message.text;
        match rule {
            Rule::Zip => None,

            Rule::AddressAvailability => self
                .cues
                .address(text)
                .map(|address| ActivePanel::AddressAvailability { address }),

            Rule::SpeedTest => {
                if !self.cues.speed_test(text) {
                    return None;
                }
                ctx.set_intent(Intent::SpeedTest);
                Some(ActivePanel::SpeedTest)
            }

            Rule::Quiz => {
                if !self.cues.quiz(text) {
                    return None;
                }
                ctx.set_intent(Intent::Quiz);
                Some(ActivePanel::Quiz)
            }

            Rule::Comparison => {
                if !self.cues.compare.is_match(text) {
                    return None;
                }
                // Extraction already merged this message's providers, so the
                // context holds the deduplicated union in first-seen order.
                let [first, second, ..] = ctx.mentioned_providers() else {
                    tracing::debug!("comparison cue without two known providers");
                    return None;
                };
                let providers = [first.clone(), second.clone()];
                ctx.mark_comparison_requested();
                ctx.set_intent(Intent::Compare);
                Some(ActivePanel::Comparison { providers })
            }

            Rule::ProviderDetail => {
                let provider = message.single_provider()?;
                if !self.cues.inquiry.is_match(text) {
                    return None;
                }
                ctx.set_intent(Intent::Details);
                ctx.set_last_provider(provider.slug.as_str());
                Some(detail_panel(provider))
            }

            Rule::Coverage => {
                if !self.cues.coverage.is_match(text) {
                    return None;
                }
                let zip_code = ctx.zip_code()?.clone();
                Some(ActivePanel::Coverage { zip_code })
            }

            Rule::Recommendation => {
                if !self.cues.recommend.is_match(text) {
                    return None;
                }
                let zip_code = ctx.zip_code()?.clone();
                ctx.set_intent(Intent::Recommend);
                Some(ActivePanel::Recommendations { zip_code })
            }

            Rule::SingleProvider => {
                let provider = message.single_provider()?;
                ctx.zip_code()?;
                Some(detail_panel(provider))
            }
        }
    }
}

fn detail_panel(provider: &ProviderPattern) -> ActivePanel {
    ActivePanel::ProviderDetail {
        provider_slug: provider.slug.clone(),
        provider_name: provider.name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
