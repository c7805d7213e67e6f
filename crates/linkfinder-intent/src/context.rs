//! Per-session conversation context.

use serde::{Deserialize, Deserializer, Serialize};

use crate::technology::Technology;
use crate::zip::ZipCode;

/// The classified purpose of the latest routed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Explore,
    Compare,
    Recommend,
    Details,
    SpeedTest,
    Quiz,
}

/// What the chat session has learned so far.
///
/// The ZIP code is write-once and the mention sets only grow; the fields are
/// private so that nothing outside this crate can break either rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    zip_code: Option<ZipCode>,
    last_provider: Option<String>,
    mentioned_providers: Vec<String>,
    mentioned_technologies: Vec<Technology>,
    comparison_requested: bool,
    intent: Option<Intent>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zip_code(&self) -> Option<&ZipCode> {
        self.zip_code.as_ref()
    }

    /// Slug of the provider most recently singled out.
    pub fn last_provider(&self) -> Option<&str> {
        self.last_provider.as_deref()
    }

    /// Provider display names in first-mention order.
    pub fn mentioned_providers(&self) -> &[String] {
        &self.mentioned_providers
    }

    pub fn mentioned_technologies(&self) -> &[Technology] {
        &self.mentioned_technologies
    }

    pub fn comparison_requested(&self) -> bool {
        self.comparison_requested
    }

    pub fn intent(&self) -> Option<Intent> {
        self.intent
    }

    pub fn mentions_provider(&self, name: &str) -> bool {
        self.mentioned_providers.iter().any(|p| p == name)
    }

    /// The highest-ranked technology the user has brought up.
    pub fn preferred_technology(&self) -> Option<Technology> {
        self.mentioned_technologies
            .iter()
            .copied()
            .max_by_key(|t| t.priority())
    }

    // -- Mutation (crate-internal) ------------------------------------------

    /// Store `zip` unless one is already stored. Returns whether it was stored.
    pub(crate) fn set_zip_if_unset(&mut self, zip: ZipCode) -> bool {
        if self.zip_code.is_some() {
            return false;
        }
        self.zip_code = Some(zip);
        true
    }

    pub(crate) fn record_providers<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if !self.mentions_provider(name) {
                self.mentioned_providers.push(name.to_owned());
            }
        }
    }

    pub(crate) fn record_technologies(&mut self, technologies: impl IntoIterator<Item = Technology>) {
        for tech in technologies {
            if !self.mentioned_technologies.contains(&tech) {
                self.mentioned_technologies.push(tech);
            }
        }
    }

    pub(crate) fn set_last_provider(&mut self, slug: impl Into<String>) {
        self.last_provider = Some(slug.into());
    }

    pub(crate) fn set_intent(&mut self, intent: Intent) {
        self.intent = Some(intent);
    }

    pub(crate) fn mark_comparison_requested(&mut self) {
        self.comparison_requested = true;
    }

    /// Merge a partial update. Mentions are added, never removed.
    pub(crate) fn apply(&mut self, update: ContextUpdate) {
        let ContextUpdate {
            last_provider,
            providers,
            technologies,
            comparison_requested,
            intent,
        } = update;

        if let Some(slug) = last_provider {
            self.last_provider = slug;
        }
        self.record_providers(providers.iter().map(String::as_str));
        self.record_technologies(technologies);
        if let Some(requested) = comparison_requested {
            self.comparison_requested = requested;
        }
        if let Some(intent) = intent {
            self.intent = intent;
        }
    }
}

/// A partial update for [`ConversationContext`].
///
/// Carries no ZIP: a ZIP only enters the context through the session's ZIP
/// setter or the router.
///
/// `last_provider` and `intent` are three-state: absent leaves the field
/// alone, `Some(None)` (JSON `null`) clears it, `Some(Some(_))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextUpdate {
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_provider: Option<Option<String>>,
    pub providers: Vec<String>,
    pub technologies: Vec<Technology>,
    pub comparison_requested: Option<bool>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub intent: Option<Option<Intent>>,
}

/// Maps a present key to `Some`, so `null` becomes `Some(None)` instead of
/// collapsing into the missing-key default.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ContextUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_provider(mut self, slug: impl Into<String>) -> Self {
        self.last_provider = Some(Some(slug.into()));
        self
    }

    pub fn clear_last_provider(mut self) -> Self {
        self.last_provider = Some(None);
        self
    }

    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.providers.push(name.into());
        self
    }

    pub fn technology(mut self, technology: Technology) -> Self {
        self.technologies.push(technology);
        self
    }

    pub fn comparison_requested(mut self, requested: bool) -> Self {
        self.comparison_requested = Some(requested);
        self
    }

    pub fn intent(mut self, intent: Intent) -> Self {
        self.intent = Some(Some(intent));
        self
    }

    pub fn clear_intent(mut self) -> Self {
        self.intent = Some(None);
        self
    }
}
