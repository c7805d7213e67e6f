//! A chat session: one conversation context plus its active panel.
//!
//! Sessions are explicitly constructed and owned by whatever drives the chat
//! (a UI event loop, the CLI REPL). They share an [`IntentRouter`] through an
//! `Arc` but never share state with each other.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::{ContextUpdate, ConversationContext};
use crate::error::Result;
use crate::panel::{ActivePanel, PanelDisplay};
use crate::router::{IntentRouter, Rule};
use crate::zip::ZipCode;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message as the transcript records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Serializable view of a session for rendering or inspection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub context: ConversationContext,
    pub active_panel: ActivePanel,
}

impl SessionSnapshot {
    /// Pretty-printed JSON, the shape the chat UI renders from.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One chat conversation.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    router: Arc<IntentRouter>,
    context: ConversationContext,
    display: PanelDisplay,
}

impl Session {
    /// Start a session on the welcome panel.
    pub fn new(router: Arc<IntentRouter>) -> Self {
        let id = Uuid::now_v7();
        debug!(session = %id, "session started");
        Self {
            id,
            router,
            context: ConversationContext::new(),
            display: PanelDisplay::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn active_panel(&self) -> &ActivePanel {
        self.display.active()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            context: self.context.clone(),
            active_panel: self.display.active().clone(),
        }
    }

    /// Run a user message through the router.
    ///
    /// Returns the rule that fired, if any. Unmatched messages leave the
    /// active panel untouched.
    pub fn process_message(&mut self, text: &str) -> Option<Rule> {
        let routed = self.router.route(text, &mut self.context)?;
        info!(
            session = %self.id,
            rule = %routed.rule,
            panel = %routed.panel,
            "panel switched by message"
        );
        self.display.show(routed.panel);
        Some(routed.rule)
    }

    /// Feed a transcript message. Only user messages drive the router.
    pub fn ingest(&mut self, message: &ChatMessage) -> Option<Rule> {
        match message.role {
            Role::User => self.process_message(&message.content),
            Role::Assistant => None,
        }
    }

    /// Explicit ZIP entry, bypassing the router.
    ///
    /// Stores the ZIP if none is known yet and switches to the
    /// recommendations panel for the stored ZIP. A different ZIP arriving
    /// after the first is ignored.
    pub fn set_zip_code(&mut self, zip: &str) -> Result<ZipCode> {
        let zip = ZipCode::parse(zip)?;
        let stored = match self.context.zip_code() {
            Some(existing) => {
                if *existing != zip {
                    warn!(
                        session = %self.id,
                        kept = %existing,
                        rejected = %zip,
                        "session already has a zip code; keeping the first"
                    );
                }
                existing.clone()
            }
            None => {
                self.context.set_zip_if_unset(zip.clone());
                zip
            }
        };

        self.display.show(ActivePanel::Recommendations {
            zip_code: stored.clone(),
        });
        info!(session = %self.id, zip = %stored, "zip code set");
        Ok(stored)
    }

    /// Replace the active panel directly.
    pub fn show_panel(&mut self, panel: ActivePanel) {
        debug!(session = %self.id, panel = %panel, "panel shown");
        self.display.show(panel);
    }

    /// Back to recommendations when a ZIP is known, otherwise to welcome.
    pub fn go_back(&mut self) -> &ActivePanel {
        let panel = self.display.go_back(self.context.zip_code());
        debug!(session = %self.id, panel = %panel, "went back");
        panel
    }

    pub fn update_context(&mut self, update: ContextUpdate) {
        debug!(session = %self.id, update = ?update, "context updated");
        self.context.apply(update);
    }
}
