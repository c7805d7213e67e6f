//! Conversational intent routing for the linkfinder ISP advisor.
//!
//! This crate provides:
//!
//! - **Pattern tables**: provider and technology detectors via
//!   [`patterns::PatternTables`].
//! - **Intent router**: the priority-ordered rule chain that turns a chat
//!   message into a panel change via [`router::IntentRouter`].
//! - **Sessions**: per-conversation context and active panel via
//!   [`session::Session`].
//! - **Provider directory**: FCC filer name to site slug resolution in
//!   [`providers`].
//! - **Configuration**: extra providers and session defaults from TOML via
//!   [`config::AdvisorConfig`].

pub mod config;
pub mod context;
pub mod cues;
pub mod error;
pub mod panel;
pub mod patterns;
pub mod providers;
pub mod router;
pub mod session;
pub mod technology;
pub mod zip;

pub use config::AdvisorConfig;
pub use context::{ContextUpdate, ConversationContext, Intent};
pub use error::{AdvisorError, Result};
pub use panel::{ActivePanel, PanelDisplay};
pub use patterns::{PatternTables, ProviderPattern};
pub use router::{IntentRouter, Routed, Rule};
pub use session::{ChatMessage, Role, Session, SessionSnapshot};
pub use technology::Technology;
pub use zip::ZipCode;
