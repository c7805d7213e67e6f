//! The active panel of the chat command center.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::zip::ZipCode;

/// The single view the chat UI renders next to the conversation.
///
/// Serialized as `{"type": "...", "data": {...}}`; unit variants carry no
/// `data` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ActivePanel {
    #[default]
    Welcome,

    #[serde(rename_all = "camelCase")]
    Recommendations { zip_code: ZipCode },

    #[serde(rename_all = "camelCase")]
    ProviderDetail {
        provider_slug: String,
        provider_name: String,
    },

    /// Side-by-side view of two provider display names.
    Comparison { providers: [String; 2] },

    #[serde(rename_all = "camelCase")]
    Coverage { zip_code: ZipCode },

    SpeedTest,

    Quiz,

    /// Address lookup, prefilled when the message contained an address.
    AddressAvailability {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
    },
}

impl ActivePanel {
    /// The panel type name as it appears in the serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Recommendations { .. } => "recommendations",
            Self::ProviderDetail { .. } => "providerDetail",
            Self::Comparison { .. } => "comparison",
            Self::Coverage { .. } => "coverage",
            Self::SpeedTest => "speedTest",
            Self::Quiz => "quiz",
            Self::AddressAvailability { .. } => "addressAvailability",
        }
    }
}

impl fmt::Display for ActivePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommendations { zip_code } => write!(f, "recommendations({zip_code})"),
            Self::ProviderDetail {
                provider_slug,
                provider_name,
            } => write!(f, "providerDetail({provider_name} /{provider_slug})"),
            Self::Comparison { providers: [a, b] } => write!(f, "comparison({a} vs {b})"),
            Self::Coverage { zip_code } => write!(f, "coverage({zip_code})"),
            Self::AddressAvailability {
                address: Some(address),
            } => write!(f, "addressAvailability({address})"),
            other => f.write_str(other.kind()),
        }
    }
}

/// Holder of the active panel.
///
/// Every change replaces the panel wholesale.
#[derive(Debug, Clone, Default)]
pub struct PanelDisplay {
    active: ActivePanel,
}

impl PanelDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &ActivePanel {
        &self.active
    }

    /// Replace the active panel, returning the one it replaced.
    pub fn show(&mut self, panel: ActivePanel) -> ActivePanel {
        std::mem::replace(&mut self.active, panel)
    }

    /// Leave the current panel: back to recommendations when a ZIP is
    /// known, otherwise to the welcome panel.
    pub fn go_back(&mut self, zip: Option<&ZipCode>) -> &ActivePanel {
        self.active = match zip {
            Some(zip) => ActivePanel::Recommendations {
                zip_code: zip.clone(),
            },
            None => ActivePanel::Welcome,
        };
        &self.active
    }
}
