//! Access technologies and their ranking.
//!
//! Provider listings across the site are ordered by a fixed technology
//! hierarchy: Fiber > Cable > 5G > Fixed Wireless > DSL > Satellite.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A broadband access technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Technology {
    Fiber,
    Cable,
    #[serde(rename = "5G")]
    FiveG,
    #[serde(rename = "Fixed Wireless")]
    FixedWireless,
    #[serde(rename = "DSL")]
    Dsl,
    Satellite,
}

impl Technology {
    /// Every technology, highest priority first.
    pub const ALL: [Technology; 6] = [
        Self::Fiber,
        Self::Cable,
        Self::FiveG,
        Self::FixedWireless,
        Self::Dsl,
        Self::Satellite,
    ];

    /// Display label used in chat context and listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fiber => "Fiber",
            Self::Cable => "Cable",
            Self::FiveG => "5G",
            Self::FixedWireless => "Fixed Wireless",
            Self::Dsl => "DSL",
            Self::Satellite => "Satellite",
        }
    }

    /// Priority score, higher sorts first.
    pub fn priority(self) -> u32 {
        match self {
            Self::Fiber => 100,
            Self::Cable => 80,
            Self::FiveG => 70,
            Self::FixedWireless => 50,
            Self::Dsl => 30,
            Self::Satellite => 10,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Technology {
    type Err = UnknownTechnology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownTechnology(s.to_owned()))
    }
}

/// Returned when a label does not name a known technology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown technology: {0}")]
pub struct UnknownTechnology(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for tech in Technology::ALL {
            assert_eq!(tech.label().parse::<Technology>().unwrap(), tech);
        }
        assert_eq!("dsl".parse::<Technology>().unwrap(), Technology::Dsl);
        assert!("dial-up".parse::<Technology>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&[Technology::FiveG, Technology::Dsl]).unwrap();
        assert_eq!(json, r#"["5G","DSL"]"#);
    }

    #[test]
    fn all_is_ordered_by_priority() {
        let priorities: Vec<u32> = Technology::ALL.iter().map(|t| t.priority()).collect();
        assert_eq!(priorities, [100, 80, 70, 50, 30, 10]);
    }

    #[test]
    fn fixed_wireless_parses_from_label() {
        assert_eq!(
            " fixed wireless ".parse::<Technology>().unwrap(),
            Technology::FixedWireless
        );
    }
}
