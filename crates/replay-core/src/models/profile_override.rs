use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverrideType {
    Uid,
    Entitlements,
}

impl Display for OverrideType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OverrideType::Uid => write!(f, "uid"),
            OverrideType::Entitlements => write!(f, "entitlements"),
        }
    }
}

impl FromStr for OverrideType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uid" => Ok(OverrideType::Uid),
            "entitlements" => Ok(OverrideType::Entitlements),
            _ => Err(anyhow::anyhow!("Invalid override type: {}", s)),
        }
    }
}

/// Active profile override selection.
///
/// The two overrides are mutually exclusive; holding them as one union makes
/// the both-enabled state unrepresentable. Each variant carries the raw text
/// of its input field; entitlements are parsed into a list at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileOverride {
    #[default]
    None,
    Uid(String),
    Entitlements(String),
}

impl ProfileOverride {
    /// Whether any override is enabled.
    pub fn is_active(&self) -> bool {
        !matches!(self, ProfileOverride::None)
    }

    pub fn override_type(&self) -> Option<OverrideType> {
        match self {
            ProfileOverride::None => None,
            ProfileOverride::Uid(_) => Some(OverrideType::Uid),
            ProfileOverride::Entitlements(_) => Some(OverrideType::Entitlements),
        }
    }

    /// Raw UID field text, when the UID override is enabled.
    pub fn uid_value(&self) -> Option<&str> {
        match self {
            ProfileOverride::Uid(value) => Some(value),
            _ => None,
        }
    }

    /// Raw entitlements field text, when the entitlements override is enabled.
    pub fn entitlements_value(&self) -> Option<&str> {
        match self {
            ProfileOverride::Entitlements(value) => Some(value),
            _ => None,
        }
    }
}

/// Finalized override payload emitted on submit.
///
/// Field names match the wire shape the frontend collaborators already
/// consume, so this serializes camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverridePayload {
    pub override_type: OverrideType,
    pub custom_uid: Option<String>,
    pub custom_entitlements: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl OverridePayload {
    /// Build the payload for the given override at `timestamp`.
    ///
    /// Returns `None` when no override is enabled. Values pass through
    /// as-is; there is no validation beyond the toggle exclusivity.
    pub fn from_override(
        selection: &ProfileOverride,
        timestamp: DateTime<Utc>,
    ) -> Option<OverridePayload> {
        match selection {
            ProfileOverride::None => None,
            ProfileOverride::Uid(value) => Some(OverridePayload {
                override_type: OverrideType::Uid,
                custom_uid: Some(value.clone()),
                custom_entitlements: None,
                timestamp,
            }),
            ProfileOverride::Entitlements(raw) => Some(OverridePayload {
                override_type: OverrideType::Entitlements,
                custom_uid: None,
                custom_entitlements: Some(parse_entitlements(raw)),
                timestamp,
            }),
        }
    }
}

/// Split a raw entitlements field into individual entries.
///
/// Entries are comma-separated and trimmed; empty entries are kept, matching
/// what the submit payload has always carried.
pub fn parse_entitlements(raw: &str) -> Vec<String> {
    raw.split(',').map(|e| e.trim().to_string()).collect()
}
