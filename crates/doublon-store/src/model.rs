//! Candidate records as the store serves them.
//!
//! Field names follow the directory's French wire vocabulary (`nom`, `marque_nom`, `titre`,
//! `statut`); English spellings are accepted as aliases. Any field the engine does not read
//! is kept in `extra` so results can be echoed back to callers unchanged.

use std::fmt;

use doublon_similarity::Signals;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Primary key of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer key.
    Number(i64),
    /// Text key (UUIDs, slugs).
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A tracked brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    /// Primary key.
    pub id: RecordId,
    /// Brand name.
    #[serde(rename = "nom", alias = "name")]
    pub name: String,
    /// Fields the engine does not read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Brand {
    /// Creates a brand with no extra fields.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

impl Signals for Brand {
    fn brand_name(&self) -> &str {
        &self.name
    }
}

/// A moderator-approved controversy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controversy {
    /// Primary key.
    pub id: RecordId,
    /// Name of the brand involved.
    #[serde(rename = "marque_nom", alias = "brand_name")]
    pub brand_name: String,
    /// Headline.
    #[serde(rename = "titre", alias = "title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer text, used when there is no title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the incident happened.
    #[serde(rename = "date", alias = "occurred_on", default, skip_serializing_if = "Option::is_none")]
    pub occurred_on: Option<String>,
    /// Source documenting the incident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Fields the engine does not read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Controversy {
    /// Creates a controversy with only the fields needed for gating.
    pub fn new(id: impl Into<RecordId>, brand_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand_name: brand_name.into(),
            title: None,
            description: None,
            occurred_on: None,
            source_url: None,
            extra: Map::new(),
        }
    }
}

impl Signals for Controversy {
    fn brand_name(&self) -> &str {
        &self.brand_name
    }

    fn description(&self) -> Option<&str> {
        self.title.as_deref().or(self.description.as_deref())
    }

    fn occurred_on(&self) -> Option<&str> {
        self.occurred_on.as_deref()
    }

    fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}

/// Where a proposition stands in moderation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropositionStatus {
    /// Awaiting a moderator.
    #[default]
    #[serde(rename = "en_attente", alias = "pending")]
    Pending,
    /// Accepted and published as a controversy.
    #[serde(rename = "approuve", alias = "approved")]
    Approved,
    /// Turned down.
    #[serde(rename = "rejete", alias = "rejected")]
    Rejected,
}

impl PropositionStatus {
    /// Wire value of the status, as used in store filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "en_attente",
            Self::Approved => "approuve",
            Self::Rejected => "rejete",
        }
    }
}

/// A community-submitted report.
///
/// Same shape as a [`Controversy`], plus a moderation status. Records without a status are
/// treated as pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposition {
    /// Primary key.
    pub id: RecordId,
    /// Name of the brand involved.
    #[serde(rename = "marque_nom", alias = "brand_name")]
    pub brand_name: String,
    /// Headline.
    #[serde(rename = "titre", alias = "title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer text, used when there is no title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the incident happened.
    #[serde(rename = "date", alias = "occurred_on", default, skip_serializing_if = "Option::is_none")]
    pub occurred_on: Option<String>,
    /// Source documenting the incident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Moderation status. Missing or `null` means pending.
    #[serde(
        rename = "statut",
        alias = "status",
        default,
        deserialize_with = "null_is_pending"
    )]
    pub status: PropositionStatus,
    /// Fields the engine does not read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Proposition {
    /// Creates a pending proposition with only the fields needed for gating.
    pub fn new(id: impl Into<RecordId>, brand_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand_name: brand_name.into(),
            title: None,
            description: None,
            occurred_on: None,
            source_url: None,
            status: PropositionStatus::Pending,
            extra: Map::new(),
        }
    }

    /// Whether the proposition still awaits moderation.
    pub fn is_pending(&self) -> bool {
        self.status == PropositionStatus::Pending
    }
}

impl Signals for Proposition {
    fn brand_name(&self) -> &str {
        &self.brand_name
    }

    fn description(&self) -> Option<&str> {
        self.title.as_deref().or(self.description.as_deref())
    }

    fn occurred_on(&self) -> Option<&str> {
        self.occurred_on.as_deref()
    }

    fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}

/// Reads a status that may be `null`.
fn null_is_pending<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PropositionStatus, D::Error> {
    Ok(Option::<PropositionStatus>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
