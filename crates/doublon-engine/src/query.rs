//! Similarity queries and their raw request form.

use std::{fmt, str::FromStr};

use doublon_similarity::Signals;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// What the caller is about to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    /// A new brand. Only brands are searched.
    #[serde(rename = "marque", alias = "brand")]
    Brand,
    /// A new controversy report. Brands, controversies and propositions are searched.
    #[serde(rename = "evenement", alias = "controversy")]
    Controversy,
}

impl QueryKind {
    /// Wire value of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "marque",
            Self::Controversy => "evenement",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "marque" | "brand" => Ok(Self::Brand),
            "evenement" | "événement" | "controversy" => Ok(Self::Controversy),
            _ => Err(EngineError::InvalidKind(s.to_string())),
        }
    }
}

/// Query string parameters as they arrive over HTTP.
///
/// Every field is optional here; [`Query::try_from`] enforces which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    /// `marque` or `evenement`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Brand name.
    #[serde(rename = "marque_nom")]
    pub brand_name: Option<String>,
    /// Free text describing the report.
    pub description: Option<String>,
    /// Incident date.
    #[serde(rename = "date")]
    pub occurred_on: Option<String>,
    /// Source URL.
    pub source_url: Option<String>,
}

/// A validated similarity query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Which collections to search.
    pub kind: QueryKind,
    /// Brand name, never blank.
    pub brand_name: String,
    /// Free text describing the report.
    pub description: Option<String>,
    /// Incident date.
    pub occurred_on: Option<String>,
    /// Source URL.
    pub source_url: Option<String>,
}

impl Query {
    /// A query for a new brand.
    pub fn brand(name: impl Into<String>) -> Self {
        Self::new(QueryKind::Brand, name)
    }

    /// A query for a new controversy report.
    pub fn controversy(brand_name: impl Into<String>) -> Self {
        Self::new(QueryKind::Controversy, brand_name)
    }

    /// A query with only the required fields.
    fn new(kind: QueryKind, brand_name: impl Into<String>) -> Self {
        Self {
            kind,
            brand_name: brand_name.into(),
            description: None,
            occurred_on: None,
            source_url: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the incident date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.occurred_on = Some(date.into());
        self
    }

    /// Sets the source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

impl TryFrom<SearchParams> for Query {
    type Error = EngineError;

    /// Validates raw parameters. Blank values count as missing.
    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let kind = present(params.kind);
        let brand_name = present(params.brand_name);

        let (kind, brand_name) = match (kind, brand_name) {
            (Some(kind), Some(brand_name)) => (kind, brand_name),
            (kind, brand_name) => {
                let mut missing = Vec::new();
                if kind.is_none() {
                    missing.push("type");
                }
                if brand_name.is_none() {
                    missing.push("marque_nom");
                }
                return Err(EngineError::MissingParameters(missing));
            }
        };

        Ok(Self {
            kind: kind.parse()?,
            brand_name,
            description: present(params.description),
            occurred_on: present(params.occurred_on),
            source_url: present(params.source_url),
        })
    }
}

/// Trims a parameter, mapping blank values to `None`.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Signals for Query {
    fn brand_name(&self) -> &str {
        &self.brand_name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn occurred_on(&self) -> Option<&str> {
        self.occurred_on.as_deref()
    }

    fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}
