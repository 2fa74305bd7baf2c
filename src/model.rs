//! Author profile and publication records.
//!
//! These types define the persisted document layout. Field names follow the
//! stored JSON shape (`Title`, `H-index`, `_id`, ...) so records written by
//! earlier tooling load without translation.
//!
//! Unknown scalar values are `None` in memory and render as the `"N/A"`
//! sentinel in documents. On read, `"N/A"`, `null` and a missing key all map
//! back to `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel written in place of unknown scalar values.
pub const UNKNOWN_SENTINEL: &str = "N/A";

/// Which external source reported a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationSource {
    /// Structured publication index (DBLP). Minimal metadata, no abstracts.
    #[serde(rename = "index", alias = "DBLP")]
    Index,
    /// Academic profile service. Richer metadata including abstracts.
    #[serde(rename = "profile", alias = "Google Scholar")]
    Profile,
}

impl PublicationSource {
    /// Returns the stable label used in documents and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for PublicationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single publication as reported by one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(rename = "Title", default, deserialize_with = "unknown_text::deserialize_or_empty")]
    pub title: String,
    #[serde(rename = "Year", default, with = "unknown_text")]
    pub year: Option<String>,
    #[serde(rename = "Journal", default, with = "unknown_text")]
    pub journal: Option<String>,
    #[serde(rename = "Citations", default, with = "unknown_int")]
    pub citations: Option<i64>,
    /// Consumed during enrichment; never written to a stored record.
    #[serde(rename = "Abstract", default, skip_serializing)]
    pub abstract_text: Option<String>,
    #[serde(rename = "Source")]
    pub source: PublicationSource,
}

impl Publication {
    /// Creates a publication with only a title and source set.
    #[must_use]
    pub fn new(title: impl Into<String>, source: PublicationSource) -> Self {
        Self {
            title: title.into(),
            year: None,
            journal: None,
            citations: None,
            abstract_text: None,
            source,
        }
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    #[must_use]
    pub fn with_citations(mut self, citations: i64) -> Self {
        self.citations = Some(citations);
        self
    }

    #[must_use]
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }
}

/// Aggregate author record: profile metadata plus the merged publication list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Affiliation", default, with = "unknown_text")]
    pub affiliation: Option<String>,
    /// Declared interest terms first, then keywords appended by enrichment.
    #[serde(rename = "Interests", default, deserialize_with = "nullable_vec")]
    pub interests: Vec<String>,
    #[serde(rename = "Citations", default, with = "unknown_int")]
    pub citations: Option<i64>,
    #[serde(rename = "H-index", default, with = "unknown_int")]
    pub h_index: Option<i64>,
    #[serde(rename = "i10-index", default, with = "unknown_int")]
    pub i10_index: Option<i64>,
    #[serde(rename = "Publications", default, deserialize_with = "nullable_vec")]
    pub publications: Vec<Publication>,
}

impl AuthorProfile {
    /// Creates a profile with the given name and every other field unknown or empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: None,
            interests: Vec::new(),
            citations: None,
            h_index: None,
            i10_index: None,
            publications: Vec::new(),
        }
    }
}

/// Opaque record identifier minted by the record store on first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(i64);

impl StoreId {
    #[must_use]
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw row identifier.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl Serialize for StoreId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A persisted author profile with its store identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAuthor {
    #[serde(rename = "_id")]
    pub id: StoreId,
    #[serde(flatten)]
    pub profile: AuthorProfile,
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional text that renders as the unknown sentinel when absent.
mod unknown_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::UNKNOWN_SENTINEL;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(text)) if text != UNKNOWN_SENTINEL => Some(text),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
    }

    pub fn deserialize_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserialize(deserializer).map(Option::unwrap_or_default)
    }
}

/// Optional integer that renders as the unknown sentinel when absent.
mod unknown_int {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::UNKNOWN_SENTINEL;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(number) => serializer.serialize_i64(*number),
            None => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(number)) => number.as_i64(),
            Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
            _ => None,
        })
    }
}
