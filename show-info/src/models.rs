use crate::filter;
use chrono::NaiveDate;
use getset::Getters;
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "graphql")]
use async_graphql::SimpleObject;

/// One show as returned by the show index endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, Getters)]
#[get = "pub"]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct Show {
    id: u64,
    name: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, deserialize_with = "blank_date")]
    premiered: Option<NaiveDate>,
    #[serde(default)]
    image: Option<Image>,
    #[serde(default)]
    summary: Option<String>,
}

/// One episode of a show. Most fields are optional; the API leaves them
/// null for unaired or sparsely documented episodes.
#[derive(Clone, Debug, Serialize, Deserialize, Getters)]
#[get = "pub"]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct Episode {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    season: u32,
    number: u32,
    #[serde(default, deserialize_with = "blank_date")]
    airdate: Option<NaiveDate>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    image: Option<Image>,
    #[serde(default)]
    summary: Option<String>,
}

impl Episode {
    /// `SxxEyy` production code.
    pub fn code(&self) -> String {
        filter::episode_code(self.season, self.number)
    }

    /// `SxxEyy - Name` label used for listings.
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.code(), self.name.as_deref().unwrap_or("Untitled"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Getters)]
#[get = "pub"]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct Image {
    #[serde(default)]
    medium: Option<String>,
    #[serde(default)]
    original: Option<String>,
}

impl Image {
    /// Preferred rendition, medium first.
    pub fn best(&self) -> Option<&str> {
        self.medium.as_deref().or(self.original.as_deref())
    }
}

/// Unaired entries carry a null, empty or unparseable date.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|date| !date.is_empty())
        .and_then(|date| NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()))
}
