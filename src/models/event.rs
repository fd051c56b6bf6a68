use crate::utils::date;
use serde::{Deserialize, Serialize};

/// One scraped ticket-sales observation.
///
/// Serialized with camelCase keys: the JSON sink and the `reconcile --events`
/// input share the `{"title", "date", ..., "sourceUser"}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub date: String, // DD/MM/YYYY, '/'-separated
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub sold: u32,
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub source_user: String,
}

impl Event {
    /// Natural key used against the sheet. The organization tag is implied.
    pub fn key(&self) -> (&str, &str) {
        (self.title.as_str(), self.date.as_str())
    }
}

/// What the row extractor produces: an [`Event`] before it is tagged with the
/// credential it was collected under.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventRow {
    pub title: String,
    pub date: String,
    pub time: String,
    pub sold: u32,
    pub available: u32,
    pub location: String,
}

impl EventRow {
    pub fn tagged(self, source_user: &str) -> Event {
        Event {
            title: self.title,
            date: date::normalize_separators(&self.date),
            time: self.time,
            sold: self.sold,
            available: self.available,
            location: self.location,
            source_user: source_user.to_string(),
        }
    }
}
