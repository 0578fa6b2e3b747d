//! Travel log data model.
//!
//! A [`Document`] is one travel log: a title, a free-form trip date label, and the ordered list
//! of places visited. Documents are replaced wholesale at the checkin level; there is no
//! field-by-field editing API.

use crate::ordering::sort_checkins;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use travelog_types::NonEmptyText;

/// One travel log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    /// Trip-level label such as `2024-01-27–30`. Never parsed as a timestamp.
    pub date: String,
    pub checkins: Vec<Checkin>,
}

/// A visited location within a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    pub location: String,
    pub id: String,
    /// ISO-8601 timestamp with an explicit numeric offset once normalised.
    pub datetime: String,
    #[serde(rename = "fsqPlace", default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Place lookup result attached to a checkin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub fsq_id: String,
    pub name: String,
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Place {
    /// Both coordinates, if and only if both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Checkin {
    /// A checkin as the parser opens it on a `##` heading: every other field empty.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Reads a single checkin from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Deserialization` if the JSON does not describe a checkin.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(CoreError::Deserialization)
    }
}

impl Document {
    /// Creates a new document with no checkins.
    pub fn new(title: NonEmptyText, date: impl Into<String>) -> Self {
        Self {
            title: title.into_inner(),
            date: date.into(),
            checkins: Vec::new(),
        }
    }

    /// Renders the document as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if serialization fails.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(CoreError::Serialization)
    }

    pub fn find_checkin(&self, id: &str) -> Option<&Checkin> {
        self.checkins.iter().find(|c| c.id == id)
    }

    /// Replaces the checkin sharing `checkin.id`, or appends it, then re-sorts chronologically.
    ///
    /// Returns `true` when an existing checkin was replaced.
    pub fn upsert_checkin(&mut self, checkin: Checkin) -> bool {
        let replaced = match self.checkins.iter().position(|c| c.id == checkin.id) {
            Some(index) => {
                self.checkins[index] = checkin;
                true
            }
            None => {
                self.checkins.push(checkin);
                false
            }
        };
        sort_checkins(&mut self.checkins);
        replaced
    }

    /// Removes every checkin with the given id. Returns `true` if anything was removed.
    pub fn remove_checkin(&mut self, id: &str) -> bool {
        let before = self.checkins.len();
        self.checkins.retain(|c| c.id != id);
        self.checkins.len() != before
    }
}
