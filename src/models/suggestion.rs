use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::present;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A movie proposed by a visitor, moderated by staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSuggestion {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub suggested_by: Option<String>,
    pub status: SuggestionStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public submission payload. There is no `status` field: any value the
/// client sends is dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovieSuggestion {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub suggested_by: Option<String>,
}

impl NewMovieSuggestion {
    #[must_use]
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> MovieSuggestion {
        MovieSuggestion {
            id,
            title: self.title,
            year: self.year,
            genre: present(self.genre),
            description: present(self.description),
            suggested_by: present(self.suggested_by),
            status: SuggestionStatus::Pending,
            admin_notes: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionStatusUpdate {
    pub status: SuggestionStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}
