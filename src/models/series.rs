use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{QualityLinks, assign, assign_text, present};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStatus {
    Ongoing,
    Completed,
    Cancelled,
    Hiatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: i32,
    pub title: String,
    pub start_year: i32,
    pub genre: String,
    pub status: SeriesStatus,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeries {
    pub title: String,
    pub start_year: i32,
    pub genre: String,
    pub status: SeriesStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl NewSeries {
    #[must_use]
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Series {
        Series {
            id,
            title: self.title,
            start_year: self.start_year,
            genre: self.genre,
            status: self.status,
            description: present(self.description),
            thumbnail_url: present(self.thumbnail_url),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesPatch {
    pub title: Option<String>,
    pub start_year: Option<i32>,
    pub genre: Option<String>,
    pub status: Option<SeriesStatus>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl SeriesPatch {
    pub fn apply(self, series: &mut Series) {
        assign(&mut series.title, self.title);
        assign(&mut series.start_year, self.start_year);
        assign(&mut series.genre, self.genre);
        assign(&mut series.status, self.status);
        assign_text(&mut series.description, self.description);
        assign_text(&mut series.thumbnail_url, self.thumbnail_url);
    }
}

/// A single episode of a [`Series`]. `series_id` is a soft reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: i32,
    pub series_id: Option<i32>,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    /// Minutes.
    pub duration: Option<i32>,
    #[serde(flatten)]
    pub links: QualityLinks,
    pub subtitle_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEpisode {
    #[serde(default)]
    pub series_id: Option<i32>,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(flatten)]
    pub links: QualityLinks,
    #[serde(default)]
    pub subtitle_link: Option<String>,
}

impl NewEpisode {
    #[must_use]
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Episode {
        Episode {
            id,
            series_id: self.series_id,
            season_number: self.season_number,
            episode_number: self.episode_number,
            title: self.title,
            duration: self.duration,
            links: self.links.normalized(),
            subtitle_link: present(self.subtitle_link),
            created_at,
        }
    }
}
