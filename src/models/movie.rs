use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{QualityLinks, assign, assign_text, present};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub links: QualityLinks,
    pub torrent_link: Option<String>,
    pub magnet_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub genre: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub links: QualityLinks,
    #[serde(default)]
    pub torrent_link: Option<String>,
    #[serde(default)]
    pub magnet_link: Option<String>,
}

impl NewMovie {
    #[must_use]
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Movie {
        Movie {
            id,
            title: self.title,
            year: self.year,
            genre: self.genre,
            rating: present(self.rating),
            description: present(self.description),
            thumbnail_url: present(self.thumbnail_url),
            links: self.links.normalized(),
            torrent_link: present(self.torrent_link),
            magnet_link: present(self.magnet_link),
            created_at,
        }
    }
}

/// Partial movie update; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub links: QualityLinks,
    pub torrent_link: Option<String>,
    pub magnet_link: Option<String>,
}

impl MoviePatch {
    pub fn apply(self, movie: &mut Movie) {
        assign(&mut movie.title, self.title);
        assign(&mut movie.year, self.year);
        assign(&mut movie.genre, self.genre);
        assign_text(&mut movie.rating, self.rating);
        assign_text(&mut movie.description, self.description);
        assign_text(&mut movie.thumbnail_url, self.thumbnail_url);
        movie.links.merge(self.links);
        assign_text(&mut movie.torrent_link, self.torrent_link);
        assign_text(&mut movie.magnet_link, self.magnet_link);
    }
}
