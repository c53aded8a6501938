use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{QualityLinks, assign, assign_text, present};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub studio: Option<String>,
    pub synopsis: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnime {
    pub title: String,
    pub year: i32,
    pub genre: String,
    #[serde(default)]
    pub studio: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl NewAnime {
    #[must_use]
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> Anime {
        Anime {
            id,
            title: self.title,
            year: self.year,
            genre: self.genre,
            studio: present(self.studio),
            synopsis: present(self.synopsis),
            thumbnail_url: present(self.thumbnail_url),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub studio: Option<String>,
    pub synopsis: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl AnimePatch {
    pub fn apply(self, anime: &mut Anime) {
        assign(&mut anime.title, self.title);
        assign(&mut anime.year, self.year);
        assign(&mut anime.genre, self.genre);
        assign_text(&mut anime.studio, self.studio);
        assign_text(&mut anime.synopsis, self.synopsis);
        assign_text(&mut anime.thumbnail_url, self.thumbnail_url);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeEpisode {
    pub id: i32,
    pub anime_id: Option<i32>,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    #[serde(flatten)]
    pub links: QualityLinks,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimeEpisode {
    #[serde(default)]
    pub anime_id: Option<i32>,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    #[serde(flatten)]
    pub links: QualityLinks,
}

impl NewAnimeEpisode {
    #[must_use]
    pub fn into_record(self, id: i32, created_at: DateTime<Utc>) -> AnimeEpisode {
        AnimeEpisode {
            id,
            anime_id: self.anime_id,
            season_number: self.season_number,
            episode_number: self.episode_number,
            title: self.title,
            links: self.links.normalized(),
            created_at,
        }
    }
}
