//! Input rules checked after deserialization and before any write.
//!
//! A [`ValidationError`] names the offending field for the logs; the HTTP
//! response only ever carries the handler's generic message.

use thiserror::Error;

use crate::constants::limits::YEAR_RANGE;
use crate::models::{
    AnimePatch, MoviePatch, NewAnime, NewAnimeEpisode, NewEpisode, NewGenre, NewMovie,
    NewMovieSuggestion, NewSeries, SeriesPatch, SuggestionStatusUpdate,
};

#[derive(Debug, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}

fn optional_text(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| require_text(field, v))
}

fn check_year(field: &'static str, year: i32) -> Result<(), ValidationError> {
    if !YEAR_RANGE.contains(&year) {
        return Err(ValidationError::new(
            field,
            format!(
                "{year} is outside {}..={}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ),
        ));
    }
    Ok(())
}

fn optional_year(field: &'static str, year: Option<i32>) -> Result<(), ValidationError> {
    year.map_or(Ok(()), |y| check_year(field, y))
}

fn check_non_negative(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(field, "must not be negative"));
    }
    Ok(())
}

fn require_parent(field: &'static str, id: Option<i32>) -> Result<(), ValidationError> {
    match id {
        Some(id) if id > 0 => Ok(()),
        Some(id) => Err(ValidationError::new(field, format!("invalid id {id}"))),
        None => Err(ValidationError::new(field, "is required")),
    }
}

impl Validate for NewGenre {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Validate for NewMovie {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        check_year("year", self.year)?;
        require_text("genre", &self.genre)
    }
}

impl Validate for MoviePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_text("title", self.title.as_deref())?;
        optional_year("year", self.year)?;
        optional_text("genre", self.genre.as_deref())
    }
}

impl Validate for NewSeries {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        check_year("startYear", self.start_year)?;
        require_text("genre", &self.genre)
    }
}

impl Validate for SeriesPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_text("title", self.title.as_deref())?;
        optional_year("startYear", self.start_year)?;
        optional_text("genre", self.genre.as_deref())
    }
}

impl Validate for NewEpisode {
    fn validate(&self) -> Result<(), ValidationError> {
        require_parent("seriesId", self.series_id)?;
        check_non_negative("seasonNumber", self.season_number)?;
        check_non_negative("episodeNumber", self.episode_number)?;
        require_text("title", &self.title)?;
        match self.duration {
            Some(minutes) if minutes <= 0 => {
                Err(ValidationError::new("duration", "must be positive"))
            }
            _ => Ok(()),
        }
    }
}

impl Validate for NewAnime {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        check_year("year", self.year)?;
        require_text("genre", &self.genre)
    }
}

impl Validate for AnimePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_text("title", self.title.as_deref())?;
        optional_year("year", self.year)?;
        optional_text("genre", self.genre.as_deref())
    }
}

impl Validate for NewAnimeEpisode {
    fn validate(&self) -> Result<(), ValidationError> {
        require_parent("animeId", self.anime_id)?;
        check_non_negative("seasonNumber", self.season_number)?;
        check_non_negative("episodeNumber", self.episode_number)?;
        require_text("title", &self.title)
    }
}

impl Validate for NewMovieSuggestion {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        optional_year("year", self.year)
    }
}

impl Validate for SuggestionStatusUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenreCategory, SeriesStatus};

    fn movie() -> NewMovie {
        NewMovie {
            title: "Ran".into(),
            year: 1985,
            genre: "Drama".into(),
            ..NewMovie::default()
        }
    }

    #[test]
    fn test_new_movie_rules() {
        assert!(movie().validate().is_ok());

        let blank = NewMovie {
            title: "   ".into(),
            ..movie()
        };
        assert_eq!(blank.validate().unwrap_err().field, "title");

        let future = NewMovie {
            year: 3000,
            ..movie()
        };
        assert_eq!(future.validate().unwrap_err().field, "year");
    }

    #[test]
    fn test_patch_only_checks_supplied_fields() {
        assert!(MoviePatch::default().validate().is_ok());
        let patch = MoviePatch {
            genre: Some(" ".into()),
            ..MoviePatch::default()
        };
        assert_eq!(patch.validate().unwrap_err().field, "genre");
    }

    #[test]
    fn test_episode_requires_series() {
        let episode = NewEpisode {
            series_id: None,
            season_number: 1,
            episode_number: 1,
            title: "Pilot".into(),
            ..NewEpisode::default()
        };
        assert_eq!(episode.validate().unwrap_err().field, "seriesId");

        let with_parent = NewEpisode {
            series_id: Some(3),
            ..episode.clone()
        };
        assert!(with_parent.validate().is_ok());

        let zero_duration = NewEpisode {
            duration: Some(0),
            ..with_parent
        };
        assert_eq!(zero_duration.validate().unwrap_err().field, "duration");
    }

    #[test]
    fn test_anime_episode_requires_anime() {
        let episode = NewAnimeEpisode {
            anime_id: Some(0),
            season_number: 1,
            episode_number: 2,
            title: "Hunt".into(),
            ..NewAnimeEpisode::default()
        };
        assert_eq!(episode.validate().unwrap_err().field, "animeId");
    }

    #[test]
    fn test_series_and_genre_rules() {
        let series = NewSeries {
            title: "Twin Peaks".into(),
            start_year: 1990,
            genre: "Mystery".into(),
            status: SeriesStatus::Hiatus,
            description: None,
            thumbnail_url: None,
        };
        assert!(series.validate().is_ok());

        let genre = NewGenre {
            name: String::new(),
            category: GenreCategory::Series,
        };
        assert!(genre.validate().is_err());
    }

    #[test]
    fn test_suggestion_year_is_optional() {
        let suggestion = NewMovieSuggestion {
            title: "Tampopo".into(),
            ..NewMovieSuggestion::default()
        };
        assert!(suggestion.validate().is_ok());

        let bad_year = NewMovieSuggestion {
            year: Some(12),
            ..suggestion
        };
        assert!(bad_year.validate().is_err());
    }
}
