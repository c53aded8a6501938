//! Catalog records and the payloads used to create and patch them.
//!
//! Every record serializes with camelCase keys. Optional fields are always
//! present in the JSON output, as `null` when unset.

pub mod anime;
pub mod genre;
pub mod links;
pub mod movie;
pub mod series;
pub mod suggestion;
pub mod user;

use serde::Serialize;

pub use anime::{Anime, AnimeEpisode, AnimePatch, NewAnime, NewAnimeEpisode};
pub use genre::{Genre, GenreCategory, NewGenre};
pub use links::QualityLinks;
pub use movie::{Movie, MoviePatch, NewMovie};
pub use series::{Episode, NewEpisode, NewSeries, Series, SeriesPatch, SeriesStatus};
pub use suggestion::{MovieSuggestion, NewMovieSuggestion, SuggestionStatus, SuggestionStatusUpdate};
pub use user::{NewUser, User, UserInfo};

/// Dashboard counters returned by `GET /api/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub movies: usize,
    pub series: usize,
    pub anime: usize,
    pub genres: usize,
    /// Pending suggestions only.
    pub suggestions: usize,
}

/// Empty strings count as "not supplied".
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Overwrites `slot` only when the patch carries a value.
pub(crate) fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

pub(crate) fn assign_text(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = present(value) {
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_drops_empty_strings() {
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(None), None);
        assert_eq!(present(Some("PG-13".into())), Some("PG-13".into()));
    }

    #[test]
    fn test_assign_keeps_value_when_absent() {
        let mut year = 1999;
        assign(&mut year, None);
        assert_eq!(year, 1999);
        assign(&mut year, Some(2003));
        assert_eq!(year, 2003);

        let mut rating = Some("R".to_string());
        assign_text(&mut rating, None);
        assign_text(&mut rating, Some(String::new()));
        assert_eq!(rating.as_deref(), Some("R"));
    }
}
