use crate::models::{GenreCategory, NewGenre};

const MOVIE_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Thriller",
    "Romance",
    "Fantasy",
    "Mystery",
];

const SERIES_GENRES: &[&str] = &[
    "Crime",
    "Documentary",
    "Reality",
    "Talk Show",
    "News",
    "Game Show",
];

const ANIME_GENRES: &[&str] = &[
    "Shonen",
    "Shojo",
    "Seinen",
    "Josei",
    "Mecha",
    "Isekai",
    "Slice of Life",
    "Sports",
    "Supernatural",
];

/// Genres every fresh store starts with, in insertion order.
pub fn default_genres() -> impl Iterator<Item = NewGenre> {
    let tag = |category: GenreCategory| {
        move |name: &&str| NewGenre {
            name: (*name).to_string(),
            category,
        }
    };

    MOVIE_GENRES
        .iter()
        .map(tag(GenreCategory::Movies))
        .chain(SERIES_GENRES.iter().map(tag(GenreCategory::Series)))
        .chain(ANIME_GENRES.iter().map(tag(GenreCategory::Anime)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        let genres: Vec<_> = default_genres().collect();
        assert_eq!(genres.len(), 25);
        let count = |c| genres.iter().filter(|g| g.category == c).count();
        assert_eq!(count(GenreCategory::Movies), 10);
        assert_eq!(count(GenreCategory::Series), 6);
        assert_eq!(count(GenreCategory::Anime), 9);
    }
}
