use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreCategory {
    Movies,
    Series,
    Anime,
}

impl GenreCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Series => "series",
            Self::Anime => "anime",
        }
    }
}

impl fmt::Display for GenreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenreCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movies" => Ok(Self::Movies),
            "series" => Ok(Self::Series),
            "anime" => Ok(Self::Anime),
            other => Err(format!("unknown genre category: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub category: GenreCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGenre {
    pub name: String,
    pub category: GenreCategory,
}

impl NewGenre {
    #[must_use]
    pub fn into_record(self, id: i32) -> Genre {
        Genre {
            id,
            name: self.name,
            category: self.category,
        }
    }
}
