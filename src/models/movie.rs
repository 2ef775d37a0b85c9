use serde::{Deserialize, Serialize};

/// A single movie recommendation produced by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    /// Comma-separated genre labels, e.g. "Action, Thriller"
    pub genre: String,
    pub description: String,
    /// Rating out of 10
    pub rating: f64,
}

impl Movie {
    /// Splits the genre field into trimmed, non-empty labels
    pub fn genre_tokens(&self) -> Vec<&str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserializes_from_model_output() {
        let json = r#"{
            "title": "Inception",
            "year": 2010,
            "genre": "Action, Sci-Fi",
            "description": "A thief who steals corporate secrets through dream-sharing technology.",
            "rating": 8.8
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.genre, "Action, Sci-Fi");
        assert_eq!(movie.rating, 8.8);
    }

    #[test]
    fn test_genre_tokens_splits_on_commas() {
        let movie = Movie {
            title: "Heat".to_string(),
            year: 1995,
            genre: "Crime, Drama, Thriller".to_string(),
            description: "A group of professional bank robbers".to_string(),
            rating: 8.3,
        };

        assert_eq!(movie.genre_tokens(), vec!["Crime", "Drama", "Thriller"]);
    }

    #[test]
    fn test_genre_tokens_trims_irregular_spacing() {
        let movie = Movie {
            title: "Arrival".to_string(),
            year: 2016,
            genre: " Sci-Fi ,Drama,  Mystery ".to_string(),
            description: "A linguist works with the military".to_string(),
            rating: 7.9,
        };

        assert_eq!(movie.genre_tokens(), vec!["Sci-Fi", "Drama", "Mystery"]);
    }

    #[test]
    fn test_genre_tokens_drops_empty_segments() {
        let movie = Movie {
            title: "Unknown".to_string(),
            year: 2020,
            genre: "Drama,, ".to_string(),
            description: "".to_string(),
            rating: 6.0,
        };

        assert_eq!(movie.genre_tokens(), vec!["Drama"]);
    }
}
