use std::collections::BTreeMap;

use serde::Serialize;

use super::movie::Movie;

/// Aggregated statistics over the current recommendation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub movie_count: usize,
    /// Mean rating, rounded to one decimal place
    pub average_rating: f64,
    pub top_rating: f64,
    /// Occurrences per genre label, counted across every movie's genre list
    pub genre_distribution: BTreeMap<String, usize>,
    /// Release years in recommendation order
    pub year_list: Vec<i32>,
}

impl AggregateSnapshot {
    /// Computes the snapshot; `None` when there is nothing to aggregate
    pub fn from_movies(movies: &[Movie]) -> Option<Self> {
        if movies.is_empty() {
            return None;
        }

        let total: f64 = movies.iter().map(|m| m.rating).sum();
        let average_rating = round_to_tenth(total / movies.len() as f64);
        let top_rating = movies
            .iter()
            .map(|m| m.rating)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut genre_distribution: BTreeMap<String, usize> = BTreeMap::new();
        for movie in movies {
            for token in movie.genre_tokens() {
                *genre_distribution.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let year_list = movies.iter().map(|m| m.year).collect();

        Some(Self {
            movie_count: movies.len(),
            average_rating,
            top_rating,
            genre_distribution,
            year_list,
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
