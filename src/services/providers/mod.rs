/// Recommendation provider abstraction
///
/// This module provides a pluggable architecture for recommendation backends.
/// A provider turns a natural-language preference line into a list of movie
/// records; prompt construction and reply parsing are shared here so every
/// backend speaks the same payload format.
use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

pub mod anthropic;

/// Number of recommendations the prompt asks for
pub const EXPECTED_RECOMMENDATIONS: usize = 5;

/// Instruction block appended to every prompt; the example pins the JSON shape
const RESPONSE_FORMAT: &str = "Format your response as JSON only, with no preamble or markdown:\n[\n  {\n    \"title\": \"Movie Title\",\n    \"year\": 2020,\n    \"genre\": \"Action, Thriller\",\n    \"description\": \"Brief description here.\",\n    \"rating\": 8.5\n  }\n]";

/// Trait for recommendation providers
///
/// Providers only speak to their backend and normalize the reply; what the
/// session does with the records is decided upstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch movie recommendations for a preference line
    async fn fetch_recommendations(&self, preference: &str) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the full prompt sent to the model for a preference line
pub fn build_prompt(preference: &str) -> String {
    format!(
        "Based on this preference: \"{}\", recommend exactly 5 movies. For each movie, provide the title, year, genre, a brief description (2-3 sentences), and a rating out of 10.\n\n{}",
        preference, RESPONSE_FORMAT
    )
}

/// Removes a wrapping markdown code fence, if present
pub fn strip_code_fences(reply: &str) -> &str {
    reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parses the model's reply into movie records.
///
/// The reply must be a JSON array of movie objects, optionally wrapped in a
/// markdown fence. Off-count lists and out-of-scale ratings are tolerated
/// but logged, so a slightly sloppy reply still renders.
pub fn parse_recommendations(reply: &str) -> AppResult<Vec<Movie>> {
    let payload = strip_code_fences(reply);

    let movies: Vec<Movie> = serde_json::from_str(payload).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse recommendation payload");
        AppError::MalformedResponse(format!("Failed to parse recommendation payload: {}", e))
    })?;

    if movies.len() != EXPECTED_RECOMMENDATIONS {
        tracing::warn!(
            count = movies.len(),
            expected = EXPECTED_RECOMMENDATIONS,
            "Recommendation list has an unexpected length"
        );
    }

    for movie in &movies {
        if !(0.0..=10.0).contains(&movie.rating) {
            tracing::warn!(
                title = %movie.title,
                rating = movie.rating,
                "Rating falls outside the 0-10 scale"
            );
        }
    }

    Ok(movies)
}
