use std::fmt::Display;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::movie::Movie;
use crate::models::preferences::{FilterSelection, Genre, PreferenceText, YearTag};

/// Shown when a request is submitted with nothing to go on
pub const PREFERENCE_REQUIRED_MESSAGE: &str =
    "Please enter your movie preferences or select category/year";

/// Shown when a recommendation request fails for any reason
pub const RECOMMENDATION_FAILED_MESSAGE: &str = "Failed to get recommendations. Please try again.";

/// Lifecycle of the current recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Token tying an in-flight request to the session state it started from.
///
/// Completions carry the token back; any later request or clear makes it
/// stale and the completion is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestGeneration(u64);

impl Display for RequestGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All client-visible state for one recommendation session
#[derive(Debug, Clone)]
pub struct Session {
    pub selection: FilterSelection,
    pub preference: PreferenceText,
    pub phase: SessionPhase,
    pub movies: Vec<Movie>,
    pub error: Option<String>,
    /// True once any request has been started, so an empty result list
    /// reads as "no results" rather than "not searched yet"
    pub searched: bool,
    pub show_analytics: bool,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a fresh idle session
    pub fn new() -> Self {
        Self {
            selection: FilterSelection::new(),
            preference: PreferenceText::default(),
            phase: SessionPhase::Idle,
            movies: Vec::new(),
            error: None,
            searched: false,
            show_analytics: false,
            generation: 0,
        }
    }

    /// Toggles a genre and re-derives the preference line from the selection.
    /// Any manually edited text is overwritten.
    pub fn toggle_genre(&mut self, genre: Genre) {
        self.selection.toggle_genre(genre);
        self.preference = PreferenceText::derived(self.selection.derive_preference());
    }

    /// Toggles a year tag and re-derives the preference line from the selection
    pub fn toggle_year(&mut self, tag: YearTag) {
        self.selection.toggle_year(tag);
        self.preference = PreferenceText::derived(self.selection.derive_preference());
    }

    /// Replaces the preference line with free text; the tag selection is
    /// left untouched
    pub fn edit_preference(&mut self, text: String) {
        self.preference = PreferenceText::manual(text);
    }

    pub fn toggle_analytics(&mut self) {
        self.show_analytics = !self.show_analytics;
    }

    /// Starts a recommendation request.
    ///
    /// A blank preference is rejected without a phase change. Otherwise the
    /// session enters `Loading`, previous results and error are dropped, and
    /// the returned token identifies this request. Starting a new request
    /// supersedes any still in flight.
    pub fn begin_request(&mut self) -> AppResult<RequestGeneration> {
        if self.preference.is_blank() {
            self.error = Some(PREFERENCE_REQUIRED_MESSAGE.to_string());
            return Err(AppError::InvalidInput(PREFERENCE_REQUIRED_MESSAGE.to_string()));
        }

        self.generation += 1;
        self.phase = SessionPhase::Loading;
        self.movies.clear();
        self.error = None;
        self.searched = true;
        Ok(RequestGeneration(self.generation))
    }

    /// Applies a successful completion, unless the token has gone stale
    pub fn complete_success(
        &mut self,
        token: RequestGeneration,
        movies: Vec<Movie>,
    ) -> AppResult<()> {
        self.ensure_current(token)?;
        self.phase = SessionPhase::Success;
        self.movies = movies;
        self.error = None;
        Ok(())
    }

    /// Applies a failed completion, unless the token has gone stale
    pub fn complete_failure(&mut self, token: RequestGeneration) -> AppResult<()> {
        self.ensure_current(token)?;
        self.phase = SessionPhase::Failed;
        self.movies.clear();
        self.error = Some(RECOMMENDATION_FAILED_MESSAGE.to_string());
        Ok(())
    }

    /// Resets the session except for analytics visibility. Any in-flight
    /// request becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.selection.clear();
        self.preference = PreferenceText::default();
        self.phase = SessionPhase::Idle;
        self.movies.clear();
        self.error = None;
        self.searched = false;
    }

    fn ensure_current(&self, token: RequestGeneration) -> AppResult<()> {
        if token.0 == self.generation {
            Ok(())
        } else {
            Err(AppError::StaleGeneration(token.0))
        }
    }
}
