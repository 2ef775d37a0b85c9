use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    AggregateSnapshot, Genre, Movie, PreferenceOrigin, Session, SessionPhase, YearTag,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ToggleGenreRequest {
    pub genre: Genre,
}

#[derive(Debug, Deserialize)]
pub struct ToggleYearRequest {
    pub year: YearTag,
}

#[derive(Debug, Deserialize)]
pub struct SetPreferenceRequest {
    pub text: String,
}

/// Everything the client needs to render the session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub preference: String,
    pub preference_origin: PreferenceOrigin,
    pub phase: SessionPhase,
    pub selected_genres: Vec<Genre>,
    pub selected_years: Vec<YearTag>,
    pub movies: Vec<Movie>,
    pub error: Option<String>,
    pub searched: bool,
    pub show_analytics: bool,
    /// Present only while the analytics panel is shown and there are movies
    pub analytics: Option<AggregateSnapshot>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let analytics = if session.show_analytics {
            AggregateSnapshot::from_movies(&session.movies)
        } else {
            None
        };

        Self {
            preference: session.preference.text.clone(),
            preference_origin: session.preference.origin,
            phase: session.phase,
            selected_genres: session.selection.genres.clone(),
            selected_years: session.selection.years.clone(),
            movies: session.movies.clone(),
            error: session.error.clone(),
            searched: session.searched,
            show_analytics: session.show_analytics,
            analytics,
        }
    }
}

/// Selectable filter vocabulary for the dropdowns
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub genres: Vec<Genre>,
    pub years: Vec<YearTag>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    /// `null` when there are no movies to aggregate
    pub analytics: Option<AggregateSnapshot>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current session view
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.inner.read().await;
    Json(SessionView::from(&*session))
}

/// Selectable genres and year tags
pub async fn get_filters() -> Json<FiltersResponse> {
    Json(FiltersResponse {
        genres: Genre::ALL.to_vec(),
        years: YearTag::ALL.to_vec(),
    })
}

/// Aggregated statistics over the current movie list
pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    let session = state.inner.read().await;
    Json(AnalyticsResponse {
        analytics: AggregateSnapshot::from_movies(&session.movies),
    })
}

/// Toggle a genre tag and re-derive the preference line
pub async fn toggle_genre(
    State(state): State<AppState>,
    Json(request): Json<ToggleGenreRequest>,
) -> Json<SessionView> {
    let mut session = state.inner.write().await;
    session.toggle_genre(request.genre);
    Json(SessionView::from(&*session))
}

/// Toggle a year tag and re-derive the preference line
pub async fn toggle_year(
    State(state): State<AppState>,
    Json(request): Json<ToggleYearRequest>,
) -> Json<SessionView> {
    let mut session = state.inner.write().await;
    session.toggle_year(request.year);
    Json(SessionView::from(&*session))
}

/// Replace the preference line with manually entered text
pub async fn set_preference(
    State(state): State<AppState>,
    Json(request): Json<SetPreferenceRequest>,
) -> Json<SessionView> {
    let mut session = state.inner.write().await;
    session.edit_preference(request.text);
    Json(SessionView::from(&*session))
}

/// Flip the analytics panel visibility
pub async fn toggle_analytics(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.inner.write().await;
    session.toggle_analytics();
    Json(SessionView::from(&*session))
}

/// Reset the session; analytics visibility is kept
pub async fn clear_session(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.inner.write().await;
    session.clear();
    Json(SessionView::from(&*session))
}

/// Run a recommendation request against the configured provider.
///
/// The session lock is not held across the provider call. The completion is
/// applied only if its generation token is still current, so a clear or a
/// newer submit always wins over a slow reply.
pub async fn submit_preference(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<SessionView>> {
    let (token, preference) = {
        let mut session = state.inner.write().await;
        let token = session.begin_request()?;
        (token, session.preference.text.clone())
    };

    tracing::info!(
        request_id = %request_id,
        generation = %token,
        provider = state.provider.name(),
        "Processing recommendation request"
    );

    let outcome = state.provider.fetch_recommendations(&preference).await;

    let mut session = state.inner.write().await;
    let applied = match outcome {
        Ok(movies) => session.complete_success(token, movies),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                generation = %token,
                error = %e,
                "Recommendation request failed"
            );
            session.complete_failure(token)
        }
    };

    if let Err(AppError::StaleGeneration(stale)) = applied {
        tracing::debug!(
            request_id = %request_id,
            generation = stale,
            "Discarding completion for a superseded request"
        );
    }

    Ok(Json(SessionView::from(&*session)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;
    use crate::models::{PREFERENCE_REQUIRED_MESSAGE, RECOMMENDATION_FAILED_MESSAGE};
    use crate::services::providers::{MockRecommendationProvider, RecommendationProvider};

    fn sample_movies() -> Vec<Movie> {
        vec![Movie {
            title: "The Conversation".to_string(),
            year: 1974,
            genre: "Mystery, Thriller".to_string(),
            description: "A surveillance expert has a crisis of conscience.".to_string(),
            rating: 7.8,
        }]
    }

    fn movie_titled(title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            year: 2020,
            genre: "Drama".to_string(),
            description: String::new(),
            rating: 7.0,
        }
    }

    async fn set_preference_on(state: &AppState, text: &str) {
        let mut session = state.inner.write().await;
        session.edit_preference(text.to_string());
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_preference_without_calling_provider() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_fetch_recommendations().times(0);
        let state = AppState::new(Arc::new(provider));

        let result = submit_preference(State(state.clone()), Extension(RequestId::new())).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        let session = state.inner.read().await;
        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.error.as_deref(), Some(PREFERENCE_REQUIRED_MESSAGE));
    }

    #[tokio::test]
    async fn test_submit_success_applies_movies() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_recommendations()
            .times(1)
            .returning(|_| Ok(sample_movies()));
        let state = AppState::new(Arc::new(provider));
        set_preference_on(&state, "paranoid thrillers").await;

        let view = submit_preference(State(state.clone()), Extension(RequestId::new()))
            .await
            .unwrap()
            .0;

        assert_eq!(view.phase, SessionPhase::Success);
        assert_eq!(view.movies.len(), 1);
        assert_eq!(view.movies[0].title, "The Conversation");
        assert!(view.error.is_none());
        assert!(view.searched);
    }

    #[tokio::test]
    async fn test_submit_passes_preference_to_provider() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_recommendations()
            .withf(|preference| preference == "Horror movies from 1980-1999")
            .times(1)
            .returning(|_| Ok(sample_movies()));
        let state = AppState::new(Arc::new(provider));
        set_preference_on(&state, "Horror movies from 1980-1999").await;

        let result = submit_preference(State(state), Extension(RequestId::new())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_submit_failure_sets_generic_message() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_fetch_recommendations().times(1).returning(|_| {
            Err(AppError::ExternalApi(
                "Anthropic API returned status 500: overloaded".to_string(),
            ))
        });
        let state = AppState::new(Arc::new(provider));
        set_preference_on(&state, "courtroom dramas").await;

        let view = submit_preference(State(state.clone()), Extension(RequestId::new()))
            .await
            .unwrap()
            .0;

        assert_eq!(view.phase, SessionPhase::Failed);
        assert!(view.movies.is_empty());
        assert_eq!(view.error.as_deref(), Some(RECOMMENDATION_FAILED_MESSAGE));
    }

    /// First call parks between `entered` and `release`; later calls return
    /// straight away. Lets a test interleave session events with a request
    /// that is still in flight.
    struct GatedProvider {
        entered: Arc<Notify>,
        release: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RecommendationProvider for GatedProvider {
        async fn fetch_recommendations(&self, _preference: &str) -> AppResult<Vec<Movie>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                self.entered.notify_one();
                self.release.notified().await;
                Ok(vec![movie_titled("First")])
            } else {
                Ok(vec![movie_titled("Second")])
            }
        }

        fn name(&self) -> &'static str {
            "gated"
        }
    }

    #[tokio::test]
    async fn test_clear_discards_in_flight_completion() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let state = AppState::new(Arc::new(GatedProvider {
            entered: entered.clone(),
            release: release.clone(),
            calls: AtomicUsize::new(0),
        }));
        set_preference_on(&state, "heist movies").await;

        let submit_state = state.clone();
        let in_flight =
            tokio::spawn(
                async move { submit_preference(State(submit_state), Extension(RequestId::new())).await },
            );
        entered.notified().await;

        {
            let mut session = state.inner.write().await;
            session.clear();
        }
        release.notify_one();

        let view = in_flight.await.unwrap().unwrap().0;
        assert_eq!(view.phase, SessionPhase::Idle);
        assert!(view.movies.is_empty());

        let session = state.inner.read().await;
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(session.movies.is_empty());
        assert!(session.error.is_none());
    }

    #[tokio::test]
    async fn test_newer_submit_supersedes_older_one() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let state = AppState::new(Arc::new(GatedProvider {
            entered: entered.clone(),
            release: release.clone(),
            calls: AtomicUsize::new(0),
        }));
        set_preference_on(&state, "space operas").await;

        let submit_state = state.clone();
        let first =
            tokio::spawn(
                async move { submit_preference(State(submit_state), Extension(RequestId::new())).await },
            );
        entered.notified().await;

        let second = submit_preference(State(state.clone()), Extension(RequestId::new()))
            .await
            .unwrap()
            .0;
        assert_eq!(second.phase, SessionPhase::Success);
        assert_eq!(second.movies[0].title, "Second");

        release.notify_one();
        let stale = first.await.unwrap().unwrap().0;
        assert_eq!(stale.movies[0].title, "Second");

        let session = state.inner.read().await;
        assert_eq!(session.phase, SessionPhase::Success);
        assert_eq!(session.movies[0].title, "Second");
    }
}
