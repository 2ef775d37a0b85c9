/// Anthropic Messages API provider
///
/// Sends the preference prompt to POST /v1/messages and parses the first
/// text block of the reply as a JSON movie list.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MessageParam, MessagesRequest, MessagesResponse, Movie},
    services::providers::{build_prompt, parse_recommendations, RecommendationProvider},
};
use reqwest::Client as HttpClient;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Creates a provider from application configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.anthropic_api_key.clone(),
            api_url: config.anthropic_api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for AnthropicProvider {
    async fn fetch_recommendations(&self, preference: &str) -> AppResult<Vec<Movie>> {
        let url = format!("{}/v1/messages", self.api_url);

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![MessageParam::user(build_prompt(preference))],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Anthropic API returned status {}: {}",
                status, body
            )));
        }

        let envelope: MessagesResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Messages API envelope");
            AppError::MalformedResponse(format!("Failed to parse Messages API envelope: {}", e))
        })?;

        let reply = envelope.first_text().ok_or_else(|| {
            AppError::MalformedResponse("Reply contained no text block".to_string())
        })?;

        let movies = parse_recommendations(reply)?;

        tracing::info!(
            movies = movies.len(),
            model = %self.model,
            provider = "anthropic",
            "Recommendations fetched"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
