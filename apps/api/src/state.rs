use reqwest::Client;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pooled HTTP client shared by every per-request completion client.
    pub http: Client,
    pub config: Config,
}

impl AppState {
    pub fn new(http: Client, config: Config) -> Self {
        Self { http, config }
    }

    /// Completion client for one request. A non-blank key supplied with the request wins over
    /// the server's `GEMINI_API_KEY`.
    pub fn completion_client(&self, request_key: Option<&str>) -> Result<GeminiClient, AppError> {
        let key = request_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.gemini_api_key.clone())
            .ok_or_else(|| {
                AppError::UserInput("Please enter your Gemini API key".to_string())
            })?;
        Ok(GeminiClient::new(self.http.clone(), key))
    }
}
