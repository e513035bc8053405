//! HTTP client for the CRM backend's gamification endpoints.

use brokerxp_core::{BrokerSkills, HeaderStats, LeaderboardEntry, Requirement, SkillActivityEvent};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("invalid JSON from {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Decode a response body, tagging failures with the endpoint path.
fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Json {
        path: path.to_string(),
        source,
    })
}

/// Read-only client for the backend's `/api/*` endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given backend base URL.
    ///
    /// `base_url` should be like `http://localhost:5000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        info!(url = %url, "fetching from backend");

        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        decode(path, &bytes)
    }

    /// Current cumulative XP per skill (`GET /api/skills`).
    pub async fn fetch_skills(&self) -> Result<BrokerSkills, ApiError> {
        let skills: BrokerSkills = self.get_json("/api/skills").await?;
        info!(total_level = skills.total_level(), "fetched skills");
        Ok(skills)
    }

    /// Full skill-activity ledger (`GET /api/skill-activities`).
    pub async fn fetch_activities(&self) -> Result<Vec<SkillActivityEvent>, ApiError> {
        let events: Vec<SkillActivityEvent> = self.get_json("/api/skill-activities").await?;
        info!(count = events.len(), "fetched skill activities");
        Ok(events)
    }

    /// Requirements, for lead-agent bonus lookups (`GET /api/requirements`).
    pub async fn fetch_requirements(&self) -> Result<Vec<Requirement>, ApiError> {
        let requirements: Vec<Requirement> = self.get_json("/api/requirements").await?;
        info!(count = requirements.len(), "fetched requirements");
        Ok(requirements)
    }

    /// Server-computed header numbers (`GET /api/stats/header`).
    pub async fn fetch_header_stats(&self) -> Result<HeaderStats, ApiError> {
        let stats: HeaderStats = self.get_json("/api/stats/header").await?;
        info!(
            total_level = stats.total_level,
            streak_days = stats.streak_days,
            "fetched header stats"
        );
        Ok(stats)
    }

    /// All brokers' skill snapshots (`GET /api/leaderboard`).
    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let entries: Vec<LeaderboardEntry> = self.get_json("/api/leaderboard").await?;
        info!(count = entries.len(), "fetched leaderboard");
        Ok(entries)
    }
}
