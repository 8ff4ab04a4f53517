//! HTTP client for the planning backend
//!
//! One method per endpoint. Every call goes through the configured
//! [`RetryPolicy`](crate::retry::RetryPolicy); non-2xx responses become
//! [`ApiError::Status`] carrying the backend's `message`/`detail`.

use crate::config::ClientConfig;
use crate::error::{error_message, ApiError, Result};
use climate_model::wire::{
    ActionPlanRequest, ActionPlanResponse, FootprintCalculation, FootprintCategories,
    FootprintRequest, FootprintSummary, PredictionRequest, PredictionResponse,
    RiskAssessmentRequest, RiskAssessmentResponse, ScenarioResponse,
};
use climate_model::ScenarioName;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PlannerClient {
    config: ClientConfig,
    base_url: Url,
    client: reqwest::Client,
}

impl PlannerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Risk
    // ------------------------------------------------------------------

    /// `POST /risk/assess`
    pub async fn assess_risk(&self, request: &RiskAssessmentRequest) -> Result<RiskAssessmentResponse> {
        self.post(&["risk", "assess"], request).await
    }

    /// `GET /risk/history/{location}`; the body is passed through untyped.
    pub async fn risk_history(&self, location: &str) -> Result<serde_json::Value> {
        self.get(&["risk", "history", location], &[]).await
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// `POST /actions/generate`
    pub async fn generate_action_plan(&self, request: &ActionPlanRequest) -> Result<ActionPlanResponse> {
        self.post(&["actions", "generate"], request).await
    }

    // ------------------------------------------------------------------
    // Footprint
    // ------------------------------------------------------------------

    /// `POST /footprint/calculate`
    pub async fn calculate_footprint(&self, request: &FootprintRequest) -> Result<FootprintCalculation> {
        self.post(&["footprint", "calculate"], request).await
    }

    /// `GET /footprint/user/{user_id}/summary`
    pub async fn footprint_summary(&self, user_id: &str) -> Result<FootprintSummary> {
        self.get(&["footprint", "user", user_id, "summary"], &[]).await
    }

    /// `GET /footprint/categories`
    pub async fn footprint_categories(&self) -> Result<FootprintCategories> {
        self.get(&["footprint", "categories"], &[]).await
    }

    // ------------------------------------------------------------------
    // Predictions
    // ------------------------------------------------------------------

    /// `POST /predictions/generate`
    pub async fn generate_predictions(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        self.post(&["predictions", "generate"], request).await
    }

    /// `GET /predictions/scenarios/{lat}/{lon}?scenario=`
    pub async fn climate_scenario(&self, lat: f64, lon: f64, scenario: ScenarioName) -> Result<ScenarioResponse> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        self.get(
            &["predictions", "scenarios", &lat, &lon],
            &[("scenario", scenario.as_str())],
        )
        .await
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfig(format!("{} cannot be used as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(segments)?;
        self.config
            .retry
            .run(url.path(), || self.send::<(), T>(Method::GET, url.clone(), query, None))
            .await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let url = self.url(segments)?;
        self.config
            .retry
            .run(url.path(), || self.send(Method::POST, url.clone(), &[], Some(body)))
            .await
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T> {
        debug!(%method, %url, "backend request");

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, &fallback),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }
}
