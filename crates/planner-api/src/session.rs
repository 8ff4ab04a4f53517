//! Session workflows
//!
//! A [`Session`] ties the HTTP client to one [`SessionStore`]. Each workflow
//! validates its input, flags `loading` for the duration of the request,
//! adapts the response into the domain model and reports the outcome through
//! the [`Notifier`]: one notification per call, success or error.
//!
//! Workflows take `&mut self`, so calls on one session never interleave.

use crate::client::PlannerClient;
use crate::error::{ApiError, Result};
use crate::notify::{LogNotifier, Notifier};
use climate_model::validate::{validate_coordinates, validate_location, validate_years};
use climate_model::wire::{
    FootprintCategories, FootprintSummary, PredictionRequest, RiskAssessmentRequest,
};
use climate_model::{
    action_plan_request, adapt_action_plan, adapt_footprint_calculation, adapt_prediction,
    adapt_risk_assessment, adapt_scenario, ActionPlan, CarbonFootprint, FootprintActivity,
    Prediction, RiskAssessment, ScenarioName, ValidationError,
};
use session_store::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Scenario fetched alongside every forecast
pub const COMPANION_SCENARIO: ScenarioName = ScenarioName::Moderate;

pub struct Session {
    client: PlannerClient,
    store: SessionStore,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub fn new(client: PlannerClient) -> Self {
        Self {
            client,
            store: SessionStore::new(),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    pub fn client(&self) -> &PlannerClient {
        &self.client
    }

    // ------------------------------------------------------------------
    // Risk
    // ------------------------------------------------------------------

    pub async fn assess(&mut self, location: &str) -> Result<RiskAssessment> {
        let location = self.reject(validate_location(location))?;
        info!(%location, "assessing climate risk");

        self.begin();
        let result = self
            .client
            .assess_risk(&RiskAssessmentRequest { location })
            .await;
        let wire = self.finish(result)?;

        let assessment = adapt_risk_assessment(&wire);
        self.store.set_current_assessment(assessment.clone());
        self.store.add_assessment_to_history(assessment.clone());

        info!(
            id = %assessment.id,
            overall_risk = assessment.overall_risk,
            level = %assessment.risk_level,
            factors = assessment.risks.len(),
            "risk assessment stored"
        );
        self.notifier.success("Risk assessment completed!");
        Ok(assessment)
    }

    /// Raw assessment history for a location, as the backend sends it
    pub async fn risk_history(&mut self, location: &str) -> Result<serde_json::Value> {
        let location = self.reject(validate_location(location))?;

        self.begin();
        let result = self.client.risk_history(&location).await;
        let history = self.finish(result)?;

        self.notifier.success("Risk history loaded");
        Ok(history)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Plan for the current assessment. Fails without a request when no
    /// assessment has been made yet.
    pub async fn generate_action_plan(&mut self) -> Result<ActionPlan> {
        let assessment = match self.store.current_assessment() {
            Some(a) => a.clone(),
            None => return self.reject(Err(ValidationError::NoAssessment)),
        };
        let request = action_plan_request(&assessment);
        info!(assessment_id = %assessment.id, location = %request.location, "generating action plan");

        self.begin();
        let result = self.client.generate_action_plan(&request).await;
        let wire = self.finish(result)?;

        let plan = adapt_action_plan(&wire, &assessment.id);
        self.store.set_current_action_plan(plan.clone());
        self.store.add_action_plan_to_history(plan.clone());

        info!(id = %plan.id, actions = plan.actions.len(), "action plan stored");
        self.notifier.success("Action plan generated!");
        Ok(plan)
    }

    // ------------------------------------------------------------------
    // Footprint
    // ------------------------------------------------------------------

    pub async fn log_footprint(&mut self, activity: FootprintActivity) -> Result<CarbonFootprint> {
        let request = activity.into_request(self.store.user_id());
        let request = self.reject(request)?;
        info!(category = %request.category, activity = %request.activity_type, amount = request.amount, "logging activity");

        self.begin();
        let result = self.client.calculate_footprint(&request).await;
        let calculation = self.finish(result)?;

        let footprint = adapt_footprint_calculation(&calculation, self.store.user_id());
        self.store.set_current_footprint(footprint.clone());
        self.store.add_footprint_to_history(footprint.clone());

        self.notifier.success(&format!(
            "Calculated: {:.2} kg CO2",
            calculation.emissions_kg.unwrap_or(0.0)
        ));
        Ok(footprint)
    }

    /// Backend totals for this session's user
    pub async fn footprint_summary(&mut self) -> Result<FootprintSummary> {
        self.begin();
        let result = self.client.footprint_summary(self.store.user_id()).await;
        let summary = self.finish(result)?;

        self.notifier.success("Footprint summary loaded");
        Ok(summary)
    }

    pub async fn footprint_categories(&mut self) -> Result<FootprintCategories> {
        self.begin();
        let result = self.client.footprint_categories().await;
        let categories = self.finish(result)?;

        self.notifier.success("Footprint categories loaded");
        Ok(categories)
    }

    // ------------------------------------------------------------------
    // Predictions
    // ------------------------------------------------------------------

    /// Forecast and companion scenario, fetched concurrently. Either failing
    /// fails the whole call and nothing is stored.
    pub async fn generate_predictions(&mut self, lat: f64, lon: f64, years: u32) -> Result<Prediction> {
        self.reject(validate_coordinates(lat, lon))?;
        self.reject(validate_years(years))?;
        info!(lat, lon, years, "generating predictions");

        let request = PredictionRequest {
            latitude: lat,
            longitude: lon,
            years,
        };

        self.begin();
        let result = tokio::try_join!(
            self.client.generate_predictions(&request),
            self.client.climate_scenario(lat, lon, COMPANION_SCENARIO),
        );
        let (forecast, scenario) = self.finish(result)?;

        let assessment_id = self
            .store
            .current_assessment()
            .map(|a| a.id.clone())
            .unwrap_or_default();
        let mut prediction = adapt_prediction(&forecast, &assessment_id);
        if let Some(extra) = adapt_scenario(&scenario) {
            if !prediction.scenarios.iter().any(|s| s.name == extra.name) {
                prediction.scenarios.push(extra);
            }
        }

        self.store.set_current_prediction(prediction.clone());
        self.store.add_prediction_to_history(prediction.clone());

        info!(id = %prediction.id, scenarios = prediction.scenarios.len(), "prediction stored");
        self.notifier.success("Predictions generated!");
        Ok(prediction)
    }

    // ------------------------------------------------------------------
    // Outcome plumbing
    // ------------------------------------------------------------------

    /// Validation failures are reported but never touch the store.
    fn reject<T>(&self, result: std::result::Result<T, ValidationError>) -> Result<T> {
        result.map_err(|e| {
            self.notifier.error(&e.to_string());
            ApiError::Validation(e)
        })
    }

    fn begin(&mut self) {
        self.store.set_loading(true);
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        self.store.set_loading(false);
        result.map_err(|e| {
            let message = e.user_message();
            warn!(error = %e, "backend request failed");
            self.store.set_error(Some(message.clone()));
            self.notifier.error(&message);
            e
        })
    }
}
