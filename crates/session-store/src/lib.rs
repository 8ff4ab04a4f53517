//! Session Store
//!
//! Session-lifetime state for the planning client: one "current" value and a
//! most-recent-first history per entity kind, plus coarse loading / error
//! flags shared by every operation.
//!
//! The store is an ordinary value constructed once per session and passed
//! to whoever needs it; there is no global instance. Mutation goes through a
//! fixed action surface ([`StoreAction`] via [`SessionStore::dispatch`]),
//! with typed helpers for each action.
//!
//! Rules:
//! - setting a current value clears the error flag and leaves history alone
//! - history is prepend-only and unbounded
//! - [`StoreAction::Clear`] drops current values and the error flag but keeps
//!   every history list

use climate_model::ids::{fresh_id, USER_PREFIX};
use climate_model::{ActionPlan, CarbonFootprint, Prediction, RiskAssessment};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Current value plus most-recent-first history for one entity kind
#[derive(Debug, Clone, Serialize)]
pub struct Slot<T> {
    current: Option<T>,
    history: VecDeque<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            current: None,
            history: VecDeque::new(),
        }
    }
}

impl<T> Slot<T> {
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// history[0] is the most recently added value
    pub fn history(&self) -> &VecDeque<T> {
        &self.history
    }

    fn set_current(&mut self, value: T) {
        self.current = Some(value);
    }

    fn prepend(&mut self, value: T) {
        self.history.push_front(value);
    }

    fn clear_current(&mut self) {
        self.current = None;
    }
}

/// Every mutation the store accepts
#[derive(Debug, Clone)]
pub enum StoreAction {
    SetCurrentAssessment(RiskAssessment),
    AddAssessmentToHistory(RiskAssessment),
    SetCurrentActionPlan(ActionPlan),
    AddActionPlanToHistory(ActionPlan),
    SetCurrentFootprint(CarbonFootprint),
    AddFootprintToHistory(CarbonFootprint),
    SetCurrentPrediction(Prediction),
    AddPredictionToHistory(Prediction),
    SetLoading(bool),
    SetError(Option<String>),
    Clear,
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::SetCurrentAssessment(_) => "set_current_assessment",
            StoreAction::AddAssessmentToHistory(_) => "add_assessment_to_history",
            StoreAction::SetCurrentActionPlan(_) => "set_current_action_plan",
            StoreAction::AddActionPlanToHistory(_) => "add_action_plan_to_history",
            StoreAction::SetCurrentFootprint(_) => "set_current_footprint",
            StoreAction::AddFootprintToHistory(_) => "add_footprint_to_history",
            StoreAction::SetCurrentPrediction(_) => "set_current_prediction",
            StoreAction::AddPredictionToHistory(_) => "add_prediction_to_history",
            StoreAction::SetLoading(_) => "set_loading",
            StoreAction::SetError(_) => "set_error",
            StoreAction::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStore {
    user_id: String,
    assessments: Slot<RiskAssessment>,
    action_plans: Slot<ActionPlan>,
    footprints: Slot<CarbonFootprint>,
    predictions: Slot<Prediction>,
    loading: bool,
    error: Option<String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Fresh session with a generated `user_<random>` id
    pub fn new() -> Self {
        Self::with_user_id(fresh_id(USER_PREFIX))
    }

    pub fn with_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            assessments: Slot::default(),
            action_plans: Slot::default(),
            footprints: Slot::default(),
            predictions: Slot::default(),
            loading: false,
            error: None,
        }
    }

    /// Apply one action. All mutation funnels through here.
    pub fn dispatch(&mut self, action: StoreAction) {
        debug!(action = action.name(), "store dispatch");
        match action {
            StoreAction::SetCurrentAssessment(v) => {
                self.assessments.set_current(v);
                self.error = None;
            }
            StoreAction::AddAssessmentToHistory(v) => self.assessments.prepend(v),
            StoreAction::SetCurrentActionPlan(v) => {
                self.action_plans.set_current(v);
                self.error = None;
            }
            StoreAction::AddActionPlanToHistory(v) => self.action_plans.prepend(v),
            StoreAction::SetCurrentFootprint(v) => {
                self.footprints.set_current(v);
                self.error = None;
            }
            StoreAction::AddFootprintToHistory(v) => self.footprints.prepend(v),
            StoreAction::SetCurrentPrediction(v) => {
                self.predictions.set_current(v);
                self.error = None;
            }
            StoreAction::AddPredictionToHistory(v) => self.predictions.prepend(v),
            StoreAction::SetLoading(loading) => self.loading = loading,
            StoreAction::SetError(error) => self.error = error,
            StoreAction::Clear => {
                self.assessments.clear_current();
                self.action_plans.clear_current();
                self.footprints.clear_current();
                self.predictions.clear_current();
                self.error = None;
            }
        }
    }

    // Typed helpers

    pub fn set_current_assessment(&mut self, value: RiskAssessment) {
        self.dispatch(StoreAction::SetCurrentAssessment(value));
    }

    pub fn add_assessment_to_history(&mut self, value: RiskAssessment) {
        self.dispatch(StoreAction::AddAssessmentToHistory(value));
    }

    pub fn set_current_action_plan(&mut self, value: ActionPlan) {
        self.dispatch(StoreAction::SetCurrentActionPlan(value));
    }

    pub fn add_action_plan_to_history(&mut self, value: ActionPlan) {
        self.dispatch(StoreAction::AddActionPlanToHistory(value));
    }

    pub fn set_current_footprint(&mut self, value: CarbonFootprint) {
        self.dispatch(StoreAction::SetCurrentFootprint(value));
    }

    pub fn add_footprint_to_history(&mut self, value: CarbonFootprint) {
        self.dispatch(StoreAction::AddFootprintToHistory(value));
    }

    pub fn set_current_prediction(&mut self, value: Prediction) {
        self.dispatch(StoreAction::SetCurrentPrediction(value));
    }

    pub fn add_prediction_to_history(&mut self, value: Prediction) {
        self.dispatch(StoreAction::AddPredictionToHistory(value));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.dispatch(StoreAction::SetLoading(loading));
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.dispatch(StoreAction::SetError(error));
    }

    pub fn clear(&mut self) {
        self.dispatch(StoreAction::Clear);
    }

    // Readers

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_assessment(&self) -> Option<&RiskAssessment> {
        self.assessments.current()
    }

    pub fn assessment_history(&self) -> &VecDeque<RiskAssessment> {
        self.assessments.history()
    }

    pub fn current_action_plan(&self) -> Option<&ActionPlan> {
        self.action_plans.current()
    }

    pub fn action_plan_history(&self) -> &VecDeque<ActionPlan> {
        self.action_plans.history()
    }

    pub fn current_footprint(&self) -> Option<&CarbonFootprint> {
        self.footprints.current()
    }

    pub fn footprint_history(&self) -> &VecDeque<CarbonFootprint> {
        self.footprints.history()
    }

    pub fn current_prediction(&self) -> Option<&Prediction> {
        self.predictions.current()
    }

    pub fn prediction_history(&self) -> &VecDeque<Prediction> {
        self.predictions.history()
    }

    /// Resolve an `assessment_id` back-reference (current first, then history)
    pub fn find_assessment(&self, id: &str) -> Option<&RiskAssessment> {
        self.assessments
            .current()
            .into_iter()
            .chain(self.assessments.history())
            .find(|a| a.id == id)
    }

    /// Plans generated from the given assessment, most recent first
    pub fn plans_for_assessment<'a>(&'a self, assessment_id: &'a str) -> impl Iterator<Item = &'a ActionPlan> + 'a {
        self.action_plans
            .history()
            .iter()
            .filter(move |p| p.assessment_id == assessment_id)
    }
}
