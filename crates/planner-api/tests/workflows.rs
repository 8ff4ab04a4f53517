//! Session workflows against the in-process backend

mod common;

use climate_model::{
    EmissionCategory, FootprintActivity, HazardType, Level, ScenarioName, Timeline,
    ValidationError,
};
use common::*;
use planner_api::{ApiError, Notification};
use session_store::SessionStore;

#[tokio::test]
async fn test_assess_stores_current_and_history() {
    let backend = MockBackend::start().await;
    let (mut session, notifier) = backend.session();

    let assessment = session.assess("  Miami, FL ").await.unwrap();

    assert_eq!(backend.last_body(ASSESS).unwrap()["location"], "Miami, FL");
    assert_eq!(assessment.location, "Miami, FL");
    assert_eq!(assessment.risk_level, Level::High);
    assert_eq!(assessment.overall_risk, 68.0);
    assert_eq!(assessment.confidence, 0.85);

    let hazards: Vec<HazardType> = assessment.risks.iter().map(|r| r.hazard).collect();
    assert_eq!(
        hazards,
        vec![HazardType::Flood, HazardType::Hurricane, HazardType::Heatwave, HazardType::Drought]
    );
    assert_eq!(assessment.risks[0].level, Level::Critical);
    assert_eq!(assessment.risks[3].level, Level::Low);

    let store = session.store();
    assert_eq!(store.current_assessment().map(|a| a.id.as_str()), Some(assessment.id.as_str()));
    assert_eq!(store.assessment_history().len(), 1);
    assert!(!store.is_loading());
    assert!(store.error().is_none());
    assert_eq!(
        notifier.events(),
        vec![Notification::Success("Risk assessment completed!".into())]
    );
}

#[tokio::test]
async fn test_empty_location_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let (mut session, notifier) = backend.session();

    let err = session.assess("   ").await.unwrap_err();

    assert_eq!(err, ApiError::Validation(ValidationError::EmptyLocation));
    assert_eq!(backend.total_hits(), 0);
    assert_eq!(notifier.errors(), vec!["Please enter a location".to_string()]);
    assert!(session.store().error().is_none());
    assert!(session.store().current_assessment().is_none());
}

#[tokio::test]
async fn test_plan_requires_assessment() {
    let backend = MockBackend::start().await;
    let (mut session, notifier) = backend.session();

    let err = session.generate_action_plan().await.unwrap_err();

    assert_eq!(err, ApiError::Validation(ValidationError::NoAssessment));
    assert_eq!(backend.hits(PLAN), 0);
    assert_eq!(
        notifier.errors(),
        vec!["Please complete a risk assessment first".to_string()]
    );
}

#[tokio::test]
async fn test_plan_echoes_assessment_and_links_back() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    let assessment = session.assess("Miami, FL").await.unwrap();
    let plan = session.generate_action_plan().await.unwrap();

    let body = backend.last_body(PLAN).unwrap();
    assert_eq!(body["location"], "Miami, FL");
    let echoed = &body["risk_assessment"];
    assert_eq!(echoed["overall_risk_score"], 68.0);
    assert_eq!(echoed["risk_level"], "high");
    assert_eq!(echoed["risk_breakdown"]["drought"], 12.0);
    let top = echoed["top_risks"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["type"], "flood");
    assert_eq!(top[2]["type"], "heatwave");

    assert_eq!(plan.assessment_id, assessment.id);
    assert_eq!(plan.actions.len(), 2);
    assert_eq!(plan.actions[0].priority, Level::Critical);
    assert_eq!(plan.actions[0].estimated_time, "immediate");
    assert_eq!(plan.actions[1].description, "");
    assert_eq!(plan.estimated_cost, 15000.0);
    assert_eq!(plan.priority_matrix.risk_level, 3);
    assert_eq!(plan.priority_matrix.impact_score, 0.72);
    assert_eq!(plan.priority_matrix.timeline, Timeline::Immediate);

    let store = session.store();
    assert_eq!(store.plans_for_assessment(&assessment.id).count(), 1);
    assert_eq!(store.current_action_plan().map(|p| p.id.as_str()), Some(plan.id.as_str()));
}

#[tokio::test]
async fn test_log_footprint_uses_session_user() {
    let backend = MockBackend::start().await;
    let (session, notifier) = backend.session();
    let mut session = session.with_store(SessionStore::with_user_id("user_test"));

    let footprint = session
        .log_footprint(FootprintActivity::new("transportation", "car_gasoline", 100.0))
        .await
        .unwrap();

    let body = backend.last_body(FOOTPRINT).unwrap();
    assert_eq!(body["user_id"], "user_test");
    assert_eq!(body["unit"], "unit");

    assert_eq!(footprint.user_id, "user_test");
    assert_eq!(footprint.total_emissions, 25.0);
    assert_eq!(footprint.group(EmissionCategory::Transportation).get("car_gasoline"), 25.0);
    assert_eq!(footprint.group(EmissionCategory::Energy).total(), 0.0);
    assert_eq!(
        notifier.events(),
        vec![Notification::Success("Calculated: 25.00 kg CO2".into())]
    );
}

#[tokio::test]
async fn test_footprints_accumulate_newest_first() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    let first = session
        .log_footprint(FootprintActivity::new("energy", "electricity", 40.0).with_unit("kWh"))
        .await
        .unwrap();
    let second = session
        .log_footprint(FootprintActivity::new("food", "beef", 2.0).with_unit("kg"))
        .await
        .unwrap();

    let history = session.store().footprint_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);
    assert_eq!(session.store().current_footprint().map(|f| f.id.as_str()), Some(second.id.as_str()));
    assert_eq!(backend.last_body(FOOTPRINT).unwrap()["unit"], "kg");
}

#[tokio::test]
async fn test_invalid_footprint_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    let err = session
        .log_footprint(FootprintActivity::new("energy", "electricity", -5.0))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::InvalidAmount(-5.0)));

    let err = session
        .log_footprint(FootprintActivity::new(" ", "electricity", 5.0))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::MissingField("category")));

    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_footprint_reads_pass_through() {
    let backend = MockBackend::start().await;
    let (session, _) = backend.session();
    let mut session = session.with_store(SessionStore::with_user_id("user_test"));

    let summary = session.footprint_summary().await.unwrap();
    assert_eq!(summary.user_id.as_deref(), Some("user_test"));
    assert_eq!(summary.total_entries, Some(2));
    assert_eq!(summary.by_category.unwrap()["transportation"], 42.0);

    let categories = session.footprint_categories().await.unwrap();
    assert_eq!(categories.categories, vec!["transportation", "energy", "food", "goods"]);
    assert_eq!(categories.details["energy"], vec!["electricity", "natural_gas"]);

    assert!(session.store().footprint_history().is_empty());
}

#[tokio::test]
async fn test_risk_history_is_opaque() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    let history = session.risk_history("New York").await.unwrap();

    assert_eq!(history["location"], "New York");
    assert_eq!(history["assessments"][0]["risk_level"], "high");
    assert!(session.store().assessment_history().is_empty());
}

#[tokio::test]
async fn test_predictions_merge_companion_scenario() {
    let backend = MockBackend::start().await;
    let (mut session, notifier) = backend.session();

    let prediction = session.generate_predictions(25.76, -80.19, 10).await.unwrap();

    assert_eq!(backend.hits(PREDICT), 1);
    assert_eq!(backend.hits(SCENARIO), 1);
    assert_eq!(backend.last_body(PREDICT).unwrap()["years"], 10);

    assert_eq!(prediction.years, 10);
    assert_eq!(prediction.assessment_id, "");
    assert_eq!(prediction.scenarios.len(), 1);
    assert_eq!(prediction.scenarios[0].name, ScenarioName::Moderate);
    assert_eq!(prediction.scenarios[0].temperature_change, 2.5);
    assert_eq!(prediction.scenarios[0].sea_level_rise, 50.0);
    assert_eq!(
        prediction.scenarios[0].description,
        "Current policies continue, moderate climate action"
    );
    assert_eq!(prediction.scenarios[0].impacts, vec!["More frequent flooding"]);
    assert_eq!(prediction.scenarios[0].recommendations, vec!["Elevate critical equipment"]);

    let metrics: Vec<&str> = prediction.trends.iter().map(|t| t.metric.as_str()).collect();
    assert_eq!(metrics, vec!["temperature", "overall_risk", "sea_level"]);
    assert_eq!(prediction.trends[1].projection, vec![52.0, 61.0]);

    assert_eq!(prediction.extreme_events.len(), 1);
    assert_eq!(prediction.extreme_events[0].probability, 0.64);
    assert_eq!(prediction.extreme_events[0].severity, Level::High);

    assert_eq!(session.store().prediction_history().len(), 1);
    assert_eq!(notifier.events(), vec![Notification::Success("Predictions generated!".into())]);
}

#[tokio::test]
async fn test_predictions_link_to_current_assessment() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    let assessment = session.assess("Miami, FL").await.unwrap();
    let prediction = session.generate_predictions(25.76, -80.19, 5).await.unwrap();

    assert_eq!(prediction.assessment_id, assessment.id);
}

#[tokio::test]
async fn test_scenario_failure_fails_predictions_once() {
    let backend = MockBackend::start().await;
    backend.fail_always(SCENARIO, 400);
    let (mut session, notifier) = backend.session();

    let err = session.generate_predictions(25.76, -80.19, 10).await.unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(backend.hits(SCENARIO), 1);
    assert!(session.store().current_prediction().is_none());
    assert!(session.store().prediction_history().is_empty());
    assert_eq!(
        session.store().error(),
        Some("Invalid request. Please check your input.")
    );
    assert!(!session.store().is_loading());
    assert_eq!(notifier.events().len(), 1);
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_forecast_failure_fails_predictions_once() {
    let backend = MockBackend::start().await;
    backend.fail_always(PREDICT, 503);
    let (mut session, notifier) = backend.session();

    let err = session.generate_predictions(25.76, -80.19, 10).await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(backend.hits(PREDICT), 3);
    assert!(session.store().current_prediction().is_none());
    assert!(session.store().prediction_history().is_empty());
    assert_eq!(session.store().error(), Some("predict unavailable"));
    assert!(!session.store().is_loading());
    assert_eq!(notifier.events(), vec![Notification::Error("predict unavailable".into())]);
}

#[tokio::test]
async fn test_invalid_prediction_inputs() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    let err = session.generate_predictions(120.0, 0.0, 10).await.unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::InvalidLatitude(120.0)));

    let err = session.generate_predictions(10.0, 0.0, 0).await.unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::InvalidYears));

    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_success_clears_previous_error() {
    let backend = MockBackend::start().await;
    backend.fail(ASSESS, 404, 1);
    let (mut session, _) = backend.session();

    assert!(session.assess("Atlantis").await.is_err());
    assert_eq!(session.store().error(), Some("Resource not found."));

    session.assess("Miami, FL").await.unwrap();
    assert!(session.store().error().is_none());
    assert_eq!(session.store().assessment_history().len(), 1);
}

#[tokio::test]
async fn test_clear_keeps_history() {
    let backend = MockBackend::start().await;
    let (mut session, _) = backend.session();

    session.assess("Miami, FL").await.unwrap();
    session.generate_action_plan().await.unwrap();
    session.store_mut().clear();

    let store = session.store();
    assert!(store.current_assessment().is_none());
    assert!(store.current_action_plan().is_none());
    assert_eq!(store.assessment_history().len(), 1);
    assert_eq!(store.action_plan_history().len(), 1);
}
