//! In-process planning backend for integration tests
//!
//! Serves canned responses on an ephemeral port, counts hits per route and
//! keeps the last request body. Routes can be told to fail with a status
//! for their first N hits.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use planner_api::{ClientConfig, PlannerClient, RecordingNotifier, RetryPolicy, Session};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub const ASSESS: &str = "assess";
pub const HISTORY: &str = "history";
pub const PLAN: &str = "plan";
pub const FOOTPRINT: &str = "footprint";
pub const SUMMARY: &str = "summary";
pub const CATEGORIES: &str = "categories";
pub const PREDICT: &str = "predict";
pub const SCENARIO: &str = "scenario";

#[derive(Debug, Clone, Copy)]
struct Failure {
    status: u16,
    remaining: usize,
}

#[derive(Clone, Default)]
struct MockState {
    hits: Arc<Mutex<HashMap<&'static str, usize>>>,
    bodies: Arc<Mutex<HashMap<&'static str, Value>>>,
    failures: Arc<Mutex<HashMap<&'static str, Failure>>>,
}

impl MockState {
    fn respond(&self, route: &'static str, body: Option<Value>, ok: Value) -> Response {
        self.respond_raw(route, body, ok.to_string())
    }

    /// `ok` goes out byte for byte, so object key order is the caller's
    fn respond_raw(&self, route: &'static str, body: Option<Value>, ok: String) -> Response {
        *self.hits.lock().unwrap().entry(route).or_insert(0) += 1;
        if let Some(body) = body {
            self.bodies.lock().unwrap().insert(route, body);
        }

        let mut failures = self.failures.lock().unwrap();
        if let Some(failure) = failures.get_mut(route) {
            if failure.remaining > 0 {
                failure.remaining -= 1;
                let status = StatusCode::from_u16(failure.status).unwrap();
                return (status, Json(json!({ "detail": format!("{} unavailable", route) })))
                    .into_response();
            }
        }

        ([(header::CONTENT_TYPE, "application/json")], ok).into_response()
    }
}

pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Fail the next `times` hits on `route` with `status`
    pub fn fail(&self, route: &'static str, status: u16, times: usize) {
        self.state.failures.lock().unwrap().insert(
            route,
            Failure {
                status,
                remaining: times,
            },
        );
    }

    pub fn fail_always(&self, route: &'static str, status: u16) {
        self.fail(route, status, usize::MAX);
    }

    pub fn hits(&self, route: &str) -> usize {
        self.state.hits.lock().unwrap().get(route).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().values().sum()
    }

    pub fn last_body(&self, route: &str) -> Option<Value> {
        self.state.bodies.lock().unwrap().get(route).cloned()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client with fast retries: three attempts, 1 ms base delay
    pub fn client(&self) -> PlannerClient {
        let config = ClientConfig::new(self.base_url()).with_retry(RetryPolicy::new(3, 1));
        PlannerClient::new(config).unwrap()
    }

    pub fn session(&self) -> (Session, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let session = Session::new(self.client()).with_notifier(notifier.clone());
        (session, notifier)
    }
}

fn router(state: MockState) -> Router {
    let api = Router::new()
        .route("/risk/assess", post(assess))
        .route("/risk/history/:location", get(history))
        .route("/actions/generate", post(plan))
        .route("/footprint/calculate", post(footprint))
        .route("/footprint/user/:user_id/summary", get(summary))
        .route("/footprint/categories", get(categories))
        .route("/predictions/generate", post(predict))
        .route("/predictions/scenarios/:lat/:lon", get(scenario))
        .with_state(state);

    Router::new().nest("/api", api)
}

async fn assess(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let location = body["location"].as_str().unwrap_or_default().to_string();
    state.respond_raw(ASSESS, Some(body), assessment_body(&location))
}

async fn history(State(state): State<MockState>, Path(location): Path<String>) -> Response {
    let ok = format!(
        r#"{{"location": {}, "assessments": [{}]}}"#,
        Value::from(location.as_str()),
        assessment_body(&location)
    );
    state.respond_raw(HISTORY, None, ok)
}

async fn plan(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let ok = json!({
        "location": body["location"],
        "risk_level": "high",
        "actions": [
            {
                "title": "Install flood barriers",
                "description": "Deploy removable barriers at ground-floor entrances",
                "priority": "critical",
                "category": "infrastructure",
                "estimated_cost": 12000.0,
                "impact_score": 0.8,
                "timeframe": "immediate"
            },
            {
                "title": "Cooling centre plan",
                "priority": "medium",
                "category": "community",
                "estimated_cost": 3000.0,
                "timeframe": "medium-term"
            }
        ],
        "total_actions": 2,
        "estimated_total_cost": 15000.0,
        "estimated_impact": 0.72,
        "timeline": { "immediate": ["Install flood barriers"], "medium-term": ["Cooling centre plan"] },
        "generated_at": "2026-10-18T12:05:00Z"
    });
    state.respond(PLAN, Some(body), ok)
}

async fn footprint(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let amount = body["amount"].as_f64().unwrap_or(0.0);
    let emissions = amount * 0.25;
    let ok = json!({
        "category": body["category"],
        "activity_type": body["activity_type"],
        "amount": amount,
        "unit": body["unit"],
        "emissions_kg": emissions,
        "emissions_tons": emissions / 1000.0,
        "equivalent": "trees needed"
    });
    state.respond(FOOTPRINT, Some(body), ok)
}

async fn summary(State(state): State<MockState>, Path(user_id): Path<String>) -> Response {
    let ok = json!({
        "user_id": user_id,
        "total_emissions_kg": 42.0,
        "total_emissions_tons": 0.042,
        "total_entries": 2,
        "average_per_entry": 21.0,
        "by_category": { "transportation": 42.0 }
    });
    state.respond(SUMMARY, None, ok)
}

async fn categories(State(state): State<MockState>) -> Response {
    let ok = json!({
        "categories": ["transportation", "energy", "food", "goods"],
        "details": {
            "transportation": ["car_gasoline", "flight_domestic"],
            "energy": ["electricity", "natural_gas"]
        }
    });
    state.respond(CATEGORIES, None, ok)
}

async fn predict(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let years = body["years"].as_u64().unwrap_or(10);
    let ok = json!({
        "location": "25.76, -80.19",
        "prediction_years": years,
        "predictions": [
            { "year": 2027, "overall_risk": 52.0, "temperature_change": 0.1, "extreme_events_probability": 12.0, "sea_level_rise_mm": 3.3 },
            { "year": 2036, "overall_risk": 61.0, "temperature_change": 0.9, "extreme_events_probability": 64.0, "sea_level_rise_mm": 33.0 }
        ],
        "trends": {
            "temperature": { "average_increase": 0.09, "total_increase": 0.9 },
            "overall_risk": { "current": 52.0, "future": 61.0, "increase_percent": 17.3 },
            "sea_level": { "total_rise_mm": 33.0, "annual_rate": 3.3 }
        }
    });
    state.respond(PREDICT, Some(body), ok)
}

async fn scenario(
    State(state): State<MockState>,
    Path((lat, lon)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let name = query.get("scenario").cloned().unwrap_or_else(|| "moderate".to_string());
    let ok = json!({
        "location": format!("{},{}", lat, lon),
        "scenario": name,
        "data": {
            "description": "Current policies continue, moderate climate action",
            "temperature_increase_2050": 2.5,
            "sea_level_rise_2050_cm": 50.0,
            "extreme_events_increase": "40%"
        },
        "impacts": ["More frequent flooding"],
        "recommendations": ["Elevate critical equipment"]
    });
    state.respond(SCENARIO, None, ok)
}

/// Assessment as raw JSON text. Built by hand rather than with `json!`, whose
/// map sorts keys, so `risk_breakdown` arrives in this exact order.
pub fn assessment_body(location: &str) -> String {
    format!(
        r#"{{
            "location": {location},
            "latitude": 25.76,
            "longitude": -80.19,
            "overall_risk_score": 68.0,
            "risk_level": "high",
            "risk_breakdown": {{
                "flood": 82.0,
                "hurricane": 74.0,
                "heatwave": 55.0,
                "drought": 12.0
            }},
            "top_risks": [
                {{ "type": "flood", "score": 82.0 }},
                {{ "type": "hurricane", "score": 74.0 }},
                {{ "type": "heatwave", "score": 55.0 }}
            ],
            "assessment_date": "2026-10-18T12:00:00Z",
            "confidence": 0.85
        }}"#,
        location = Value::from(location)
    )
}
