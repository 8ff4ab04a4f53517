//! Wire → Domain adapters
//!
//! Pure functions: no I/O, inputs are borrowed and never mutated. Each call
//! mints fresh identifiers, so adapting the same response twice yields two
//! distinct domain objects.
//!
//! Fallbacks for absent fields:
//! - numbers → 0
//! - levels / priorities / severities → `Medium`
//! - sequences → empty
//! - timestamps → now (RFC 3339)

use crate::domain::{
    Action, ActionPlan, ActionStatus, CarbonFootprint, EmissionCategory, EmissionGroup,
    ExtremeEvent, HazardType, Prediction, PriorityMatrix, RiskAssessment, RiskFactor,
    ScenarioData, ScenarioName, Timeline, Trend,
};
use crate::ids::{
    fresh_id, ACTION_PLAN_PREFIX, ACTION_PREFIX, ASSESSMENT_PREFIX, FOOTPRINT_PREFIX,
    PREDICTION_PREFIX,
};
use crate::level::{bucket, Level};
use crate::wire::{
    ActionPlanResponse, ActionWire, EmissionMap, ExtremeEventWire, FootprintCalculation,
    FootprintResponse, PredictionResponse, RiskAssessmentResponse, ScenarioResponse,
    ScenarioWire, TrendSeriesWire, TrendSummaryWire, TrendsWire, YearPrediction,
};
use std::collections::BTreeMap;
use tracing::warn;

/// Cost optimization factor reported in every priority matrix
pub const COST_OPTIMIZATION: f64 = 0.9;

const DEFAULT_ACTION_TITLE: &str = "Action";
const DEFAULT_ACTION_CATEGORY: &str = "General";
const UNKNOWN: &str = "unknown";

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================================================
// Risk assessment
// ============================================================================

pub fn adapt_risk_assessment(wire: &RiskAssessmentResponse) -> RiskAssessment {
    let risks = wire
        .risk_breakdown
        .as_ref()
        .map(|breakdown| {
            breakdown
                .iter()
                .filter_map(|(name, score)| match HazardType::parse(name) {
                    Some(hazard) => Some(adapt_risk_factor(hazard, score)),
                    None => {
                        warn!(hazard = %name, "skipping unknown hazard in risk breakdown");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    RiskAssessment {
        id: fresh_id(ASSESSMENT_PREFIX),
        location: wire.location.clone().unwrap_or_default(),
        latitude: wire.latitude.unwrap_or(0.0),
        longitude: wire.longitude.unwrap_or(0.0),
        overall_risk: wire.overall_risk_score.unwrap_or(0.0),
        risk_level: Level::parse_or_default(wire.risk_level.as_deref()),
        risks,
        confidence: wire.confidence.unwrap_or(0.0),
        timestamp: wire.assessment_date.clone().unwrap_or_else(now_rfc3339),
    }
}

/// Scores are rounded before bucketing so a factor's level always agrees
/// with the score it carries.
fn adapt_risk_factor(hazard: HazardType, raw_score: f64) -> RiskFactor {
    let score = raw_score.round();
    RiskFactor {
        hazard,
        score,
        level: bucket(score),
        description: format!("{} risk assessment", hazard),
    }
}

// ============================================================================
// Action plan
// ============================================================================

/// The plan's timeline is `Immediate` only when the backend's `immediate`
/// bucket lists at least one action. A present but empty bucket counts as
/// `MediumTerm`, unlike the web client, which treated any `immediate` key as
/// immediate.
pub fn adapt_action_plan(wire: &ActionPlanResponse, assessment_id: &str) -> ActionPlan {
    let actions = wire
        .actions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(adapt_action)
        .collect();

    let immediate = wire
        .timeline
        .as_ref()
        .and_then(|t| t.get("immediate"))
        .is_some_and(|items| !items.is_empty());

    ActionPlan {
        id: fresh_id(ACTION_PLAN_PREFIX),
        assessment_id: assessment_id.to_string(),
        actions,
        estimated_cost: wire.estimated_total_cost.unwrap_or(0.0),
        priority_matrix: PriorityMatrix {
            risk_level: Level::parse_or_default(wire.risk_level.as_deref()).weight(),
            impact_score: wire.estimated_impact.unwrap_or(0.0),
            cost_optimization: COST_OPTIMIZATION,
            timeline: if immediate { Timeline::Immediate } else { Timeline::MediumTerm },
        },
        created_at: wire.generated_at.clone().unwrap_or_else(now_rfc3339),
    }
}

fn adapt_action(wire: &ActionWire) -> Action {
    Action {
        id: fresh_id(ACTION_PREFIX),
        title: wire
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_ACTION_TITLE.to_string()),
        description: wire.description.clone().unwrap_or_default(),
        priority: Level::parse_or_default(wire.priority.as_deref()),
        estimated_cost: wire.estimated_cost.unwrap_or(0.0),
        estimated_time: wire.timeframe.clone().unwrap_or_default(),
        category: wire
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_ACTION_CATEGORY.to_string()),
        status: ActionStatus::NotStarted,
    }
}

// ============================================================================
// Carbon footprint
// ============================================================================

pub fn adapt_carbon_footprint(wire: &FootprintResponse, user_id: &str) -> CarbonFootprint {
    CarbonFootprint {
        id: fresh_id(FOOTPRINT_PREFIX),
        user_id: user_id.to_string(),
        transportation: adapt_group(EmissionCategory::Transportation, wire.transportation.as_ref()),
        energy: adapt_group(EmissionCategory::Energy, wire.energy.as_ref()),
        food: adapt_group(EmissionCategory::Food, wire.food.as_ref()),
        goods: adapt_group(EmissionCategory::Goods, wire.goods.as_ref()),
        total_emissions: wire.total_emissions.unwrap_or(0.0),
        offset: wire.offset.unwrap_or(0.0),
        timestamp: wire.timestamp.clone().unwrap_or_else(now_rfc3339),
    }
}

/// Adapt a single-activity calculation result.
pub fn adapt_footprint_calculation(wire: &FootprintCalculation, user_id: &str) -> CarbonFootprint {
    adapt_carbon_footprint(&FootprintResponse::from(wire.clone()), user_id)
}

fn adapt_group(category: EmissionCategory, wire: Option<&EmissionMap>) -> EmissionGroup {
    let mut entries: BTreeMap<String, f64> = category
        .well_known_keys()
        .iter()
        .map(|k| (k.to_string(), 0.0))
        .collect();
    if let Some(map) = wire {
        entries.extend(map.iter().map(|(k, v)| (k.clone(), *v)));
    }
    EmissionGroup::new(entries)
}

// ============================================================================
// Predictions
// ============================================================================

pub fn adapt_prediction(wire: &PredictionResponse, assessment_id: &str) -> Prediction {
    let yearly = wire.predictions.as_deref().unwrap_or_default();

    let scenarios = wire
        .scenarios
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(adapt_scenario_wire)
        .collect();

    let trends = match &wire.trends {
        Some(TrendsWire::Series(series)) => series.iter().map(adapt_trend).collect(),
        Some(TrendsWire::Summary(summary)) => derive_trends(Some(summary), yearly),
        None => derive_trends(None, yearly),
    };

    let extreme_events = match &wire.extreme_events {
        Some(events) => events.iter().map(adapt_extreme_event).collect(),
        None => derive_extreme_event(yearly).into_iter().collect(),
    };

    Prediction {
        id: fresh_id(PREDICTION_PREFIX),
        assessment_id: assessment_id.to_string(),
        years: wire.years.unwrap_or(0),
        scenarios,
        trends,
        extreme_events,
    }
}

/// Scenario endpoint response → one scenario projection. Unknown scenario
/// names yield `None`.
pub fn adapt_scenario(wire: &ScenarioResponse) -> Option<ScenarioData> {
    let name = wire.scenario.as_deref().and_then(ScenarioName::parse)?;
    let details = wire.data.clone().unwrap_or_default();
    Some(ScenarioData {
        name,
        temperature_change: details.temperature_increase_2050.unwrap_or(0.0),
        precipitation_change: 0.0,
        sea_level_rise: details.sea_level_rise_2050_cm.unwrap_or(0.0),
        description: details.description.unwrap_or_default(),
        impacts: wire.impacts.clone().unwrap_or_default(),
        recommendations: wire.recommendations.clone().unwrap_or_default(),
    })
}

fn adapt_scenario_wire(wire: &ScenarioWire) -> Option<ScenarioData> {
    let Some(name) = wire.name.as_deref().and_then(ScenarioName::parse) else {
        warn!(scenario = ?wire.name, "skipping scenario with unknown name");
        return None;
    };
    Some(ScenarioData {
        name,
        temperature_change: wire.temperature_change.unwrap_or(0.0),
        precipitation_change: wire.precipitation_change.unwrap_or(0.0),
        sea_level_rise: wire.sea_level_rise.unwrap_or(0.0),
        description: String::new(),
        impacts: Vec::new(),
        recommendations: Vec::new(),
    })
}

fn adapt_trend(wire: &TrendSeriesWire) -> Trend {
    Trend {
        metric: wire.metric.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        historical_data: wire.historical_data.clone().unwrap_or_default(),
        projection: wire.projection.clone().unwrap_or_default(),
        change_percentage: wire.change_percentage.unwrap_or(0.0),
    }
}

/// Build series from the yearly records when the backend only sends a
/// summary (or nothing). Without yearly records only the overall-risk trend
/// can be filled, and only when the summary carries it.
fn derive_trends(summary: Option<&TrendSummaryWire>, yearly: &[YearPrediction]) -> Vec<Trend> {
    let overall = summary.and_then(|s| s.overall_risk.as_ref());
    let has_overall = overall.is_some_and(|o| o.current.is_some() || o.increase_percent.is_some());

    let series = |f: fn(&YearPrediction) -> Option<f64>| -> Vec<f64> {
        yearly.iter().map(|y| f(y).unwrap_or(0.0)).collect()
    };

    let overall_trend = Trend {
        metric: "overall_risk".to_string(),
        historical_data: overall.and_then(|o| o.current).into_iter().collect(),
        projection: series(|y| y.overall_risk),
        change_percentage: overall.and_then(|o| o.increase_percent).unwrap_or(0.0),
    };

    if yearly.is_empty() {
        return if has_overall { vec![overall_trend] } else { Vec::new() };
    }

    vec![
        Trend {
            metric: "temperature".to_string(),
            historical_data: Vec::new(),
            projection: series(|y| y.temperature_change),
            change_percentage: 0.0,
        },
        overall_trend,
        Trend {
            metric: "sea_level".to_string(),
            historical_data: Vec::new(),
            projection: series(|y| y.sea_level_rise_mm),
            change_percentage: 0.0,
        },
    ]
}

fn adapt_extreme_event(wire: &ExtremeEventWire) -> ExtremeEvent {
    ExtremeEvent {
        event_type: wire.event_type.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        probability: wire.probability.unwrap_or(0.0),
        expected_frequency: wire
            .expected_frequency
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        severity: Level::parse_or_default(wire.severity.as_deref()),
    }
}

/// Final-year extreme event probability (percent) as a single event.
fn derive_extreme_event(yearly: &[YearPrediction]) -> Option<ExtremeEvent> {
    let last = yearly.last()?;
    let percent = last.extreme_events_probability?;
    Some(ExtremeEvent {
        event_type: "extreme_weather".to_string(),
        probability: percent / 100.0,
        expected_frequency: match last.year {
            Some(year) => format!("{:.0}% annual likelihood by {}", percent, year),
            None => format!("{:.0}% annual likelihood", percent),
        },
        severity: bucket(percent),
    })
}
