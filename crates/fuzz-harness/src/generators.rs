//! Strategies for climate planning models
//!
//! Scores are whole numbers unless a generator says otherwise: the
//! assessment adapter rounds factor scores, and round-trip properties need
//! values that survive that untouched.

use climate_model::domain::{EmissionCategory, HazardType};
use climate_model::wire::{
    ActionPlanResponse, ActionWire, EmissionMap, ExtremeEventWire, FootprintResponse,
    PredictionResponse, RiskAssessmentResponse, RiskBreakdown, ScenarioWire, TopRisk,
    TrendSeriesWire, TrendsWire, YearPrediction,
};
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::collections::BTreeMap;

// ============================================================================
// Scalars
// ============================================================================

/// Whole-number score in [0, 100]
pub fn score() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(f64::from)
}

/// Any score in [0, 100], fractional included
pub fn fractional_score() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

/// Backend confidence in [0, 1]
pub fn confidence() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

pub fn latitude() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

pub fn longitude() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

/// Non-negative cost in currency units
pub fn cost() -> impl Strategy<Value = f64> {
    (0u32..=1_000_000).prop_map(f64::from)
}

/// Emission value in kg CO2
pub fn emissions_kg() -> impl Strategy<Value = f64> {
    0.0f64..=10_000.0
}

/// ISO-8601 timestamp
pub fn timestamp() -> impl Strategy<Value = String> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24).prop_map(|(y, m, d, h)| {
        format!("{:04}-{:02}-{:02}T{:02}:00:00Z", y, m, d, h)
    })
}

pub fn location() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,12}(, [A-Z]{2})?"
}

/// Level spelled the way the backend might: any casing
pub fn level_string() -> impl Strategy<Value = String> {
    let names = prop_oneof![
        Just("critical"),
        Just("high"),
        Just("medium"),
        Just("low"),
    ];
    (names, any::<bool>()).prop_map(|(name, upper)| {
        if upper {
            name.to_ascii_uppercase()
        } else {
            name.to_string()
        }
    })
}

// ============================================================================
// Risk assessment
// ============================================================================

/// Distinct hazard names in arbitrary order
pub fn hazard_names() -> impl Strategy<Value = Vec<&'static str>> {
    let all: Vec<&'static str> = HazardType::ALL.iter().map(|h| h.as_str()).collect();
    subsequence(all, 0..=HazardType::ALL.len()).prop_shuffle()
}

/// Breakdown over distinct known hazards with whole-number scores
pub fn breakdown() -> impl Strategy<Value = RiskBreakdown> {
    hazard_names()
        .prop_flat_map(|names| {
            let n = names.len();
            (Just(names), prop::collection::vec(score(), n))
        })
        .prop_map(|(names, scores)| names.into_iter().zip(scores).collect())
}

/// Assessment with every optional field present
pub fn full_assessment() -> impl Strategy<Value = RiskAssessmentResponse> {
    (
        location(),
        latitude(),
        longitude(),
        score(),
        level_string(),
        breakdown(),
        confidence(),
        timestamp(),
    )
        .prop_map(|(location, lat, lon, overall, level, breakdown, confidence, date)| {
            let top_risks = breakdown
                .iter()
                .take(3)
                .map(|(hazard, score)| TopRisk {
                    hazard: hazard.to_string(),
                    score,
                })
                .collect();
            RiskAssessmentResponse {
                location: Some(location),
                latitude: Some(lat),
                longitude: Some(lon),
                overall_risk_score: Some(overall),
                risk_level: Some(level),
                risk_breakdown: Some(breakdown),
                top_risks: Some(top_risks),
                assessment_date: Some(date),
                confidence: Some(confidence),
            }
        })
}

/// Assessment where any field may be missing
pub fn sparse_assessment() -> impl Strategy<Value = RiskAssessmentResponse> {
    (
        proptest::option::of(location()),
        proptest::option::of(latitude()),
        proptest::option::of(longitude()),
        proptest::option::of(fractional_score()),
        proptest::option::of(level_string()),
        proptest::option::of(breakdown()),
        proptest::option::of(confidence()),
        proptest::option::of(timestamp()),
    )
        .prop_map(|(location, lat, lon, overall, level, breakdown, confidence, date)| {
            RiskAssessmentResponse {
                location,
                latitude: lat,
                longitude: lon,
                overall_risk_score: overall,
                risk_level: level,
                risk_breakdown: breakdown,
                top_risks: None,
                assessment_date: date,
                confidence,
            }
        })
}

// ============================================================================
// Action plan
// ============================================================================

pub fn full_action() -> impl Strategy<Value = ActionWire> {
    (
        "[A-Z][a-z ]{3,30}",
        "[a-z ]{0,60}",
        level_string(),
        "[a-z_]{3,12}",
        cost(),
        confidence(),
        prop_oneof![Just("immediate"), Just("short-term"), Just("medium-term")],
    )
        .prop_map(|(title, description, priority, category, cost, impact, timeframe)| ActionWire {
            title: Some(title),
            description: Some(description),
            priority: Some(priority),
            category: Some(category),
            estimated_cost: Some(cost),
            impact_score: Some(impact),
            timeframe: Some(timeframe.to_string()),
        })
}

pub fn full_action_plan() -> impl Strategy<Value = ActionPlanResponse> {
    (
        location(),
        level_string(),
        prop::collection::vec(full_action(), 0..8),
        cost(),
        confidence(),
        any::<bool>(),
        timestamp(),
    )
        .prop_map(|(location, level, actions, total_cost, impact, immediate, generated_at)| {
            let mut timeline = BTreeMap::new();
            if immediate {
                timeline.insert("immediate".to_string(), vec!["act now".to_string()]);
            }
            timeline.insert("short-term".to_string(), Vec::new());
            ActionPlanResponse {
                location: Some(location),
                risk_level: Some(level),
                total_actions: Some(actions.len() as u32),
                actions: Some(actions),
                estimated_total_cost: Some(total_cost),
                estimated_impact: Some(impact),
                timeline: Some(timeline),
                generated_at: Some(generated_at),
            }
        })
}

// ============================================================================
// Carbon footprint
// ============================================================================

/// Values for every well-known activity of a category, plus extras
pub fn emission_map(category: EmissionCategory) -> impl Strategy<Value = EmissionMap> {
    let known = category.well_known_keys();
    (
        prop::collection::vec(emissions_kg(), 3),
        prop::collection::btree_map("x_[a-z]{3,8}", emissions_kg(), 0..3),
    )
        .prop_map(move |(values, extras)| {
            let mut map: EmissionMap = known
                .iter()
                .zip(values)
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            map.extend(extras);
            map
        })
}

pub fn full_footprint() -> impl Strategy<Value = FootprintResponse> {
    (
        emission_map(EmissionCategory::Transportation),
        emission_map(EmissionCategory::Energy),
        emission_map(EmissionCategory::Food),
        emission_map(EmissionCategory::Goods),
        emissions_kg(),
        emissions_kg(),
        timestamp(),
    )
        .prop_map(|(transportation, energy, food, goods, total, offset, ts)| FootprintResponse {
            transportation: Some(transportation),
            energy: Some(energy),
            food: Some(food),
            goods: Some(goods),
            total_emissions: Some(total),
            offset: Some(offset),
            timestamp: Some(ts),
        })
}

// ============================================================================
// Predictions
// ============================================================================

/// One forecast year with every field present
pub fn year_prediction() -> impl Strategy<Value = YearPrediction> {
    (
        2020i32..2100,
        score(),
        -2.0f64..=6.0,
        -30.0f64..=30.0,
        score(),
        0.0f64..=500.0,
    )
        .prop_map(|(year, overall, temp, precip, extreme, sea)| YearPrediction {
            year: Some(year),
            overall_risk: Some(overall),
            temperature_change: Some(temp),
            precipitation_change_percent: Some(precip),
            extreme_events_probability: Some(extreme),
            sea_level_rise_mm: Some(sea),
        })
}

/// Distinct known scenario names in arbitrary order
pub fn scenario_names() -> impl Strategy<Value = Vec<&'static str>> {
    subsequence(vec!["optimistic", "moderate", "pessimistic"], 0..=3).prop_shuffle()
}

pub fn full_scenarios() -> impl Strategy<Value = Vec<ScenarioWire>> {
    scenario_names()
        .prop_flat_map(|names| {
            let n = names.len();
            (
                Just(names),
                prop::collection::vec((-2.0f64..=6.0, -30.0f64..=30.0, 0.0f64..=200.0), n),
            )
        })
        .prop_map(|(names, values)| {
            names
                .into_iter()
                .zip(values)
                .map(|(name, (temp, precip, sea))| ScenarioWire {
                    name: Some(name.to_string()),
                    temperature_change: Some(temp),
                    precipitation_change: Some(precip),
                    sea_level_rise: Some(sea),
                })
                .collect()
        })
}

pub fn full_trend() -> impl Strategy<Value = TrendSeriesWire> {
    (
        "[a-z_]{3,16}",
        prop::collection::vec(fractional_score(), 0..10),
        prop::collection::vec(fractional_score(), 0..10),
        -100.0f64..=300.0,
    )
        .prop_map(|(metric, historical, projection, change)| TrendSeriesWire {
            metric: Some(metric),
            historical_data: Some(historical),
            projection: Some(projection),
            change_percentage: Some(change),
        })
}

pub fn full_extreme_event() -> impl Strategy<Value = ExtremeEventWire> {
    ("[a-z_]{3,16}", confidence(), "[a-z0-9 ]{3,24}", level_string()).prop_map(
        |(event_type, probability, frequency, severity)| ExtremeEventWire {
            event_type: Some(event_type),
            probability: Some(probability),
            expected_frequency: Some(frequency),
            severity: Some(severity),
        },
    )
}

/// Forecast with explicit scenario, trend and event lists
pub fn full_prediction() -> impl Strategy<Value = PredictionResponse> {
    (
        1u32..=50,
        location(),
        prop::collection::vec(year_prediction(), 0..12),
        prop::collection::vec(full_trend(), 0..5),
        full_scenarios(),
        prop::collection::vec(full_extreme_event(), 0..5),
    )
        .prop_map(|(years, location, yearly, trends, scenarios, events)| PredictionResponse {
            years: Some(years),
            location: Some(location),
            predictions: Some(yearly),
            trends: Some(TrendsWire::Series(trends)),
            scenarios: Some(scenarios),
            extreme_events: Some(events),
        })
}
