//! Backend wire format
//!
//! JSON shapes exchanged with the planning backend, field names as sent.
//! Response fields are optional throughout: the backend does not promise to
//! populate every field, and the adapters own the fallback policy.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentRequest {
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanRequest {
    pub location: String,
    pub risk_assessment: RiskAssessmentResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintRequest {
    pub user_id: String,
    pub category: String,
    pub activity_type: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub years: u32,
}

// ============================================================================
// Risk assessment
// ============================================================================

/// Hazard scores keyed by hazard name, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskBreakdown(Vec<(String, f64)>);

impl RiskBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an overwritten key keeps its original position.
    pub fn insert(&mut self, hazard: impl Into<String>, score: f64) {
        let hazard = hazard.into();
        match self.0.iter_mut().find(|(k, _)| *k == hazard) {
            Some(entry) => entry.1 = score,
            None => self.0.push((hazard, score)),
        }
    }

    pub fn get(&self, hazard: &str) -> Option<f64> {
        self.0.iter().find(|(k, _)| k == hazard).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RiskBreakdown {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut breakdown = RiskBreakdown::new();
        for (k, v) in iter {
            breakdown.insert(k, v);
        }
        breakdown
    }
}

impl Serialize for RiskBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for RiskBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = RiskBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of hazard names to numeric scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut breakdown = RiskBreakdown::new();
                while let Some((hazard, score)) = access.next_entry::<String, f64>()? {
                    breakdown.insert(hazard, score);
                }
                Ok(breakdown)
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRisk {
    #[serde(rename = "type")]
    pub hazard: String,
    pub score: f64,
}

/// `POST /risk/assess`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessmentResponse {
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub overall_risk_score: Option<f64>,
    pub risk_level: Option<String>,
    pub risk_breakdown: Option<RiskBreakdown>,
    pub top_risks: Option<Vec<TopRisk>>,
    pub assessment_date: Option<String>,
    pub confidence: Option<f64>,
}

// ============================================================================
// Action plan
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionWire {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub estimated_cost: Option<f64>,
    pub impact_score: Option<f64>,
    #[serde(alias = "estimated_time")]
    pub timeframe: Option<String>,
}

/// `POST /actions/generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPlanResponse {
    pub location: Option<String>,
    pub risk_level: Option<String>,
    pub actions: Option<Vec<ActionWire>>,
    pub total_actions: Option<u32>,
    pub estimated_total_cost: Option<f64>,
    pub estimated_impact: Option<f64>,
    pub timeline: Option<BTreeMap<String, Vec<String>>>,
    pub generated_at: Option<String>,
}

// ============================================================================
// Carbon footprint
// ============================================================================

/// Activity name to kg CO2
pub type EmissionMap = BTreeMap<String, f64>;

/// Grouped footprint, the shape the footprint adapter consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintResponse {
    pub transportation: Option<EmissionMap>,
    pub energy: Option<EmissionMap>,
    pub food: Option<EmissionMap>,
    pub goods: Option<EmissionMap>,
    pub total_emissions: Option<f64>,
    pub offset: Option<f64>,
    pub timestamp: Option<String>,
}

/// `POST /footprint/calculate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintCalculation {
    pub category: Option<String>,
    pub activity_type: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub emissions_kg: Option<f64>,
    pub emissions_tons: Option<f64>,
    pub equivalent: Option<String>,
}

impl From<FootprintCalculation> for FootprintResponse {
    /// Place the single calculated activity under its category group.
    fn from(calc: FootprintCalculation) -> Self {
        let emissions = calc.emissions_kg.unwrap_or(0.0);
        let mut response = FootprintResponse {
            total_emissions: Some(emissions),
            ..Default::default()
        };

        let group = match calc.category.as_deref() {
            Some("transportation") => Some(&mut response.transportation),
            Some("energy") => Some(&mut response.energy),
            Some("food") => Some(&mut response.food),
            Some("goods") => Some(&mut response.goods),
            _ => None,
        };
        if let (Some(group), Some(activity)) = (group, calc.activity_type) {
            group.get_or_insert_with(EmissionMap::new).insert(activity, emissions);
        }

        response
    }
}

/// `GET /footprint/user/{userId}/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintSummary {
    pub user_id: Option<String>,
    pub total_emissions_kg: Option<f64>,
    pub total_emissions_tons: Option<f64>,
    pub total_entries: Option<u64>,
    pub average_per_entry: Option<f64>,
    pub by_category: Option<BTreeMap<String, f64>>,
}

/// `GET /footprint/categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintCategories {
    pub categories: Vec<String>,
    pub details: BTreeMap<String, Vec<String>>,
}

// ============================================================================
// Predictions
// ============================================================================

/// One forecast year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearPrediction {
    pub year: Option<i32>,
    pub overall_risk: Option<f64>,
    pub temperature_change: Option<f64>,
    pub precipitation_change_percent: Option<f64>,
    pub extreme_events_probability: Option<f64>,
    pub sea_level_rise_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSeriesWire {
    pub metric: Option<String>,
    pub historical_data: Option<Vec<f64>>,
    pub projection: Option<Vec<f64>>,
    pub change_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureTrend {
    pub average_increase: Option<f64>,
    pub total_increase: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallRiskTrend {
    pub current: Option<f64>,
    pub future: Option<f64>,
    pub increase_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaLevelTrend {
    pub total_rise_mm: Option<f64>,
    pub annual_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSummaryWire {
    pub temperature: Option<TemperatureTrend>,
    pub overall_risk: Option<OverallRiskTrend>,
    pub sea_level: Option<SeaLevelTrend>,
}

/// The backend has sent trends both as explicit series and as a summary
/// object; anything else fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendsWire {
    Series(Vec<TrendSeriesWire>),
    Summary(TrendSummaryWire),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioWire {
    pub name: Option<String>,
    pub temperature_change: Option<f64>,
    pub precipitation_change: Option<f64>,
    pub sea_level_rise: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremeEventWire {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub probability: Option<f64>,
    pub expected_frequency: Option<String>,
    pub severity: Option<String>,
}

/// `POST /predictions/generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    #[serde(alias = "prediction_years")]
    pub years: Option<u32>,
    pub location: Option<String>,
    pub predictions: Option<Vec<YearPrediction>>,
    pub trends: Option<TrendsWire>,
    pub scenarios: Option<Vec<ScenarioWire>>,
    pub extreme_events: Option<Vec<ExtremeEventWire>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDetails {
    pub description: Option<String>,
    pub temperature_increase_2050: Option<f64>,
    pub sea_level_rise_2050_cm: Option<f64>,
    pub extreme_events_increase: Option<String>,
}

/// `GET /predictions/scenarios/{lat}/{lon}?scenario=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioResponse {
    pub location: Option<String>,
    pub scenario: Option<String>,
    pub data: Option<ScenarioDetails>,
    pub impacts: Option<Vec<String>>,
    pub recommendations: Option<Vec<String>>,
}
