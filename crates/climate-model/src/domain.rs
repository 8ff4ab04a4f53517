//! Client domain model
//!
//! Canonical in-memory representation, independent of the wire shape.
//! Every field is populated; adapters apply the fallbacks.

use crate::level::{Priority, RiskLevel, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Risk assessment
// ============================================================================

/// Hazard categories scored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Flood,
    Wildfire,
    Hurricane,
    Drought,
    Heatwave,
    SeaLevelRise,
}

impl HazardType {
    pub const ALL: [HazardType; 6] = [
        HazardType::Flood,
        HazardType::Wildfire,
        HazardType::Hurricane,
        HazardType::Drought,
        HazardType::Heatwave,
        HazardType::SeaLevelRise,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "flood" => Some(HazardType::Flood),
            "wildfire" => Some(HazardType::Wildfire),
            "hurricane" => Some(HazardType::Hurricane),
            "drought" => Some(HazardType::Drought),
            "heatwave" => Some(HazardType::Heatwave),
            "sea_level_rise" => Some(HazardType::SeaLevelRise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardType::Flood => "flood",
            HazardType::Wildfire => "wildfire",
            HazardType::Hurricane => "hurricane",
            HazardType::Drought => "drought",
            HazardType::Heatwave => "heatwave",
            HazardType::SeaLevelRise => "sea_level_rise",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub hazard: HazardType,
    /// 0-100, whole numbers
    pub score: f64,
    pub level: RiskLevel,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub overall_risk: f64,
    /// Taken from the backend verbatim; not recomputed from `overall_risk`.
    pub risk_level: RiskLevel,
    pub risks: Vec<RiskFactor>,
    pub confidence: f64,
    /// ISO-8601
    pub timestamp: String,
}

// ============================================================================
// Action plan
// ============================================================================

/// Client-local progress; never sent back to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_cost: f64,
    pub estimated_time: String,
    pub category: String,
    pub status: ActionStatus,
}

/// Coarse timeline bucket for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    Immediate,
    MediumTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityMatrix {
    /// Weight of the plan's risk level (Low = 1 .. Critical = 4)
    pub risk_level: u8,
    pub impact_score: f64,
    pub cost_optimization: f64,
    pub timeline: Timeline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub id: String,
    /// Lookup-only reference to the assessment the plan was generated from
    pub assessment_id: String,
    pub actions: Vec<Action>,
    pub estimated_cost: f64,
    pub priority_matrix: PriorityMatrix,
    pub created_at: String,
}

// ============================================================================
// Carbon footprint
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    Transportation,
    Energy,
    Food,
    Goods,
}

impl EmissionCategory {
    pub const ALL: [EmissionCategory; 4] = [
        EmissionCategory::Transportation,
        EmissionCategory::Energy,
        EmissionCategory::Food,
        EmissionCategory::Goods,
    ];

    /// Activities always present in the group, zero when not reported
    pub fn well_known_keys(&self) -> [&'static str; 3] {
        match self {
            EmissionCategory::Transportation => ["car", "public_transit", "flights"],
            EmissionCategory::Energy => ["electricity", "gas", "heating_oil"],
            EmissionCategory::Food => ["beef", "chicken", "dairy"],
            EmissionCategory::Goods => ["clothing", "electronics", "furniture"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionCategory::Transportation => "transportation",
            EmissionCategory::Energy => "energy",
            EmissionCategory::Food => "food",
            EmissionCategory::Goods => "goods",
        }
    }
}

/// Activity name to kg CO2 within one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionGroup(BTreeMap<String, f64>);

impl EmissionGroup {
    pub fn new(entries: BTreeMap<String, f64>) -> Self {
        Self(entries)
    }

    /// Zero for activities that were never reported
    pub fn get(&self, activity: &str) -> f64 {
        self.0.get(activity).copied().unwrap_or(0.0)
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

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonFootprint {
    pub id: String,
    pub user_id: String,
    pub transportation: EmissionGroup,
    pub energy: EmissionGroup,
    pub food: EmissionGroup,
    pub goods: EmissionGroup,
    pub total_emissions: f64,
    pub offset: f64,
    pub timestamp: String,
}

impl CarbonFootprint {
    pub fn group(&self, category: EmissionCategory) -> &EmissionGroup {
        match category {
            EmissionCategory::Transportation => &self.transportation,
            EmissionCategory::Energy => &self.energy,
            EmissionCategory::Food => &self.food,
            EmissionCategory::Goods => &self.goods,
        }
    }
}

// ============================================================================
// Predictions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    Optimistic,
    Moderate,
    Pessimistic,
}

impl ScenarioName {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Some(ScenarioName::Optimistic),
            "moderate" => Some(ScenarioName::Moderate),
            "pessimistic" => Some(ScenarioName::Pessimistic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::Optimistic => "optimistic",
            ScenarioName::Moderate => "moderate",
            ScenarioName::Pessimistic => "pessimistic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioData {
    pub name: ScenarioName,
    pub temperature_change: f64,
    pub precipitation_change: f64,
    pub sea_level_rise: f64,
    /// Empty unless the scenario came from the scenarios endpoint
    pub description: String,
    pub impacts: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub metric: String,
    pub historical_data: Vec<f64>,
    pub projection: Vec<f64>,
    pub change_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub probability: f64,
    pub expected_frequency: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: String,
    pub assessment_id: String,
    pub years: u32,
    pub scenarios: Vec<ScenarioData>,
    pub trends: Vec<Trend>,
    pub extreme_events: Vec<ExtremeEvent>,
}
