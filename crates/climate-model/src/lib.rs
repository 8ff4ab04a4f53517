//! Climate Planning Models
//!
//! Translation layer between the planning backend's JSON contracts and the
//! client's domain model:
//!
//! - [`wire`]: backend request/response shapes (snake_case, optional fields)
//! - [`domain`]: fully-populated client representation
//! - [`adapters`]: Wire → Domain with default fallbacks
//! - [`shaping`]: Domain → Wire for requests that echo an assessment back
//! - [`level`]: score bucketing shared by risk, priority and severity
//!
//! ```text
//! backend JSON ──► wire::*Response ──► adapters ──► domain::* ──► store
//!                        ▲                                 │
//!                        └────────── shaping ◄─────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ids;
pub mod level;
pub mod shaping;
pub mod validate;
pub mod wire;

pub use adapters::{
    adapt_action_plan, adapt_carbon_footprint, adapt_footprint_calculation, adapt_prediction,
    adapt_risk_assessment, adapt_scenario, COST_OPTIMIZATION,
};
pub use domain::{
    Action, ActionPlan, ActionStatus, CarbonFootprint, EmissionCategory, EmissionGroup,
    ExtremeEvent, HazardType, Prediction, PriorityMatrix, RiskAssessment, RiskFactor,
    ScenarioData, ScenarioName, Timeline, Trend,
};
pub use ids::fresh_id;
pub use level::{bucket, Level, Priority, RiskLevel, Severity};
pub use shaping::{action_plan_request, to_wire_assessment, top_risks};
pub use validate::{FootprintActivity, ValidationError};
