//! Identifier generation
//!
//! Ids are `<prefix>_<uuid v4, simple form>`: unique within a session, not
//! stable across adaptations of the same backend object.

use uuid::Uuid;

pub const ASSESSMENT_PREFIX: &str = "risk";
pub const ACTION_PLAN_PREFIX: &str = "plan";
pub const ACTION_PREFIX: &str = "action";
pub const FOOTPRINT_PREFIX: &str = "footprint";
pub const PREDICTION_PREFIX: &str = "prediction";
pub const USER_PREFIX: &str = "user";

pub fn fresh_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
