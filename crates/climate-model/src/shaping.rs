//! Domain → Wire request shaping
//!
//! The action-generation endpoint takes the assessment in its original wire
//! shape, so the stored domain assessment is converted back before sending.

use crate::domain::RiskAssessment;
use crate::wire::{ActionPlanRequest, RiskAssessmentResponse, RiskBreakdown, TopRisk};
use std::cmp::Ordering;

/// Number of hazards reported in `top_risks`
pub const TOP_RISK_COUNT: usize = 3;

/// Rebuild the wire assessment from a domain assessment.
pub fn to_wire_assessment(assessment: &RiskAssessment) -> RiskAssessmentResponse {
    let breakdown: RiskBreakdown = assessment
        .risks
        .iter()
        .map(|r| (r.hazard.as_str(), r.score))
        .collect();

    RiskAssessmentResponse {
        location: Some(assessment.location.clone()),
        latitude: Some(assessment.latitude),
        longitude: Some(assessment.longitude),
        overall_risk_score: Some(assessment.overall_risk),
        risk_level: Some(assessment.risk_level.wire_name().to_string()),
        risk_breakdown: Some(breakdown),
        top_risks: Some(top_risks(assessment)),
        assessment_date: Some(assessment.timestamp.clone()),
        confidence: Some(assessment.confidence),
    }
}

/// Highest-scoring factors, descending. The sort is stable, so equal scores
/// keep their original order. The assessment itself is left untouched.
pub fn top_risks(assessment: &RiskAssessment) -> Vec<TopRisk> {
    let mut ranked: Vec<_> = assessment.risks.iter().collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .take(TOP_RISK_COUNT)
        .map(|r| TopRisk {
            hazard: r.hazard.as_str().to_string(),
            score: r.score,
        })
        .collect()
}

/// Request body for `POST /actions/generate`.
pub fn action_plan_request(assessment: &RiskAssessment) -> ActionPlanRequest {
    ActionPlanRequest {
        location: assessment.location.clone(),
        risk_assessment: to_wire_assessment(assessment),
    }
}
