//! Derived analytics for imported ROI data
//!
//! Turns parsed summary and channel figures into a prospect journey funnel
//! and a list of budget recommendations.

use crate::models::{CampaignRecord, ChannelRecord, Journey, Recommendation, SummaryRecord};

pub mod journey;
pub mod recommendations;

#[cfg(test)]
mod tests;

pub use journey::{build_journey, JOURNEY_STAGES, LARGEST_DROP_INSIGHT};
pub use recommendations::{generate_recommendations, rank_channels, REALLOCATION_GAIN};

/// Artifacts synthesized from parsed records
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub journey: Journey,
    pub recommendations: Vec<Recommendation>,
}

/// Derive the journey and recommendations
///
/// Assumes the records already passed import validation. No defensive
/// checks: degenerate figures (`NaN` prospects) flow through to the output.
pub fn derive(
    summary: &SummaryRecord,
    channels: &[ChannelRecord],
    _campaigns: &[CampaignRecord],
) -> Derived {
    Derived {
        journey: build_journey(summary.prospects.value),
        recommendations: generate_recommendations(channels),
    }
}
