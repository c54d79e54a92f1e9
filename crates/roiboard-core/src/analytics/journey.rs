//! Prospect journey funnel
//!
//! Four fixed stages whose counts are calibrated fractions of the summary's
//! new-prospect count. The ratios are observed conversion rates, not values
//! computed from the channel or campaign rows.

use crate::models::{Journey, JourneyStage};

/// Funnel stages with their share of the first stage
pub const JOURNEY_STAGES: [(&str, f64); 4] = [
    ("Lead Generated", 1.0),
    ("Initial Meeting", 0.85),
    ("Questionnaire", 0.66),
    ("Follow-up", 0.48),
];

/// Insight attached to every journey
pub const LARGEST_DROP_INSIGHT: &str =
    "The largest drop-off occurs between the Questionnaire and Follow-up stages.";

/// Build the funnel from a prospect count
///
/// Counts are `round(prospects * ratio)` for every stage, the first one
/// included, so a fractional count never grows from one stage to the next.
/// Percents are the ratios themselves and the first stage is always 100.
/// A `NaN` prospect count yields `NaN` counts but still well-defined percents.
pub fn build_journey(prospects: f64) -> Journey {
    let stages = JOURNEY_STAGES
        .iter()
        .map(|&(name, ratio)| JourneyStage {
            name: name.to_string(),
            count: (prospects * ratio).round(),
            percent: ratio * 100.0,
        })
        .collect();

    Journey {
        stages,
        insights: vec![LARGEST_DROP_INSIGHT.to_string()],
    }
}
