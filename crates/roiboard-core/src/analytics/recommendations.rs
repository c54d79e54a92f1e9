//! Budget recommendations
//!
//! A single deterministic rule: point the user at the channel with the
//! highest ROI and suggest moving spend toward it.

use crate::models::{ChannelRecord, Priority, Recommendation, ValueTier};
use std::cmp::Ordering;

/// Estimated gain shown on the reallocation recommendation
pub const REALLOCATION_GAIN: &str = "+10% ROI";

/// Impact label shown on the reallocation recommendation
pub const REALLOCATION_IMPACT: &str = "Revenue";

/// Icon reference for the reallocation recommendation
pub const REALLOCATION_ICON: &str = "trending-up";

/// Order channels by ROI, highest first
///
/// Stable: channels with equal ROI keep their input order. `NaN` ROI sorts
/// after every real value.
pub fn rank_channels(channels: &[ChannelRecord]) -> Vec<&ChannelRecord> {
    let mut ranked: Vec<&ChannelRecord> = channels.iter().collect();
    ranked.sort_by(|a, b| compare_roi_desc(a.roi, b.roi));
    ranked
}

fn compare_roi_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

/// Generate recommendations from channel figures
///
/// Returns an empty list for an empty channel set; every returned
/// recommendation names a channel present in `channels`.
pub fn generate_recommendations(channels: &[ChannelRecord]) -> Vec<Recommendation> {
    let Some(top) = rank_channels(channels).into_iter().next() else {
        return Vec::new();
    };

    vec![reallocation(top)]
}

fn reallocation(channel: &ChannelRecord) -> Recommendation {
    Recommendation {
        title: format!("Shift budget toward {}", channel.name),
        description: format!(
            "{} delivers the highest ROI at {:.1}%. Consider reallocating spend from lower-performing channels.",
            channel.name, channel.roi
        ),
        channel: channel.name.clone(),
        priority: Priority::High,
        impact: REALLOCATION_IMPACT.to_string(),
        metric: REALLOCATION_GAIN.to_string(),
        value: ValueTier::High,
        icon: REALLOCATION_ICON.to_string(),
    }
}
