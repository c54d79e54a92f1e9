//! Unit tests for analytics module

use super::*;
use crate::models::{Metric, Priority};
use proptest::prelude::*;

fn channel(name: &str, roi: f64) -> ChannelRecord {
    ChannelRecord {
        name: name.to_string(),
        roi,
        spend: 1000.0,
        prospects: 10.0,
        clients: 2.0,
        change: 0.0,
    }
}

fn summary_with_prospects(prospects: f64) -> SummaryRecord {
    SummaryRecord {
        ad_spend: Metric::new(25000.0, 12.5),
        prospects: Metric::new(prospects, 15.2),
        ..Default::default()
    }
}

// ============================================================================
// Journey Tests
// ============================================================================

#[test]
fn test_journey_calibrated_counts() {
    let journey = build_journey(145.0);
    let counts: Vec<f64> = journey.stages.iter().map(|s| s.count).collect();
    assert_eq!(counts, vec![145.0, 123.0, 96.0, 70.0]);

    let names: Vec<&str> = journey.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Lead Generated", "Initial Meeting", "Questionnaire", "Follow-up"]
    );
}

#[test]
fn test_journey_percents() {
    let journey = build_journey(145.0);
    let percents: Vec<f64> = journey.stages.iter().map(|s| s.percent).collect();
    assert_eq!(percents, vec![100.0, 85.0, 66.0, 48.0]);
}

#[test]
fn test_journey_single_fixed_insight() {
    let journey = build_journey(10.0);
    assert_eq!(journey.insights, vec![LARGEST_DROP_INSIGHT.to_string()]);
}

#[test]
fn test_journey_zero_prospects() {
    let journey = build_journey(0.0);
    assert!(journey.stages.iter().all(|s| s.count == 0.0));
    assert_eq!(journey.stages[0].percent, 100.0);
}

#[test]
fn test_journey_nan_propagates_to_counts() {
    let journey = build_journey(f64::NAN);
    assert!(journey.stages.iter().all(|s| s.count.is_nan()));
    assert_eq!(journey.stages[0].percent, 100.0);
}

#[test]
fn test_journey_fractional_prospects_rounded() {
    let journey = build_journey(0.7);
    let counts: Vec<f64> = journey.stages.iter().map(|s| s.count).collect();
    assert_eq!(counts, vec![1.0, 1.0, 0.0, 0.0]);
}

proptest! {
    #[test]
    fn prop_journey_monotonic(prospects in 0.0f64..1e7) {
        let journey = build_journey(prospects);
        prop_assert_eq!(journey.stages[0].percent, 100.0);
        for pair in journey.stages.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            prop_assert!(pair[0].percent >= pair[1].percent);
        }
    }
}

// ============================================================================
// Recommendation Tests
// ============================================================================

#[test]
fn test_recommendation_picks_highest_roi() {
    let channels = vec![channel("Facebook Ads", 17.5), channel("LinkedIn Ads", 18.2)];
    let recs = generate_recommendations(&channels);

    assert_eq!(recs.len(), 1);
    let rec = &recs[0];
    assert_eq!(rec.channel, "LinkedIn Ads");
    assert_eq!(rec.priority, Priority::High);
    assert_eq!(rec.metric, "+10% ROI");
    assert!(rec.description.contains("LinkedIn Ads"));
    assert!(rec.description.contains("18.2%"));
}

#[test]
fn test_recommendation_tie_keeps_input_order() {
    let channels = vec![
        channel("Email", 12.0),
        channel("Webinars", 20.0),
        channel("Seminars", 20.0),
    ];
    let recs = generate_recommendations(&channels);
    assert_eq!(recs[0].channel, "Webinars");
}

#[test]
fn test_recommendation_skips_nan_roi() {
    let channels = vec![channel("Broken", f64::NAN), channel("Email", 3.0)];
    let recs = generate_recommendations(&channels);
    assert_eq!(recs[0].channel, "Email");
}

#[test]
fn test_recommendation_empty_channels() {
    assert!(generate_recommendations(&[]).is_empty());
}

#[test]
fn test_rank_channels_descending() {
    let channels = vec![
        channel("A", 1.0),
        channel("B", f64::NAN),
        channel("C", 30.0),
        channel("D", -5.0),
    ];
    let order: Vec<&str> = rank_channels(&channels)
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(order, vec!["C", "A", "D", "B"]);
}

proptest! {
    #[test]
    fn prop_recommendation_references_existing_channel(
        rois in proptest::collection::vec(-100.0f64..500.0, 1..20)
    ) {
        let channels: Vec<ChannelRecord> = rois
            .iter()
            .enumerate()
            .map(|(i, &roi)| channel(&format!("Channel {}", i), roi))
            .collect();
        let recs = generate_recommendations(&channels);
        prop_assert_eq!(recs.len(), 1);
        prop_assert!(channels.iter().any(|c| c.name == recs[0].channel));

        let max = rois.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let top = channels.iter().find(|c| c.name == recs[0].channel).unwrap();
        prop_assert_eq!(top.roi, max);
    }
}

// ============================================================================
// Derive
// ============================================================================

#[test]
fn test_derive_combines_both() {
    let channels = vec![channel("Email", 9.0)];
    let derived = derive(&summary_with_prospects(100.0), &channels, &[]);
    assert_eq!(derived.journey.stages[1].count, 85.0);
    assert_eq!(derived.recommendations[0].channel, "Email");
}

#[test]
fn test_derive_is_deterministic() {
    let channels = vec![channel("Email", 9.0), channel("Ads", 9.5)];
    let summary = summary_with_prospects(77.0);
    assert_eq!(
        derive(&summary, &channels, &[]),
        derive(&summary, &channels, &[])
    );
}
