//! Export/parse round trip
//!
//! Whatever the exporter writes must parse back into equivalent records.

use proptest::prelude::*;
use roiboard_core::export::to_csv_string;
use roiboard_core::models::{CampaignRecord, ChannelRecord, Metric, RoiData, SummaryRecord};
use roiboard_core::parsers::RoiCsvParser;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Free text the format can carry, including names that collide with
/// section markers, header labels or the escape prefix
fn text_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[A-Za-z][A-Za-z0-9]{0,10}( [A-Za-z0-9]{1,10})?",
        1 => "# [A-Za-z0-9]{1,10}",
        1 => "'{1,2}[A-Za-z0-9]{1,10}",
        1 => prop::sample::select(vec!["Channel Name", "channel name", "CAMPAIGN NAME"])
            .prop_map(String::from),
    ]
}

fn figure() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u32..1_000_000).prop_map(f64::from),
        -1000.0f64..100_000.0,
    ]
}

fn metric() -> impl Strategy<Value = Metric> {
    (figure(), -100.0f64..100.0).prop_map(|(value, change)| Metric::new(value, change))
}

fn summary() -> impl Strategy<Value = SummaryRecord> {
    (figure(), metric(), metric(), metric(), -100.0f64..100.0).prop_map(
        |(ad_spend, conversion_rate, prospects, aum, change)| SummaryRecord {
            ad_spend: Metric::new(ad_spend, change),
            conversion_rate,
            prospects,
            aum: Metric::new(aum.value * 1000.0, aum.change),
        },
    )
}

fn channel() -> impl Strategy<Value = ChannelRecord> {
    (text_cell(), figure(), figure(), figure(), figure(), -100.0f64..100.0).prop_map(
        |(name, roi, spend, prospects, clients, change)| ChannelRecord {
            name,
            roi,
            spend,
            prospects,
            clients,
            change,
        },
    )
}

fn campaign() -> impl Strategy<Value = CampaignRecord> {
    (
        (text_cell(), text_cell(), "20[0-9]{2}-[01][0-9]-[0-3][0-9]", "20[0-9]{2}-[01][0-9]-[0-3][0-9]", text_cell()),
        (figure(), figure(), figure(), figure()),
    )
        .prop_map(
            |((name, channel, start_date, end_date, status), (spend, prospects, clients, roi))| {
                CampaignRecord {
                    name,
                    channel,
                    start_date,
                    end_date,
                    status,
                    spend,
                    prospects,
                    clients,
                    roi,
                }
            },
        )
}

fn roi_data() -> impl Strategy<Value = RoiData> {
    (
        summary(),
        proptest::collection::vec(channel(), 1..8),
        proptest::collection::vec(campaign(), 1..8),
    )
        // Derived fields are not part of the text format
        .prop_map(|(summary, channels, campaigns)| RoiData {
            summary,
            channels,
            campaigns,
            journey: Default::default(),
            recommendations: Vec::new(),
        })
}

proptest! {
    #[test]
    fn prop_export_then_parse_roundtrips(data in roi_data()) {
        let text = to_csv_string(&data);
        let parsed = RoiCsvParser::parse(&text).expect("exported text must parse");

        prop_assert_eq!(&parsed.channels, &data.channels);
        prop_assert_eq!(&parsed.campaigns, &data.campaigns);

        let (a, b) = (&parsed.summary, &data.summary);
        prop_assert_eq!(a.ad_spend, b.ad_spend);
        prop_assert_eq!(a.conversion_rate, b.conversion_rate);
        prop_assert_eq!(a.prospects, b.prospects);
        prop_assert!(approx_eq(a.aum.value, b.aum.value), "aum {} vs {}", a.aum.value, b.aum.value);
        prop_assert_eq!(a.aum.change, b.aum.change);
    }

    #[test]
    fn prop_export_is_stable(data in roi_data()) {
        let first = RoiCsvParser::parse(&to_csv_string(&data)).unwrap();
        let second = RoiCsvParser::parse(&to_csv_string(&first)).unwrap();
        prop_assert_eq!(first.channels, second.channels);
        prop_assert_eq!(first.recommendations, second.recommendations);
        prop_assert_eq!(first.journey, second.journey);
    }
}

#[test]
fn test_nan_exports_and_stays_nan() {
    let text = roiboard_core::export::template().replace("Facebook Ads,17.5", "Facebook Ads,??");
    let data = RoiCsvParser::parse(&text).unwrap();
    assert!(data.channels[0].roi.is_nan());

    let again = RoiCsvParser::parse(&to_csv_string(&data)).unwrap();
    assert!(again.channels[0].roi.is_nan());
    assert_eq!(again.channels[1], data.channels[1]);
}

#[test]
fn test_marker_like_channel_name_keeps_sections() {
    let mut data = RoiCsvParser::parse(&roiboard_core::export::template()).unwrap();
    data.channels[0].name = "# Top Channel".to_string();

    let again = RoiCsvParser::parse(&to_csv_string(&data)).unwrap();
    assert_eq!(again.channels, data.channels);
    assert_eq!(again.campaigns, data.campaigns);
}

#[test]
fn test_header_like_channel_name_not_skipped() {
    let mut data = RoiCsvParser::parse(&roiboard_core::export::template()).unwrap();
    data.channels[3].name = "Channel Name".to_string();

    let again = RoiCsvParser::parse(&to_csv_string(&data)).unwrap();
    assert_eq!(again.channels.len(), 4);
    assert_eq!(again.recommendations[0].channel, "Channel Name");
}

#[test]
fn test_padded_name_written_trimmed() {
    let mut data = RoiCsvParser::parse(&roiboard_core::export::template()).unwrap();
    data.channels[0].name = "  Padded ".to_string();

    let text = to_csv_string(&data);
    assert!(text.contains("\nPadded,17.5,"));
    assert_eq!(RoiCsvParser::parse(&text).unwrap().channels[0].name, "Padded");
}
