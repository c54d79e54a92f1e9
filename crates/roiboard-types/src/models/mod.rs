//! Data models for ROI imports

pub mod roi;

pub use roi::{
    CampaignRecord, ChannelRecord, Journey, JourneyStage, Metric, Priority, Recommendation,
    RoiData, SummaryRecord, ValueTier,
};
