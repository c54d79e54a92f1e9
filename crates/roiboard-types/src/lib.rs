//! roiboard-types - Shared data types for roiboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - roiboard-core (parser, derivation, export)
//! - roiboard (CLI rendering)

pub mod models;

pub use models::{
    CampaignRecord, ChannelRecord, Journey, JourneyStage, Metric, Priority, Recommendation,
    RoiData, SummaryRecord, ValueTier,
};
