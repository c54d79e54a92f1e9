use serde::{Deserialize, Serialize};

/// A scalar figure paired with its change versus the prior period.
///
/// Both fields may be `NaN` when the imported text could not be parsed;
/// consumers render a fallback instead of rejecting the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Current value (currency, percent or count depending on the metric)
    pub value: f64,
    /// Percent change versus the prior period
    pub change: f64,
}

impl Metric {
    pub fn new(value: f64, change: f64) -> Self {
        Self { value, change }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Headline figures from the `# ROI Summary` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Total ad spend in dollars
    pub ad_spend: Metric,
    /// Conversion rate in percent
    pub conversion_rate: Metric,
    /// New prospects (count)
    pub prospects: Metric,
    /// New assets under management, in raw dollars (not millions)
    pub aum: Metric,
}

/// One marketing channel row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    /// Channel name (expected unique, not enforced)
    pub name: String,
    /// Return on investment in percent
    pub roi: f64,
    /// Spend in dollars
    pub spend: f64,
    pub prospects: f64,
    pub clients: f64,
    /// Signed period-over-period change in percent
    pub change: f64,
}

/// One campaign row
///
/// `channel` is a free-text reference to a [`ChannelRecord::name`] and is
/// not validated against the channel list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub name: String,
    pub channel: String,
    pub start_date: String,
    pub end_date: String,
    /// Free-text status (e.g. "Active", "Completed")
    pub status: String,
    pub spend: f64,
    pub prospects: f64,
    pub clients: f64,
    pub roi: f64,
}

/// A stage of the prospect journey funnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyStage {
    pub name: String,
    /// Absolute number of prospects reaching this stage
    pub count: f64,
    /// Percent of the first stage's count (first stage is always 100)
    pub percent: f64,
}

/// Derived prospect journey
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub stages: Vec<JourneyStage>,
    pub insights: Vec<String>,
}

/// Priority tier of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Qualitative value tier shown next to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTier {
    High,
    Medium,
    Low,
}

impl ValueTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTier::High => "high",
            ValueTier::Medium => "medium",
            ValueTier::Low => "low",
        }
    }
}

/// Actionable suggestion derived from the channel figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    /// Name of the channel this recommendation is about; always present in
    /// the `channels` list it was derived from
    pub channel: String,
    pub priority: Priority,
    /// Impact label (e.g. "Revenue")
    pub impact: String,
    /// Estimated gain, as display text (e.g. "+10% ROI")
    pub metric: String,
    pub value: ValueTier,
    /// Icon reference for the UI layer
    pub icon: String,
}

/// Root aggregate of a successful import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiData {
    pub summary: SummaryRecord,
    pub channels: Vec<ChannelRecord>,
    pub campaigns: Vec<CampaignRecord>,
    pub journey: Journey,
    pub recommendations: Vec<Recommendation>,
}

impl RoiData {
    /// Look up a channel by exact name (first match wins)
    pub fn channel(&self, name: &str) -> Option<&ChannelRecord> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Campaigns whose free-text channel reference matches `channel`
    /// case-insensitively, either exactly or as a leading whole word
    /// ("Facebook" matches "Facebook Ads", "Face" does not).
    pub fn campaigns_for_channel<'a>(
        &'a self,
        channel: &'a str,
    ) -> impl Iterator<Item = &'a CampaignRecord> + 'a {
        let needle = channel.to_lowercase();
        self.campaigns.iter().filter(move |c| {
            let reference = c.channel.to_lowercase();
            !reference.is_empty()
                && needle
                    .strip_prefix(reference.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
        })
    }

    /// Sum of spend across all channels, skipping unparsable (`NaN`) values
    pub fn total_channel_spend(&self) -> f64 {
        self.channels
            .iter()
            .map(|c| c.spend)
            .filter(|s| !s.is_nan())
            .sum()
    }
}
