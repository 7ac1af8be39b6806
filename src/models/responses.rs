use crate::funding::{FairCostGap, FundingReport};
use crate::models::domain::{ServiceTier, Shortlist, WeightVector};
use serde::{Deserialize, Serialize};

/// How the provider pool partitioned on the way to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolBreakdown {
    pub total: usize,
    #[serde(rename = "failedFilters")]
    pub failed_filters: usize,
    /// Passed the hard filters but published no usable price for the
    /// requested care type.
    #[serde(rename = "missingPrice")]
    pub missing_price: usize,
    pub scored: usize,
}

/// Full decision report for one household, consumed by the downstream
/// renderer as plain structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(rename = "householdId")]
    pub household_id: String,
    pub tier: ServiceTier,
    /// The derived weight vector, kept for explanation.
    pub weights: WeightVector,
    #[serde(rename = "weightRulesApplied")]
    pub weight_rules_applied: Vec<String>,
    #[serde(rename = "poolBreakdown")]
    pub pool_breakdown: PoolBreakdown,
    pub shortlist: Shortlist,
    /// Market-average fair-cost comparison; absent when nothing could be
    /// priced or the care type has no reference rate.
    #[serde(rename = "marketFairCost")]
    pub market_fair_cost: Option<FairCostGap>,
    pub funding: FundingReport,
}
