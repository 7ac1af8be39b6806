use crate::models::domain::{CandidateProvider, CareNeedsProfile, FinancialSnapshot, ServiceTier};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to run a placement match for one household.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    pub tier: ServiceTier,
    #[validate(range(min = 1.0, max = 500.0))]
    #[serde(default = "default_search_radius_km")]
    #[serde(alias = "search_radius_km", rename = "searchRadiusKm")]
    pub search_radius_km: f64,
    /// Providers the household has already ruled out.
    #[serde(default)]
    #[serde(alias = "exclude_provider_ids", rename = "excludeProviderIds")]
    pub exclude_provider_ids: Vec<String>,
}

fn default_search_radius_km() -> f64 {
    25.0
}

impl Default for MatchRequest {
    fn default() -> Self {
        Self {
            tier: ServiceTier::Standard,
            search_radius_km: default_search_radius_km(),
            exclude_provider_ids: Vec::new(),
        }
    }
}

/// Scenario envelope consumed by the offline runner: one request plus the
/// inputs the upstream collaborators would normally supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScenario {
    pub request: MatchRequest,
    pub profile: CareNeedsProfile,
    #[serde(default)]
    pub financial: FinancialSnapshot,
    pub providers: Vec<CandidateProvider>,
}
