use crate::core::filters::{partition_pool, EligibleCandidate};
use crate::core::scoring::score_candidate;
use crate::core::selection::{build_shortlist, SelectionConfig};
use crate::core::weights::{derive_weights, WeightConfig, WEIGHT_SUM_TOLERANCE};
use crate::funding::{self, fair_cost, CostBasis, FairCostConfig, FundingConfig};
use crate::models::{
    CandidateProvider, CandidateScore, CareNeedsProfile, FinancialSnapshot, MatchReport,
    MatchRequest,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Errors surfaced by the match engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// Operator configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub funding: FundingConfig,
    #[serde(default)]
    pub fair_cost: FairCostConfig,
}

/// Placement decision engine.
///
/// # Pipeline stages
/// 1. Request validation
/// 2. Weight derivation from profile triggers
/// 3. Hard filtering and price partition of the provider pool
/// 4. Parallel scoring with sequential shortlist selection, alongside the
///    independent funding branch
/// 5. Report assembly
///
/// Every stage is pure over immutable inputs, so identical inputs always
/// produce byte-identical reports.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: EngineConfig,
}

impl MatchEngine {
    /// Build an engine, rejecting inconsistent operator configuration up
    /// front rather than mid-request.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline for one household.
    pub fn run(
        &self,
        request: &MatchRequest,
        profile: &CareNeedsProfile,
        financial: &FinancialSnapshot,
        providers: &[CandidateProvider],
    ) -> Result<MatchReport, EngineError> {
        request.validate()?;

        let tier = request.tier;
        let derived = derive_weights(profile, &self.config.weights);
        debug!(
            household_id = %profile.household_id,
            rules = ?derived.rules_applied,
            "derived weight vector"
        );

        let (eligible, pool_breakdown) = partition_pool(
            profile,
            providers,
            request.search_radius_km,
            &request.exclude_provider_ids,
        );
        debug!(
            total = pool_breakdown.total,
            scored = pool_breakdown.scored,
            missing_price = pool_breakdown.missing_price,
            "partitioned provider pool"
        );

        let market_average = market_average(&eligible);
        let cost_basis = CostBasis::resolve(financial.weekly_care_cost, market_average);
        let requested_care = profile.requested_care_type();
        let region = profile.location.region.as_str();
        let slots = tier.shortlist_slots();

        // Scoring is independent per candidate; selection is sequential
        // over the scored set. The funding branch needs only the market
        // average, so both branches run concurrently.
        let (shortlist, (funding_report, market_fair_cost)) = rayon::join(
            || {
                let scored: Vec<CandidateScore> = eligible
                    .par_iter()
                    .map(|candidate| score_candidate(profile, candidate, &derived.vector, tier))
                    .collect();
                build_shortlist(&scored, slots, &self.config.selection)
            },
            || {
                let report =
                    funding::assess(profile, financial, cost_basis, &self.config.funding);
                let gap = match (requested_care, market_average) {
                    (Some(care_type), Some(observed)) => {
                        fair_cost::market_gap(care_type, region, observed, &self.config.fair_cost)
                    }
                    _ => None,
                };
                (report, gap)
            },
        );

        info!(
            household_id = %profile.household_id,
            entries = shortlist.entries.len(),
            no_match = shortlist.no_match,
            "assembled shortlist"
        );

        Ok(MatchReport {
            household_id: profile.household_id.clone(),
            tier,
            weights: derived.vector,
            weight_rules_applied: derived
                .rules_applied
                .iter()
                .map(|name| name.to_string())
                .collect(),
            pool_breakdown,
            shortlist,
            market_fair_cost,
            funding: funding_report,
        })
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Mean published weekly price across the scorable pool.
fn market_average(eligible: &[EligibleCandidate<'_>]) -> Option<f64> {
    if eligible.is_empty() {
        return None;
    }
    let sum: f64 = eligible
        .iter()
        .map(|candidate| candidate.weekly_price)
        .sum();
    Some(sum / eligible.len() as f64)
}

fn validate_config(config: &EngineConfig) -> Result<(), EngineError> {
    let sum = config.weights.baseline.sum();
    if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(EngineError::InvalidConfig(format!(
            "baseline weights sum to {}, expected 100",
            sum
        )));
    }
    for (category, weight) in config.weights.baseline.entries() {
        if weight < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "negative baseline weight for {}",
                category.label()
            )));
        }
    }
    if config.weights.tight_budget_weekly < 0.0 {
        return Err(EngineError::InvalidConfig(
            "tight budget threshold must not be negative".to_string(),
        ));
    }
    if config.selection.tight_radius_km <= 0.0 {
        return Err(EngineError::InvalidConfig(
            "tight selection radius must be positive".to_string(),
        ));
    }

    let means = &config.funding.means;
    if means.lower_capital_threshold > means.upper_capital_threshold {
        return Err(EngineError::InvalidConfig(
            "lower capital threshold exceeds the upper threshold".to_string(),
        ));
    }
    if means.tariff_divisor <= 0.0 {
        return Err(EngineError::InvalidConfig(
            "tariff divisor must be positive".to_string(),
        ));
    }
    if config.funding.deferred.horizon_years == 0 {
        return Err(EngineError::InvalidConfig(
            "projection horizon must be at least one year".to_string(),
        ));
    }

    Ok(())
}
