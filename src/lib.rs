//! CareMatch - deterministic placement decision engine for care services
//!
//! This library implements the full placement pipeline: profile-driven
//! weight derivation, hard filtering, parallel candidate scoring, the
//! archetype shortlist and the three government funding estimates.
//! Identical inputs always produce byte-identical reports.

pub mod config;
pub mod core;
pub mod funding;
pub mod models;

// Re-export commonly used types
pub use crate::core::{EngineConfig, EngineError, MatchEngine};
pub use crate::funding::{CostBasis, EligibilityEstimate, FairCostGap, FundingReport};
pub use crate::models::{
    CandidateProvider, CareNeedsProfile, FinancialSnapshot, MatchReport, MatchRequest,
    MatchScenario, ServiceTier, Shortlist,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let engine = MatchEngine::with_defaults();
        assert!((engine.config().weights.baseline.sum() - 100.0).abs() < 0.1);
    }
}
