//! Government-funding eligibility estimates and the fair-cost gap.
//!
//! Three pure calculators (health-funded, means-tested, deferred payment)
//! plus the fair-cost comparison. None of them error on partial financial
//! data: absent inputs default to zero or the lowest band and every
//! defaulted input is named in the output.

pub mod deferred;
pub mod fair_cost;
pub mod health_funded;
pub mod means_test;

pub use deferred::{DeferredConfig, DeferredPaymentEstimate, DeferredYear};
pub use fair_cost::{FairCostConfig, FairCostGap};
pub use health_funded::{HealthFundedConfig, HealthFundedEstimate, NeedBand};
pub use means_test::{MeansTestConfig, MeansTestedEstimate};

use crate::models::{CareNeedsProfile, FinancialSnapshot};
use serde::{Deserialize, Serialize};

/// Weekly placement cost fed to the calculators, with its provenance so a
/// defaulted cost stays visible in the estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "weekly", rename_all = "snake_case")]
pub enum CostBasis {
    /// Cost stated by the household.
    Stated(f64),
    /// Market-average fallback when the household stated none.
    MarketAverage(f64),
    /// Nothing available; the calculators treat the cost as zero.
    Unknown,
}

impl CostBasis {
    /// Prefer the stated cost, fall back to the market average.
    pub fn resolve(stated: Option<f64>, market_average: Option<f64>) -> Self {
        match stated {
            Some(cost) if cost > 0.0 => CostBasis::Stated(cost),
            _ => match market_average {
                Some(average) => CostBasis::MarketAverage(average),
                None => CostBasis::Unknown,
            },
        }
    }

    pub fn weekly(&self) -> f64 {
        match self {
            CostBasis::Stated(cost) | CostBasis::MarketAverage(cost) => *cost,
            CostBasis::Unknown => 0.0,
        }
    }

    /// Whether the household did not state the cost themselves.
    pub fn defaulted(&self) -> bool {
        !matches!(self, CostBasis::Stated(_))
    }
}

/// Operator knobs for the three eligibility calculators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundingConfig {
    #[serde(default)]
    pub means: MeansTestConfig,
    #[serde(default)]
    pub health: HealthFundedConfig,
    #[serde(default)]
    pub deferred: DeferredConfig,
}

/// One funding estimate, tagged by scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum EligibilityEstimate {
    HealthFunded(HealthFundedEstimate),
    MeansTested(MeansTestedEstimate),
    DeferredPayment(DeferredPaymentEstimate),
}

/// All three estimates, always present and in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingReport {
    pub estimates: Vec<EligibilityEstimate>,
    /// The weekly cost the calculators worked from.
    #[serde(rename = "costBasis")]
    pub cost_basis: CostBasis,
}

impl FundingReport {
    pub fn health_funded(&self) -> Option<&HealthFundedEstimate> {
        self.estimates.iter().find_map(|estimate| match estimate {
            EligibilityEstimate::HealthFunded(inner) => Some(inner),
            _ => None,
        })
    }

    pub fn means_tested(&self) -> Option<&MeansTestedEstimate> {
        self.estimates.iter().find_map(|estimate| match estimate {
            EligibilityEstimate::MeansTested(inner) => Some(inner),
            _ => None,
        })
    }

    pub fn deferred_payment(&self) -> Option<&DeferredPaymentEstimate> {
        self.estimates.iter().find_map(|estimate| match estimate {
            EligibilityEstimate::DeferredPayment(inner) => Some(inner),
            _ => None,
        })
    }
}

/// Run all three calculators over one household.
pub fn assess(
    profile: &CareNeedsProfile,
    financial: &FinancialSnapshot,
    cost: CostBasis,
    config: &FundingConfig,
) -> FundingReport {
    let health = health_funded::estimate(profile, &config.health);
    let means = means_test::estimate(financial, cost, &config.means);
    let deferred = deferred::estimate(
        financial,
        cost,
        &config.deferred,
        config.means.upper_capital_threshold,
    );

    FundingReport {
        estimates: vec![
            EligibilityEstimate::HealthFunded(health),
            EligibilityEstimate::MeansTested(means),
            EligibilityEstimate::DeferredPayment(deferred),
        ],
        cost_basis: cost,
    }
}

/// Currency values leave the calculators rounded to whole units.
#[inline]
pub(crate) fn round_currency(value: f64) -> f64 {
    value.round()
}

/// Probabilities leave the calculators rounded to one decimal.
#[inline]
pub(crate) fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
