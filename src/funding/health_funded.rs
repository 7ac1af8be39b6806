use crate::funding::{round_currency, round_percent};
use crate::models::{CareDomain, CareNeedsProfile, DomainLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate ordinal sum at which needs count as moderate even without a
/// single severe domain.
const AGGREGATE_MODERATE_THRESHOLD: u32 = 18;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthFundedConfig {
    /// Weekly rate the saving projection is based on, covering the full
    /// placement cost when the scheme is awarded.
    #[serde(default = "default_reference_weekly_rate")]
    pub reference_weekly_rate: f64,
}

impl Default for HealthFundedConfig {
    fn default() -> Self {
        Self {
            reference_weekly_rate: default_reference_weekly_rate(),
        }
    }
}

fn default_reference_weekly_rate() -> f64 {
    1000.0
}

/// Probability band for a full health-funded award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedBand {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl NeedBand {
    /// Probability range in percent for the band.
    pub fn probability_range(&self) -> (f64, f64) {
        match self {
            NeedBand::VeryHigh => (85.0, 95.0),
            NeedBand::High => (60.0, 80.0),
            NeedBand::Moderate => (25.0, 55.0),
            NeedBand::Low => (5.0, 15.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthFundedEstimate {
    pub band: NeedBand,
    /// Midpoint of the band's probability range, one decimal.
    #[serde(rename = "probabilityPercent")]
    pub probability_percent: f64,
    /// Annual saving range if awarded, whole currency units.
    #[serde(rename = "annualSavingLow")]
    pub annual_saving_low: f64,
    #[serde(rename = "annualSavingHigh")]
    pub annual_saving_high: f64,
    /// Effective level used for every domain, defaults included.
    #[serde(rename = "domainLevels")]
    pub domain_levels: BTreeMap<CareDomain, DomainLevel>,
    /// Sum of the ordinal levels across all domains.
    #[serde(rename = "aggregateScore")]
    pub aggregate_score: u32,
    #[serde(rename = "defaultedFields")]
    pub defaulted_fields: Vec<String>,
}

/// Band the household's assessed care domains and project the saving.
///
/// Domains the assessment did not answer default to no-need and are
/// reported, so a thin assessment degrades to the lowest band instead of
/// erroring.
pub fn estimate(profile: &CareNeedsProfile, config: &HealthFundedConfig) -> HealthFundedEstimate {
    let mut defaulted_fields = Vec::new();
    let mut domain_levels = BTreeMap::new();

    for domain in CareDomain::ALL {
        match profile.care_domains.get(&domain) {
            Some(level) => {
                domain_levels.insert(domain, *level);
            }
            None => {
                defaulted_fields.push(format!("care_domains.{}", domain.label()));
                domain_levels.insert(domain, DomainLevel::None);
            }
        }
    }

    let aggregate_score: u32 = domain_levels
        .values()
        .map(|level| u32::from(level.ordinal()))
        .sum();

    let band = classify(&domain_levels, aggregate_score);
    let (low_percent, high_percent) = band.probability_range();
    let probability_percent = round_percent((low_percent + high_percent) / 2.0);

    let annual_reference = config.reference_weekly_rate * 52.0;
    let annual_saving_low = round_currency(low_percent / 100.0 * annual_reference);
    let annual_saving_high = round_currency(high_percent / 100.0 * annual_reference);

    HealthFundedEstimate {
        band,
        probability_percent,
        annual_saving_low,
        annual_saving_high,
        domain_levels,
        aggregate_score,
        defaulted_fields,
    }
}

/// Step-function banding over the domain levels.
fn classify(domain_levels: &BTreeMap<CareDomain, DomainLevel>, aggregate_score: u32) -> NeedBand {
    let count_at = |target: DomainLevel| {
        domain_levels
            .values()
            .filter(|level| **level == target)
            .count()
    };

    if count_at(DomainLevel::Priority) > 0 {
        return NeedBand::VeryHigh;
    }

    let severe = count_at(DomainLevel::Severe);
    let high = count_at(DomainLevel::High);

    if severe >= 2 || (severe == 1 && high >= 2) {
        return NeedBand::High;
    }

    if severe == 1 || aggregate_score >= AGGREGATE_MODERATE_THRESHOLD {
        return NeedBand::Moderate;
    }

    NeedBand::Low
}
