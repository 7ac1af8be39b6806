use crate::funding::round_currency;
use crate::models::{CandidateScore, CareType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference weekly rates per care setting plus regional uplifts, both
/// operator-editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairCostConfig {
    #[serde(default = "default_reference_weekly_rates")]
    pub reference_weekly_rates: BTreeMap<CareType, f64>,
    /// Multipliers keyed by normalized region; unknown regions use 1.0.
    #[serde(default = "default_regional_uplifts")]
    pub regional_uplifts: BTreeMap<String, f64>,
}

impl Default for FairCostConfig {
    fn default() -> Self {
        Self {
            reference_weekly_rates: default_reference_weekly_rates(),
            regional_uplifts: default_regional_uplifts(),
        }
    }
}

fn default_reference_weekly_rates() -> BTreeMap<CareType, f64> {
    let mut rates = BTreeMap::new();
    rates.insert(CareType::Residential, 1_000.0);
    rates.insert(CareType::Nursing, 1_250.0);
    rates.insert(CareType::Dementia, 1_150.0);
    rates.insert(CareType::Respite, 950.0);
    rates.insert(CareType::Palliative, 1_400.0);
    rates
}

fn default_regional_uplifts() -> BTreeMap<String, f64> {
    let mut uplifts = BTreeMap::new();
    uplifts.insert("london".to_string(), 1.25);
    uplifts.insert("south_east".to_string(), 1.1);
    uplifts
}

impl FairCostConfig {
    /// Regionally uplifted baseline, `None` when the care type has no
    /// reference rate configured.
    pub fn baseline_weekly(&self, care_type: CareType, region: &str) -> Option<f64> {
        let uplift = self.regional_uplifts.get(region).copied().unwrap_or(1.0);
        self.reference_weekly_rates
            .get(&care_type)
            .map(|rate| rate * uplift)
    }
}

/// Signed difference between an observed weekly rate and the fair-cost
/// baseline, projected out simply (no discounting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairCostGap {
    #[serde(rename = "careType")]
    pub care_type: CareType,
    pub region: String,
    #[serde(rename = "observedWeekly")]
    pub observed_weekly: f64,
    #[serde(rename = "baselineWeekly")]
    pub baseline_weekly: f64,
    #[serde(rename = "weeklyGap")]
    pub weekly_gap: f64,
    #[serde(rename = "annualGap")]
    pub annual_gap: f64,
    #[serde(rename = "fiveYearGap")]
    pub five_year_gap: f64,
}

/// Gap for an observed market rate.
pub fn market_gap(
    care_type: CareType,
    region: &str,
    observed_weekly: f64,
    config: &FairCostConfig,
) -> Option<FairCostGap> {
    let baseline = config.baseline_weekly(care_type, region)?;
    let weekly_gap = observed_weekly - baseline;

    Some(FairCostGap {
        care_type,
        region: region.to_string(),
        observed_weekly: round_currency(observed_weekly),
        baseline_weekly: round_currency(baseline),
        weekly_gap: round_currency(weekly_gap),
        annual_gap: round_currency(weekly_gap * 52.0),
        five_year_gap: round_currency(weekly_gap * 52.0 * 5.0),
    })
}

/// Gap variant substituting one provider's own price for the market rate.
pub fn provider_gap(
    score: &CandidateScore,
    care_type: CareType,
    region: &str,
    config: &FairCostConfig,
) -> Option<FairCostGap> {
    market_gap(care_type, region, score.weekly_price, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightVector;

    #[test]
    fn test_positive_gap_with_regional_uplift() {
        let gap = market_gap(
            CareType::Residential,
            "london",
            1_400.0,
            &FairCostConfig::default(),
        )
        .unwrap();

        // Baseline 1,000 uplifted by 1.25.
        assert_eq!(gap.baseline_weekly, 1_250.0);
        assert_eq!(gap.weekly_gap, 150.0);
        assert_eq!(gap.annual_gap, 7_800.0);
        assert_eq!(gap.five_year_gap, 39_000.0);
    }

    #[test]
    fn test_gap_may_be_negative() {
        let gap = market_gap(
            CareType::Residential,
            "london",
            1_100.0,
            &FairCostConfig::default(),
        )
        .unwrap();

        assert_eq!(gap.weekly_gap, -150.0);
        assert_eq!(gap.annual_gap, -7_800.0);
    }

    #[test]
    fn test_unknown_region_uses_no_uplift() {
        let gap = market_gap(
            CareType::Residential,
            "yorkshire",
            1_100.0,
            &FairCostConfig::default(),
        )
        .unwrap();

        assert_eq!(gap.baseline_weekly, 1_000.0);
        assert_eq!(gap.weekly_gap, 100.0);
    }

    #[test]
    fn test_unconfigured_care_type_yields_no_gap() {
        let config = FairCostConfig {
            reference_weekly_rates: BTreeMap::new(),
            regional_uplifts: BTreeMap::new(),
        };

        assert!(market_gap(CareType::Nursing, "london", 1_200.0, &config).is_none());
    }

    #[test]
    fn test_provider_gap_uses_provider_price() {
        let score = CandidateScore {
            provider_id: "prov-1".to_string(),
            provider_name: "Cedar Court".to_string(),
            distance_km: 3.0,
            weekly_price: 1_500.0,
            available_beds: 4,
            breakdown: Vec::new(),
            total_points: 100,
            percent: 64.1,
            weights: WeightVector::baseline(),
        };

        let gap = provider_gap(
            &score,
            CareType::Nursing,
            "south_east",
            &FairCostConfig::default(),
        )
        .unwrap();

        // Baseline 1,250 uplifted by 1.1.
        assert_eq!(gap.baseline_weekly, 1_375.0);
        assert_eq!(gap.weekly_gap, 125.0);
    }
}
