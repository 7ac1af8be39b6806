use crate::funding::{round_currency, CostBasis};
use crate::models::FinancialSnapshot;
use serde::{Deserialize, Serialize};

/// Statutory thresholds and allowances for the local-authority means test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeansTestConfig {
    /// Capital at or below this is fully disregarded.
    #[serde(default = "default_lower_capital_threshold")]
    pub lower_capital_threshold: f64,
    /// Capital at or above this ends all support.
    #[serde(default = "default_upper_capital_threshold")]
    pub upper_capital_threshold: f64,
    /// Weekly tariff income assumed per unit of capital between the
    /// thresholds.
    #[serde(default = "default_tariff_divisor")]
    pub tariff_divisor: f64,
    /// Weekly personal expenses allowance kept back from income.
    #[serde(default = "default_personal_allowance_weekly")]
    pub personal_allowance_weekly: f64,
}

impl Default for MeansTestConfig {
    fn default() -> Self {
        Self {
            lower_capital_threshold: default_lower_capital_threshold(),
            upper_capital_threshold: default_upper_capital_threshold(),
            tariff_divisor: default_tariff_divisor(),
            personal_allowance_weekly: default_personal_allowance_weekly(),
        }
    }
}

fn default_lower_capital_threshold() -> f64 {
    14_250.0
}

fn default_upper_capital_threshold() -> f64 {
    23_250.0
}

fn default_tariff_divisor() -> f64 {
    250.0
}

fn default_personal_allowance_weekly() -> f64 {
    30.15
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeansTestedEstimate {
    /// Whether capital stays below the upper threshold.
    pub eligible: bool,
    #[serde(rename = "assessableCapital")]
    pub assessable_capital: f64,
    #[serde(rename = "tariffIncomeWeekly")]
    pub tariff_income_weekly: f64,
    #[serde(rename = "weeklyContribution")]
    pub weekly_contribution: f64,
    #[serde(rename = "weeklySupport")]
    pub weekly_support: f64,
    #[serde(rename = "annualSupport")]
    pub annual_support: f64,
    #[serde(rename = "defaultedFields")]
    pub defaulted_fields: Vec<String>,
}

/// Local-authority means test over the household's capital and income.
///
/// Intermediate arithmetic stays unrounded; currency is rounded to whole
/// units at the output boundary only.
pub fn estimate(
    financial: &FinancialSnapshot,
    cost: CostBasis,
    config: &MeansTestConfig,
) -> MeansTestedEstimate {
    let mut defaulted_fields = Vec::new();

    let savings = match financial.savings_capital {
        Some(value) => value,
        None => {
            defaulted_fields.push("savings_capital".to_string());
            0.0
        }
    };
    let income = match financial.weekly_income {
        Some(value) => value,
        None => {
            defaulted_fields.push("weekly_income".to_string());
            0.0
        }
    };
    let property = match financial.property_value {
        Some(value) => value,
        None => {
            defaulted_fields.push("property_value".to_string());
            0.0
        }
    };
    let qualifying_relative = match financial.qualifying_relative_at_home {
        Some(value) => value,
        None => {
            defaulted_fields.push("qualifying_relative_at_home".to_string());
            false
        }
    };
    if cost.defaulted() {
        defaulted_fields.push("weekly_care_cost".to_string());
    }

    // The home counts as capital unless a qualifying relative lives there.
    let assessable_capital = if qualifying_relative {
        savings
    } else {
        savings + property
    };
    let weekly_cost = cost.weekly();

    if assessable_capital >= config.upper_capital_threshold {
        return MeansTestedEstimate {
            eligible: false,
            assessable_capital: round_currency(assessable_capital),
            tariff_income_weekly: 0.0,
            weekly_contribution: round_currency(weekly_cost),
            weekly_support: 0.0,
            annual_support: 0.0,
            defaulted_fields,
        };
    }

    let tariff_income =
        ((assessable_capital - config.lower_capital_threshold) / config.tariff_divisor).max(0.0);
    let contribution =
        (income + tariff_income - config.personal_allowance_weekly).max(0.0);
    let support = (weekly_cost - contribution).max(0.0);

    MeansTestedEstimate {
        eligible: true,
        assessable_capital: round_currency(assessable_capital),
        tariff_income_weekly: round_currency(tariff_income),
        weekly_contribution: round_currency(contribution),
        weekly_support: round_currency(support),
        annual_support: round_currency(support * 52.0),
        defaulted_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        savings: Option<f64>,
        income: Option<f64>,
        property: Option<f64>,
        relative: Option<bool>,
    ) -> FinancialSnapshot {
        FinancialSnapshot {
            savings_capital: savings,
            weekly_income: income,
            property_value: property,
            qualifying_relative_at_home: relative,
            weekly_care_cost: None,
        }
    }

    #[test]
    fn test_capital_at_upper_threshold_gets_no_support() {
        let financial = snapshot(Some(23_250.0), Some(200.0), Some(0.0), Some(false));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(1_000.0),
            &MeansTestConfig::default(),
        );

        assert!(!estimate.eligible);
        assert_eq!(estimate.weekly_support, 0.0);
        assert_eq!(estimate.weekly_contribution, 1_000.0);
    }

    #[test]
    fn test_capital_at_lower_threshold_has_zero_tariff() {
        let financial = snapshot(Some(14_250.0), Some(100.0), Some(0.0), Some(false));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(1_000.0),
            &MeansTestConfig::default(),
        );

        assert!(estimate.eligible);
        assert_eq!(estimate.tariff_income_weekly, 0.0);
    }

    #[test]
    fn test_reference_scenario_rounds_to_1610() {
        // 10,000 capital sits below the lower threshold, so the weekly
        // support is 1,800 - (220 - 30.15) = 1,610.15.
        let financial = snapshot(Some(10_000.0), Some(220.0), Some(0.0), Some(false));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(1_800.0),
            &MeansTestConfig::default(),
        );

        assert!(estimate.eligible);
        assert_eq!(estimate.weekly_support, 1_610.0);
        assert_eq!(estimate.annual_support, 83_728.0);
    }

    #[test]
    fn test_tariff_income_between_thresholds() {
        // 1,000 above the lower threshold at 250 per unit: 4 per week.
        let financial = snapshot(Some(15_250.0), Some(0.0), Some(0.0), Some(false));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(800.0),
            &MeansTestConfig::default(),
        );

        assert_eq!(estimate.tariff_income_weekly, 4.0);
    }

    #[test]
    fn test_property_counts_without_qualifying_relative() {
        let financial = snapshot(Some(5_000.0), Some(150.0), Some(250_000.0), Some(false));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(900.0),
            &MeansTestConfig::default(),
        );

        assert!(!estimate.eligible);
        assert_eq!(estimate.assessable_capital, 255_000.0);
    }

    #[test]
    fn test_property_disregarded_with_qualifying_relative() {
        let financial = snapshot(Some(5_000.0), Some(150.0), Some(250_000.0), Some(true));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(900.0),
            &MeansTestConfig::default(),
        );

        assert!(estimate.eligible);
        assert_eq!(estimate.assessable_capital, 5_000.0);
    }

    #[test]
    fn test_missing_inputs_default_and_are_named() {
        let financial = snapshot(None, None, None, None);

        let estimate = estimate(&financial, CostBasis::Unknown, &MeansTestConfig::default());

        assert!(estimate.eligible);
        assert_eq!(estimate.weekly_support, 0.0);
        assert_eq!(
            estimate.defaulted_fields,
            vec![
                "savings_capital",
                "weekly_income",
                "property_value",
                "qualifying_relative_at_home",
                "weekly_care_cost"
            ]
        );
    }

    #[test]
    fn test_high_income_floors_support_at_zero() {
        let financial = snapshot(Some(1_000.0), Some(2_500.0), Some(0.0), Some(false));

        let estimate = estimate(
            &financial,
            CostBasis::Stated(1_000.0),
            &MeansTestConfig::default(),
        );

        assert!(estimate.eligible);
        assert_eq!(estimate.weekly_support, 0.0);
    }
}
