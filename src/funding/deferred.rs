use crate::funding::{round_currency, CostBasis};
use crate::models::FinancialSnapshot;
use serde::{Deserialize, Serialize};

/// Terms of the local-authority deferred payment agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredConfig {
    /// Annual interest rate charged on the deferred balance.
    #[serde(default = "default_interest_rate_annual")]
    pub interest_rate_annual: f64,
    /// Projection horizon in years.
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self {
            interest_rate_annual: default_interest_rate_annual(),
            horizon_years: default_horizon_years(),
        }
    }
}

fn default_interest_rate_annual() -> f64 {
    0.045
}

fn default_horizon_years() -> u32 {
    5
}

/// One year boundary of the debt projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredYear {
    pub year: u32,
    #[serde(rename = "projectedDebt")]
    pub projected_debt: f64,
    #[serde(rename = "remainingEquity")]
    pub remaining_equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredPaymentEstimate {
    pub eligible: bool,
    #[serde(rename = "homeEquity")]
    pub home_equity: f64,
    /// Debt and remaining equity at each year boundary; empty when
    /// ineligible.
    #[serde(rename = "yearlyProjection")]
    pub yearly_projection: Vec<DeferredYear>,
    /// First year, if any, where the deferred debt exceeds the home value.
    #[serde(rename = "equityExhaustedYear")]
    pub equity_exhausted_year: Option<u32>,
    #[serde(rename = "defaultedFields")]
    pub defaulted_fields: Vec<String>,
}

/// Deferred payment agreement check and multi-year debt projection.
///
/// Each projected year compounds the prior balance at the configured rate
/// before adding that year's care cost, so a zero rate degenerates to a
/// simple sum of annual costs.
pub fn estimate(
    financial: &FinancialSnapshot,
    cost: CostBasis,
    config: &DeferredConfig,
    capital_limit: f64,
) -> DeferredPaymentEstimate {
    let mut defaulted_fields = Vec::new();

    let savings = match financial.savings_capital {
        Some(value) => value,
        None => {
            defaulted_fields.push("savings_capital".to_string());
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
    if cost.defaulted() {
        defaulted_fields.push("weekly_care_cost".to_string());
    }

    let home_equity = property.max(0.0);
    let eligible = savings < capital_limit && home_equity > 0.0;

    if !eligible {
        return DeferredPaymentEstimate {
            eligible: false,
            home_equity: round_currency(home_equity),
            yearly_projection: Vec::new(),
            equity_exhausted_year: None,
            defaulted_fields,
        };
    }

    let annual_cost = cost.weekly() * 52.0;
    let mut yearly_projection = Vec::with_capacity(config.horizon_years as usize);
    let mut equity_exhausted_year = None;
    let mut debt = 0.0;

    for year in 1..=config.horizon_years {
        debt = debt * (1.0 + config.interest_rate_annual) + annual_cost;
        let remaining = (home_equity - debt).max(0.0);

        if equity_exhausted_year.is_none() && debt > home_equity {
            equity_exhausted_year = Some(year);
        }

        yearly_projection.push(DeferredYear {
            year,
            projected_debt: round_currency(debt),
            remaining_equity: round_currency(remaining),
        });
    }

    DeferredPaymentEstimate {
        eligible: true,
        home_equity: round_currency(home_equity),
        yearly_projection,
        equity_exhausted_year,
        defaulted_fields,
    }
}
