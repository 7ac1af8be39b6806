use crate::models::{CareNeedsProfile, Category, PlacementUrgency, WeightVector};
use serde::{Deserialize, Serialize};

/// Tolerance on the sum-to-100 invariant after rounding.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.1;

/// Operator-editable weighting knobs, passed in explicitly per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Starting vector before any trigger fires; must sum to 100.
    #[serde(default)]
    pub baseline: WeightVector,
    /// Weekly budgets below this line trigger the tight-budget modifier.
    #[serde(default = "default_tight_budget_weekly")]
    pub tight_budget_weekly: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            baseline: WeightVector::baseline(),
            tight_budget_weekly: default_tight_budget_weekly(),
        }
    }
}

fn default_tight_budget_weekly() -> f64 {
    800.0
}

type Trigger = fn(&CareNeedsProfile, &WeightConfig) -> bool;

/// One adjustment rule: a trigger predicate plus absolute point shifts.
///
/// Shifts are applied as-is; the final proportional renormalisation funds
/// every increase from the remaining categories, so a rule never has to
/// spell out where its points come from.
struct AdjustmentRule {
    name: &'static str,
    trigger: Trigger,
    shifts: &'static [(Category, f64)],
}

fn trigger_fall_risk(profile: &CareNeedsProfile, _: &WeightConfig) -> bool {
    profile.elevated_fall_risk()
}

fn trigger_cognitive(profile: &CareNeedsProfile, _: &WeightConfig) -> bool {
    profile.cognitive_impairment()
}

fn trigger_multi_morbidity(profile: &CareNeedsProfile, _: &WeightConfig) -> bool {
    profile.conditions.len() >= 3
}

fn trigger_skilled_nursing(profile: &CareNeedsProfile, _: &WeightConfig) -> bool {
    profile.needs_skilled_nursing()
}

fn trigger_tight_budget(profile: &CareNeedsProfile, config: &WeightConfig) -> bool {
    profile.weekly_budget < config.tight_budget_weekly
}

fn trigger_urgent_placement(profile: &CareNeedsProfile, _: &WeightConfig) -> bool {
    matches!(profile.urgency, PlacementUrgency::Immediate)
}

/// Mutually exclusive top tier, evaluated in order; first trigger wins.
const PRIORITY_RULES: [AdjustmentRule; 3] = [
    AdjustmentRule {
        name: "elevated-fall-risk",
        trigger: trigger_fall_risk,
        shifts: &[(Category::Safety, 25.0)],
    },
    AdjustmentRule {
        name: "cognitive-impairment",
        trigger: trigger_cognitive,
        shifts: &[
            (Category::Medical, 15.0),
            (Category::Safety, 8.0),
            (Category::Staff, 7.0),
            (Category::Services, -3.0),
        ],
    },
    AdjustmentRule {
        name: "multi-morbidity",
        trigger: trigger_multi_morbidity,
        shifts: &[
            (Category::Medical, 22.0),
            (Category::Location, -5.0),
            (Category::Social, -4.0),
        ],
    },
];

/// Independent modifiers, always evaluated; any number may stack.
const MODIFIER_RULES: [AdjustmentRule; 3] = [
    AdjustmentRule {
        name: "skilled-nursing",
        trigger: trigger_skilled_nursing,
        shifts: &[(Category::Medical, 10.0), (Category::Staff, 8.0)],
    },
    AdjustmentRule {
        name: "tight-budget",
        trigger: trigger_tight_budget,
        shifts: &[(Category::Financial, 12.0), (Category::Services, -3.0)],
    },
    AdjustmentRule {
        name: "urgent-placement",
        trigger: trigger_urgent_placement,
        shifts: &[(Category::Location, 10.0), (Category::Services, -2.0)],
    },
];

/// Weight derivation output with the audit trail of fired rules.
#[derive(Debug, Clone)]
pub struct DerivedWeights {
    pub vector: WeightVector,
    pub rules_applied: Vec<&'static str>,
}

/// Derive the per-request weight vector from profile triggers.
///
/// Pure function: unrecognized or missing profile detail reads as
/// "trigger absent". With no triggers the baseline comes back unchanged;
/// otherwise shifts are applied, negatives floored at zero, and the vector
/// proportionally rescaled to sum to exactly 100.
pub fn derive_weights(profile: &CareNeedsProfile, config: &WeightConfig) -> DerivedWeights {
    let mut vector = config.baseline.clone();
    let mut rules_applied: Vec<&'static str> = Vec::new();

    for rule in &PRIORITY_RULES {
        if (rule.trigger)(profile, config) {
            apply_shifts(&mut vector, rule.shifts);
            rules_applied.push(rule.name);
            break;
        }
    }

    for rule in &MODIFIER_RULES {
        if (rule.trigger)(profile, config) {
            apply_shifts(&mut vector, rule.shifts);
            rules_applied.push(rule.name);
        }
    }

    if !rules_applied.is_empty() {
        vector.floor_zero();
        vector.rescale_to(100.0);
    }

    DerivedWeights {
        vector,
        rules_applied,
    }
}

fn apply_shifts(vector: &mut WeightVector, shifts: &[(Category, f64)]) {
    for (category, delta) in shifts {
        vector.add(*category, *delta);
    }
}
