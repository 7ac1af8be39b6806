use crate::models::{CandidateScore, Category, SelectionArchetype, Shortlist, ShortlistEntry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Knobs for the archetype pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Radius the safety-first slot is restricted to.
    #[serde(default = "default_tight_radius_km")]
    pub tight_radius_km: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tight_radius_km: default_tight_radius_km(),
        }
    }
}

fn default_tight_radius_km() -> f64 {
    10.0
}

type Metric = fn(&CandidateScore, &SelectionConfig) -> Option<f64>;

/// One shortlist slot rule: the archetype tag plus the metric it
/// maximises. `None` from the metric marks the candidate ineligible for
/// this particular slot.
#[derive(Clone, Copy)]
struct ArchetypeRule {
    archetype: SelectionArchetype,
    metric: Metric,
}

fn safety_metric(score: &CandidateScore, config: &SelectionConfig) -> Option<f64> {
    if score.distance_km <= config.tight_radius_km {
        Some(f64::from(score.total_points))
    } else {
        None
    }
}

fn reputation_metric(score: &CandidateScore, _: &SelectionConfig) -> Option<f64> {
    Some(score.subscore(Category::Social))
}

fn value_metric(score: &CandidateScore, _: &SelectionConfig) -> Option<f64> {
    Some(f64::from(score.total_points) / score.weekly_price)
}

fn capacity_metric(score: &CandidateScore, _: &SelectionConfig) -> Option<f64> {
    Some(f64::from(score.available_beds))
}

fn budget_metric(score: &CandidateScore, _: &SelectionConfig) -> Option<f64> {
    Some(-score.weekly_price)
}

/// Slots every tier assembles, in pass order.
const BASE_RULES: [ArchetypeRule; 3] = [
    ArchetypeRule {
        archetype: SelectionArchetype::SafetyFirst,
        metric: safety_metric,
    },
    ArchetypeRule {
        archetype: SelectionArchetype::ReputationFirst,
        metric: reputation_metric,
    },
    ArchetypeRule {
        archetype: SelectionArchetype::ValueFirst,
        metric: value_metric,
    },
];

/// Extra slots for five-slot tiers.
const WIDE_RULES: [ArchetypeRule; 2] = [
    ArchetypeRule {
        archetype: SelectionArchetype::CapacityFirst,
        metric: capacity_metric,
    },
    ArchetypeRule {
        archetype: SelectionArchetype::BudgetFirst,
        metric: budget_metric,
    },
];

/// Assemble the diversified shortlist from scored candidates.
///
/// Each archetype picks from candidates no earlier slot has taken; slots
/// an archetype cannot fill are backfilled afterwards by next-highest
/// total, tagged `HighestScore`. Zero scored candidates is a valid
/// outcome signalled through `no_match`, not an error.
pub fn build_shortlist(
    scored: &[CandidateScore],
    slots: usize,
    config: &SelectionConfig,
) -> Shortlist {
    if scored.is_empty() {
        return Shortlist::empty_no_match();
    }

    let target = slots.min(scored.len());
    let mut entries: Vec<ShortlistEntry> = Vec::with_capacity(target);
    let mut taken: Vec<&str> = Vec::with_capacity(target);

    for rule in archetype_rules(slots) {
        if entries.len() == target {
            break;
        }
        if let Some(best) = pick_best(scored, &taken, |score| (rule.metric)(score, config)) {
            taken.push(best.provider_id.as_str());
            entries.push(ShortlistEntry {
                archetype: rule.archetype,
                score: best.clone(),
            });
        }
    }

    while entries.len() < target {
        match pick_best(scored, &taken, |score| Some(f64::from(score.total_points))) {
            Some(best) => {
                taken.push(best.provider_id.as_str());
                entries.push(ShortlistEntry {
                    archetype: SelectionArchetype::HighestScore,
                    score: best.clone(),
                });
            }
            None => break,
        }
    }

    debug_assert_eq!(entries.len(), target);

    Shortlist {
        entries,
        no_match: false,
    }
}

fn archetype_rules(slots: usize) -> Vec<ArchetypeRule> {
    let mut rules = BASE_RULES.to_vec();
    if slots >= 5 {
        rules.extend_from_slice(&WIDE_RULES);
    }
    rules
}

/// Highest metric wins. The tie-break chain (total points, then available
/// beds, then ascending provider id) makes the choice independent of
/// input order.
fn pick_best<'a, F>(
    scored: &'a [CandidateScore],
    taken: &[&str],
    metric: F,
) -> Option<&'a CandidateScore>
where
    F: Fn(&CandidateScore) -> Option<f64>,
{
    let mut best: Option<(&CandidateScore, f64)> = None;

    for candidate in scored {
        if taken.contains(&candidate.provider_id.as_str()) {
            continue;
        }
        let value = match metric(candidate) {
            Some(value) => value,
            None => continue,
        };
        best = match best {
            None => Some((candidate, value)),
            Some((incumbent, incumbent_value)) => {
                if prefer(candidate, value, incumbent, incumbent_value) {
                    Some((candidate, value))
                } else {
                    Some((incumbent, incumbent_value))
                }
            }
        };
    }

    best.map(|(candidate, _)| candidate)
}

fn prefer(
    challenger: &CandidateScore,
    challenger_value: f64,
    incumbent: &CandidateScore,
    incumbent_value: f64,
) -> bool {
    match challenger_value.partial_cmp(&incumbent_value) {
        Some(Ordering::Greater) => return true,
        Some(Ordering::Less) => return false,
        _ => {}
    }

    match challenger.total_points.cmp(&incumbent.total_points) {
        Ordering::Greater => return true,
        Ordering::Less => return false,
        Ordering::Equal => {}
    }

    match challenger.available_beds.cmp(&incumbent.available_beds) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => challenger.provider_id < incumbent.provider_id,
    }
}
