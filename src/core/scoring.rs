use crate::core::filters::EligibleCandidate;
use crate::models::{
    CandidateProvider, CandidateScore, CareNeedsProfile, Category, CategoryScore,
    RegulatorRating, ServiceTier, WeightVector,
};

/// Sub-score used when the data behind a category is absent. Mid-range so
/// missing premium data never sinks an otherwise strong candidate.
pub const NEUTRAL_SUBSCORE: f64 = 0.5;

/// Review volume at which the social sub-score fully trusts the rating.
const FULL_CONFIDENCE_REVIEWS: f64 = 20.0;

/// Score one eligible candidate across the eight categories.
///
/// Scoring formula per category:
///     weighted_points = subscore * (weight% / 100) * tier_max_points
///
/// Sub-scores are clipped to [0,1] and the weight vector sums to 100, so
/// the rounded total always lands within [0, tier max].
pub fn score_candidate(
    profile: &CareNeedsProfile,
    candidate: &EligibleCandidate<'_>,
    weights: &WeightVector,
    tier: ServiceTier,
) -> CandidateScore {
    let provider = candidate.provider;
    let max_points = f64::from(tier.max_points());

    let mut breakdown = Vec::with_capacity(Category::ALL.len());
    let mut total = 0.0;

    for category in Category::ALL {
        let (subscore, basis) = match category {
            Category::Medical => medical_subscore(profile, provider),
            Category::Safety => safety_subscore(provider),
            Category::Location => location_subscore(candidate.distance_km),
            Category::Social => social_subscore(provider),
            Category::Financial => {
                financial_subscore(profile, provider, candidate.weekly_price, tier)
            }
            Category::Staff => staff_subscore(provider, tier),
            Category::Regulatory => regulatory_subscore(provider),
            Category::Services => services_subscore(profile, provider),
        };

        debug_assert!((0.0..=1.0).contains(&subscore));

        let weighted_points = subscore * (weights.get(category) / 100.0) * max_points;
        total += weighted_points;
        breakdown.push(CategoryScore {
            category,
            subscore,
            weighted_points,
            basis,
        });
    }

    let total_points = total.round().clamp(0.0, max_points) as u16;
    let percent = round_one_decimal(f64::from(total_points) / max_points * 100.0);

    CandidateScore {
        provider_id: provider.provider_id.clone(),
        provider_name: provider.name.clone(),
        distance_km: candidate.distance_km,
        weekly_price: candidate.weekly_price,
        available_beds: provider.available_beds,
        breakdown,
        total_points,
        percent,
        weights: weights.clone(),
    }
}

/// Fraction of the profile's condition tags covered by the provider's
/// advertised specialisms. Nothing to cover scores full marks.
fn medical_subscore(profile: &CareNeedsProfile, provider: &CandidateProvider) -> (f64, String) {
    if profile.conditions.is_empty() {
        return (1.0, "no conditions to cover".to_string());
    }

    let covered = profile
        .conditions
        .iter()
        .filter(|tag| provider.specialisms.contains(tag))
        .count();
    let total = profile.conditions.len();

    (
        covered as f64 / total as f64,
        format!("covers {} of {} conditions", covered, total),
    )
}

fn safety_subscore(provider: &CandidateProvider) -> (f64, String) {
    match provider.hygiene_rating {
        Some(rating) => {
            let rating = rating.min(5);
            (
                hygiene_score(rating),
                format!("hygiene rating {} of 5", rating),
            )
        }
        None => (
            NEUTRAL_SUBSCORE,
            "no hygiene inspection on record".to_string(),
        ),
    }
}

/// Discrete map for the 0-5 hygiene inspection scale.
#[inline]
fn hygiene_score(rating: u8) -> f64 {
    match rating {
        5 => 1.0,
        4 => 0.8,
        3 => 0.55,
        2 => 0.3,
        1 => 0.15,
        _ => 0.0,
    }
}

fn location_subscore(distance_km: f64) -> (f64, String) {
    (
        distance_band_score(distance_km),
        format!("{:.1} km from the search anchor", distance_km),
    )
}

/// Four distance bands rather than a continuous decay: placements inside
/// the same town are interchangeable for visiting family, so small
/// differences should not reorder candidates.
#[inline]
fn distance_band_score(distance_km: f64) -> f64 {
    if distance_km <= 5.0 {
        1.0
    } else if distance_km <= 15.0 {
        0.75
    } else if distance_km <= 30.0 {
        0.45
    } else {
        0.2
    }
}

/// Review-derived reputation, shrunk toward neutral while review volume
/// is thin.
fn social_subscore(provider: &CandidateProvider) -> (f64, String) {
    match provider.review_rating {
        Some(rating) => {
            let normalized = (rating / 10.0).clamp(0.0, 1.0);
            let confidence = (provider.review_count as f64 / FULL_CONFIDENCE_REVIEWS).min(1.0);
            let score = normalized * confidence + NEUTRAL_SUBSCORE * (1.0 - confidence);
            (
                score,
                format!(
                    "rated {:.1} of 10 across {} reviews",
                    rating, provider.review_count
                ),
            )
        }
        None => (NEUTRAL_SUBSCORE, "no reviews on record".to_string()),
    }
}

/// Affordability blended with the solvency indicator. The solvency half
/// stays neutral below the premium tier so the category still reacts to
/// budget pressure everywhere.
fn financial_subscore(
    profile: &CareNeedsProfile,
    provider: &CandidateProvider,
    weekly_price: f64,
    tier: ServiceTier,
) -> (f64, String) {
    let affordability = if weekly_price <= profile.weekly_budget {
        1.0
    } else {
        (profile.weekly_budget / weekly_price).max(0.0)
    };

    let (solvency, solvency_note) = match provider.solvency_score {
        Some(value) if tier.premium_indicators() => {
            let value = value.clamp(0.0, 1.0);
            (value, format!("solvency {:.2}", value))
        }
        _ => (NEUTRAL_SUBSCORE, "solvency not assessed".to_string()),
    };

    let score = (affordability + solvency) / 2.0;
    let basis = format!(
        "price {:.0} against budget {:.0}, {}",
        weekly_price, profile.weekly_budget, solvency_note
    );

    (score, basis)
}

fn staff_subscore(provider: &CandidateProvider, tier: ServiceTier) -> (f64, String) {
    match provider.workforce_score {
        Some(value) if tier.premium_indicators() => {
            let value = value.clamp(0.0, 1.0);
            (value, format!("workforce indicator {:.2}", value))
        }
        _ => (NEUTRAL_SUBSCORE, "workforce not assessed".to_string()),
    }
}

fn regulatory_subscore(provider: &CandidateProvider) -> (f64, String) {
    match provider.regulator_rating {
        Some(rating) => (
            regulator_score(rating),
            format!("regulator rating {:?}", rating),
        ),
        None => (
            NEUTRAL_SUBSCORE,
            "not yet rated by the regulator".to_string(),
        ),
    }
}

/// Discrete map for the regulator's four-point rating scale.
#[inline]
fn regulator_score(rating: RegulatorRating) -> f64 {
    match rating {
        RegulatorRating::Outstanding => 1.0,
        RegulatorRating::Good => 0.75,
        RegulatorRating::RequiresImprovement => 0.4,
        RegulatorRating::Inadequate => 0.1,
    }
}

/// Fraction of the requested care settings the provider offers.
fn services_subscore(profile: &CareNeedsProfile, provider: &CandidateProvider) -> (f64, String) {
    if profile.care_types.is_empty() {
        return (1.0, "no care settings requested".to_string());
    }

    let offered = profile
        .care_types
        .iter()
        .filter(|care_type| provider.offers(**care_type))
        .count();
    let requested = profile.care_types.len();

    (
        offered as f64 / requested as f64,
        format!("offers {} of {} requested settings", offered, requested),
    )
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
