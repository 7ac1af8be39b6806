use crate::core::distance::{anchor_bounding_box, provider_distance_km, BoundingBox};
use crate::models::{CandidateProvider, CareNeedsProfile, CareType, PoolBreakdown};

/// One provider that survived the hard filters, carrying the per-request
/// facts derived on the way through.
#[derive(Debug, Clone)]
pub struct EligibleCandidate<'a> {
    pub provider: &'a CandidateProvider,
    pub distance_km: f64,
    /// Published weekly price for the requested care type.
    pub weekly_price: f64,
}

/// Stage 1 geospatial pre-filter: cheap rectangle check before the exact
/// haversine distance.
#[inline]
fn within_bounding_box(provider: &CandidateProvider, bbox: &BoundingBox) -> bool {
    bbox.contains(provider.latitude, provider.longitude)
}

/// Stage 2 eligibility checks: exclusion list, care setting and capacity.
#[inline]
fn passes_eligibility(
    provider: &CandidateProvider,
    requested: CareType,
    exclude_provider_ids: &[String],
) -> bool {
    if exclude_provider_ids.contains(&provider.provider_id) {
        return false;
    }

    if !provider.offers(requested) {
        return false;
    }

    provider.available_beds > 0
}

/// Partition the provider pool into scorable candidates and the rest.
///
/// Stages 1-3 are the hard filters (bounding box, exclusions, care type,
/// capacity, exact radius). Providers that pass them but publish no
/// usable price for the requested care type are split out separately so
/// the caller can report the exclusion instead of scoring a guess.
pub fn partition_pool<'a>(
    profile: &CareNeedsProfile,
    pool: &'a [CandidateProvider],
    search_radius_km: f64,
    exclude_provider_ids: &[String],
) -> (Vec<EligibleCandidate<'a>>, PoolBreakdown) {
    let total = pool.len();

    let requested = match profile.requested_care_type() {
        Some(care_type) => care_type,
        None => {
            return (
                Vec::new(),
                PoolBreakdown {
                    total,
                    failed_filters: total,
                    missing_price: 0,
                    scored: 0,
                },
            );
        }
    };

    let bbox = anchor_bounding_box(&profile.location, search_radius_km);

    let mut eligible = Vec::new();
    let mut failed_filters = 0;
    let mut missing_price = 0;

    for provider in pool {
        if !within_bounding_box(provider, &bbox)
            || !passes_eligibility(provider, requested, exclude_provider_ids)
        {
            failed_filters += 1;
            continue;
        }

        // Stage 3: exact distance for providers inside the rectangle.
        let distance_km = provider_distance_km(&profile.location, provider);
        if distance_km > search_radius_km {
            failed_filters += 1;
            continue;
        }

        // Stage 4: price partition. Missing or non-positive prices are
        // excluded from scoring, not defaulted.
        match provider.weekly_price(requested) {
            Some(weekly_price) => eligible.push(EligibleCandidate {
                provider,
                distance_km,
                weekly_price,
            }),
            None => missing_price += 1,
        }
    }

    let breakdown = PoolBreakdown {
        total,
        failed_filters,
        missing_price,
        scored: eligible.len(),
    };
    debug_assert_eq!(
        breakdown.total,
        breakdown.failed_filters + breakdown.missing_price + breakdown.scored
    );

    (eligible, breakdown)
}
