// Unit tests for CareMatch

use carematch::core::{
    distance::{anchor_bounding_box, haversine_km},
    filters::partition_pool,
    weights::{derive_weights, WeightConfig},
};
use carematch::funding::{deferred, health_funded, means_test, CostBasis};
use carematch::funding::{DeferredConfig, HealthFundedConfig, MeansTestConfig, NeedBand};
use carematch::models::{
    CandidateProvider, CareDomain, CareNeedsProfile, CareType, DomainLevel, FallHistory,
    FinancialSnapshot, GeoAnchor, MobilityLevel, PlacementUrgency,
};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_km(51.5074, -0.1278, 51.5074, -0.1278);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_london_to_brighton() {
    // Central London to Brighton is approximately 76 km
    let london_lat = 51.5074;
    let london_lon = -0.1278;
    let brighton_lat = 50.8225;
    let brighton_lon = -0.1372;

    let distance = haversine_km(london_lat, london_lon, brighton_lat, brighton_lon);
    assert!(distance > 70.0 && distance < 85.0, "Expected ~76km, got {}", distance);
}

#[test]
fn test_bounding_box_creation() {
    let anchor = GeoAnchor {
        latitude: 51.5074,
        longitude: -0.1278,
        region: "london".to_string(),
    };
    let bbox = anchor_bounding_box(&anchor, 10.0);

    assert!(bbox.min_lat < 51.5074);
    assert!(bbox.max_lat > 51.5074);
    assert!(bbox.min_lon < -0.1278);
    assert!(bbox.max_lon > -0.1278);

    // Bounding box should be roughly 0.18 degrees in latitude (10km / 111km per degree)
    let lat_span = bbox.max_lat - bbox.min_lat;
    assert!((lat_span - 0.18).abs() < 0.02);
}

#[test]
fn test_point_within_bbox() {
    let anchor = GeoAnchor {
        latitude: 51.5074,
        longitude: -0.1278,
        region: "london".to_string(),
    };
    let bbox = anchor_bounding_box(&anchor, 10.0);

    // Center point is within
    assert!(bbox.contains(51.5074, -0.1278));

    // Close point is within
    assert!(bbox.contains(51.51, -0.13));

    // Manchester is not within
    assert!(!bbox.contains(53.4808, -2.2426));

    // Point just outside latitude is not within
    assert!(!bbox.contains(bbox.max_lat + 0.01, -0.1278));
}

#[test]
fn test_calm_profile_keeps_baseline_weights() {
    let profile = CareNeedsProfile {
        household_id: "hh-calm".to_string(),
        conditions: BTreeSet::new(),
        mobility: MobilityLevel::Independent,
        fall_history: FallHistory::None,
        weekly_budget: 1200.0,
        urgency: PlacementUrgency::Flexible,
        care_types: vec![CareType::Residential],
        location: GeoAnchor {
            latitude: 51.5074,
            longitude: -0.1278,
            region: "london".to_string(),
        },
        care_domains: BTreeMap::new(),
        created_at: Utc::now(),
    };

    let derived = derive_weights(&profile, &WeightConfig::default());

    assert!(derived.rules_applied.is_empty(), "No rule should fire for a calm profile");
    assert!((derived.vector.sum() - 100.0).abs() < 0.1);
    assert_eq!(derived.vector.medical, 20.0);
    assert_eq!(derived.vector.safety, 15.0);
}

#[test]
fn test_recurrent_falls_make_safety_the_top_weight() {
    let profile = CareNeedsProfile {
        household_id: "hh-falls".to_string(),
        conditions: BTreeSet::new(),
        mobility: MobilityLevel::AidAssisted,
        fall_history: FallHistory::Recurrent,
        weekly_budget: 1200.0,
        urgency: PlacementUrgency::Flexible,
        care_types: vec![CareType::Residential],
        location: GeoAnchor {
            latitude: 51.5074,
            longitude: -0.1278,
            region: "london".to_string(),
        },
        care_domains: BTreeMap::new(),
        created_at: Utc::now(),
    };

    let derived = derive_weights(&profile, &WeightConfig::default());

    assert_eq!(derived.rules_applied, vec!["elevated-fall-risk"]);
    for (_, weight) in derived.vector.entries() {
        assert!(
            derived.vector.safety >= weight,
            "Safety should carry the largest weight after a fall-risk trigger"
        );
    }
    assert!((derived.vector.sum() - 100.0).abs() < 0.1);
}

#[test]
fn test_partition_splits_pool_into_three_buckets() {
    let profile = CareNeedsProfile {
        household_id: "hh-pool".to_string(),
        conditions: BTreeSet::new(),
        mobility: MobilityLevel::Independent,
        fall_history: FallHistory::None,
        weekly_budget: 1000.0,
        urgency: PlacementUrgency::Flexible,
        care_types: vec![CareType::Residential],
        location: GeoAnchor {
            latitude: 51.5074,
            longitude: -0.1278,
            region: "london".to_string(),
        },
        care_domains: BTreeMap::new(),
        created_at: Utc::now(),
    };

    let mut priced = HashMap::new();
    priced.insert(CareType::Residential, 900.0);

    let scorable = CandidateProvider {
        provider_id: "scorable".to_string(),
        name: "Scorable House".to_string(),
        latitude: 51.51,
        longitude: -0.12,
        region: "london".to_string(),
        care_types: vec![CareType::Residential],
        specialisms: BTreeSet::new(),
        weekly_prices: priced.clone(),
        total_beds: 30,
        available_beds: 4,
        regulator_rating: None,
        hygiene_rating: Some(4),
        review_rating: None,
        review_count: 0,
        solvency_score: None,
        workforce_score: None,
    };

    let mut unpriced = scorable.clone();
    unpriced.provider_id = "unpriced".to_string();
    unpriced.weekly_prices.clear();

    let mut far = scorable.clone();
    far.provider_id = "far".to_string();
    far.latitude = 53.4808; // Manchester
    far.longitude = -2.2426;

    let pool = vec![scorable, unpriced, far];
    let (eligible, breakdown) = partition_pool(&profile, &pool, 25.0, &[]);

    assert_eq!(breakdown.total, 3);
    assert_eq!(breakdown.scored, 1);
    assert_eq!(breakdown.missing_price, 1);
    assert_eq!(breakdown.failed_filters, 1);
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].provider.provider_id, "scorable");
}

#[test]
fn test_means_test_reference_household() {
    // 10,000 savings, 220 weekly income, 1,800 weekly cost: support is
    // 1,800 - (220 - 30.15) = 1,610.15, rounded to 1,610.
    let financial = FinancialSnapshot {
        savings_capital: Some(10_000.0),
        weekly_income: Some(220.0),
        property_value: Some(0.0),
        qualifying_relative_at_home: Some(false),
        weekly_care_cost: Some(1_800.0),
    };

    let estimate = means_test::estimate(
        &financial,
        CostBasis::Stated(1_800.0),
        &MeansTestConfig::default(),
    );

    assert!(estimate.eligible);
    assert_eq!(estimate.tariff_income_weekly, 0.0);
    assert_eq!(estimate.weekly_support, 1_610.0);
    assert_eq!(estimate.annual_support, 83_728.0);
    assert!(estimate.defaulted_fields.is_empty());
}

#[test]
fn test_means_test_upper_threshold_cuts_all_support() {
    let financial = FinancialSnapshot {
        savings_capital: Some(23_250.0),
        weekly_income: Some(180.0),
        property_value: Some(0.0),
        qualifying_relative_at_home: Some(false),
        weekly_care_cost: Some(950.0),
    };

    let estimate = means_test::estimate(
        &financial,
        CostBasis::Stated(950.0),
        &MeansTestConfig::default(),
    );

    assert!(!estimate.eligible, "Capital at the upper threshold ends support");
    assert_eq!(estimate.weekly_support, 0.0);
    assert_eq!(estimate.weekly_contribution, 950.0);
}

#[test]
fn test_deferred_projection_without_interest_is_a_plain_sum() {
    let financial = FinancialSnapshot {
        savings_capital: Some(10_000.0),
        weekly_income: Some(150.0),
        property_value: Some(300_000.0),
        qualifying_relative_at_home: Some(false),
        weekly_care_cost: Some(1_000.0),
    };
    let config = DeferredConfig {
        interest_rate_annual: 0.0,
        horizon_years: 3,
    };

    let estimate = deferred::estimate(&financial, CostBasis::Stated(1_000.0), &config, 23_250.0);

    assert!(estimate.eligible);
    assert_eq!(estimate.yearly_projection.len(), 3);
    // With a zero rate each year adds exactly one year of cost.
    assert_eq!(estimate.yearly_projection[0].projected_debt, 52_000.0);
    assert_eq!(estimate.yearly_projection[1].projected_debt, 104_000.0);
    assert_eq!(estimate.yearly_projection[2].projected_debt, 156_000.0);
    assert_eq!(estimate.equity_exhausted_year, None);
}

#[test]
fn test_health_funded_priority_domain_forces_top_band() {
    let mut care_domains = BTreeMap::new();
    care_domains.insert(CareDomain::Breathing, DomainLevel::Priority);

    let profile = CareNeedsProfile {
        household_id: "hh-chc".to_string(),
        conditions: BTreeSet::new(),
        mobility: MobilityLevel::Bedbound,
        fall_history: FallHistory::None,
        weekly_budget: 1500.0,
        urgency: PlacementUrgency::Immediate,
        care_types: vec![CareType::Nursing],
        location: GeoAnchor {
            latitude: 51.5074,
            longitude: -0.1278,
            region: "london".to_string(),
        },
        care_domains,
        created_at: Utc::now(),
    };

    let estimate = health_funded::estimate(&profile, &HealthFundedConfig::default());

    assert_eq!(estimate.band, NeedBand::VeryHigh);
    assert_eq!(estimate.probability_percent, 90.0);
    assert!(estimate.annual_saving_high > estimate.annual_saving_low);
}
