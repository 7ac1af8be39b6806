use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Service tier controlling computation depth.
///
/// The tier fixes the point scale, the shortlist size and which premium
/// sub-scores are computed rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Basic,
    Standard,
    Premium,
}

impl ServiceTier {
    /// Maximum total points a candidate can score at this tier.
    pub fn max_points(&self) -> u16 {
        match self {
            ServiceTier::Basic => 50,
            ServiceTier::Standard | ServiceTier::Premium => 156,
        }
    }

    /// Number of shortlist slots assembled at this tier.
    pub fn shortlist_slots(&self) -> usize {
        match self {
            ServiceTier::Basic => 3,
            ServiceTier::Standard | ServiceTier::Premium => 5,
        }
    }

    /// Whether solvency/workforce indicators are scored instead of defaulted.
    pub fn premium_indicators(&self) -> bool {
        matches!(self, ServiceTier::Premium)
    }
}

/// Care setting requested by a household or offered by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareType {
    Residential,
    Nursing,
    Dementia,
    Respite,
    Palliative,
}

/// Normalized medical-condition tags supplied by intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    Dementia,
    Alzheimers,
    Parkinsons,
    Stroke,
    Diabetes,
    HeartDisease,
    Copd,
    Arthritis,
    Cancer,
    Depression,
    Incontinence,
}

impl ConditionTag {
    /// Tags that mark a cognitive impairment for weighting purposes.
    pub fn is_cognitive(&self) -> bool {
        matches!(self, ConditionTag::Dementia | ConditionTag::Alzheimers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityLevel {
    Independent,
    AidAssisted,
    WheelchairDependent,
    Bedbound,
}

/// Fall-history category recorded at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallHistory {
    None,
    Single,
    Recurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementUrgency {
    Flexible,
    WithinMonth,
    Immediate,
}

/// Geographic anchor: coordinates for distance work plus the normalized
/// region key used by the fair-cost baseline table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAnchor {
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
}

/// Assessment domains feeding the health-funded eligibility estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareDomain {
    Breathing,
    Nutrition,
    Continence,
    SkinIntegrity,
    Mobility,
    Communication,
    Psychological,
    Cognition,
    Behaviour,
    Medication,
    Consciousness,
}

impl CareDomain {
    pub const ALL: [CareDomain; 11] = [
        CareDomain::Breathing,
        CareDomain::Nutrition,
        CareDomain::Continence,
        CareDomain::SkinIntegrity,
        CareDomain::Mobility,
        CareDomain::Communication,
        CareDomain::Psychological,
        CareDomain::Cognition,
        CareDomain::Behaviour,
        CareDomain::Medication,
        CareDomain::Consciousness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CareDomain::Breathing => "breathing",
            CareDomain::Nutrition => "nutrition",
            CareDomain::Continence => "continence",
            CareDomain::SkinIntegrity => "skin_integrity",
            CareDomain::Mobility => "mobility",
            CareDomain::Communication => "communication",
            CareDomain::Psychological => "psychological",
            CareDomain::Cognition => "cognition",
            CareDomain::Behaviour => "behaviour",
            CareDomain::Medication => "medication",
            CareDomain::Consciousness => "consciousness",
        }
    }
}

/// Ordinal need level for a single care domain (0 = no need, 5 = priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainLevel {
    None,
    Low,
    Moderate,
    High,
    Severe,
    Priority,
}

impl DomainLevel {
    pub fn ordinal(&self) -> u8 {
        match self {
            DomainLevel::None => 0,
            DomainLevel::Low => 1,
            DomainLevel::Moderate => 2,
            DomainLevel::High => 3,
            DomainLevel::Severe => 4,
            DomainLevel::Priority => 5,
        }
    }
}

/// Household care-needs profile: immutable snapshot taken at intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareNeedsProfile {
    #[serde(rename = "householdId")]
    pub household_id: String,
    #[serde(default)]
    pub conditions: BTreeSet<ConditionTag>,
    pub mobility: MobilityLevel,
    #[serde(rename = "fallHistory")]
    pub fall_history: FallHistory,
    /// Weekly spend ceiling in whole currency units.
    #[serde(rename = "weeklyBudget")]
    pub weekly_budget: f64,
    pub urgency: PlacementUrgency,
    /// Requested care settings, most important first. The first entry is
    /// the one used for pricing and market comparison.
    #[serde(rename = "careTypes")]
    pub care_types: Vec<CareType>,
    pub location: GeoAnchor,
    /// Assessment answers for the health-funded estimate. Domains not
    /// answered are treated as no-need and surfaced as defaulted.
    #[serde(rename = "careDomains", default)]
    pub care_domains: BTreeMap<CareDomain, DomainLevel>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CareNeedsProfile {
    /// The care type used for pricing, exclusions and market comparison.
    pub fn requested_care_type(&self) -> Option<CareType> {
        self.care_types.first().copied()
    }

    /// Recurrent falls, or a single fall while wheelchair-dependent or
    /// bedbound, count as elevated fall risk.
    pub fn elevated_fall_risk(&self) -> bool {
        match self.fall_history {
            FallHistory::Recurrent => true,
            FallHistory::Single => matches!(
                self.mobility,
                MobilityLevel::WheelchairDependent | MobilityLevel::Bedbound
            ),
            FallHistory::None => false,
        }
    }

    pub fn cognitive_impairment(&self) -> bool {
        self.conditions.iter().any(|tag| tag.is_cognitive())
    }

    /// Nursing-led settings imply a skilled-nursing requirement.
    pub fn needs_skilled_nursing(&self) -> bool {
        self.care_types
            .iter()
            .any(|ct| matches!(ct, CareType::Nursing | CareType::Palliative))
    }

    pub fn domain_level(&self, domain: CareDomain) -> DomainLevel {
        self.care_domains
            .get(&domain)
            .copied()
            .unwrap_or(DomainLevel::None)
    }
}

/// Household financial details for the funding calculators. Every field is
/// optional: the calculators default absent values and report the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Liquid capital (savings, investments) excluding the main home.
    #[serde(rename = "savingsCapital", default)]
    pub savings_capital: Option<f64>,
    #[serde(rename = "weeklyIncome", default)]
    pub weekly_income: Option<f64>,
    /// Market value of the main home, if owned.
    #[serde(rename = "propertyValue", default)]
    pub property_value: Option<f64>,
    /// Whether a qualifying relative still lives in the home, which keeps
    /// the property out of the means-test capital.
    #[serde(rename = "qualifyingRelativeAtHome", default)]
    pub qualifying_relative_at_home: Option<bool>,
    /// Weekly cost of the intended care placement.
    #[serde(rename = "weeklyCareCost", default)]
    pub weekly_care_cost: Option<f64>,
}

/// Regulator rating scale for registered providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatorRating {
    Outstanding,
    Good,
    RequiresImprovement,
    Inadequate,
}

/// Normalized care-provider record supplied by the ingestion collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProvider {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
    #[serde(rename = "careTypes")]
    pub care_types: Vec<CareType>,
    /// Condition tags the provider advertises support for.
    #[serde(default)]
    pub specialisms: BTreeSet<ConditionTag>,
    /// Weekly price per care type. A missing entry means the provider has
    /// not published a price for that setting.
    #[serde(rename = "weeklyPrices", default)]
    pub weekly_prices: HashMap<CareType, f64>,
    #[serde(rename = "totalBeds")]
    pub total_beds: u16,
    #[serde(rename = "availableBeds")]
    pub available_beds: u16,
    #[serde(rename = "regulatorRating", default)]
    pub regulator_rating: Option<RegulatorRating>,
    /// Hygiene inspection score on the 0-5 scale.
    #[serde(rename = "hygieneRating", default)]
    pub hygiene_rating: Option<u8>,
    /// Aggregated review score on the 0-10 scale.
    #[serde(rename = "reviewRating", default)]
    pub review_rating: Option<f64>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    /// Company-registry solvency indicator in [0,1]; premium-tier data.
    #[serde(rename = "solvencyScore", default)]
    pub solvency_score: Option<f64>,
    /// Workforce-quality indicator in [0,1]; premium-tier data.
    #[serde(rename = "workforceScore", default)]
    pub workforce_score: Option<f64>,
}

impl CandidateProvider {
    pub fn offers(&self, care_type: CareType) -> bool {
        self.care_types.contains(&care_type)
    }

    /// Published weekly price for a care type. Non-positive entries are
    /// treated as unpublished.
    pub fn weekly_price(&self, care_type: CareType) -> Option<f64> {
        self.weekly_prices
            .get(&care_type)
            .copied()
            .filter(|price| *price > 0.0)
    }
}

/// The eight scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medical,
    Safety,
    Location,
    Social,
    Financial,
    Staff,
    Regulatory,
    Services,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Medical,
        Category::Safety,
        Category::Location,
        Category::Social,
        Category::Financial,
        Category::Staff,
        Category::Regulatory,
        Category::Services,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Medical => "medical",
            Category::Safety => "safety",
            Category::Location => "location",
            Category::Social => "social",
            Category::Financial => "financial",
            Category::Staff => "staff",
            Category::Regulatory => "regulatory",
            Category::Services => "services",
        }
    }
}

/// Per-request category weights as percentages. Invariant: the eight
/// fields sum to 100 within floating-point tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub medical: f64,
    pub safety: f64,
    pub location: f64,
    pub social: f64,
    pub financial: f64,
    pub staff: f64,
    pub regulatory: f64,
    pub services: f64,
}

impl WeightVector {
    /// Baseline weighting before any profile trigger fires.
    pub fn baseline() -> Self {
        Self {
            medical: 20.0,
            safety: 15.0,
            location: 15.0,
            social: 10.0,
            financial: 15.0,
            staff: 10.0,
            regulatory: 10.0,
            services: 5.0,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Medical => self.medical,
            Category::Safety => self.safety,
            Category::Location => self.location,
            Category::Social => self.social,
            Category::Financial => self.financial,
            Category::Staff => self.staff,
            Category::Regulatory => self.regulatory,
            Category::Services => self.services,
        }
    }

    pub fn add(&mut self, category: Category, delta: f64) {
        let slot = match category {
            Category::Medical => &mut self.medical,
            Category::Safety => &mut self.safety,
            Category::Location => &mut self.location,
            Category::Social => &mut self.social,
            Category::Financial => &mut self.financial,
            Category::Staff => &mut self.staff,
            Category::Regulatory => &mut self.regulatory,
            Category::Services => &mut self.services,
        };
        *slot += delta;
    }

    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Negative intermediate values (over-cut categories) collapse to zero
    /// before renormalisation.
    pub fn floor_zero(&mut self) {
        for category in Category::ALL {
            let value = self.get(category);
            if value < 0.0 {
                self.add(category, -value);
            }
        }
    }

    /// Proportional rescale so the vector sums to exactly `target`.
    pub fn rescale_to(&mut self, target: f64) {
        let sum = self.sum();
        debug_assert!(sum > 0.0, "weight vector collapsed to zero");
        if sum > 0.0 {
            let factor = target / sum;
            for category in Category::ALL {
                let value = self.get(category);
                self.add(category, value * factor - value);
            }
        }
    }

    pub fn entries(&self) -> [(Category, f64); 8] {
        [
            (Category::Medical, self.medical),
            (Category::Safety, self.safety),
            (Category::Location, self.location),
            (Category::Social, self.social),
            (Category::Financial, self.financial),
            (Category::Staff, self.staff),
            (Category::Regulatory, self.regulatory),
            (Category::Services, self.services),
        ]
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::baseline()
    }
}

/// One category's contribution to a candidate score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Raw sub-score in [0,1].
    pub subscore: f64,
    /// subscore x weight% x tier maximum.
    #[serde(rename = "weightedPoints")]
    pub weighted_points: f64,
    /// Short human-readable note on what produced the sub-score.
    pub basis: String,
}

/// Fully scored candidate with the weight vector used, kept so the
/// downstream renderer can explain the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    /// Weekly price for the requested care type.
    #[serde(rename = "weeklyPrice")]
    pub weekly_price: f64,
    #[serde(rename = "availableBeds")]
    pub available_beds: u16,
    pub breakdown: Vec<CategoryScore>,
    #[serde(rename = "totalPoints")]
    pub total_points: u16,
    /// total / tier maximum, as a percentage rounded to one decimal.
    pub percent: f64,
    pub weights: WeightVector,
}

impl CandidateScore {
    pub fn subscore(&self, category: Category) -> f64 {
        self.breakdown
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.subscore)
            .unwrap_or(0.0)
    }
}

/// Selection rationale attached to each shortlist slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionArchetype {
    SafetyFirst,
    ReputationFirst,
    ValueFirst,
    CapacityFirst,
    BudgetFirst,
    /// Backfill rationale when an archetype slot could not be filled.
    HighestScore,
}

impl SelectionArchetype {
    pub fn label(&self) -> &'static str {
        match self {
            SelectionArchetype::SafetyFirst => "safety_first",
            SelectionArchetype::ReputationFirst => "reputation_first",
            SelectionArchetype::ValueFirst => "value_first",
            SelectionArchetype::CapacityFirst => "capacity_first",
            SelectionArchetype::BudgetFirst => "budget_first",
            SelectionArchetype::HighestScore => "highest_score",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub archetype: SelectionArchetype,
    pub score: CandidateScore,
}

/// Ordered, duplicate-free shortlist. `no_match` is set when the eligible
/// pool was empty and no slot could be filled at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortlist {
    pub entries: Vec<ShortlistEntry>,
    #[serde(rename = "noMatch")]
    pub no_match: bool,
}

impl Shortlist {
    pub fn empty_no_match() -> Self {
        Self {
            entries: Vec::new(),
            no_match: true,
        }
    }

    pub fn contains(&self, provider_id: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.score.provider_id == provider_id)
    }
}
