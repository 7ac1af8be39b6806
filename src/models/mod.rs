// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProvider, CandidateScore, CareDomain, CareNeedsProfile, CareType, Category,
    CategoryScore, ConditionTag, DomainLevel, FallHistory, FinancialSnapshot, GeoAnchor,
    MobilityLevel, PlacementUrgency, RegulatorRating, SelectionArchetype, ServiceTier, Shortlist,
    ShortlistEntry, WeightVector,
};
pub use requests::{MatchRequest, MatchScenario};
pub use responses::{MatchReport, PoolBreakdown};
