// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod selection;
pub mod weights;

pub use distance::{anchor_bounding_box, haversine_km, provider_distance_km, BoundingBox};
pub use filters::{partition_pool, EligibleCandidate};
pub use matcher::{EngineConfig, EngineError, MatchEngine};
pub use scoring::{score_candidate, NEUTRAL_SUBSCORE};
pub use selection::{build_shortlist, SelectionConfig};
pub use weights::{derive_weights, DerivedWeights, WeightConfig, WEIGHT_SUM_TOLERANCE};
