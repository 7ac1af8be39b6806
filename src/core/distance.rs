use crate::models::{CandidateProvider, GeoAnchor};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rectangular prefilter window around a search anchor.
///
/// Cheap containment checks run before the exact haversine distance, so
/// large pools shed far-away providers without trigonometry.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Haversine great-circle distance between two coordinate pairs, in km.
#[inline]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from the household's anchor to a provider, in km.
#[inline]
pub fn provider_distance_km(anchor: &GeoAnchor, provider: &CandidateProvider) -> f64 {
    haversine_km(
        anchor.latitude,
        anchor.longitude,
        provider.latitude,
        provider.longitude,
    )
}

/// Bounding box with the given radius around the household's anchor.
///
/// 1 degree latitude is roughly 111 km; 1 degree longitude shrinks by
/// cos(latitude).
pub fn anchor_bounding_box(anchor: &GeoAnchor, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * anchor.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: anchor.latitude - lat_delta,
        max_lat: anchor.latitude + lat_delta,
        min_lon: anchor.longitude - lon_delta,
        max_lon: anchor.longitude + lon_delta,
    }
}
