//! Geographic coordinate type and spherical-earth utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Walk segments are often only a
//! few metres long and the bearing classifier compares positions that may
//! differ in the sixth decimal place, so single precision is not enough here.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and within WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial compass bearing from `self` to `other` in degrees, normalised
    /// to `[0, 360)`.
    ///
    /// Returns `None` when the two points coincide: there is no direction to
    /// report.
    pub fn bearing_to(self, other: GeoPoint) -> Option<f64> {
        if self == other {
            return None;
        }
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
        Some(if deg >= 360.0 { 0.0 } else { deg })
    }

    /// `(lon, lat)` pair, the axis order used by GeoJSON-style geometry.
    #[inline]
    pub fn lon_lat(self) -> (f64, f64) {
        (self.lon, self.lat)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
