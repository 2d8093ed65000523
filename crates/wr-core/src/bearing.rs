//! Bearing classification: four fixed quadrants or a single target cone.
//!
//! The outward search keeps one incumbent route per *bucket*.  A [`Bias`]
//! decides how many buckets exist and which bucket a bearing falls into:
//!
//! | Bias                 | Buckets | Bucket of bearing `b`                      |
//! |----------------------|---------|--------------------------------------------|
//! | `Quadrants`          | 4       | `Quadrant::from_bearing(b).index()`        |
//! | `Cone(c)`            | 1       | `0` if `c.contains(b)`, otherwise none     |
//!
//! A missing bearing (start and end coincide) never maps to a bucket.

/// One of four 90° compass sectors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    /// `[0, 90)`
    NorthEast,
    /// `[90, 180)`
    SouthEast,
    /// `[180, 270)`
    SouthWest,
    /// `[270, 360)`
    NorthWest,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
        Quadrant::NorthWest,
    ];

    /// Bucket a compass bearing.  `None` in, `None` out.
    ///
    /// Bearings outside `[0, 360)` are normalised first, so `360.0` lands in
    /// `NorthEast` and `-10.0` in `NorthWest`.
    pub fn from_bearing(bearing: Option<f64>) -> Option<Quadrant> {
        let b = bearing?;
        if !b.is_finite() {
            return None;
        }
        match b.rem_euclid(360.0) {
            d if d < 90.0  => Some(Quadrant::NorthEast),
            d if d < 180.0 => Some(Quadrant::SouthEast),
            d if d < 270.0 => Some(Quadrant::SouthWest),
            _              => Some(Quadrant::NorthWest),
        }
    }

    /// Bucket index `0..4` (NE, SE, SW, NW).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::NorthEast => "NE",
            Quadrant::SouthEast => "SE",
            Quadrant::SouthWest => "SW",
            Quadrant::NorthWest => "NW",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An angular window `center ± half_width` on the compass.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BearingCone {
    /// Target bearing in degrees.
    pub center_deg: f64,
    /// Tolerance on either side of `center_deg`, in degrees.
    pub half_width_deg: f64,
}

impl BearingCone {
    pub fn new(center_deg: f64, half_width_deg: f64) -> Self {
        Self {
            center_deg: center_deg.rem_euclid(360.0),
            half_width_deg,
        }
    }

    /// `true` if `bearing` lies within the cone, accounting for wrap-around
    /// at north.
    pub fn contains(&self, bearing: f64) -> bool {
        angular_difference(self.center_deg, bearing) <= self.half_width_deg
    }
}

/// Smallest absolute difference between two compass bearings, in `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Retention policy for the outward search.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bias {
    /// Keep the best route in each of the four quadrants.
    #[default]
    Quadrants,
    /// Keep only the best route ending inside the cone.
    Cone(BearingCone),
}

impl Bias {
    /// Number of buckets this bias keeps incumbents for.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        match self {
            Bias::Quadrants => 4,
            Bias::Cone(_)   => 1,
        }
    }

    /// Bucket index for `bearing`, or `None` if it is not retained.
    pub fn bucket_of(&self, bearing: Option<f64>) -> Option<usize> {
        match self {
            Bias::Quadrants => Quadrant::from_bearing(bearing).map(Quadrant::index),
            Bias::Cone(cone) => {
                let b = bearing?;
                cone.contains(b).then_some(0)
            }
        }
    }
}
