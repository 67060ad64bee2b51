//! Normalized bearing type.
//!
//! [`Angle`] always holds a value in (−π, π]. Construction and every
//! arithmetic operation re-normalize, so callers never see a wrapped value.
//!
//! Bearings follow the topographic convention used throughout the crate:
//! 0 points north (+y), positive angles turn clockwise toward east (+x).

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const TWO_PI: f32 = 2.0 * PI;

/// A quarter turn to the right.
pub const RIGHT_ANGLE: Angle = Angle { radians: PI / 2.0 };

/// A half turn.
pub const FLAT_ANGLE: Angle = Angle { radians: PI };

/// Normalize an angle in radians to (−π, π].
///
/// Non-finite input has no direction and maps to 0.
pub fn normalize_radians(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle > -PI && angle <= PI {
        return angle;
    }
    // rem_euclid is in [0, 2π]; the upper end can round up to exactly 2π
    let a = angle.rem_euclid(TWO_PI);
    if a > PI { a - TWO_PI } else { a }
}

/// Angle normalized to (−π, π].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Angle {
    radians: f32,
}

impl Angle {
    #[inline]
    pub fn from_radians(radians: f32) -> Self {
        Self {
            radians: normalize_radians(radians),
        }
    }

    #[inline]
    pub fn from_degrees(degrees: f32) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// 400 gradians make a full turn.
    #[inline]
    pub fn from_gradians(gradians: f32) -> Self {
        Self::from_radians(gradians * PI / 200.0)
    }

    #[inline]
    pub fn radians(&self) -> f32 {
        self.radians
    }

    #[inline]
    pub fn degrees(&self) -> f32 {
        self.radians.to_degrees()
    }

    #[inline]
    pub fn gradians(&self) -> f32 {
        self.radians * 200.0 / PI
    }

    #[inline]
    pub fn sin(&self) -> f32 {
        self.radians.sin()
    }

    #[inline]
    pub fn cos(&self) -> f32 {
        self.radians.cos()
    }

    #[inline]
    pub fn tan(&self) -> f32 {
        self.radians.tan()
    }

    /// Bearing of the vector (dx, dy), clockwise from north.
    #[inline]
    pub fn bearing(dx: f32, dy: f32) -> Self {
        Self::from_radians(dx.atan2(dy))
    }
}

impl From<f32> for Angle {
    fn from(radians: f32) -> Self {
        Self::from_radians(radians)
    }
}

impl From<Angle> for f32 {
    fn from(angle: Angle) -> Self {
        angle.radians
    }
}

impl Add for Angle {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_radians(self.radians + other.radians)
    }
}

impl Sub for Angle {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_radians(self.radians - other.radians)
    }
}

impl Neg for Angle {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_radians(-self.radians)
    }
}

impl AddAssign for Angle {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.radians = normalize_radians(self.radians + other.radians);
    }
}

impl SubAssign for Angle {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.radians = normalize_radians(self.radians - other.radians);
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}
