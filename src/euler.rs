//! Roll, pitch and yaw triple sharing one angle unit

use core::ops::{Add, Mul};

use crate::angle::{Angle, AngleUnit};
use crate::math::{Real, shortest_difference};
use crate::quaternion::Quaternion;

/// Rotation about the x (roll), y (pitch) and z (yaw) axes.
///
/// All three components share one [`AngleUnit`]. Components assigned in a
/// different unit are converted on the way in, and unit conversion always
/// touches all three together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euler<T> {
    x: Angle<T>,
    y: Angle<T>,
    z: Angle<T>,
    unit: AngleUnit,
}

impl<T: Real> Euler<T> {
    pub fn new(x: T, y: T, z: T, unit: AngleUnit) -> Self {
        Self {
            x: Angle::new(x, unit),
            y: Angle::new(y, unit),
            z: Angle::new(z, unit),
            unit,
        }
    }

    /// Rotation about x
    pub fn x(&self) -> Angle<T> {
        self.x
    }

    /// Rotation about y
    pub fn y(&self) -> Angle<T> {
        self.y
    }

    /// Rotation about z
    pub fn z(&self) -> Angle<T> {
        self.z
    }

    pub fn set_x(&mut self, x: Angle<T>) {
        self.x = x.in_unit(self.unit);
    }

    pub fn set_y(&mut self, y: Angle<T>) {
        self.y = y.in_unit(self.unit);
    }

    pub fn set_z(&mut self, z: Angle<T>) {
        self.z = z.in_unit(self.unit);
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Converts all three components to radians
    pub fn to_radians(&mut self) {
        if self.unit == AngleUnit::Degrees {
            self.unit = AngleUnit::Radians;
            self.x.to_radians();
            self.y.to_radians();
            self.z.to_radians();
        }
    }

    /// Converts all three components to degrees
    pub fn to_degrees(&mut self) {
        if self.unit == AngleUnit::Radians {
            self.unit = AngleUnit::Degrees;
            self.x.to_degrees();
            self.y.to_degrees();
            self.z.to_degrees();
        }
    }

    /// Quaternion for the roll-pitch-yaw sequence (yaw applied first).
    ///
    /// Works on a radians copy; `self` keeps its unit.
    ///
    /// # Example
    /// ```
    /// use attitude_estimation::{AngleUnit, Euler};
    ///
    /// let q = Euler::new(45.0f64, 45.0, 45.0, AngleUnit::Degrees).to_quaternion();
    /// assert!((q.w() - 0.8446).abs() < 1e-4);
    /// assert!((q.y() - 0.4619).abs() < 1e-4);
    /// ```
    pub fn to_quaternion(&self) -> Quaternion<T> {
        let mut radians = *self;
        radians.to_radians();

        let half = T::constant(0.5);
        let (sr, cr) = (radians.x.value() * half).sin_cos();
        let (sp, cp) = (radians.y.value() * half).sin_cos();
        let (sy, cy) = (radians.z.value() * half).sin_cos();

        Quaternion::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Weighted mean `self * weight + other * (1 - weight)` per component.
    ///
    /// Each component is interpolated along the shorter arc between the two
    /// angles, so inputs on either side of the 0/360 seam blend to a nearby
    /// angle rather than to the far side of the circle. The result uses
    /// `self`'s unit.
    pub fn blend(&self, other: &Self, weight: T) -> Self {
        let other = other.in_unit(self.unit);
        let turn = self.unit.full_turn();
        let mix = |ours: Angle<T>, theirs: Angle<T>| {
            theirs.value() + weight * shortest_difference(theirs.value(), ours.value(), turn)
        };

        Self::new(
            mix(self.x, other.x),
            mix(self.y, other.y),
            mix(self.z, other.z),
            self.unit,
        )
    }

    fn in_unit(&self, unit: AngleUnit) -> Self {
        let mut euler = *self;
        match unit {
            AngleUnit::Degrees => euler.to_degrees(),
            AngleUnit::Radians => euler.to_radians(),
        }
        euler
    }
}

impl<T: Real> Default for Euler<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), AngleUnit::Degrees)
    }
}

/// Component-wise sum in the left operand's unit
impl<T: Real> Add for Euler<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            unit: self.unit,
        }
    }
}

impl<T: Real> Mul<T> for Euler<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
            unit: self.unit,
        }
    }
}
