//! Periodic angle kept inside one turn

use core::ops::{Add, Mul, Sub};

use crate::math::{Real, normalize_periodic};

/// Unit an [`Angle`] is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AngleUnit {
    /// One turn is 360
    #[default]
    Degrees,
    /// One turn is 2π
    Radians,
}

impl AngleUnit {
    /// Length of one full turn in this unit
    pub fn full_turn<T: Real>(self) -> T {
        match self {
            AngleUnit::Degrees => T::constant(360.0),
            AngleUnit::Radians => T::TAU(),
        }
    }
}

/// Angle whose value always lies in `[0, 360)` degrees or `[0, 2π)` radians.
///
/// Every constructor and mutation wraps the value back into the interval
/// with a floored modulo, so `-90°` is stored as `270°`.
///
/// # Example
/// ```
/// use attitude_estimation::{Angle, AngleUnit};
///
/// let mut angle = Angle::new(-90.0f64, AngleUnit::Degrees);
/// assert_eq!(angle.value(), 270.0);
///
/// angle.to_radians();
/// assert!((angle.value() - 1.5 * std::f64::consts::PI).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle<T> {
    value: T,
    unit: AngleUnit,
}

impl<T: Real> Angle<T> {
    pub fn new(value: T, unit: AngleUnit) -> Self {
        let mut angle = Self { value, unit };
        angle.normalize();
        angle
    }

    pub fn degrees(value: T) -> Self {
        Self::new(value, AngleUnit::Degrees)
    }

    pub fn radians(value: T) -> Self {
        Self::new(value, AngleUnit::Radians)
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Replaces the value, keeping the unit, and re-normalizes
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.normalize();
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    fn normalize(&mut self) {
        self.value = normalize_periodic(self.value, T::zero(), self.unit.full_turn());
    }

    /// Converts to radians in place; no-op if already in radians
    pub fn to_radians(&mut self) {
        if self.unit == AngleUnit::Degrees {
            self.unit = AngleUnit::Radians;
            self.set_value(self.value.to_radians());
        }
    }

    /// Converts to degrees in place; no-op if already in degrees
    pub fn to_degrees(&mut self) {
        if self.unit == AngleUnit::Radians {
            self.unit = AngleUnit::Degrees;
            self.set_value(self.value.to_degrees());
        }
    }

    /// Copy of this angle expressed in `unit`
    pub fn in_unit(&self, unit: AngleUnit) -> Self {
        let mut angle = *self;
        match unit {
            AngleUnit::Degrees => angle.to_degrees(),
            AngleUnit::Radians => angle.to_radians(),
        }
        angle
    }

    pub fn in_radians(&self) -> Self {
        self.in_unit(AngleUnit::Radians)
    }

    pub fn in_degrees(&self) -> Self {
        self.in_unit(AngleUnit::Degrees)
    }
}

impl<T: Real> Default for Angle<T> {
    fn default() -> Self {
        Self::new(T::zero(), AngleUnit::Degrees)
    }
}

/// The right operand is converted to the left operand's unit first
impl<T: Real> Add for Angle<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.value + other.in_unit(self.unit).value, self.unit)
    }
}

/// The right operand is converted to the left operand's unit first
impl<T: Real> Sub for Angle<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.value - other.in_unit(self.unit).value, self.unit)
    }
}

impl<T: Real> Mul<T> for Angle<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self::new(self.value * factor, self.unit)
    }
}
