//! Relativistic four-momentum algebra.
//!
//! Natural units (c = 1), metric signature (+, -, -, -). Values are
//! immutable: every operation returns a new vector. Off-shell vectors are
//! valid intermediates, so the invariant mass carries the sign of m².

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

/// Four-momentum p^μ = (E, px, py, pz).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Energy component (timelike)
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl FourMomentum {
    pub const fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Build from energy, momentum magnitude and direction (cosθ, φ).
    pub fn from_spherical(e: f64, p: f64, cos_theta: f64, phi: f64) -> Self {
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        Self::new(
            e,
            p * sin_theta * phi.cos(),
            p * sin_theta * phi.sin(),
            p * cos_theta,
        )
    }

    /// Divide every component by `s`.
    ///
    /// Fails with [`Error::DivideByZero`] when `s == 0`.
    pub fn try_div(self, s: f64) -> Result<Self> {
        if s == 0.0 {
            return Err(Error::DivideByZero);
        }
        Ok(Self::new(self.e / s, self.px / s, self.py / s, self.pz / s))
    }

    /// Minkowski inner product: E₁E₂ − p₁·p₂.
    pub fn dot(&self, other: &Self) -> f64 {
        self.e * other.e - self.px * other.px - self.py * other.py - self.pz * other.pz
    }

    /// Squared 3-momentum magnitude |p|².
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// 3-momentum magnitude |p|.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Transverse momentum pT = √(px² + py²).
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Invariant mass squared m² = E² − |p|².
    pub fn mass_squared(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Signed invariant mass: √m² when m² ≥ 0, otherwise −√(−m²).
    pub fn mass(&self) -> f64 {
        let m2 = self.mass_squared();
        if m2 >= 0.0 {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }

    /// Pseudorapidity η = ½·ln((|p| + pz) / (|p| − pz)).
    ///
    /// Along the beam axis (|p| = |pz|) returns +∞ for pz ≥ 0 and −∞ otherwise.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        if p == self.pz.abs() {
            return if self.pz >= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        0.5 * ((p + self.pz) / (p - self.pz)).ln()
    }

    /// Azimuth φ = atan2(py, px) in (−π, π].
    pub fn phi(&self) -> f64 {
        let phi = self.py.atan2(self.px);
        if phi == -PI {
            PI
        } else {
            phi
        }
    }

    /// Polar-angle cosine pz / |p|; zero for a vector at rest.
    pub fn cos_theta(&self) -> f64 {
        let p = self.p();
        if p == 0.0 {
            0.0
        } else {
            self.pz / p
        }
    }

    /// The 3-momentum as an array.
    pub fn three_momentum(&self) -> [f64; 3] {
        [self.px, self.py, self.pz]
    }

    /// Lorentz boost by velocity β = (bx, by, bz).
    ///
    /// Fails with [`Error::InvalidBoost`] when β² ≥ 1.
    pub fn boost(&self, bx: f64, by: f64, bz: f64) -> Result<Self> {
        let b2 = bx * bx + by * by + bz * bz;
        if b2 >= 1.0 || b2.is_nan() {
            return Err(Error::InvalidBoost { beta_squared: b2 });
        }
        if b2 == 0.0 {
            return Ok(*self);
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = bx * self.px + by * self.py + bz * self.pz;
        let gamma2 = (gamma - 1.0) / b2;
        let k = gamma2 * bp + gamma * self.e;
        Ok(Self::new(
            gamma * (self.e + bp),
            self.px + k * bx,
            self.py + k * by,
            self.pz + k * bz,
        ))
    }
}

impl Add for FourMomentum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.e + rhs.e,
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
        )
    }
}

impl Sub for FourMomentum {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.e - rhs.e,
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
        )
    }
}

impl Neg for FourMomentum {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.e, -self.px, -self.py, -self.pz)
    }
}

impl Mul<f64> for FourMomentum {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.e * s, self.px * s, self.py * s, self.pz * s)
    }
}

impl Mul<FourMomentum> for f64 {
    type Output = FourMomentum;

    fn mul(self, v: FourMomentum) -> FourMomentum {
        v * self
    }
}

impl Sum for FourMomentum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a FourMomentum> for FourMomentum {
    fn sum<I: Iterator<Item = &'a FourMomentum>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for FourMomentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(E: {:8.3}, px: {:8.3}, py: {:8.3}, pz: {:8.3})",
            self.e, self.px, self.py, self.pz
        )
    }
}
