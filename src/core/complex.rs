//! Complex amplitudes.
//!
//! Every amplitude of a qubit state is a `Complex`. The type is a plain
//! `Copy` value: each arithmetic operation returns a new number and never
//! touches its operands.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Components smaller than this are treated as zero when formatting.
pub const DISPLAY_EPSILON: f64 = 1e-10;

/// Number of decimals used by `Display` when no precision is requested.
pub const DEFAULT_PRECISION: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[inline(always)]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely real number `re + 0i`.
    #[inline(always)]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self { re: 0.0, im: 0.0 }
    }

    #[inline(always)]
    pub const fn one() -> Self {
        Self { re: 1.0, im: 0.0 }
    }

    /// Imaginary unit i
    #[inline(always)]
    pub const fn i() -> Self {
        Self { re: 0.0, im: 1.0 }
    }

    /// |z|², the outcome probability carried by an amplitude.
    #[inline(always)]
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// |z|
    #[inline(always)]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Argument in (-π, π].
    #[inline(always)]
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// z*
    #[inline(always)]
    pub fn conj(&self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Unit phase e^(iθ) = cos(θ) + i·sin(θ)
    #[inline(always)]
    pub fn exp_i(theta: f64) -> Self {
        Self {
            re: theta.cos(),
            im: theta.sin(),
        }
    }

    /// r·e^(iθ)
    #[inline(always)]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::exp_i(theta).scale(r)
    }

    /// Multiply both components by `s`.
    #[inline(always)]
    pub fn scale(&self, s: f64) -> Self {
        Self {
            re: self.re * s,
            im: self.im * s,
        }
    }

    /// |z| < `epsilon`
    #[inline(always)]
    pub fn is_zero(&self, epsilon: f64) -> bool {
        self.norm_sq() < epsilon * epsilon
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.re - other.re).abs() < tolerance && (self.im - other.im).abs() < tolerance
    }

    /// Render with `precision` decimals.
    ///
    /// Near-zero components are dropped, giving one of three forms:
    /// `0.707`, `-0.707i` or `0.500 - 0.500i`. A value with both components
    /// below [`DISPLAY_EPSILON`] renders as `0.000`.
    pub fn format(&self, precision: usize) -> String {
        let re_zero = self.re.abs() < DISPLAY_EPSILON;
        let im_zero = self.im.abs() < DISPLAY_EPSILON;

        if im_zero {
            let re = if re_zero { 0.0 } else { self.re };
            return format!("{:.*}", precision, re);
        }
        if re_zero {
            return format!("{:.*}i", precision, self.im);
        }
        let sign = if self.im >= 0.0 { '+' } else { '-' };
        format!(
            "{:.*} {} {:.*}i",
            precision,
            self.re,
            sign,
            precision,
            self.im.abs()
        )
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

// (a + bi)(c + di) = (ac − bd) + (ad + bc)i
impl Mul for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Div for Complex {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        (self * rhs.conj()).scale(1.0 / rhs.norm_sq())
    }
}

impl Neg for Complex {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

// Amplitudes come out of floating-point products, so equality is approximate.
impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, 1e-10)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        f.write_str(&self.format(precision))
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}
