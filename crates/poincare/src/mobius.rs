//! Möbius-transform algebra for the Poincaré disk model.
//!
//! Purpose
//! - Represent disk isometries as complex 2×2 projective matrices
//!   `z ↦ (az + b)/(cz + d)` and provide the primitives (identity,
//!   translation, rotation) plus composition, inversion, and point mapping.
//! - Composition is matrix multiplication and is **not** commutative; callers
//!   compose new operations onto a cursor by left-multiplying (`op ∘ cur`).
//!
//! Why this design
//! - Keeping the four coefficients explicit (rather than a generic matrix
//!   type) makes the translation/rotation constructors and the adjugate
//!   inverse read exactly like the textbook formulas.
//! - Inversion fails only for a determinant that is exactly zero; there is no
//!   epsilon here on purpose, since callers are expected to avoid degenerate
//!   construction and tolerances belong to the geometric layer.

use std::fmt;
use std::ops::Mul;

use nalgebra::{Complex, Vector2};

/// A Möbius transform `z ↦ (az + b)/(cz + d)` with complex coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobiusTransform {
    pub a: Complex<f64>,
    pub b: Complex<f64>,
    pub c: Complex<f64>,
    pub d: Complex<f64>,
}

/// Inversion was requested for a transform whose determinant is exactly zero.
///
/// Carries the offending transform so callers can report which construction
/// went degenerate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NonInvertibleTransform {
    pub transform: MobiusTransform,
}

impl fmt::Display for NonInvertibleTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.transform;
        write!(
            f,
            "transform is not invertible (ad - bc = 0): a={}, b={}, c={}, d={}",
            t.a, t.b, t.c, t.d
        )
    }
}

impl std::error::Error for NonInvertibleTransform {}

impl MobiusTransform {
    /// Build a transform from raw coefficients.
    #[inline]
    pub fn new(a: Complex<f64>, b: Complex<f64>, c: Complex<f64>, d: Complex<f64>) -> Self {
        Self { a, b, c, d }
    }

    /// The identity map (1, 0, 0, 1).
    #[inline]
    pub fn identity() -> Self {
        Self::new(
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(1.0, 0.0),
        )
    }

    /// Hyperbolic translation moving the disk center to `(dx, dy)`:
    /// (1, v, conj(v), 1) with `v = dx + i dy`.
    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        let v = Complex::new(dx, dy);
        Self::new(Complex::new(1.0, 0.0), v, v.conj(), Complex::new(1.0, 0.0))
    }

    /// Rotation about the disk center: (e^{iθ}, 0, 0, 1).
    #[inline]
    pub fn rotation(angle: f64) -> Self {
        Self::new(
            Complex::new(angle.cos(), angle.sin()),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(1.0, 0.0),
        )
    }

    /// Matrix product `left · right`; composition applies `right` first.
    pub fn multiply(left: &Self, right: &Self) -> Self {
        Self::new(
            left.a * right.a + left.b * right.c,
            left.a * right.b + left.b * right.d,
            left.c * right.a + left.d * right.c,
            left.c * right.b + left.d * right.d,
        )
    }

    /// `ad - bc`; the transform is invertible iff this is nonzero.
    #[inline]
    pub fn determinant(&self) -> Complex<f64> {
        self.a * self.d - self.b * self.c
    }

    /// Adjugate-over-determinant inverse.
    pub fn inverse(&self) -> Result<Self, NonInvertibleTransform> {
        let det = self.determinant();
        if det.re == 0.0 && det.im == 0.0 {
            return Err(NonInvertibleTransform { transform: *self });
        }
        let inv = Complex::new(1.0, 0.0) / det;
        Ok(Self::new(
            self.d * inv,
            -self.b * inv,
            -self.c * inv,
            self.a * inv,
        ))
    }

    /// Apply the Möbius map to a 2D coordinate via its complex representation.
    pub fn transform_point(&self, point: Vector2<f64>) -> Vector2<f64> {
        let z = Complex::new(point.x, point.y);
        let w = (self.a * z + self.b) / (self.c * z + self.d);
        Vector2::new(w.re, w.im)
    }
}

impl Default for MobiusTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for MobiusTransform {
    type Output = MobiusTransform;

    #[inline]
    fn mul(self, rhs: MobiusTransform) -> Self::Output {
        Self::multiply(&self, &rhs)
    }
}
