use crate::PcError;

/// Floating point type used throughout the workspace.
pub type Real = f64;

/// Cartesian 3-vector (points, area vectors, velocities).
pub type Vector = nalgebra::Vector3<Real>;

/// Absolute/relative tolerance pair.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PcError::NonFinite { what, value: v })
    }
}

/// Component-wise finiteness check for vectors.
pub fn ensure_finite_vector(v: &Vector, what: &'static str) -> Result<Vector, PcError> {
    for &c in v.iter() {
        ensure_finite(c, what)?;
    }
    Ok(*v)
}

#[inline]
pub fn vector(x: Real, y: Real, z: Real) -> Vector {
    Vector::new(x, y, z)
}
