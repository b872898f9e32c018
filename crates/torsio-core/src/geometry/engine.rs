//! Discrete curvature and torsion of a CA trace.
//!
//! For an N-point trace the engine produces N-2 curvature values and N-3
//! torsion values, all in radians:
//!
//! - curvature `κ_i` for the window `(p_{i-1}, p_i, p_{i+1})` is the turning
//!   angle between `a = p_i - p_{i-1}` and `b = p_{i+1} - p_i`,
//!   `atan2(|a × b|, a · b)`, in `[0, π]`.
//! - torsion `τ` for the window `(p_0, p_1, p_2, p_3)` is the dihedral angle
//!   `atan2(|b2| b1 · (b2 × b3), (b1 × b2) · (b2 × b3))` with `b_k = p_k - p_{k-1}`,
//!   in `(-π, π]`. Collinear windows have no defined plane and evaluate to `0`.
//!
//! A window containing a zero-length segment (duplicate coordinates) yields `NaN`.
//! `NaN` values are carried in the sequences so that indices stay aligned with
//! residues; downstream stages skip them and report how many there were.
use super::trace::CaTrace;
use super::vector::{cross, dot, norm, sub, MIN_SEGMENT};
use crate::error::{FeatureError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of consecutive points a torsion window needs.
pub(crate) const TORSION_WINDOW: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(with = "nan_as_null")]
    curvature: Vec<f64>,
    #[serde(with = "nan_as_null")]
    torsion: Vec<f64>,
}

/// Curvature and torsion assigned to one residue of the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueGeometry {
    pub index: usize,
    pub curvature: Option<f64>,
    pub torsion: Option<f64>,
}

impl Geometry {
    pub fn new(curvature: Vec<f64>, torsion: Vec<f64>) -> Self {
        Geometry { curvature, torsion }
    }
    pub fn curvature(&self) -> &[f64] {
        &self.curvature
    }
    pub fn torsion(&self) -> &[f64] {
        &self.torsion
    }
    /// Number of windows that hit a zero-length segment.
    pub fn degenerate_windows(&self) -> usize {
        self.curvature
            .iter()
            .chain(self.torsion.iter())
            .filter(|v| v.is_nan())
            .count()
    }
    /// Align both sequences on trace residues.
    ///
    /// Residue `i` carries `curvature[i - 1]` (window centred on `i`) and
    /// `torsion[i - 1]` (window `i-1..=i+2`, i.e. the dihedral about the
    /// bond from `i` to `i + 1`). End residues get `None`.
    pub fn per_residue(&self, trace_len: usize) -> Vec<ResidueGeometry> {
        (0..trace_len)
            .map(|index| {
                let window = index.checked_sub(1);
                ResidueGeometry {
                    index,
                    curvature: window.and_then(|w| self.curvature.get(w).copied()),
                    torsion: window.and_then(|w| self.torsion.get(w).copied()),
                }
            })
            .collect()
    }
}

/// Turning angle at `b`, or `NaN` if two of the points coincide.
pub fn curvature_at(a: &[f64; 3], b: &[f64; 3], c: &[f64; 3]) -> f64 {
    let u = sub(b, a);
    let v = sub(c, b);
    if norm(&u) < MIN_SEGMENT || norm(&v) < MIN_SEGMENT {
        return f64::NAN;
    }
    norm(&cross(&u, &v)).atan2(dot(&u, &v))
}

/// Signed dihedral angle of four points, or `NaN` if two consecutive points coincide.
pub fn torsion_at(p0: &[f64; 3], p1: &[f64; 3], p2: &[f64; 3], p3: &[f64; 3]) -> f64 {
    let b1 = sub(p1, p0);
    let b2 = sub(p2, p1);
    let b3 = sub(p3, p2);
    let b2_len = norm(&b2);
    if norm(&b1) < MIN_SEGMENT || b2_len < MIN_SEGMENT || norm(&b3) < MIN_SEGMENT {
        return f64::NAN;
    }
    let n1 = cross(&b1, &b2);
    let n2 = cross(&b2, &b3);
    let y = b2_len * dot(&b1, &n2);
    let x = dot(&n1, &n2);
    let angle = y.atan2(x);
    // keep the range half-open at -π
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

/// Curvature and torsion for every interior window of the trace.
///
/// Never fails: traces shorter than 3 (curvature) or 4 (torsion) points
/// simply produce empty sequences.
pub fn compute(trace: &CaTrace) -> Geometry {
    let points = trace.points();
    let curvature = points
        .windows(3)
        .map(|w| curvature_at(&w[0], &w[1], &w[2]))
        .collect();
    let torsion = points
        .windows(TORSION_WINDOW)
        .map(|w| torsion_at(&w[0], &w[1], &w[2], &w[3]))
        .collect();
    Geometry { curvature, torsion }
}

/// As [`compute`], but requires at least `min_len` points (and never fewer than 4,
/// so that both sequences are non-empty).
pub fn compute_checked(trace: &CaTrace, min_len: usize) -> Result<Geometry> {
    let required = min_len.max(TORSION_WINDOW);
    if trace.len() < required {
        return Err(FeatureError::InsufficientGeometry {
            required,
            actual: trace.len(),
        });
    }
    Ok(compute(trace))
}

/// JSON has no NaN; degenerate windows round-trip as `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let values: Vec<Option<f64>> = values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        values.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}
