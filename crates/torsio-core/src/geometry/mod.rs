//! Backbone geometry: CA trace extraction and discrete curvature / torsion.
mod engine;
mod trace;
mod vector;

pub use engine::{compute, compute_checked, curvature_at, torsion_at, Geometry, ResidueGeometry};
pub use trace::{ca_trace, CaTrace};
