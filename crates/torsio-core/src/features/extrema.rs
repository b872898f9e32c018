use super::Quantity;
use crate::error::{FeatureError, Result};
use crate::geometry::Geometry;
use crate::Protein;
use serde::{Deserialize, Serialize};

/// Closed value range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
    fn include(self, value: f64) -> Self {
        Range {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

/// Minimum and maximum of each quantity over the whole corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalExtrema {
    pub curvature: Range,
    pub torsion: Range,
}

impl GlobalExtrema {
    pub fn get(&self, quantity: Quantity) -> Range {
        match quantity {
            Quantity::Curvature => self.curvature,
            Quantity::Torsion => self.torsion,
        }
    }
}

fn fold_range(acc: Option<Range>, values: &[f64]) -> Option<Range> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(acc, |acc, v| match acc {
            None => Some(Range::new(v, v)),
            Some(range) => Some(range.include(v)),
        })
}

/// Pool the geometry of every protein that has one.
///
/// Proteins without geometry, or with an empty sequence for a quantity,
/// contribute nothing to that quantity. Non-finite (degenerate) values are
/// ignored.
pub fn scan(proteins: &[Protein]) -> Result<GlobalExtrema> {
    scan_geometries(proteins.iter().filter_map(Protein::geometry))
}

pub fn scan_geometries<'a, I>(geometries: I) -> Result<GlobalExtrema>
where
    I: IntoIterator<Item = &'a Geometry>,
{
    let (curvature, torsion) = geometries
        .into_iter()
        .fold((None, None), |(curvature, torsion), geometry| {
            (
                fold_range(curvature, geometry.curvature()),
                fold_range(torsion, geometry.torsion()),
            )
        });
    Ok(GlobalExtrema {
        curvature: curvature.ok_or(FeatureError::EmptyCorpus {
            quantity: Quantity::Curvature,
        })?,
        torsion: torsion.ok_or(FeatureError::EmptyCorpus {
            quantity: Quantity::Torsion,
        })?,
    })
}
