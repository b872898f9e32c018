use super::{FeatureVector, GlobalExtrema, Quantity, Range};
use crate::config::{BoundaryPolicy, CombineMode, PipelineConfig};
use crate::error::{FeatureError, Result};
use crate::geometry::Geometry;

/// Map each value to `floor((value - min) / (max - min) * bins)`.
///
/// The cast truncates toward zero. A value equal to `range.max` maps to `bins`;
/// `BoundaryPolicy::Clamp` pulls it back to `bins - 1`, `BoundaryPolicy::Drop`
/// leaves it for [`histogram`] to discard. Non-finite values are skipped.
pub fn normalize_and_bin(
    values: &[f64],
    range: Range,
    bins: usize,
    policy: BoundaryPolicy,
) -> Result<Vec<usize>> {
    if bins < 2 {
        return Err(FeatureError::InvalidBinCount(bins));
    }
    let width = range.width();
    // also rejects a NaN width
    if !(width > 0.0) {
        return Err(FeatureError::DegenerateRange {
            quantity: None,
            value: range.min,
        });
    }
    Ok(values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&value| {
            // saturating: anything below `min` lands in bin 0
            let index = ((value - range.min) / width * bins as f64) as usize;
            match policy {
                BoundaryPolicy::Clamp => index.min(bins - 1),
                BoundaryPolicy::Drop => index,
            }
        })
        .collect())
}

/// Count binned indices into `bins - 1` buckets.
///
/// The bucket edges are the integers `0, 1, .., bins - 1`. Bucket `k` is
/// `[k, k + 1)` except the last, `[bins - 2, bins - 1]`, which is closed. So an
/// index of `bins - 1` shares the last bucket and an index `>= bins` is dropped.
pub fn histogram(binned: &[usize], bins: usize) -> Result<Vec<usize>> {
    if bins < 2 {
        return Err(FeatureError::InvalidBinCount(bins));
    }
    let buckets = bins - 1;
    let mut counts = vec![0; buckets];
    for &index in binned {
        if index < buckets {
            counts[index] += 1;
        } else if index == buckets {
            counts[buckets - 1] += 1;
        }
    }
    Ok(counts)
}

fn quantity_histogram(
    values: &[f64],
    range: Range,
    quantity: Quantity,
    config: &PipelineConfig,
) -> Result<Vec<usize>> {
    let binned = normalize_and_bin(values, range, config.bins, config.boundary).map_err(
        |err| match err {
            FeatureError::DegenerateRange { value, .. } => FeatureError::DegenerateRange {
                quantity: Some(quantity),
                value,
            },
            other => other,
        },
    )?;
    histogram(&binned, config.bins)
}

/// Curvature and torsion histograms of one protein, combined per `config.combine`.
pub fn feature_vector(
    geometry: &Geometry,
    extrema: &GlobalExtrema,
    config: &PipelineConfig,
) -> Result<FeatureVector> {
    let curvature = quantity_histogram(
        geometry.curvature(),
        extrema.curvature,
        Quantity::Curvature,
        config,
    )?;
    let torsion = quantity_histogram(
        geometry.torsion(),
        extrema.torsion,
        Quantity::Torsion,
        config,
    )?;
    let counts = match config.combine {
        CombineMode::Sum => curvature
            .iter()
            .zip(&torsion)
            .map(|(c, t)| c + t)
            .collect(),
        CombineMode::Concatenate => {
            let mut counts = curvature;
            counts.extend(torsion);
            counts
        }
    };
    Ok(FeatureVector::new(counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_scenario() {
        let range = Range::new(0.0, 10.0);
        let values = [0.0, 5.0, 10.0];
        let raw = normalize_and_bin(&values, range, 10, BoundaryPolicy::Drop).unwrap();
        assert_eq!(raw, vec![0, 5, 10]);
        let clamped = normalize_and_bin(&values, range, 10, BoundaryPolicy::Clamp).unwrap();
        assert_eq!(clamped, vec![0, 5, 9]);
    }

    #[test]
    fn test_truncation_not_rounding() {
        let range = Range::new(0.0, 1.0);
        let binned =
            normalize_and_bin(&[0.049, 0.099, 0.55, 0.999], range, 10, BoundaryPolicy::Clamp)
                .unwrap();
        assert_eq!(binned, vec![0, 0, 5, 9]);
    }

    #[test]
    fn test_output_range() {
        let range = Range::new(-3.0, 7.5);
        let values: Vec<f64> = (0..=200).map(|i| -3.0 + 10.5 * i as f64 / 200.0).collect();
        for bins in [2, 3, 10, 999, 1000] {
            let dropped = normalize_and_bin(&values, range, bins, BoundaryPolicy::Drop).unwrap();
            assert!(dropped.iter().all(|&b| b <= bins));
            assert_eq!(dropped.last(), Some(&bins));
            let clamped = normalize_and_bin(&values, range, bins, BoundaryPolicy::Clamp).unwrap();
            assert!(clamped.iter().all(|&b| b < bins));
        }
    }

    #[test]
    fn test_idempotent() {
        let range = Range::new(0.1, 2.9);
        let values = [0.1, 0.7, 1.3, 2.2, 2.9];
        let first = normalize_and_bin(&values, range, 7, BoundaryPolicy::Drop).unwrap();
        let second = normalize_and_bin(&values, range, 7, BoundaryPolicy::Drop).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_range() {
        let err = normalize_and_bin(&[1.0], Range::new(1.0, 1.0), 10, BoundaryPolicy::Clamp)
            .unwrap_err();
        assert_eq!(
            err,
            FeatureError::DegenerateRange {
                quantity: None,
                value: 1.0
            }
        );
        assert!(err.is_fatal());
        assert!(
            normalize_and_bin(&[1.0], Range::new(f64::NAN, 1.0), 10, BoundaryPolicy::Clamp)
                .is_err()
        );
    }

    #[test]
    fn test_invalid_bins() {
        let range = Range::new(0.0, 1.0);
        assert_eq!(
            normalize_and_bin(&[0.5], range, 1, BoundaryPolicy::Clamp),
            Err(FeatureError::InvalidBinCount(1))
        );
        assert_eq!(histogram(&[0], 0), Err(FeatureError::InvalidBinCount(0)));
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let binned = normalize_and_bin(
            &[f64::NAN, 0.5, f64::INFINITY],
            Range::new(0.0, 1.0),
            4,
            BoundaryPolicy::Clamp,
        )
        .unwrap();
        assert_eq!(binned, vec![2]);
    }

    #[test]
    fn test_histogram_edges() {
        // edges 0..=9, 9 buckets, last bucket closed
        let counts = histogram(&[0, 1, 1, 8, 9, 10, 11], 10).unwrap();
        assert_eq!(counts.len(), 9);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[8], 2);
        assert_eq!(counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_histogram_sum_with_boundary_policy() {
        let range = Range::new(0.0, 10.0);
        let values = [0.0, 2.5, 5.0, 9.99, 10.0, 10.0];
        let bins = 10;

        let clamped = normalize_and_bin(&values, range, bins, BoundaryPolicy::Clamp).unwrap();
        let counts = histogram(&clamped, bins).unwrap();
        // every clamped index is below `bins`, so every value is counted
        assert_eq!(counts.iter().sum::<usize>(), values.len());
        assert_eq!(counts[8], 3);

        let dropped = normalize_and_bin(&values, range, bins, BoundaryPolicy::Drop).unwrap();
        let counts = histogram(&dropped, bins).unwrap();
        let in_range = dropped.iter().filter(|&&b| b < bins).count();
        // the two `value == max` entries fall outside [0, bins)
        assert_eq!(in_range, values.len() - 2);
        assert_eq!(counts.iter().sum::<usize>(), in_range);
    }

    #[test]
    fn test_feature_vector_sum_and_concat() {
        let geometry = Geometry::new(vec![0.0, 1.0, 2.0], vec![-1.0, 1.0]);
        let extrema = GlobalExtrema {
            curvature: Range::new(0.0, 2.0),
            torsion: Range::new(-1.0, 1.0),
        };
        let config = PipelineConfig::builder().bins(4).parallel(false).build();
        let summed = feature_vector(&geometry, &extrema, &config).unwrap();
        // curvature -> [0, 2, 3] -> [1, 0, 2]; torsion -> [0, 3] -> [1, 0, 1]
        assert_eq!(summed.counts(), &[2, 0, 3]);
        assert_eq!(summed.len(), config.feature_len());

        let config = PipelineConfig::builder()
            .bins(4)
            .combine(CombineMode::Concatenate)
            .build();
        let concatenated = feature_vector(&geometry, &extrema, &config).unwrap();
        assert_eq!(concatenated.counts(), &[1, 0, 2, 1, 0, 1]);
    }

    #[test]
    fn test_feature_vector_names_degenerate_quantity() {
        let geometry = Geometry::new(vec![0.5], vec![0.5]);
        let extrema = GlobalExtrema {
            curvature: Range::new(0.0, 1.0),
            torsion: Range::new(0.5, 0.5),
        };
        let err = feature_vector(&geometry, &extrema, &PipelineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            FeatureError::DegenerateRange {
                quantity: Some(Quantity::Torsion),
                value: 0.5
            }
        );
        assert_eq!(err.to_string(), "zero-width torsion range at 0.5");
    }
}
