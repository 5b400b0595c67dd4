use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::{Error, Result};

/// A point is an ordered sequence of coordinates.
pub type Point = Vec<f64>;

/// Identifier → point. An ordered map keeps iteration, and therefore seeded
/// runs, deterministic.
pub type Dataset<K> = BTreeMap<K, Point>;

/// The identifiers currently assigned to one centroid.
pub type Cluster<K> = BTreeSet<K>;

/// Checks that `dataset` is non-empty, that every point has the same non-zero
/// dimensionality and that all coordinates are finite. Returns that
/// dimensionality.
pub fn validate_dataset<K: Ord>(dataset: &Dataset<K>) -> Result<usize> {
    let first = dataset.values().next().ok_or(Error::EmptyDataset)?;
    let dim = first.len();
    if dim == 0 {
        return Err(Error::ZeroDimension);
    }
    for point in dataset.values() {
        validate_point(point, dim)?;
    }
    Ok(dim)
}

/// Checks a single point against an established dimensionality.
pub fn validate_point(point: &[f64], dim: usize) -> Result<()> {
    if point.len() != dim {
        return Err(Error::DimensionMismatch {
            expected: dim,
            found: point.len(),
        });
    }
    if point.iter().any(|x| !x.is_finite()) {
        return Err(Error::NonFiniteCoordinate);
    }
    Ok(())
}

/// Number of distinct point values in the dataset. Identifiers mapping to
/// equal coordinates count once.
pub fn distinct_points<K: Ord>(dataset: &Dataset<K>) -> usize {
    dataset
        .values()
        .map(|p| point_key(p))
        .collect::<HashSet<_>>()
        .len()
}

/// Hashable form of a point. `-0.0` and `0.0` compare equal as floats, so
/// they share a key.
pub(crate) fn point_key(point: &[f64]) -> Vec<u64> {
    point.iter().map(|&x| (x + 0.0).to_bits()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(points: &[(&'static str, &[f64])]) -> Dataset<&'static str> {
        points.iter().map(|(k, p)| (*k, p.to_vec())).collect()
    }

    #[test]
    fn test_validate_returns_dimension() {
        let data = dataset(&[("a", &[1.0, 2.0, 3.0]), ("b", &[4.0, 5.0, 6.0])]);
        assert_eq!(validate_dataset(&data), Ok(3));
    }

    #[test]
    fn test_validate_empty() {
        let data: Dataset<&str> = Dataset::new();
        assert_eq!(validate_dataset(&data), Err(Error::EmptyDataset));
    }

    #[test]
    fn test_validate_zero_dimension() {
        let data = dataset(&[("a", &[]), ("b", &[])]);
        assert_eq!(validate_dataset(&data), Err(Error::ZeroDimension));
    }

    #[test]
    fn test_validate_mixed_dimensions() {
        let data = dataset(&[("a", &[1.0, 2.0]), ("b", &[1.0, 2.0, 3.0])]);
        assert_eq!(
            validate_dataset(&data),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_validate_non_finite() {
        let data = dataset(&[("a", &[1.0, f64::NAN]), ("b", &[1.0, 2.0])]);
        assert_eq!(validate_dataset(&data), Err(Error::NonFiniteCoordinate));
        let data = dataset(&[("a", &[f64::INFINITY, 0.0])]);
        assert_eq!(validate_dataset(&data), Err(Error::NonFiniteCoordinate));
    }

    #[test]
    fn test_distinct_points() {
        let data = dataset(&[
            ("a", &[1.0, 2.0]),
            ("b", &[1.0, 2.0]),
            ("c", &[0.0, 0.0]),
            ("d", &[-0.0, 0.0]),
        ]);
        assert_eq!(distinct_points(&data), 2);
    }
}
