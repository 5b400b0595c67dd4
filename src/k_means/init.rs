use std::collections::HashSet;

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::dataset::{distinct_points, point_key, Dataset, Point};
use crate::error::{Error, Result};

/// Draws `k` distinct starting centroids from the values of `dataset`.
///
/// Each draw is uniform over the dataset's points; a draw equal to an already
/// chosen centroid is rejected and redrawn. Whether enough distinct values
/// exist is checked before sampling, so the rejection loop always terminates.
///
/// # Errors
///
/// - [`Error::EmptyDataset`] if the dataset has no points.
/// - [`Error::InvalidK`] if `k == 0` or the dataset has fewer than `k`
///   distinct point values.
///
/// # Example
///
/// ```
/// use lloyd::k_means::{init::choose, Dataset};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let data: Dataset<&str> = [("a", vec![0.0]), ("b", vec![1.0]), ("c", vec![2.0])]
///     .into_iter()
///     .collect();
/// let mut rng = ChaCha20Rng::seed_from_u64(42);
/// let centroids = choose(&data, 2, &mut rng).unwrap();
/// assert_eq!(centroids.len(), 2);
/// assert_ne!(centroids[0], centroids[1]);
/// ```
pub fn choose<K, R>(dataset: &Dataset<K>, k: usize, rng: &mut R) -> Result<Vec<Point>>
where
    K: Ord,
    R: Rng + ?Sized,
{
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }
    let available = distinct_points(dataset);
    if k == 0 || k > available {
        return Err(Error::InvalidK { k, available });
    }

    let values: Vec<&Point> = dataset.values().collect();
    let mut seen = HashSet::with_capacity(k);
    let mut centroids = Vec::with_capacity(k);
    let mut draws = 0_usize;

    while centroids.len() < k {
        // `values` is non-empty, checked above.
        let Some(&candidate) = values.choose(rng) else {
            return Err(Error::EmptyDataset);
        };
        draws += 1;
        if seen.insert(point_key(candidate)) {
            centroids.push(candidate.clone());
        }
    }

    trace!("chose {} initial centroids in {} draws", k, draws);
    Ok(centroids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn grid(n: usize) -> Dataset<usize> {
        (0..n).map(|i| (i, vec![i as f64, (i * i) as f64])).collect()
    }

    #[test]
    fn test_choose_distinct_members() {
        let data = grid(20);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for k in 1..=20 {
            let centroids = choose(&data, k, &mut rng).unwrap();
            assert_eq!(centroids.len(), k);
            let keys: HashSet<_> = centroids.iter().map(|c| point_key(c)).collect();
            assert_eq!(keys.len(), k, "centroids must be distinct");
            for c in &centroids {
                assert!(data.values().any(|p| p == c));
            }
        }
    }

    #[test]
    fn test_choose_reproducible_with_seed() {
        let data = grid(50);
        let a = choose(&data, 5, &mut ChaCha20Rng::seed_from_u64(99)).unwrap();
        let b = choose(&data, 5, &mut ChaCha20Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_choose_skips_duplicate_values() {
        // Three identifiers, only two distinct values.
        let data: Dataset<&str> = [
            ("a", vec![1.0, 1.0]),
            ("b", vec![1.0, 1.0]),
            ("c", vec![5.0, 5.0]),
        ]
        .into_iter()
        .collect();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..50 {
            let mut centroids = choose(&data, 2, &mut rng).unwrap();
            centroids.sort_by(|x, y| x[0].total_cmp(&y[0]));
            assert_eq!(centroids, vec![vec![1.0, 1.0], vec![5.0, 5.0]]);
        }
    }

    #[test]
    fn test_choose_zero_k() {
        let data = grid(3);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            choose(&data, 0, &mut rng),
            Err(Error::InvalidK { k: 0, available: 3 })
        );
    }

    #[test]
    fn test_choose_k_exceeds_distinct() {
        let data: Dataset<&str> = [("a", vec![1.0]), ("b", vec![1.0]), ("c", vec![2.0])]
            .into_iter()
            .collect();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            choose(&data, 3, &mut rng),
            Err(Error::InvalidK { k: 3, available: 2 })
        );
    }

    #[test]
    fn test_choose_empty() {
        let data: Dataset<u32> = Dataset::new();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(choose(&data, 1, &mut rng), Err(Error::EmptyDataset));
    }
}
