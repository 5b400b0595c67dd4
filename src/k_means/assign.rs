use super::dataset::{Cluster, Dataset, Point};
use super::distance::euclidean_distance;
use crate::error::{Error, Result};

/// Index and distance of the centroid closest to `point`.
///
/// Ties resolve to the lowest centroid index. Returns `Ok(None)` only when
/// `centroids` is empty.
pub fn nearest_centroid(point: &[f64], centroids: &[Point]) -> Result<Option<(usize, f64)>> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance(centroid, point)?;
        match best {
            // only a strictly closer centroid replaces the current best
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    Ok(best)
}

/// Partitions the dataset's identifiers by nearest centroid.
///
/// The result has one cluster per centroid, in centroid order; every
/// identifier lands in exactly one cluster and clusters may be empty.
///
/// # Errors
///
/// - [`Error::NoCentroids`] if `centroids` is empty.
/// - [`Error::DimensionMismatch`] if a point and a centroid disagree on
///   dimensionality.
pub fn assign<K>(dataset: &Dataset<K>, centroids: &[Point]) -> Result<Vec<Cluster<K>>>
where
    K: Ord + Clone,
{
    if centroids.is_empty() {
        return Err(Error::NoCentroids);
    }
    let mut clusters = vec![Cluster::new(); centroids.len()];
    for (key, point) in dataset {
        if let Some((idx, _)) = nearest_centroid(point, centroids)? {
            clusters[idx].insert(key.clone());
        }
    }
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use std::collections::BTreeSet;

    fn four_points() -> Dataset<&'static str> {
        [
            ("A", vec![0.0, 0.0]),
            ("B", vec![0.0, 1.0]),
            ("C", vec![10.0, 10.0]),
            ("D", vec![10.0, 11.0]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_assign_two_groups() {
        let clusters = assign(&four_points(), &[vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], BTreeSet::from(["A", "B"]));
        assert_eq!(clusters[1], BTreeSet::from(["C", "D"]));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let data: Dataset<&str> = [("mid", vec![5.0])].into_iter().collect();
        let clusters = assign(&data, &[vec![10.0], vec![0.0], vec![10.0]]).unwrap();
        assert_eq!(clusters[0], BTreeSet::from(["mid"]));
        assert!(clusters[1].is_empty());
        assert!(clusters[2].is_empty());

        assert_eq!(
            nearest_centroid(&[5.0], &[vec![0.0], vec![10.0]]).unwrap(),
            Some((0, 5.0))
        );
    }

    #[test]
    fn test_empty_clusters_allowed() {
        let clusters = assign(
            &four_points(),
            &[vec![0.0, 0.0], vec![100.0, 100.0], vec![10.0, 10.0]],
        )
        .unwrap();
        assert!(clusters[1].is_empty());
        assert_eq!(clusters[0].len() + clusters[2].len(), 4);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = assign(&four_points(), &[vec![0.0, 0.0, 0.0]]);
        assert_eq!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_no_centroids() {
        assert_eq!(assign(&four_points(), &[]), Err(Error::NoCentroids));
        assert_eq!(nearest_centroid(&[1.0], &[]).unwrap(), None);
    }

    #[test]
    fn test_partition_covers_every_key_once() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..50 {
            let n = rng.gen_range(1..60);
            let k = rng.gen_range(1..8);
            let data: Dataset<usize> = (0..n)
                .map(|i| (i, vec![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)]))
                .collect();
            let centroids: Vec<Point> = (0..k)
                .map(|_| vec![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)])
                .collect();

            let clusters = assign(&data, &centroids).unwrap();
            assert_eq!(clusters.len(), k);
            assert_eq!(clusters.iter().map(BTreeSet::len).sum::<usize>(), n);
            let union: BTreeSet<usize> = clusters.iter().flatten().copied().collect();
            assert_eq!(union, data.keys().copied().collect());
        }
    }
}
