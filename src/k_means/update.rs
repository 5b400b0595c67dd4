use super::dataset::{Cluster, Dataset, Point};
use crate::error::{Error, Result};

/// What a cluster with no members gets as its next centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the cluster's previous centroid, so the cluster can win points back
    /// later.
    #[default]
    RetainPrevious,
    /// Collapse to the zero vector of the dataset's dimensionality.
    Origin,
}

/// Recomputes one centroid per cluster as the coordinatewise mean of its
/// members.
///
/// `previous` holds the centroids the clusters were assigned against; it
/// supplies the fallback for empty clusters under
/// [`EmptyClusterPolicy::RetainPrevious`]. Identifiers missing from `dataset`
/// are not counted as members.
///
/// # Errors
///
/// - [`Error::CentroidCount`] if `previous` and `clusters` differ in length.
/// - [`Error::DimensionMismatch`] if a member point disagrees with the
///   centroid dimensionality.
///
/// # Example
///
/// ```
/// use lloyd::k_means::update::{update, EmptyClusterPolicy};
/// use lloyd::k_means::{Cluster, Dataset};
///
/// let data: Dataset<&str> = [("a", vec![0.0, 0.0]), ("b", vec![0.0, 1.0])]
///     .into_iter()
///     .collect();
/// let clusters = vec![Cluster::from(["a", "b"])];
/// let centroids = update(&data, &clusters, &[vec![0.0, 0.0]], EmptyClusterPolicy::default()).unwrap();
/// assert_eq!(centroids, vec![vec![0.0, 0.5]]);
/// ```
pub fn update<K>(
    dataset: &Dataset<K>,
    clusters: &[Cluster<K>],
    previous: &[Point],
    policy: EmptyClusterPolicy,
) -> Result<Vec<Point>>
where
    K: Ord,
{
    if clusters.len() != previous.len() {
        return Err(Error::CentroidCount {
            expected: clusters.len(),
            found: previous.len(),
        });
    }

    let mut centroids = Vec::with_capacity(clusters.len());
    for (cluster, prev) in clusters.iter().zip(previous) {
        let dim = prev.len();
        let mut sums = vec![0.0; dim];
        let mut count = 0_usize;
        for point in cluster.iter().filter_map(|key| dataset.get(key)) {
            if point.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: point.len(),
                });
            }
            for (sum, &x) in sums.iter_mut().zip(point) {
                *sum += x;
            }
            count += 1;
        }

        let centroid = if count > 0 {
            sums.into_iter().map(|s| s / count as f64).collect()
        } else {
            match policy {
                EmptyClusterPolicy::RetainPrevious => prev.clone(),
                EmptyClusterPolicy::Origin => vec![0.0; dim],
            }
        };
        centroids.push(centroid);
    }
    Ok(centroids)
}
