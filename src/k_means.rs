pub mod assign;
pub mod convergence;
pub mod dataset;
pub mod distance;
pub mod init;
pub mod observer;
pub mod update;

use std::collections::BTreeMap;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

pub use assign::{assign, nearest_centroid};
pub use convergence::{iteration_budget, ConvergenceDetector};
pub use dataset::{distinct_points, validate_dataset, Cluster, Dataset, Point};
pub use distance::{euclidean_distance, squared_euclidean_distance};
pub use init::choose;
pub use observer::{default_palette, ClusterObserver, Frame, NoopObserver};
pub use update::{update, EmptyClusterPolicy};

/// Configuration options for k-means clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters to find.
    pub k: usize,
    /// Seed for centroid initialization. `None` draws from OS entropy and the
    /// run is not reproducible.
    pub seed: Option<u64>,
    /// Report every iteration to the observer, not only the final state.
    pub debug: bool,
    /// Fallback centroid for clusters that lose all their members.
    pub empty_cluster_policy: EmptyClusterPolicy,
    /// One color per cluster for the observer. `None` uses [`default_palette`].
    pub palette: Option<Vec<String>>,
}

impl KMeansConfig {
    /// Create a new config: unseeded, no debug frames, empty clusters keep
    /// their previous centroid, default palette.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: None,
            debug: false,
            empty_cluster_policy: EmptyClusterPolicy::RetainPrevious,
            palette: None,
        }
    }

    /// Fix the initialization seed so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Customize the colors handed to the observer. Must hold exactly `k`
    /// entries.
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = Some(palette.into_iter().map(Into::into).collect());
        self
    }

    /// Maximum number of iterations a run may take, `ceil(k * 3.5)`.
    pub fn iteration_budget(&self) -> usize {
        iteration_budget(self.k)
    }

    fn colors(&self) -> Result<Vec<String>> {
        match &self.palette {
            Some(colors) if colors.len() != self.k => Err(Error::PaletteLength {
                expected: self.k,
                found: colors.len(),
            }),
            Some(colors) => Ok(colors.clone()),
            None => Ok(default_palette(self.k)),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The partition was observed unchanged `k` times.
    Converged,
    /// The iteration budget ran out first. The result holds the last computed
    /// state, which is not necessarily stable.
    BudgetExhausted,
}

/// Output of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult<K> {
    /// Final centroids, one per cluster.
    pub centroids: Vec<Point>,
    /// Final partition; `clusters[i]` belongs to `centroids[i]`.
    pub clusters: Vec<Cluster<K>>,
    /// Iterations actually performed.
    pub iterations: usize,
    /// Iteration budget the run was held to.
    pub budget: usize,
    pub termination: Termination,
    /// Sum of squared distances from each point to its cluster's centroid.
    pub inertia: f64,
}

impl<K: Ord + Clone> KMeansResult<K> {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Cluster index of every identifier.
    pub fn labels(&self) -> BTreeMap<K, usize> {
        self.clusters
            .iter()
            .enumerate()
            .flat_map(|(idx, cluster)| cluster.iter().map(move |key| (key.clone(), idx)))
            .collect()
    }

    /// Index of the final centroid nearest to `point`, lowest index on ties.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if `point` does not have the centroids'
    ///   dimensionality.
    /// - [`Error::NoCentroids`] if the result holds no centroids, which only
    ///   happens when one is built by hand.
    pub fn predict(&self, point: &[f64]) -> Result<usize> {
        nearest_centroid(point, &self.centroids)?
            .map(|(idx, _)| idx)
            .ok_or(Error::NoCentroids)
    }
}

/// Loop state owned by a single run.
struct ClusteringState<K> {
    centroids: Vec<Point>,
    clusters: Vec<Cluster<K>>,
    detector: ConvergenceDetector,
}

/// Drives initialization, assignment, centroid updates and the stopping test.
///
/// A run stops when the partition has been seen unchanged `k` times (the
/// counter is never reset) or after `ceil(k * 3.5)` iterations, whichever
/// comes first.
#[derive(Debug, Clone)]
pub struct KMeans<O = NoopObserver> {
    config: KMeansConfig,
    observer: O,
}

impl KMeans<NoopObserver> {
    pub fn new(config: KMeansConfig) -> Self {
        Self {
            config,
            observer: NoopObserver,
        }
    }
}

impl<O> KMeans<O> {
    /// Attach an observer that receives the frames of every run.
    pub fn with_observer<P>(self, observer: P) -> KMeans<P> {
        KMeans {
            config: self.config,
            observer,
        }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Runs k-means, seeding the generator from the config.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDataset`], [`Error::ZeroDimension`],
    ///   [`Error::DimensionMismatch`] or [`Error::NonFiniteCoordinate`] for a
    ///   malformed dataset.
    /// - [`Error::InvalidK`] if `k == 0` or exceeds the distinct points.
    /// - [`Error::PaletteLength`] if a custom palette is not `k` long.
    ///
    /// # Example
    ///
    /// ```
    /// use lloyd::k_means::{Dataset, KMeans, KMeansConfig};
    ///
    /// let data: Dataset<&str> = [
    ///     ("a", vec![1.0, 2.0]),
    ///     ("b", vec![1.5, 1.8]),
    ///     ("c", vec![5.0, 8.0]),
    ///     ("d", vec![8.0, 8.0]),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let result = KMeans::new(KMeansConfig::new(2).with_seed(7)).run(&data).unwrap();
    /// assert_eq!(result.centroids.len(), 2);
    /// assert_eq!(result.clusters.iter().map(|c| c.len()).sum::<usize>(), 4);
    /// ```
    pub fn run<K>(&mut self, dataset: &Dataset<K>) -> Result<KMeansResult<K>>
    where
        K: Ord + Clone,
        O: ClusterObserver<K>,
    {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        self.run_with_rng(dataset, &mut rng)
    }

    /// Runs k-means drawing initial centroids from a caller-owned generator.
    /// The config's seed is ignored.
    pub fn run_with_rng<K, R>(
        &mut self,
        dataset: &Dataset<K>,
        rng: &mut R,
    ) -> Result<KMeansResult<K>>
    where
        K: Ord + Clone,
        O: ClusterObserver<K>,
        R: Rng + ?Sized,
    {
        validate_dataset(dataset)?;
        let colors = self.config.colors()?;
        let centroids = choose(dataset, self.config.k, rng)?;
        self.iterate(dataset, centroids, &colors)
    }

    /// Runs k-means from caller-supplied initial centroids instead of a
    /// random draw.
    ///
    /// # Errors
    ///
    /// As [`KMeans::run`], plus [`Error::CentroidCount`] when `centroids`
    /// does not hold exactly `k` points and [`Error::DimensionMismatch`] /
    /// [`Error::NonFiniteCoordinate`] for a malformed centroid.
    pub fn run_from_centroids<K>(
        &mut self,
        dataset: &Dataset<K>,
        centroids: Vec<Point>,
    ) -> Result<KMeansResult<K>>
    where
        K: Ord + Clone,
        O: ClusterObserver<K>,
    {
        let dim = validate_dataset(dataset)?;
        let k = self.config.k;
        let available = distinct_points(dataset);
        if k == 0 || k > available {
            return Err(Error::InvalidK { k, available });
        }
        if centroids.len() != k {
            return Err(Error::CentroidCount {
                expected: k,
                found: centroids.len(),
            });
        }
        for centroid in &centroids {
            dataset::validate_point(centroid, dim)?;
        }
        let colors = self.config.colors()?;
        self.iterate(dataset, centroids, &colors)
    }

    fn iterate<K>(
        &mut self,
        dataset: &Dataset<K>,
        centroids: Vec<Point>,
        colors: &[String],
    ) -> Result<KMeansResult<K>>
    where
        K: Ord + Clone,
        O: ClusterObserver<K>,
    {
        let clusters = assign(dataset, &centroids)?;
        let mut state = ClusteringState {
            centroids,
            clusters,
            detector: ConvergenceDetector::new(self.config.k),
        };

        let termination = loop {
            if state.detector.budget_exhausted() {
                break Termination::BudgetExhausted;
            }

            let centroids = update(
                dataset,
                &state.clusters,
                &state.centroids,
                self.config.empty_cluster_policy,
            )?;
            let clusters = assign(dataset, &centroids)?;

            if self.config.debug {
                self.observer.on_iteration(
                    state.detector.iterations() + 1,
                    Frame {
                        dataset,
                        clusters: &state.clusters,
                        centroids: &state.centroids,
                        colors,
                    },
                );
            }

            let converged = state.detector.record(&state.clusters, &clusters);
            state.centroids = centroids;
            state.clusters = clusters;

            if converged {
                self.observer.on_converged(Frame {
                    dataset,
                    clusters: &state.clusters,
                    centroids: &state.centroids,
                    colors,
                });
                break Termination::Converged;
            }
        };

        self.observer.on_terminated(
            termination,
            Frame {
                dataset,
                clusters: &state.clusters,
                centroids: &state.centroids,
                colors,
            },
        );

        let iterations = state.detector.iterations();
        let budget = state.detector.budget();
        match termination {
            Termination::Converged => info!(
                "converged after {} of a possible {} passes for {} clusters",
                iterations, budget, self.config.k
            ),
            Termination::BudgetExhausted => info!(
                "stopped after {} of a possible {} passes for {} clusters without converging",
                iterations, budget, self.config.k
            ),
        }

        let total = inertia(dataset, &state.clusters, &state.centroids)?;
        debug!("final inertia {}", total);

        Ok(KMeansResult {
            centroids: state.centroids,
            clusters: state.clusters,
            iterations,
            budget,
            termination,
            inertia: total,
        })
    }
}

/// Runs k-means with the given config and no observer.
///
/// # Example
///
/// ```
/// use lloyd::{kmeans, Dataset, KMeansConfig};
///
/// let data: Dataset<u32> = [(0, vec![0.0]), (1, vec![0.5]), (2, vec![9.0])]
///     .into_iter()
///     .collect();
/// let result = kmeans(&data, &KMeansConfig::new(2).with_seed(1)).unwrap();
/// assert_eq!(result.labels()[&0], result.labels()[&1]);
/// ```
pub fn kmeans<K: Ord + Clone>(
    dataset: &Dataset<K>,
    config: &KMeansConfig,
) -> Result<KMeansResult<K>> {
    KMeans::new(config.clone()).run(dataset)
}

/// Sum of squared distances from each member to its cluster's centroid.
pub fn inertia<K: Ord>(
    dataset: &Dataset<K>,
    clusters: &[Cluster<K>],
    centroids: &[Point],
) -> Result<f64> {
    let mut total = 0.0;
    for (cluster, centroid) in clusters.iter().zip(centroids) {
        for point in cluster.iter().filter_map(|key| dataset.get(key)) {
            total += squared_euclidean_distance(centroid, point)?;
        }
    }
    Ok(total)
}
