//! Lloyd's k-means over labeled points, with a stopping rule that waits for
//! the partition to be observed unchanged `k` times.
//!
//! The crate does no I/O. Renderers and progress reporters plug in through
//! [`ClusterObserver`]; diagnostics go through the `log` facade.

pub mod error;
pub mod k_means;

pub use error::{Error, Result};
pub use k_means::{
    kmeans, Cluster, ClusterObserver, Dataset, EmptyClusterPolicy, Frame, KMeans, KMeansConfig,
    KMeansResult, NoopObserver, Point, Termination,
};
