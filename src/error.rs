use thiserror::Error;

/// Errors produced by a clustering run.
///
/// Every variant is detected eagerly, either when a run validates its input or
/// at the point where two incompatible points meet. None of them are
/// recoverable for the run that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `k` is zero or larger than the number of distinct points available.
    #[error("invalid number of clusters k = {k}: {available} distinct points available")]
    InvalidK { k: usize, available: usize },

    /// Two points (or a point and the dataset) disagree on dimensionality.
    #[error("dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("empty dataset provided")]
    EmptyDataset,

    #[error("points must have at least one dimension")]
    ZeroDimension,

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate in point")]
    NonFiniteCoordinate,

    /// An operation that needs at least one centroid was given none.
    #[error("no centroids to compare against")]
    NoCentroids,

    /// Caller-supplied initial centroids do not number exactly `k`.
    #[error("expected {expected} initial centroids, found {found}")]
    CentroidCount { expected: usize, found: usize },

    /// The palette does not carry one color per cluster.
    #[error("palette must have {expected} colors, found {found}")]
    PaletteLength { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
