use crate::error::{Error, Result};

/// Euclidean distance between two points of the same dimension.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the points have different lengths.
///
/// # Example
///
/// ```
/// use lloyd::k_means::distance::euclidean_distance;
///
/// let d = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
/// assert_eq!(d, 5.0);
/// ```
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    squared_euclidean_distance(a, b).map(f64::sqrt)
}

/// Squared Euclidean distance. Orders points the same way as
/// [`euclidean_distance`] without paying for the square root.
pub fn squared_euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a
        .iter()
        .zip(b.iter())
        .fold(0.0, |acc, (&x, &y)| acc + (x - y).powi(2)))
}
