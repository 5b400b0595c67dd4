//! The boundary between the clustering core and whatever displays it.
//!
//! The core never draws anything. It hands a [`Frame`] to a
//! [`ClusterObserver`] and carries on; observers cannot feed data back.

use super::dataset::{Cluster, Dataset, Point};
use super::Termination;

/// Named colors handed out by [`default_palette`], in order.
pub const DEFAULT_COLORS: [&str; 10] = [
    "royalblue",
    "forestgreen",
    "maroon",
    "darkorange",
    "purple",
    "teal",
    "goldenrod",
    "crimson",
    "slategray",
    "olive",
];

/// `k` colors, cycling through [`DEFAULT_COLORS`].
pub fn default_palette(k: usize) -> Vec<String> {
    DEFAULT_COLORS
        .iter()
        .cycle()
        .take(k)
        .map(|c| c.to_string())
        .collect()
}

/// Everything a renderer needs for one picture of the clustering.
///
/// `colors[i]` is the color of `clusters[i]` and `centroids[i]`.
#[derive(Debug)]
pub struct Frame<'a, K> {
    pub dataset: &'a Dataset<K>,
    pub clusters: &'a [Cluster<K>],
    pub centroids: &'a [Point],
    pub colors: &'a [String],
}

// Only references inside; no bound on `K` needed.
impl<K> Clone for Frame<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Frame<'_, K> {}

/// Receives frames from a running clustering.
pub trait ClusterObserver<K> {
    /// Called after each iteration when debug display is enabled. The frame
    /// shows the state the iteration started from, so it trails the computed
    /// state by one iteration.
    fn on_iteration(&mut self, _iteration: usize, _frame: Frame<'_, K>) {}

    /// Called once when the run converges, with the final state. Not called
    /// when the iteration budget runs out; see [`on_terminated`].
    ///
    /// [`on_terminated`]: ClusterObserver::on_terminated
    fn on_converged(&mut self, _frame: Frame<'_, K>) {}

    /// Called exactly once at the end of every run that got past
    /// initialization, converged or not, with the last computed state. On
    /// convergence it follows [`on_converged`].
    ///
    /// [`on_converged`]: ClusterObserver::on_converged
    fn on_terminated(&mut self, _termination: Termination, _frame: Frame<'_, K>) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<K> ClusterObserver<K> for NoopObserver {}

impl<K, O: ClusterObserver<K> + ?Sized> ClusterObserver<K> for &mut O {
    fn on_iteration(&mut self, iteration: usize, frame: Frame<'_, K>) {
        (**self).on_iteration(iteration, frame);
    }

    fn on_converged(&mut self, frame: Frame<'_, K>) {
        (**self).on_converged(frame);
    }

    fn on_terminated(&mut self, termination: Termination, frame: Frame<'_, K>) {
        (**self).on_terminated(termination, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_cycles() {
        assert_eq!(default_palette(0), Vec::<String>::new());
        assert_eq!(
            default_palette(3),
            vec!["royalblue", "forestgreen", "maroon"]
        );
        let long = default_palette(12);
        assert_eq!(long.len(), 12);
        assert_eq!(long[10], "royalblue");
        assert_eq!(long[11], "forestgreen");
    }
}
