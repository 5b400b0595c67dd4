use log::debug;

use super::dataset::Cluster;

/// Iteration cap for a run with `k` clusters: `ceil(k * 3.5)`, saturating
/// for `k` too large to represent the product.
pub fn iteration_budget(k: usize) -> usize {
    k.saturating_mul(7).div_ceil(2)
}

/// Tracks how often the partition came back unchanged and how many
/// iterations have run.
///
/// The stability counter is bumped every time a freshly computed partition is
/// set-equal to the previous one and is never reset, so it counts stable
/// observations across the whole run rather than a consecutive streak. The run
/// converges once that count reaches `k`.
///
/// `k` is expected to be at least 1. A detector built with `k == 0` has a
/// zero budget and never reports convergence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceDetector {
    k: usize,
    stable: usize,
    iterations: usize,
    budget: usize,
}

impl ConvergenceDetector {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            stable: 0,
            iterations: 0,
            budget: iteration_budget(k),
        }
    }

    /// Compares two partitions cluster-by-cluster as sets, advances the
    /// iteration count and returns whether the run has converged.
    pub fn record<K: Ord>(&mut self, previous: &[Cluster<K>], next: &[Cluster<K>]) -> bool {
        if same_partition(previous, next) {
            self.stable += 1;
        }
        self.iterations += 1;
        debug!(
            "iteration {}/{}: stable {}/{}",
            self.iterations, self.budget, self.stable, self.k
        );
        self.converged()
    }

    pub fn converged(&self) -> bool {
        self.k > 0 && self.stable >= self.k
    }

    pub fn budget_exhausted(&self) -> bool {
        self.iterations >= self.budget
    }

    pub fn stable_count(&self) -> usize {
        self.stable
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn budget(&self) -> usize {
        self.budget
    }
}

/// Partitions are equal when every cluster index holds the same identifiers.
pub fn same_partition<K: Ord>(a: &[Cluster<K>], b: &[Cluster<K>]) -> bool {
    a == b
}
