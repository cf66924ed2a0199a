//! Rayon-based parallelisation utilities.
//!
//! Table cells are independent evaluations, so they are fanned out over a
//! dedicated rayon pool. Small grids stay on the calling thread.

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::TableError;

/// Grids with fewer cells than this are evaluated sequentially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16;

/// Parallel map over a slice, preserving order.
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(mapper).collect()
}

/// Worker count: the configured value capped at the detected cores, or all
/// detected cores when unset or zero.
pub fn resolve_threads(configured: Option<usize>, detected_cores: usize) -> usize {
    let detected = detected_cores.max(1);
    match configured {
        None | Some(0) => detected,
        Some(n) => n.min(detected),
    }
}

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ParallelConfig {
    /// Worker threads; `None` uses every available core
    pub threads: Option<usize>,
    /// Minimum cells before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(threads: Option<usize>, parallel_threshold: usize) -> Self {
        Self {
            threads,
            parallel_threshold,
        }
    }

    /// Always evaluates on the calling thread.
    pub fn sequential() -> Self {
        Self {
            threads: Some(1),
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold && self.worker_count() > 1
    }

    /// Threads the pool will start.
    pub fn worker_count(&self) -> usize {
        resolve_threads(self.threads, num_cpus::get())
    }

    /// Builds the dedicated pool.
    ///
    /// # Errors
    /// `TableError::ThreadPool` if rayon cannot spawn the workers.
    pub fn build_pool(&self) -> Result<ThreadPool, TableError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count())
            .thread_name(|i| format!("amerprice-table-{i}"))
            .build()?;
        Ok(pool)
    }

    /// Maps `items` in order, in parallel on a fresh pool when the batch is
    /// large enough.
    ///
    /// # Errors
    /// `TableError::ThreadPool` if the pool cannot be built.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Result<Vec<R>, TableError>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if !self.should_parallelize(items.len()) {
            return Ok(items.iter().map(mapper).collect());
        }
        let pool = self.build_pool()?;
        Ok(pool.install(|| parallel_map(items, mapper)))
    }
}
