//! Parallel simulation execution
//!
//! Uses Rayon to run attempts concurrently. Every attempt owns its own
//! session and physics world, so nothing is shared between workers.

use bevy::log::warn;
use rayon::prelude::*;

use super::metrics::AttemptResult;

/// Initialize parallel execution with the given thread count.
/// Call this once at startup before running parallel simulations.
pub fn init_parallel(threads: usize) {
    if threads == 0 {
        // Rayon default (auto-detect)
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        warn!("Could not size the thread pool ({}), using defaults", e);
    }
}

/// Run every job in parallel; results keep job order
pub fn run_parallel<J, F>(jobs: &[J], run: F) -> Vec<AttemptResult>
where
    J: Sync,
    F: Fn(&J) -> Option<AttemptResult> + Sync + Send,
{
    jobs.par_iter().filter_map(run).collect()
}
