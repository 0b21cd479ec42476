//! Parallel execution
//!
//! Uses Rayon to run many headless apps at once. Each app should be built
//! with `with_minimal_threads()` so the process stays under OS thread limits.

use rayon::prelude::*;

/// Size the global Rayon pool. Call once at startup; 0 keeps Rayon's default.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads == 0 {
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| format!("Failed to initialize Rayon thread pool: {}", e))
}

/// Run `job` over every item concurrently. Results keep the input order.
pub fn run_parallel<T, R, F>(items: &[T], job: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(job).collect()
}
