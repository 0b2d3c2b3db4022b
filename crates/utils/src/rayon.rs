// Copyright 2024 Irreducible Inc.

use std::{env, sync::OnceLock};

/// In case when number of threads is set to 1, use rayon thread pool with
/// `use_current_thread` set to true. Verification fan-in then runs inline, which keeps
/// traces and debugging output in call order.
///
/// NOTE: rayon doesn't allow initializing global thread pool several times, so
/// in case when it was initialized before this function returns an error.
/// The function returns reference to the result because `ThreadPoolBuildError`
/// doesn't implement `Clone`. Call it at the start of `main`, before anything touches the
/// global pool; library code never calls it.
pub fn adjust_thread_pool() -> &'static Result<(), rayon::ThreadPoolBuildError> {
	static ONCE_GUARD: OnceLock<Result<(), rayon::ThreadPoolBuildError>> = OnceLock::new();

	ONCE_GUARD.get_or_init(|| {
		// We cannot use `rayon::current_num_threads` because it would force the global thread
		// pool to initialize, so we won't be able to override it.
		match env::var("RAYON_NUM_THREADS") {
			Ok(v) if v == "1" => {
				let result = rayon::ThreadPoolBuilder::new()
					.num_threads(1)
					.use_current_thread()
					.build_global();
				match &result {
					Ok(()) => tracing::debug!("rayon pinned to the current thread"),
					Err(err) => tracing::warn!(%err, "rayon global pool was already initialized"),
				}
				result
			}
			_ => Ok(()),
		}
	})
}

/// Minimum number of items each rayon task should reduce before splitting further.
pub fn min_chunk_len(n_items: usize) -> usize {
	n_items.div_ceil(rayon::current_num_threads()).max(1)
}
