// Copyright 2025 Irreducible Inc.

/// Installs the global tracing subscriber used by tools and tests.
///
/// The filter is read from `RUST_LOG` and defaults to `warn`, so the softmax underflow
/// diagnostic stays visible. Calling this more than once is harmless.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_target(true))
		.try_init();
}
