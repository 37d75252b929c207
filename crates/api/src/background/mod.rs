//! Long-running jobs spawned next to the HTTP server.
//!
//! Each job takes a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! and returns once it is cancelled.

pub mod session_sweep;
