use std::sync::Mutex;

pub(super) struct DiscoveryHandleInner {
	pub(super) thread: std::thread::JoinHandle<()>,
	pub(super) shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

/// Stops a running discovery session.
///
/// `shutdown` may be called any number of times; teardown happens once.
/// Dropping the handle also stops the session.
pub struct DiscoveryHandle(Mutex<Option<DiscoveryHandleInner>>);

impl DiscoveryHandle {
	pub(super) fn new(inner: DiscoveryHandleInner) -> Self {
		Self(Mutex::new(Some(inner)))
	}

	/// Stops the session: unsubscribes from the platform feed, releases the
	/// multicast guard, and closes the record stream cleanly. In-flight
	/// resolutions are abandoned, not awaited.
	pub fn shutdown(&self) {
		let inner = self.0.lock().unwrap().take();
		if let Some(DiscoveryHandleInner { thread, shutdown_tx }) = inner {
			// The session may already have terminated on its own; a dead
			// receiver is fine.
			shutdown_tx.send(()).ok();
			thread.join().ok();
		}
	}
}

impl Drop for DiscoveryHandle {
	fn drop(&mut self) {
		self.shutdown();
	}
}
