use crate::{discovery::DiscoveryState, errors::DiscoveryError, service::ServiceRecord};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Creates the bridge between a session's resolution tasks and its consumer.
pub(crate) fn channel(capacity: usize) -> (RecordPublisher, RecordStream) {
	let (tx, rx) = mpsc::channel(capacity);
	let shared = Arc::new(Shared {
		tx: Mutex::new(Some(tx)),
		terminal: Mutex::new(None),
	});
	(RecordPublisher { shared: shared.clone() }, RecordStream { rx, shared })
}

struct Shared {
	tx: Mutex<Option<mpsc::Sender<ServiceRecord>>>,
	terminal: Mutex<Option<DiscoveryError>>,
}

/// Producer half of the bridge. Cloned into each resolution task.
#[derive(Clone)]
pub(crate) struct RecordPublisher {
	shared: Arc<Shared>,
}

impl RecordPublisher {
	/// Publishes one record, blocking the calling task (and only that task)
	/// while the buffer is full. Publishing after close is a silent no-op.
	pub async fn publish(&self, record: ServiceRecord) {
		let tx = match self.shared.tx.lock().unwrap().clone() {
			Some(tx) => tx,
			None => return,
		};

		// The consumer dropping the stream mid-send is equivalent to a close.
		tx.send(record).await.ok();
	}

	/// Marks the stream terminal. Only the first close takes effect; closing
	/// again is a safe no-op.
	pub fn close(&self, error: Option<DiscoveryError>) {
		let tx = self.shared.tx.lock().unwrap().take();
		if tx.is_none() {
			return;
		}

		*self.shared.terminal.lock().unwrap() = error;
		// The sender drops here; the receiver drains any buffered records
		// before it observes the end of the stream.
	}
}

/// Consumer half of a session's record stream.
///
/// Records arrive in resolution-completion order, which is not necessarily the
/// order in which the platform found the services.
pub struct RecordStream {
	rx: mpsc::Receiver<ServiceRecord>,
	shared: Arc<Shared>,
}

impl RecordStream {
	/// Receives the next resolved record.
	///
	/// Buffered records are always delivered before the terminal signal:
	/// `Ok(Some(record))` for a record, `Ok(None)` for a clean end of stream,
	/// `Err` if the session terminated with a fatal subscription failure.
	pub async fn recv(&mut self) -> Result<Option<ServiceRecord>, DiscoveryError> {
		match self.rx.recv().await {
			Some(record) => Ok(Some(record)),
			None => self.terminal(),
		}
	}

	/// Blocking variant of [`recv`](Self::recv) for consumers that do not run
	/// inside an async runtime.
	pub fn blocking_recv(&mut self) -> Result<Option<ServiceRecord>, DiscoveryError> {
		match self.rx.blocking_recv() {
			Some(record) => Ok(Some(record)),
			None => self.terminal(),
		}
	}

	/// Maps the next stream item into the presentation-layer state
	/// enumeration.
	pub async fn next_state(&mut self) -> DiscoveryState {
		match self.recv().await {
			Ok(Some(record)) => DiscoveryState::Record(record),
			Ok(None) => DiscoveryState::Stopped,
			Err(error) => DiscoveryState::Error(error.to_string()),
		}
	}

	fn terminal(&self) -> Result<Option<ServiceRecord>, DiscoveryError> {
		match self.shared.terminal.lock().unwrap().clone() {
			Some(error) => Err(error),
			None => Ok(None),
		}
	}
}
