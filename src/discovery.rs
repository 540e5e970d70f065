use crate::{
	bridge::{self, RecordPublisher, RecordStream},
	errors::DiscoveryError,
	guard::MulticastGuard,
	platform::{DiscoveryEvent, DiscoveryListener, NsdPlatform, SubscriptionId},
	resolver::Resolver,
	service::ServiceQuery,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

mod builder;
pub use builder::DiscoveryBuilder;

mod event;
pub use event::DiscoveryState;

mod handle;
pub use handle::DiscoveryHandle;
use handle::*;

/// One discovery attempt: subscribes to the platform's discovery feed,
/// resolves matching services, and publishes records onto the stream until
/// stopped or a fatal subscription failure.
///
/// A stopped session cannot be restarted; build a new one instead.
pub struct Discovery {
	query: ServiceQuery,
	platform: Arc<dyn NsdPlatform>,
	guard: Arc<MulticastGuard>,
	capacity: usize,
}

impl Discovery {
	/// Starts the session on its own thread and returns the record stream
	/// together with a handle that stops it.
	pub fn run_in_background(self) -> (RecordStream, DiscoveryHandle) {
		let (shutdown_tx, shutdown_rx) = oneshot::channel();
		let (publisher, stream) = bridge::channel(self.capacity);

		let thread = std::thread::spawn(move || {
			tokio::runtime::Builder::new_current_thread()
				.thread_name("NSD Discovery Session (Tokio)")
				.enable_all()
				.build()
				.unwrap()
				.block_on(self.impl_run(publisher, shutdown_rx))
		});

		(
			stream,
			DiscoveryHandle::new(DiscoveryHandleInner { thread, shutdown_tx }),
		)
	}

	async fn impl_run(self, publisher: RecordPublisher, mut shutdown_rx: oneshot::Receiver<()>) {
		let Discovery {
			query,
			platform,
			guard,
			..
		} = self;

		// Platform callbacks must return promptly, so the listener only
		// forwards events onto this feed; the session task consumes it.
		let (feed_tx, mut feed_rx) = mpsc::unbounded_channel();
		let listener: DiscoveryListener = Arc::new(move |event| {
			feed_tx.send(event).ok();
		});

		let resolver = Arc::new(Resolver::new(platform.clone()));
		let mut session = Session {
			query,
			platform,
			guard,
			resolver,
			publisher,
			status: Status::Idle,
			subscription: None,
			guard_held: false,
		};

		session.activate(listener);

		loop {
			tokio::select! {
				biased;
				_ = &mut shutdown_rx => {
					session.stop(None);
					break;
				}

				event = feed_rx.recv() => match event {
					Some(event) => {
						if session.handle_event(event) {
							break;
						}
					}
					None => {
						// The platform dropped our listener.
						session.stop(None);
						break;
					}
				},
			}
		}

		// Leaving the runtime abandons any in-flight resolution tasks; the
		// bridge is closed, so their publishes would be no-ops anyway.
	}
}

enum Status {
	Idle,
	Active,
	Stopped,
}

/// Mutable state of one discovery attempt. Owned by the session task.
struct Session {
	query: ServiceQuery,
	platform: Arc<dyn NsdPlatform>,
	guard: Arc<MulticastGuard>,
	resolver: Arc<Resolver>,
	publisher: RecordPublisher,
	status: Status,
	subscription: Option<SubscriptionId>,
	guard_held: bool,
}

impl Session {
	fn activate(&mut self, listener: DiscoveryListener) {
		self.guard.acquire();
		self.guard_held = true;

		let subscription = self.platform.start_discovery(&self.query.service_type, listener);
		self.subscription = Some(subscription);
		self.status = Status::Active;

		log::debug!("Discovery session active for type: {}", self.query.service_type);
	}

	/// Returns true when the event terminated the session.
	fn handle_event(&mut self, event: DiscoveryEvent) -> bool {
		if matches!(self.status, Status::Stopped) {
			return true;
		}

		match event {
			DiscoveryEvent::Started => {
				log::debug!("Service discovery started for type: {}", self.query.service_type);
				false
			}

			DiscoveryEvent::Found(service) => {
				log::debug!("Service found: {} ({})", service.name, service.service_type);

				if !self.query.matches(&service) {
					return false;
				}

				if !self.resolver.begin(&service) {
					log::debug!("Resolution already in flight for {}; ignoring duplicate", service.name);
					return false;
				}

				let resolver = self.resolver.clone();
				let publisher = self.publisher.clone();
				tokio::spawn(async move {
					match resolver.resolve(service).await {
						Ok(record) => publisher.publish(record).await,
						Err(error) => log::warn!("Resolution failed: {error}"),
					}
				});

				false
			}

			DiscoveryEvent::Lost(service) => {
				// No retraction: records already published stay published.
				log::debug!("Service lost: {} ({})", service.name, service.service_type);
				false
			}

			DiscoveryEvent::Stopped => {
				log::debug!("Discovery stopped: {}", self.query.service_type);
				false
			}

			DiscoveryEvent::StartFailed(code) => {
				log::error!("Start discovery failed with error code: {code}");
				self.stop(Some(DiscoveryError::StartFailed(code)));
				true
			}

			DiscoveryEvent::StopFailed(code) => {
				log::error!("Stop discovery failed with error code: {code}");
				self.stop(Some(DiscoveryError::StopFailed(code)));
				true
			}
		}
	}

	/// Tears the session down. Safe to call more than once; only the first
	/// call unsubscribes, releases the guard, and closes the bridge.
	fn stop(&mut self, error: Option<DiscoveryError>) {
		if matches!(self.status, Status::Stopped) {
			return;
		}
		self.status = Status::Stopped;

		if let Some(subscription) = self.subscription.take() {
			self.platform.stop_discovery(subscription);
		}

		if self.guard_held {
			self.guard.release();
			self.guard_held = false;
		}

		self.publisher.close(error);
	}
}
