use crate::{
	errors::ResolveError,
	platform::{InfoCallback, InfoEvent, NsdPlatform},
	service::{ServiceRecord, ServiceRef},
};
use std::{
	collections::HashSet,
	sync::{Arc, Mutex},
};
use tokio::sync::oneshot;

enum Strategy {
	/// Persistent info callback; the first update is the resolution result and
	/// the registration is torn down immediately after it.
	InfoCallback,
	/// One-shot resolve request.
	OneShot,
}

/// Resolves discovered services into connectable records.
///
/// The strategy is picked once per session from the platform's capabilities;
/// callers never see which one ran. At most one resolution is in flight per
/// service: a duplicate found event for a service already being resolved is
/// ignored rather than double-registered.
pub(crate) struct Resolver {
	platform: Arc<dyn NsdPlatform>,
	strategy: Strategy,
	in_flight: Mutex<HashSet<(String, String)>>,
}

impl Resolver {
	pub fn new(platform: Arc<dyn NsdPlatform>) -> Self {
		let strategy = if platform.supports_info_callbacks() {
			Strategy::InfoCallback
		} else {
			Strategy::OneShot
		};

		Self {
			platform,
			strategy,
			in_flight: Mutex::new(HashSet::new()),
		}
	}

	/// Claims a service for resolution. Returns false if a resolution for the
	/// same service is already in flight.
	pub fn begin(&self, service: &ServiceRef) -> bool {
		self.in_flight.lock().unwrap().insert(service.key())
	}

	/// Resolves a claimed service, releasing the claim when done.
	pub async fn resolve(&self, service: ServiceRef) -> Result<ServiceRecord, ResolveError> {
		let result = match self.strategy {
			Strategy::InfoCallback => self.resolve_info_callback(&service).await,
			Strategy::OneShot => self.resolve_one_shot(&service).await,
		};

		self.in_flight.lock().unwrap().remove(&service.key());
		result
	}

	async fn resolve_info_callback(&self, service: &ServiceRef) -> Result<ServiceRecord, ResolveError> {
		let (tx, rx) = oneshot::channel();
		let tx = Mutex::new(Some(tx));

		let callback: InfoCallback = Arc::new(move |event| match event {
			InfoEvent::Updated(record) => {
				// The first update wins; later ones arrive after we have
				// already unregistered and are dropped here.
				if let Some(tx) = tx.lock().unwrap().take() {
					tx.send(Ok(record)).ok();
				}
			}
			InfoEvent::Lost => {
				if let Some(tx) = tx.lock().unwrap().take() {
					tx.send(Err(ResolveError::ServiceLost)).ok();
				}
			}
			InfoEvent::Unregistered => log::debug!("Service info callback unregistered"),
		});

		let callback_id = self
			.platform
			.register_info_callback(service, callback)
			.map_err(ResolveError::RegistrationFailed)?;

		let result = rx.await.unwrap_or(Err(ResolveError::Abandoned));

		// The registration must not outlive the first result, or per-service
		// state leaks on the platform side.
		self.platform.unregister_info_callback(callback_id);

		result
	}

	async fn resolve_one_shot(&self, service: &ServiceRef) -> Result<ServiceRecord, ResolveError> {
		let (tx, rx) = oneshot::channel();

		self.platform.resolve(
			service,
			Box::new(move |result| {
				tx.send(result.map_err(ResolveError::Failed)).ok();
			}),
		);

		rx.await.unwrap_or(Err(ResolveError::Abandoned))
	}
}
