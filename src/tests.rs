use crate::{
	bridge,
	errors::DiscoveryError,
	guard::MulticastGuard,
	platform::{CallbackId, DiscoveryListener, InfoCallback, NsdPlatform, ResolveListener, SubscriptionId},
	service::{ServiceQuery, ServiceRecord, ServiceRef},
};
use std::{
	collections::BTreeMap,
	net::{IpAddr, Ipv4Addr},
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, Barrier,
	},
};

#[derive(Default)]
struct CountingPlatform {
	activations: AtomicUsize,
	deactivations: AtomicUsize,
}
impl NsdPlatform for CountingPlatform {
	fn supports_info_callbacks(&self) -> bool {
		false
	}

	fn start_discovery(&self, _service_type: &str, _listener: DiscoveryListener) -> SubscriptionId {
		SubscriptionId(0)
	}

	fn stop_discovery(&self, _subscription: SubscriptionId) {}

	fn resolve(&self, _service: &ServiceRef, listener: ResolveListener) {
		listener(Err(0));
	}

	fn register_info_callback(&self, _service: &ServiceRef, _callback: InfoCallback) -> Result<CallbackId, i32> {
		Err(0)
	}

	fn unregister_info_callback(&self, _callback: CallbackId) {}

	fn set_multicast_reception(&self, enabled: bool) -> Result<(), i32> {
		if enabled {
			self.activations.fetch_add(1, Ordering::SeqCst);
		} else {
			self.deactivations.fetch_add(1, Ordering::SeqCst);
		}
		Ok(())
	}
}

fn record(name: &str) -> ServiceRecord {
	ServiceRecord {
		name: name.to_string(),
		service_type: "_http._tcp.".to_string(),
		host: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 9)),
		port: 8080,
		attributes: BTreeMap::new(),
	}
}

#[test]
fn multicast_guard_counts_references() {
	let platform = Arc::new(CountingPlatform::default());
	let guard = MulticastGuard::new(platform.clone());

	guard.acquire();
	guard.acquire();
	guard.acquire();
	assert!(guard.held());
	assert_eq!(platform.activations.load(Ordering::SeqCst), 1);

	guard.release();
	guard.release();
	assert!(guard.held());
	assert_eq!(platform.deactivations.load(Ordering::SeqCst), 0);

	guard.release();
	assert!(!guard.held());
	assert_eq!(platform.deactivations.load(Ordering::SeqCst), 1);
}

#[test]
fn multicast_guard_release_without_acquire_is_noop() {
	let platform = Arc::new(CountingPlatform::default());
	let guard = MulticastGuard::new(platform.clone());

	guard.release();
	guard.release();

	assert!(!guard.held());
	assert_eq!(platform.deactivations.load(Ordering::SeqCst), 0);
}

#[test]
fn multicast_guard_concurrent_acquires_activate_once() {
	const SESSIONS: usize = 8;

	let platform = Arc::new(CountingPlatform::default());
	let guard = Arc::new(MulticastGuard::new(platform.clone()));

	let barrier = Arc::new(Barrier::new(SESSIONS));
	let threads = (0..SESSIONS)
		.map(|_| {
			let guard = guard.clone();
			let barrier = barrier.clone();
			std::thread::spawn(move || {
				barrier.wait();
				guard.acquire();
			})
		})
		.collect::<Vec<_>>();
	for thread in threads {
		thread.join().unwrap();
	}

	assert_eq!(platform.activations.load(Ordering::SeqCst), 1);

	let barrier = Arc::new(Barrier::new(SESSIONS));
	let threads = (0..SESSIONS)
		.map(|_| {
			let guard = guard.clone();
			let barrier = barrier.clone();
			std::thread::spawn(move || {
				barrier.wait();
				guard.release();
			})
		})
		.collect::<Vec<_>>();
	for thread in threads {
		thread.join().unwrap();
	}

	assert!(!guard.held());
	assert_eq!(platform.deactivations.load(Ordering::SeqCst), 1);
}

#[test]
fn query_matches_type_and_name_prefix() {
	let query = ServiceQuery::new("_http._tcp.", "Secure");

	assert!(query.matches(&ServiceRef::new("Secure-Box1", "_http._tcp.")));
	assert!(query.matches(&ServiceRef::new("Very-Secure-Box", "_http._tcp.")));
	assert!(!query.matches(&ServiceRef::new("Printer1", "_http._tcp.")));
	assert!(!query.matches(&ServiceRef::new("Secure-Box1", "_ipp._tcp.")));
}

#[tokio::test]
async fn bridge_drains_buffered_records_before_terminal_error() {
	let (publisher, mut stream) = bridge::channel(8);

	publisher.publish(record("a")).await;
	publisher.publish(record("b")).await;
	publisher.close(Some(DiscoveryError::StartFailed(3)));

	assert_eq!(stream.recv().await.unwrap().unwrap().name, "a");
	assert_eq!(stream.recv().await.unwrap().unwrap().name, "b");
	assert_eq!(stream.recv().await, Err(DiscoveryError::StartFailed(3)));
}

#[tokio::test]
async fn bridge_close_is_idempotent_and_first_close_wins() {
	let (publisher, mut stream) = bridge::channel(8);

	publisher.close(None);
	publisher.close(Some(DiscoveryError::StopFailed(1)));

	assert_eq!(stream.recv().await, Ok(None));
}

#[tokio::test]
async fn bridge_publish_after_close_is_noop() {
	let (publisher, mut stream) = bridge::channel(8);

	publisher.close(None);
	publisher.publish(record("late")).await;

	assert_eq!(stream.recv().await, Ok(None));
}
