use super::Discovery;
use crate::{guard::MulticastGuard, platform::NsdPlatform, service::ServiceQuery, DEFAULT_STREAM_CAPACITY};
use std::sync::Arc;

pub struct DiscoveryBuilder {
	service_type: String,
	name_prefix: String,
	capacity: usize,
	guard: Option<Arc<MulticastGuard>>,
}
impl DiscoveryBuilder {
	pub fn new() -> Self {
		Self {
			service_type: String::new(),
			name_prefix: String::new(),
			capacity: DEFAULT_STREAM_CAPACITY,
			guard: None,
		}
	}

	/// The DNS-SD service type to discover, e.g. `_http._tcp.`
	pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
		self.service_type = service_type.into();
		self
	}

	/// Only services whose instance name contains this prefix are resolved.
	/// An empty prefix matches every service of the queried type.
	pub fn name_prefix(mut self, name_prefix: impl Into<String>) -> Self {
		self.name_prefix = name_prefix.into();
		self
	}

	/// Buffer capacity of the record stream.
	pub fn capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	/// Shares a multicast guard across sessions. Each session still holds at
	/// most one reference on it. Defaults to a guard of its own.
	pub fn guard(mut self, guard: Arc<MulticastGuard>) -> Self {
		self.guard = Some(guard);
		self
	}

	pub fn build(self, platform: Arc<dyn NsdPlatform>) -> Discovery {
		let DiscoveryBuilder {
			service_type,
			name_prefix,
			capacity,
			guard,
		} = self;

		Discovery {
			query: ServiceQuery::new(service_type, name_prefix),
			guard: guard.unwrap_or_else(|| Arc::new(MulticastGuard::new(platform.clone()))),
			platform,
			capacity: capacity.max(1),
		}
	}
}
impl Default for DiscoveryBuilder {
	fn default() -> Self {
		Self::new()
	}
}
