//! The boundary to the platform's DNS-SD service. The crate only orchestrates
//! these primitives; it never owns the wire protocol.

use crate::service::{ServiceRecord, ServiceRef};
use std::sync::Arc;

/// Identifies one discovery subscription on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Identifies one registered service info callback on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub u64);

pub type DiscoveryListener = Arc<dyn Fn(DiscoveryEvent) + Send + Sync + 'static>;

/// Events delivered on a discovery subscription.
///
/// The platform invokes listeners from its own callback thread and requires
/// them to return promptly; listeners must never block.
#[derive(Debug, Clone)]
pub enum DiscoveryEvent {
	Started,
	Found(ServiceRef),
	Lost(ServiceRef),
	Stopped,
	StartFailed(i32),
	StopFailed(i32),
}

/// One-shot listener for a legacy resolve request. Invoked exactly once with
/// either the resolved record or the platform error code.
pub type ResolveListener = Box<dyn FnOnce(Result<ServiceRecord, i32>) + Send + 'static>;

pub type InfoCallback = Arc<dyn Fn(InfoEvent) + Send + Sync + 'static>;

/// Events delivered on a registered service info callback.
#[derive(Debug, Clone)]
pub enum InfoEvent {
	Updated(ServiceRecord),
	Lost,
	Unregistered,
}

/// The platform's service discovery primitives.
pub trait NsdPlatform: Send + Sync + 'static {
	/// Whether the platform supports persistent service info callbacks.
	/// Checked once per session, not per resolve.
	fn supports_info_callbacks(&self) -> bool;

	/// Subscribes to the discovery feed for a service type.
	///
	/// Failure to start is reported through the listener as
	/// [`DiscoveryEvent::StartFailed`], not as a return value.
	fn start_discovery(&self, service_type: &str, listener: DiscoveryListener) -> SubscriptionId;

	/// Tears down a discovery subscription. Failure to stop is reported
	/// through the subscription's listener as [`DiscoveryEvent::StopFailed`].
	fn stop_discovery(&self, subscription: SubscriptionId);

	/// Issues a one-shot resolve request for a discovered service.
	fn resolve(&self, service: &ServiceRef, listener: ResolveListener);

	/// Registers a persistent info callback for a discovered service.
	///
	/// The registration stays live until unregistered; callers that only want
	/// the first update must unregister after receiving it.
	fn register_info_callback(&self, service: &ServiceRef, callback: InfoCallback) -> Result<CallbackId, i32>;

	fn unregister_info_callback(&self, callback: CallbackId);

	/// Toggles reception of multicast discovery traffic.
	fn set_multicast_reception(&self, enabled: bool) -> Result<(), i32>;
}
