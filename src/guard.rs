use crate::platform::NsdPlatform;
use std::sync::{Arc, Mutex};

/// Reference-counted hold on the platform's multicast reception resource.
///
/// The underlying resource is activated on the 0 -> 1 transition and
/// deactivated on the 1 -> 0 transition. Releasing without a matching acquire
/// is a no-op. Activation failures are logged, never propagated: losing
/// multicast reception degrades discovery, it does not break it.
pub struct MulticastGuard {
	platform: Arc<dyn NsdPlatform>,
	count: Mutex<usize>,
}

impl MulticastGuard {
	pub fn new(platform: Arc<dyn NsdPlatform>) -> Self {
		Self {
			platform,
			count: Mutex::new(0),
		}
	}

	pub fn acquire(&self) {
		let mut count = self.count.lock().unwrap();
		*count += 1;
		if *count == 1 {
			if let Err(code) = self.platform.set_multicast_reception(true) {
				log::warn!("Failed to activate multicast reception (error code: {code}); discovery may miss responses");
			}
		}
	}

	pub fn release(&self) {
		let mut count = self.count.lock().unwrap();
		if *count == 0 {
			return;
		}
		*count -= 1;
		if *count == 0 {
			if let Err(code) = self.platform.set_multicast_reception(false) {
				log::warn!("Failed to deactivate multicast reception (error code: {code})");
			}
		}
	}

	pub fn held(&self) -> bool {
		*self.count.lock().unwrap() > 0
	}
}
