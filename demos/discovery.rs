//! Discovers "Secure" HTTP services against an in-memory platform that plays
//! the role of the OS discovery daemon.

use nsdstream::{
	discovery::DiscoveryBuilder,
	platform::{
		CallbackId, DiscoveryEvent, DiscoveryListener, InfoCallback, NsdPlatform, ResolveListener,
		SubscriptionId,
	},
	service::{ServiceRecord, ServiceRef},
};
use std::{
	collections::BTreeMap,
	net::{IpAddr, Ipv4Addr},
	sync::{Arc, Mutex},
	time::Duration,
};

#[derive(Default)]
struct DemoNsd {
	listener: Mutex<Option<DiscoveryListener>>,
}

impl DemoNsd {
	fn fire(&self, event: DiscoveryEvent) {
		loop {
			if let Some(listener) = self.listener.lock().unwrap().clone() {
				listener(event);
				return;
			}
			std::thread::sleep(Duration::from_millis(5));
		}
	}
}

impl NsdPlatform for DemoNsd {
	fn supports_info_callbacks(&self) -> bool {
		false
	}

	fn start_discovery(&self, service_type: &str, listener: DiscoveryListener) -> SubscriptionId {
		println!("(platform) discovery started for {service_type}");
		*self.listener.lock().unwrap() = Some(listener);
		SubscriptionId(1)
	}

	fn stop_discovery(&self, _subscription: SubscriptionId) {
		println!("(platform) discovery stopped");
		self.listener.lock().unwrap().take();
	}

	fn resolve(&self, service: &ServiceRef, listener: ResolveListener) {
		let record = ServiceRecord {
			name: service.name.clone(),
			service_type: service.service_type.clone(),
			host: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 40 + service.name.len() as u8)),
			port: 8443,
			attributes: BTreeMap::from([("path".to_string(), "/api".to_string())]),
		};
		std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(50));
			listener(Ok(record));
		});
	}

	fn register_info_callback(&self, _service: &ServiceRef, _callback: InfoCallback) -> Result<CallbackId, i32> {
		Err(-1)
	}

	fn unregister_info_callback(&self, _callback: CallbackId) {}

	fn set_multicast_reception(&self, enabled: bool) -> Result<(), i32> {
		println!("(platform) multicast reception {}", if enabled { "on" } else { "off" });
		Ok(())
	}
}

fn main() {
	simple_logger::SimpleLogger::new()
		.with_level(log::LevelFilter::Debug)
		.init()
		.unwrap();

	let platform = Arc::new(DemoNsd::default());

	let (mut stream, handle) = DiscoveryBuilder::new()
		.service_type("_http._tcp.")
		.name_prefix("Secure")
		.build(platform.clone())
		.run_in_background();

	{
		let platform = platform.clone();
		std::thread::spawn(move || {
			platform.fire(DiscoveryEvent::Started);
			platform.fire(DiscoveryEvent::Found(ServiceRef::new("Secure-Box1", "_http._tcp.")));
			platform.fire(DiscoveryEvent::Found(ServiceRef::new("Printer1", "_http._tcp.")));
			platform.fire(DiscoveryEvent::Found(ServiceRef::new("Secure-Box2", "_http._tcp.")));
		});
	}

	let mut found = 0;
	loop {
		match stream.blocking_recv() {
			Ok(Some(record)) => {
				println!("Resolved {} at {}:{}", record.name, record.host, record.port);
				found += 1;
				if found == 2 {
					handle.shutdown();
				}
			}
			Ok(None) => {
				println!("End of stream");
				break;
			}
			Err(error) => {
				eprintln!("Discovery failed: {error}");
				break;
			}
		}
	}
}
