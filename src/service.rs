use std::{collections::BTreeMap, net::IpAddr};

/// What a discovery session is looking for.
///
/// A found service matches when its type equals `service_type` and its
/// instance name contains `name_prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuery {
	pub service_type: String,
	pub name_prefix: String,
}
impl ServiceQuery {
	pub fn new(service_type: impl Into<String>, name_prefix: impl Into<String>) -> Self {
		Self {
			service_type: service_type.into(),
			name_prefix: name_prefix.into(),
		}
	}

	pub fn matches(&self, service: &ServiceRef) -> bool {
		service.service_type == self.service_type && service.name.contains(&self.name_prefix)
	}
}

/// A service the platform has found but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceRef {
	pub name: String,
	pub service_type: String,
}
impl ServiceRef {
	pub fn new(name: impl Into<String>, service_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			service_type: service_type.into(),
		}
	}

	pub(crate) fn key(&self) -> (String, String) {
		(self.name.clone(), self.service_type.clone())
	}
}

/// A fully resolved service. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
	pub name: String,
	pub service_type: String,
	pub host: IpAddr,
	pub port: u16,
	pub attributes: BTreeMap<String, String>,
}
