use crate::service::ServiceRecord;

/// The closed set of states a presentation layer observes.
///
/// `Idle` and `Loading` are held by the consumer before and after it starts a
/// session; the remaining states map one-to-one onto items of the record
/// stream (see [`RecordStream::next_state`](crate::RecordStream::next_state)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryState {
	/// No session has been started.
	Idle,
	/// A session is active but nothing has been resolved yet.
	Loading,
	/// A service was resolved.
	Record(ServiceRecord),
	/// The session terminated with a fatal subscription failure.
	Error(String),
	/// The session ended cleanly.
	Stopped,
}
