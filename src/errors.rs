/// Fatal subscription failures.
///
/// These are the only errors that cross the session boundary: they terminate
/// the session and surface as the record stream's terminal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
	#[error("Start discovery failed with error code: {0}")]
	StartFailed(i32),

	#[error("Stop discovery failed with error code: {0}")]
	StopFailed(i32),
}

/// Per-service resolution failures.
///
/// Logged and contained; the offending service is dropped and the session
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	#[error("Service info callback registration failed with error code: {0}")]
	RegistrationFailed(i32),

	#[error("Resolve failed with error code: {0}")]
	Failed(i32),

	#[error("Service was lost before it could be resolved")]
	ServiceLost,

	#[error("Platform dropped the resolve request")]
	Abandoned,
}
