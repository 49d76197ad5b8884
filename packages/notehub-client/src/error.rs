pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of a single API call. Cloneable so one outcome can be shared by every waiter of a
/// deduplicated fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Network error: {message}")]
	Network { message: String },
	#[error("Credential rejected with status {status}.")]
	Auth { status: u16 },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Rejected by the server: {message}")]
	Validation { message: String },
	#[error("Server error {status}: {message}")]
	Server { status: u16, message: String },
	#[error("Unexpected response body: {message}")]
	Decode { message: String },
	#[error("{message}")]
	InvalidConfig { message: String },
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			Self::Decode { message: err.to_string() }
		} else {
			Self::Network { message: err.to_string() }
		}
	}
}
impl From<reqwest::header::InvalidHeaderValue> for Error {
	fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
		Self::InvalidConfig { message: format!("Bearer token is not a valid header value: {err}") }
	}
}
