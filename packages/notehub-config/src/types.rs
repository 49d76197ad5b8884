use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://notehub-public.goit.study/api";
pub const DEFAULT_PER_PAGE: u32 = 12;
pub const DEFAULT_TOKEN_ENV: &str = "NOTEHUB_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub api: Api,
	pub query: Query,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Api {
	pub base_url: String,
	pub per_page: u32,
	pub timeout_ms: u64,
	/// Name of the environment variable holding the bearer token.
	pub token_env: String,
	/// Resolved from `token_env` at load time, never read from the file.
	#[serde(skip)]
	pub token: String,
}
impl Api {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}
impl Default for Api {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			per_page: DEFAULT_PER_PAGE,
			timeout_ms: 10_000,
			token_env: DEFAULT_TOKEN_ENV.to_string(),
			token: String::new(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Query {
	pub debounce_ms: u64,
	/// Optional. When absent, cached pages stay fresh until a mutation invalidates them.
	pub stale_after_ms: Option<u64>,
}
impl Query {
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	pub fn stale_after(&self) -> Option<Duration> {
		self.stale_after_ms.map(Duration::from_millis)
	}
}
impl Default for Query {
	fn default() -> Self {
		Self { debounce_ms: 500, stale_after_ms: None }
	}
}
