mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Api, Config, DEFAULT_BASE_URL, DEFAULT_PER_PAGE, DEFAULT_TOKEN_ENV, Query, Service};

use std::{env, fs, path::Path};

/// Loads the config file at `path`, or the defaults when `path` is `None`, and resolves the
/// bearer token from the process environment.
pub fn load(path: Option<&Path>) -> Result<Config> {
	let cfg = match path {
		Some(path) => parse_file(path)?,
		None => Config::default(),
	};

	finish(cfg, |var| env::var(var).ok())
}

/// Same as [`load`] without the file, with an injectable environment lookup.
pub fn finish<F>(mut cfg: Config, lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	normalize(&mut cfg);

	validate(&cfg)?;

	cfg.api.token = resolve_token(&cfg.api.token_env, lookup)?;

	Ok(cfg)
}

pub fn parse_str(raw: &str) -> std::result::Result<Config, toml::de::Error> {
	toml::from_str(raw)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let base_url = cfg.api.base_url.trim();

	if base_url.is_empty() {
		return Err(Error::Validation { message: "api.base_url must be non-empty.".to_string() });
	}
	if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
		return Err(Error::Validation {
			message: "api.base_url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.api.per_page == 0 {
		return Err(Error::Validation {
			message: "api.per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.api.per_page > 100 {
		return Err(Error::Validation { message: "api.per_page must be 100 or less.".to_string() });
	}
	if cfg.api.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "api.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.api.token_env.trim().is_empty() {
		return Err(Error::Validation { message: "api.token_env must be non-empty.".to_string() });
	}
	if cfg.query.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "query.debounce_ms must be greater than zero.".to_string(),
		});
	}

	if let Some(stale_after_ms) = cfg.query.stale_after_ms
		&& stale_after_ms == 0
	{
		return Err(Error::Validation {
			message: "query.stale_after_ms must be greater than zero when set.".to_string(),
		});
	}

	Ok(())
}

fn parse_file(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse_str(&raw).map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })
}

fn resolve_token<F>(var: &str, lookup: F) -> Result<String>
where
	F: Fn(&str) -> Option<String>,
{
	match lookup(var) {
		Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
		_ => Err(Error::MissingToken { var: var.to_string() }),
	}
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.api.base_url.trim().trim_end_matches('/').to_string();

	cfg.api.base_url = trimmed;
	cfg.api.token_env = cfg.api.token_env.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
