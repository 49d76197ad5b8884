use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use notehub_config::{Config, DEFAULT_BASE_URL, DEFAULT_PER_PAGE, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn with_token(var: &str) -> Option<String> {
	(var == "NOTEHUB_TEST_TOKEN" || var == "NOTEHUB_TOKEN").then(|| "secret-token".to_string())
}

fn no_token(_: &str) -> Option<String> {
	None
}

fn sample_with(section: &str, key: &str, value: Value) -> Config {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the section.");

	table.insert(key.to_string(), value);

	let raw = toml::to_string(&root).expect("Failed to render sample config.");

	notehub_config::parse_str(&raw).expect("Failed to parse rendered config.")
}

fn validation_message(cfg: Config) -> String {
	match notehub_config::finish(cfg, with_token) {
		Err(Error::Validation { message }) => message,
		other => panic!("Expected validation error, got {other:?}."),
	}
}

fn temp_path(name: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock").as_nanos();
	let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

	env::temp_dir().join(format!("notehub-config-{name}-{nanos}-{seq}.toml"))
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = notehub_config::parse_str(SAMPLE_CONFIG_TOML).expect("parse");
	let cfg = notehub_config::finish(cfg, with_token).expect("finish");

	assert_eq!(cfg.api.base_url, "http://127.0.0.1:8080/api");
	assert_eq!(cfg.api.per_page, 12);
	assert_eq!(cfg.api.token, "secret-token");
	assert_eq!(cfg.query.debounce().as_millis(), 500);
	assert_eq!(cfg.query.stale_after().map(|d| d.as_millis()), Some(30_000));
}

#[test]
fn empty_file_falls_back_to_defaults() {
	let cfg = notehub_config::parse_str("").expect("parse");
	let cfg = notehub_config::finish(cfg, with_token).expect("finish");

	assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
	assert_eq!(cfg.api.per_page, DEFAULT_PER_PAGE);
	assert_eq!(cfg.api.token_env, "NOTEHUB_TOKEN");
	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.query.stale_after(), None);
}

#[test]
fn missing_token_is_fatal() {
	let err = notehub_config::finish(Config::default(), no_token).expect_err("expected error");

	assert!(matches!(&err, Error::MissingToken { var } if var == "NOTEHUB_TOKEN"));
}

#[test]
fn blank_token_is_treated_as_missing() {
	let err = notehub_config::finish(Config::default(), |_| Some("   ".to_string()))
		.expect_err("expected error");

	assert!(matches!(err, Error::MissingToken { .. }));
}

#[test]
fn per_page_must_be_positive() {
	let message = validation_message(sample_with("api", "per_page", Value::Integer(0)));

	assert!(message.contains("api.per_page"), "unexpected message: {message}");
}

#[test]
fn per_page_is_capped() {
	let message = validation_message(sample_with("api", "per_page", Value::Integer(500)));

	assert_eq!(message, "api.per_page must be 100 or less.");
}

#[test]
fn base_url_requires_http_scheme() {
	let message =
		validation_message(sample_with("api", "base_url", Value::String("ftp://x".to_string())));

	assert!(message.contains("http://"), "unexpected message: {message}");
}

#[test]
fn debounce_must_be_positive() {
	let message = validation_message(sample_with("query", "debounce_ms", Value::Integer(0)));

	assert!(message.contains("query.debounce_ms"), "unexpected message: {message}");
}

#[test]
fn stale_after_zero_is_rejected() {
	let message = validation_message(sample_with("query", "stale_after_ms", Value::Integer(0)));

	assert!(message.contains("query.stale_after_ms"), "unexpected message: {message}");
}

#[test]
fn unreadable_file_reports_path() {
	let path = temp_path("missing");
	let err = notehub_config::load(Some(&path)).expect_err("expected error");

	assert!(matches!(err, Error::ReadConfig { path: reported, .. } if reported == path));
}

#[test]
fn malformed_file_reports_parse_error() {
	let path = temp_path("malformed");

	fs::write(&path, "[api\nper_page = ").expect("write");

	let err = notehub_config::load(Some(&path)).expect_err("expected error");

	fs::remove_file(&path).ok();

	assert!(matches!(err, Error::ParseConfig { .. }));
}
