pub mod app;
pub mod form;
pub mod pagination;
pub mod render;
pub mod session;
pub mod shell;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use notehub_client::HttpNotesApi;
use notehub_query::{NotesQuery, PageCache};

#[derive(Debug, Parser)]
#[command(
	version = notehub_cli::VERSION,
	rename_all = "kebab",
	styles = notehub_cli::styles(),
)]
pub struct Args {
	/// Optional TOML config; defaults apply when omitted.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = notehub_config::load(args.config.as_deref())?;

	init_tracing(&config);

	let api = HttpNotesApi::new(&config.api)?;
	let cache = PageCache::new(config.query.stale_after());
	let query = NotesQuery::new(Arc::new(api), Arc::new(cache), config.api.per_page);

	tracing::info!(base_url = %config.api.base_url, per_page = config.api.per_page, "Notes session starting.");

	let app = App::new(Arc::new(query), config.query.debounce());

	shell::run(app).await
}

fn init_tracing(config: &notehub_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
