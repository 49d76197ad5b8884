use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = notehub::Args::parse();

	notehub::run(args).await
}
