pub mod worker;

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
	version = kiosk_cli::VERSION,
	rename_all = "kebab",
	styles = kiosk_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = kiosk_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	if config.providers.newswire.is_empty() {
		return Err(eyre::eyre!(
			"At least one providers.newswire tier is required to run the worker."
		));
	}
	for category in &config.ingest.categories {
		if kiosk_domain::Topic::from_label(category).is_none() {
			return Err(eyre::eyre!("Unknown ingest category: {category}."));
		}
	}

	let engine = kiosk_engine::RecommendEngine::new(config);

	worker::run_worker(worker::WorkerState { engine }).await
}
