use std::time::Duration;

use color_eyre::Result;
use tokio::time as tokio_time;

use kiosk_engine::RecommendEngine;
use kiosk_providers::newswire::{self, FetchQuery};

pub struct WorkerState {
	pub engine: RecommendEngine,
}

pub async fn run_worker(state: WorkerState) -> Result<()> {
	let poll_interval = Duration::from_millis(state.engine.cfg.ingest.poll_interval_ms);

	loop {
		let ingested = poll_once(&state).await;

		tracing::info!(ingested, "Ingestion pass complete.");
		tokio_time::sleep(poll_interval).await;
	}
}

/// One pass over the configured categories. Provider failures are already
/// absorbed by the fallback chain and per-record skips; a pass can only
/// ingest less, never abort.
async fn poll_once(state: &WorkerState) -> usize {
	let cfg = &state.engine.cfg;
	let mut ingested = 0;

	for category in &cfg.ingest.categories {
		let query = FetchQuery {
			category: Some(category.clone()),
			query: None,
			page: 1,
			page_size: cfg.ingest.page_size,
		};
		let raws = newswire::fetch_with_fallback(&cfg.providers.newswire, &query).await;

		if raws.is_empty() {
			tracing::warn!(%category, "No articles from any newswire tier.");

			continue;
		}

		let report = state.engine.ingest_batch(&raws).await;

		tracing::info!(
			%category,
			ingested = report.ingested.len(),
			skipped = report.skipped.len(),
			"Category pass complete."
		);

		ingested += report.ingested.len();
	}

	ingested
}
