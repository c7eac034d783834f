use std::sync::Arc;

use kiosk_engine::RecommendEngine;

#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<RecommendEngine>,
}
impl AppState {
	pub fn new(config: kiosk_config::Config) -> Self {
		Self { engine: Arc::new(RecommendEngine::new(config)) }
	}

	pub fn with_engine(engine: RecommendEngine) -> Self {
		Self { engine: Arc::new(engine) }
	}
}
