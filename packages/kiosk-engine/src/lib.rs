pub mod ingest;
pub mod recommend;
pub mod similarity;

mod candidates;
mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use error::{Error, Result};
pub use ingest::{IngestReport, IngestRequest, IngestSkip, SkipReason};
pub use recommend::{RecommendItem, RecommendRequest, RecommendResponse};
pub use similarity::ScoredCandidate;

use kiosk_config::{Config, EmbeddingProviderConfig, SummarizerProviderConfig};
use kiosk_providers::{embedding, summarize};
use kiosk_store::{ArticleStore, EmbeddingStore};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait SummarizeProvider
where
	Self: Send + Sync,
{
	fn summarize<'a>(
		&'a self,
		cfg: &'a SummarizerProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub summarizer: Arc<dyn SummarizeProvider>,
}

/// Stateless orchestration over the two stores: every `recommend` call is
/// a pure function of the current store contents and the request.
pub struct RecommendEngine {
	pub cfg: Config,
	pub articles: ArticleStore,
	pub embeddings: EmbeddingStore,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl SummarizeProvider for DefaultProviders {
	fn summarize<'a>(
		&'a self,
		cfg: &'a SummarizerProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(summarize::summarize(cfg, text))
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		summarizer: Arc<dyn SummarizeProvider>,
	) -> Self {
		Self { embedding, summarizer }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), summarizer: provider }
	}
}

impl RecommendEngine {
	pub fn new(cfg: Config) -> Self {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		let embeddings = EmbeddingStore::with_dimensions(cfg.providers.embedding.dimensions as usize);

		Self { cfg, articles: ArticleStore::new(), embeddings, providers }
	}

	pub fn article(&self, id: &str) -> Result<kiosk_domain::Article> {
		self.articles.get(id).ok_or_else(|| Error::UnknownArticle { id: id.to_string() })
	}

	/// Most recently published records, capped by the recommendation pool
	/// cap.
	pub fn recent_articles(&self, limit: usize) -> Vec<kiosk_domain::Article> {
		self.articles.recent(limit.min(self.cfg.recommend.pool_cap as usize))
	}
}
