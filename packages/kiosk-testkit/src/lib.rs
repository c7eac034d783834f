use std::sync::{Arc, Mutex};

use ahash::AHashMap;
use color_eyre::eyre;
use serde_json::Map;

use kiosk_config::{
	Config, EmbeddingProviderConfig, Ingest, Providers as ProviderConfigs, Recommend, Service,
	SummarizerProviderConfig,
};
use kiosk_domain::RawArticle;
use kiosk_engine::{BoxFuture, EmbeddingProvider, Providers, SummarizeProvider};

/// Embedding stub with pre-registered text -> vector mappings. Texts
/// without a mapping embed to the zero vector, which exercises the
/// neutral-score paths.
#[derive(Default)]
pub struct FixedEmbedding {
	vectors: Mutex<AHashMap<String, Vec<f32>>>,
}

impl FixedEmbedding {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, text: impl Into<String>, vector: Vec<f32>) {
		let mut vectors = self.vectors.lock().unwrap_or_else(|err| err.into_inner());

		vectors.insert(text.into(), vector);
	}
}

impl EmbeddingProvider for FixedEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		let vectors = self.vectors.lock().unwrap_or_else(|err| err.into_inner());
		let out: Vec<Vec<f32>> = texts
			.iter()
			.map(|text| {
				vectors.get(text).cloned().unwrap_or_else(|| vec![0.0; cfg.dimensions as usize])
			})
			.collect();

		Box::pin(async move { Ok(out) })
	}
}

/// Embedding stub that always fails, standing in for a timed-out or
/// unreachable provider.
pub struct FailingEmbedding;

impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Err(eyre::eyre!("Embedding provider unavailable.")) })
	}
}

/// Summarizer stub that echoes the first sentence-ish slice of the input.
pub struct EchoSummarizer;

impl SummarizeProvider for EchoSummarizer {
	fn summarize<'a>(
		&'a self,
		cfg: &'a SummarizerProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		let summary: String = text.chars().take(cfg.max_summary_chars as usize).collect();

		Box::pin(async move { Ok(summary) })
	}
}

pub struct FailingSummarizer;

impl SummarizeProvider for FailingSummarizer {
	fn summarize<'a>(
		&'a self,
		_cfg: &'a SummarizerProviderConfig,
		_text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async move { Err(eyre::eyre!("Summarizer unavailable.")) })
	}
}

pub fn providers_with_embedding(embedding: Arc<dyn EmbeddingProvider>) -> Providers {
	Providers::new(embedding, Arc::new(EchoSummarizer))
}

pub fn test_config(dimensions: u32) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		providers: ProviderConfigs {
			embedding: test_embedding_provider(dimensions),
			summarizer: None,
			newswire: Vec::new(),
		},
		recommend: Recommend {
			default_results: 5,
			max_results: 50,
			pool_cap: 1_000,
			min_topic_matches: 3,
		},
		ingest: Ingest {
			poll_interval_ms: 300_000,
			page_size: 20,
			categories: vec!["technology".to_string()],
			summarize_missing: false,
		},
	}
}

pub fn test_config_with_summarizer(dimensions: u32) -> Config {
	let mut cfg = test_config(dimensions);

	cfg.providers.summarizer = Some(test_summarizer_provider());
	cfg.ingest.summarize_missing = true;

	cfg
}

pub fn test_embedding_provider(dimensions: u32) -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://localhost".to_string(),
		api_key: "key".to_string(),
		path: "/v1/embeddings".to_string(),
		model: "test-embed".to_string(),
		dimensions,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

pub fn test_summarizer_provider() -> SummarizerProviderConfig {
	SummarizerProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://localhost".to_string(),
		api_key: "key".to_string(),
		path: "/v1/chat/completions".to_string(),
		model: "test-llm".to_string(),
		temperature: 0.1,
		max_summary_chars: 64,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

pub fn raw_article(id: &str, title: &str, topic: &str, published_at: &str) -> RawArticle {
	RawArticle {
		id: Some(id.to_string()),
		title: Some(title.to_string()),
		url: Some(format!("https://example.com/{id}")),
		source: Some("Example Wire".to_string()),
		published_at: Some(published_at.to_string()),
		summary: None,
		content: None,
		topic: Some(topic.to_string()),
		image_url: None,
	}
}
