use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	pub recommend: Recommend,
	pub ingest: Ingest,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub summarizer: Option<SummarizerProviderConfig>,
	/// Ordered fallback tiers; the first tier that yields articles wins.
	#[serde(default)]
	pub newswire: Vec<NewswireProviderConfig>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizerProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	#[serde(default = "default_max_summary_chars")]
	pub max_summary_chars: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct NewswireProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Recommend {
	pub default_results: u32,
	pub max_results: u32,
	pub pool_cap: u32,
	pub min_topic_matches: u32,
}

#[derive(Debug, Deserialize)]
pub struct Ingest {
	pub poll_interval_ms: u64,
	pub page_size: u32,
	pub categories: Vec<String>,
	#[serde(default)]
	pub summarize_missing: bool,
}

fn default_max_summary_chars() -> u32 {
	480
}
