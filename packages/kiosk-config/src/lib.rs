mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Ingest, NewswireProviderConfig, Providers, Recommend, Service,
	SummarizerProviderConfig,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if let Some(summarizer) = cfg.providers.summarizer.as_ref() {
		if summarizer.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.summarizer.api_key must be non-empty.".to_string(),
			});
		}
		if summarizer.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.summarizer.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if summarizer.max_summary_chars == 0 {
			return Err(Error::Validation {
				message: "providers.summarizer.max_summary_chars must be greater than zero."
					.to_string(),
			});
		}
	}
	for tier in &cfg.providers.newswire {
		if tier.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.newswire tier {} api_base must be non-empty.", tier.provider_id),
			});
		}
		if tier.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!(
					"providers.newswire tier {} timeout_ms must be greater than zero.",
					tier.provider_id
				),
			});
		}
	}
	if cfg.recommend.default_results == 0 {
		return Err(Error::Validation {
			message: "recommend.default_results must be greater than zero.".to_string(),
		});
	}
	if cfg.recommend.max_results == 0 {
		return Err(Error::Validation {
			message: "recommend.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.recommend.default_results > cfg.recommend.max_results {
		return Err(Error::Validation {
			message: "recommend.default_results must not exceed recommend.max_results.".to_string(),
		});
	}
	if cfg.recommend.pool_cap == 0 {
		return Err(Error::Validation {
			message: "recommend.pool_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.recommend.min_topic_matches == 0 {
		return Err(Error::Validation {
			message: "recommend.min_topic_matches must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.poll_interval_ms == 0 {
		return Err(Error::Validation {
			message: "ingest.poll_interval_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.page_size == 0 {
		return Err(Error::Validation {
			message: "ingest.page_size must be greater than zero.".to_string(),
		});
	}
	for category in &cfg.ingest.categories {
		if category.trim().is_empty() {
			return Err(Error::Validation {
				message: "ingest.categories entries must be non-empty.".to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for category in &mut cfg.ingest.categories {
		*category = category.trim().to_lowercase();
	}
	cfg.ingest.categories.retain(|category| !category.is_empty());

	if cfg
		.providers
		.summarizer
		.as_ref()
		.map(|summarizer| summarizer.api_base.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.summarizer = None;
	}
}
