// std
use std::time::Duration;

// crates.io
use color_eyre::{Result, eyre};
use reqwest::{
	Client,
	header::{HeaderMap, HeaderName},
};
use serde_json::Value;
use tracing::warn;

use kiosk_config::NewswireProviderConfig;
use kiosk_domain::RawArticle;

#[derive(Debug, Clone, Default)]
pub struct FetchQuery {
	pub category: Option<String>,
	pub query: Option<String>,
	pub page: u32,
	pub page_size: u32,
}

/// Tries tiers in configured order. An error and an empty page are treated
/// the same way: move on to the next tier. All tiers dry means an empty
/// list, not an error.
pub async fn fetch_with_fallback(
	tiers: &[NewswireProviderConfig],
	query: &FetchQuery,
) -> Vec<RawArticle> {
	for tier in tiers {
		match fetch(tier, query).await {
			Ok(articles) if !articles.is_empty() => return articles,
			Ok(_) => {
				warn!(provider = %tier.provider_id, "Newswire tier returned no articles.");
			},
			Err(err) => {
				warn!(error = %err, provider = %tier.provider_id, "Newswire tier failed.");
			},
		}
	}

	Vec::new()
}

pub async fn fetch(cfg: &NewswireProviderConfig, query: &FetchQuery) -> Result<Vec<RawArticle>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut params: Vec<(&str, String)> = Vec::new();

	if let Some(category) = query.category.as_ref() {
		params.push(("category", category.clone()));
	}
	if let Some(q) = query.query.as_ref() {
		params.push(("q", q.clone()));
	}
	params.push(("page", query.page.max(1).to_string()));
	params.push(("max", query.page_size.to_string()));
	// Wire APIs in this family take the key as a query parameter.
	if !cfg.api_key.trim().is_empty() {
		params.push(("apikey", cfg.api_key.clone()));
	}

	let res = client
		.get(url)
		.headers(default_headers(&cfg.default_headers)?)
		.query(&params)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_newswire_response(&json, &cfg.provider_id, query.category.as_deref())
}

/// Stable article id derived from the canonical URL.
pub fn article_id(url: &str) -> String {
	blake3::hash(url.trim().as_bytes()).to_hex().as_str()[..16].to_string()
}

fn default_headers(default_headers: &serde_json::Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(eyre::eyre!("Default header values must be strings."));
		};
		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}
	Ok(headers)
}

fn parse_newswire_response(
	json: &Value,
	provider_id: &str,
	category: Option<&str>,
) -> Result<Vec<RawArticle>> {
	let items = json
		.get("articles")
		.or_else(|| json.get("results"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Newswire response is missing an articles array."))?;
	let mut out = Vec::with_capacity(items.len());

	for item in items {
		let Some(raw) = parse_article(item, provider_id, category) else {
			warn!(provider = provider_id, "Skipping newswire item without a url.");

			continue;
		};

		out.push(raw);
	}

	Ok(out)
}

fn parse_article(item: &Value, provider_id: &str, category: Option<&str>) -> Option<RawArticle> {
	let url = item.get("url").and_then(Value::as_str).map(str::trim).filter(|v| !v.is_empty())?;
	let source = item
		.get("source")
		.and_then(|source| {
			source.as_str().map(str::to_string).or_else(|| {
				source.get("name").and_then(Value::as_str).map(str::to_string)
			})
		})
		.unwrap_or_else(|| provider_id.to_string());
	let topic = string_field(item, &["topic", "category", "section"])
		.or_else(|| category.map(str::to_string));

	Some(RawArticle {
		id: Some(article_id(url)),
		title: string_field(item, &["title"]),
		url: Some(url.to_string()),
		source: Some(source),
		published_at: string_field(item, &["publishedAt", "published_date", "date"]),
		summary: string_field(item, &["description", "excerpt", "abstract"]),
		content: string_field(item, &["content"]),
		topic,
		image_url: string_field(item, &["image", "imageUrl", "urlToImage"]),
	})
}

fn string_field(item: &Value, keys: &[&str]) -> Option<String> {
	keys.iter()
		.find_map(|key| item.get(*key))
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(str::to_string)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_articles_keyed_payloads() {
		let json = serde_json::json!({
			"articles": [
				{
					"title": "Rates hold steady",
					"url": "https://example.com/rates",
					"source": { "name": "Example Biz" },
					"publishedAt": "2026-03-01T08:00:00Z",
					"description": "Central bank leaves rates unchanged.",
					"image": "https://example.com/rates.jpg"
				}
			]
		});
		let parsed = parse_newswire_response(&json, "gnews", Some("business"))
			.expect("parse failed");

		assert_eq!(parsed.len(), 1);
		assert_eq!(parsed[0].source.as_deref(), Some("Example Biz"));
		assert_eq!(parsed[0].topic.as_deref(), Some("business"));
		assert_eq!(parsed[0].id.as_deref(), Some(article_id("https://example.com/rates").as_str()));
	}

	#[test]
	fn parses_results_keyed_payloads_and_skips_urlless_items() {
		let json = serde_json::json!({
			"results": [
				{ "title": "No link here" },
				{
					"title": "Season opener",
					"url": "https://example.com/opener",
					"section": "sports",
					"abstract": "The season starts tonight."
				}
			]
		});
		let parsed = parse_newswire_response(&json, "nytimes", None).expect("parse failed");

		assert_eq!(parsed.len(), 1);
		assert_eq!(parsed[0].topic.as_deref(), Some("sports"));
		assert_eq!(parsed[0].summary.as_deref(), Some("The season starts tonight."));
	}

	#[test]
	fn missing_article_array_is_an_error() {
		let json = serde_json::json!({ "status": "ok" });

		assert!(parse_newswire_response(&json, "gnews", None).is_err());
	}

	#[test]
	fn article_ids_are_stable_for_a_url() {
		assert_eq!(article_id("https://example.com/a"), article_id(" https://example.com/a "));
		assert_ne!(article_id("https://example.com/a"), article_id("https://example.com/b"));
		assert_eq!(article_id("https://example.com/a").len(), 16);
	}
}
