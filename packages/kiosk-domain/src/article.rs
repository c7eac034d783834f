use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{read_time, topic::Topic};

/// Normalized article record. Immutable once ingested; re-ingesting the
/// same id overwrites it wholesale (last writer wins), which is how
/// summary backfill lands.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Article {
	pub id: String,
	pub title: String,
	pub summary: String,
	pub source: String,
	#[serde(with = "crate::time_serde")]
	pub published_at: OffsetDateTime,
	pub topic: Topic,
	pub url: String,
	pub image_url: Option<String>,
	pub read_time: String,
}

/// Raw provider record before normalization. Everything is optional;
/// `normalize` decides what is fatal and what has a default.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawArticle {
	pub id: Option<String>,
	pub title: Option<String>,
	pub url: Option<String>,
	pub source: Option<String>,
	pub published_at: Option<String>,
	pub summary: Option<String>,
	pub content: Option<String>,
	pub topic: Option<String>,
	pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
	#[error("Raw article is missing an id.")]
	MissingId,
	#[error("Raw article is missing a title.")]
	MissingTitle,
}

pub fn normalize(raw: &RawArticle, now: OffsetDateTime) -> Result<Article, NormalizeError> {
	let id = non_empty(raw.id.as_deref()).ok_or(NormalizeError::MissingId)?;
	let title = non_empty(raw.title.as_deref()).ok_or(NormalizeError::MissingTitle)?;
	let summary = non_empty(raw.summary.as_deref()).unwrap_or_default();
	let source = non_empty(raw.source.as_deref()).unwrap_or_else(|| "unknown".to_string());
	let url = non_empty(raw.url.as_deref()).unwrap_or_default();
	let image_url = non_empty(raw.image_url.as_deref());
	let published_at = raw
		.published_at
		.as_deref()
		.and_then(|value| OffsetDateTime::parse(value.trim(), &Rfc3339).ok())
		.unwrap_or(now);
	let topic = raw.topic.as_deref().map(Topic::parse).unwrap_or(Topic::Uncategorized);
	let content_chars = raw.content.as_deref().map(|content| content.len()).unwrap_or(summary.len());

	Ok(Article {
		id,
		title,
		summary,
		source,
		published_at,
		topic,
		url,
		image_url,
		read_time: read_time::estimate_read_time(content_chars),
	})
}

fn non_empty(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}
