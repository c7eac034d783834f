use time::OffsetDateTime;
use tracing::warn;

use kiosk_domain::{Article, RawArticle, article};
use kiosk_store::VectorMetadata;

use crate::{
	RecommendEngine,
	error::{Error, Result},
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IngestRequest {
	pub articles: Vec<RawArticle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
	InvalidArticle,
	DimensionMismatch,
	EmbeddingUnavailable,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IngestSkip {
	pub index: usize,
	pub id: Option<String>,
	pub reason: SkipReason,
	pub detail: String,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct IngestReport {
	pub ingested: Vec<Article>,
	pub skipped: Vec<IngestSkip>,
}

impl RecommendEngine {
	/// Normalizes one raw record, backfills a missing summary when a
	/// summarizer is configured, embeds, and stores. The article record
	/// only becomes visible once its embedding landed, so the two stores
	/// never disagree about what is recommendable.
	pub async fn ingest(&self, raw: &RawArticle) -> Result<Article> {
		let now = OffsetDateTime::now_utc();
		let mut article = article::normalize(raw, now)
			.map_err(|err| Error::InvalidArticle { message: err.to_string() })?;

		if article.summary.is_empty()
			&& self.cfg.ingest.summarize_missing
			&& let Some(summarizer) = self.cfg.providers.summarizer.as_ref()
			&& let Some(content) =
				raw.content.as_deref().map(str::trim).filter(|content| !content.is_empty())
		{
			// Backfill is best-effort; an empty summary is still a valid
			// record.
			match self.providers.summarizer.summarize(summarizer, content).await {
				Ok(summary) => article.summary = summary,
				Err(err) => {
					warn!(error = %err, id = %article.id, "Summary backfill failed.");
				},
			}
		}

		let text = embedding_text(&article);
		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&text))
			.await
			.map_err(|err| Error::EmbeddingUnavailable { message: err.to_string() })?;
		let Some(vector) = vectors.into_iter().next() else {
			return Err(Error::EmbeddingUnavailable {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		self.embeddings.put(
			&article.id,
			vector,
			VectorMetadata { topic: article.topic, published_at: article.published_at },
		)?;
		self.articles.insert(article.clone());

		Ok(article)
	}

	/// Per-record failures are collected and logged; the batch never
	/// aborts.
	pub async fn ingest_batch(&self, raws: &[RawArticle]) -> IngestReport {
		let mut report = IngestReport::default();

		for (index, raw) in raws.iter().enumerate() {
			match self.ingest(raw).await {
				Ok(article) => report.ingested.push(article),
				Err(err) => {
					warn!(error = %err, index, "Skipping article during ingestion.");
					report.skipped.push(IngestSkip {
						index,
						id: raw.id.clone(),
						reason: skip_reason(&err),
						detail: err.to_string(),
					});
				},
			}
		}

		report
	}
}

pub(crate) fn embedding_text(article: &Article) -> String {
	format!("{} {}", article.title, article.summary).trim().to_string()
}

fn skip_reason(err: &Error) -> SkipReason {
	match err {
		Error::InvalidArticle { .. } => SkipReason::InvalidArticle,
		Error::Store(_) => SkipReason::DimensionMismatch,
		_ => SkipReason::EmbeddingUnavailable,
	}
}
