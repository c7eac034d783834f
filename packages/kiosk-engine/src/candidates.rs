use std::{cmp::Ordering, sync::Arc};

use time::OffsetDateTime;

use kiosk_domain::Topic;
use kiosk_store::{EmbeddingStore, VectorEntry};

use crate::error::{Error, Result};

/// One entry of the request-scoped candidate pool; discarded with the
/// request.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
	pub id: String,
	pub vector: Arc<Vec<f32>>,
	pub topic: Topic,
	pub published_at: OffsetDateTime,
}

/// Assembles the pool to score. The output is always recency-sorted
/// (published descending, id ascending) before the cap, so pool contents
/// and order are deterministic for a given store state.
pub(crate) fn select_candidates(
	store: &EmbeddingStore,
	anchor_id: Option<&str>,
	interests: &[String],
	pool_cap: usize,
	min_topic_matches: usize,
) -> Result<Vec<Candidate>> {
	if let Some(anchor_id) = anchor_id {
		if store.get(anchor_id).is_none() {
			return Err(Error::UnknownArticle { id: anchor_id.to_string() });
		}

		return Ok(cap_by_recency(collect(store, Some(anchor_id)), pool_cap));
	}

	if !interests.is_empty() {
		let pool = collect(store, None);
		let matching: Vec<Candidate> =
			pool.iter().filter(|candidate| candidate.topic.matches_any(interests)).cloned().collect();
		// Too few topical matches would starve the result; widen to the
		// full corpus instead of returning a near-empty pool.
		let pool = if matching.len() >= min_topic_matches { matching } else { pool };

		return Ok(cap_by_recency(pool, pool_cap));
	}

	Ok(trending_pool(store, pool_cap, None))
}

/// The degenerate "no signal" pool: most recently published entries.
pub(crate) fn trending_pool(
	store: &EmbeddingStore,
	pool_cap: usize,
	exclude: Option<&str>,
) -> Vec<Candidate> {
	cap_by_recency(collect(store, exclude), pool_cap)
}

fn collect(store: &EmbeddingStore, exclude: Option<&str>) -> Vec<Candidate> {
	store
		.all()
		.into_iter()
		.filter(|entry| exclude.map(|id| entry.id != id).unwrap_or(true))
		.map(|VectorEntry { id, vector, metadata }| Candidate {
			id,
			vector,
			topic: metadata.topic,
			published_at: metadata.published_at,
		})
		.collect()
}

fn cap_by_recency(mut pool: Vec<Candidate>, pool_cap: usize) -> Vec<Candidate> {
	pool.sort_by(|a, b| match b.published_at.cmp(&a.published_at) {
		Ordering::Equal => a.id.cmp(&b.id),
		ord => ord,
	});
	pool.truncate(pool_cap);

	pool
}
