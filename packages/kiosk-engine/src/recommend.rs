use std::sync::Arc;

use ahash::AHashSet;
use tracing::warn;

use kiosk_domain::Article;

use crate::{
	RecommendEngine,
	candidates::{self, Candidate},
	similarity::{self, ScoredCandidate},
};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RecommendRequest {
	pub anchor_id: Option<String>,
	pub interests: Option<Vec<String>>,
	pub max_results: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecommendItem {
	pub score: f32,
	#[serde(flatten)]
	pub article: Article,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RecommendResponse {
	pub items: Vec<RecommendItem>,
}

impl RecommendEngine {
	/// Best-effort ranking over the current store contents. Every failure
	/// inside degrades to the recency fallback instead of surfacing, so
	/// callers always get a bounded, well-formed (possibly empty) list.
	/// Stateless: two calls against an unchanged store return identical
	/// output.
	pub fn recommend(&self, req: RecommendRequest) -> RecommendResponse {
		let max_results = req
			.max_results
			.unwrap_or(self.cfg.recommend.default_results)
			.min(self.cfg.recommend.max_results) as usize;

		if max_results == 0 {
			return RecommendResponse::default();
		}

		let anchor_id = req.anchor_id.as_deref().map(str::trim).filter(|id| !id.is_empty());
		let interests = normalize_interests(req.interests.as_deref().unwrap_or(&[]));
		let pool_cap = self.cfg.recommend.pool_cap as usize;
		let pool = match candidates::select_candidates(
			&self.embeddings,
			anchor_id,
			&interests,
			pool_cap,
			self.cfg.recommend.min_topic_matches as usize,
		) {
			Ok(pool) => pool,
			Err(err) => {
				warn!(error = %err, "Candidate selection failed; falling back to recent articles.");

				candidates::trending_pool(&self.embeddings, pool_cap, anchor_id)
			},
		};

		if pool.is_empty() {
			return RecommendResponse::default();
		}

		let query = anchor_id
			.and_then(|id| self.embeddings.get(id).map(|vector| (*vector).clone()))
			.or_else(|| {
				if interests.is_empty() { None } else { interest_centroid(&pool, &interests) }
			});
		let ranked: Vec<ScoredCandidate> = match query {
			Some(query) if !similarity::is_zero_norm(&query) => {
				let pairs: Vec<(String, Arc<Vec<f32>>)> = pool
					.iter()
					.map(|candidate| (candidate.id.clone(), candidate.vector.clone()))
					.collect();

				similarity::score(&query, &pairs)
			},
			// No usable ranking signal: neutral scores over the pool's
			// recency order.
			_ => pool
				.iter()
				.map(|candidate| ScoredCandidate { id: candidate.id.clone(), score: 0.0 })
				.collect(),
		};

		// The selector already excludes the anchor and never duplicates
		// ids; re-checking here keeps recommend() safe against a
		// misbehaving selector.
		let mut seen = AHashSet::new();
		let mut picked = Vec::with_capacity(max_results);

		for candidate in ranked {
			if anchor_id.map(|anchor| anchor == candidate.id).unwrap_or(false) {
				continue;
			}
			if !seen.insert(candidate.id.clone()) {
				continue;
			}

			picked.push(candidate);

			if picked.len() == max_results {
				break;
			}
		}

		let ids: Vec<String> = picked.iter().map(|candidate| candidate.id.clone()).collect();
		let mut records = self.articles.batch_get(&ids);
		let mut items = Vec::with_capacity(picked.len());

		for candidate in picked {
			let Some(article) = records.remove(&candidate.id) else {
				warn!(id = %candidate.id, "Embedding present without an article record; skipping.");

				continue;
			};

			items.push(RecommendItem { score: candidate.score, article });
		}

		RecommendResponse { items }
	}
}

fn normalize_interests(interests: &[String]) -> Vec<String> {
	let mut out = Vec::new();

	for interest in interests {
		let trimmed = interest.trim();

		if trimmed.is_empty() {
			continue;
		}

		let lowered = trimmed.to_lowercase();

		if !out.contains(&lowered) {
			out.push(lowered);
		}
	}

	out
}

/// Element-wise mean of the pool embeddings whose topic matches the
/// requested interests. None when nothing matches; the caller then takes
/// the neutral-score path.
fn interest_centroid(pool: &[Candidate], interests: &[String]) -> Option<Vec<f32>> {
	let matching: Vec<&Candidate> =
		pool.iter().filter(|candidate| candidate.topic.matches_any(interests)).collect();
	let first = matching.first()?;
	let mut centroid = vec![0.0_f32; first.vector.len()];

	for candidate in &matching {
		for (slot, value) in centroid.iter_mut().zip(candidate.vector.iter()) {
			*slot += value;
		}
	}

	let count = matching.len() as f32;

	for slot in &mut centroid {
		*slot /= count;
	}

	Some(centroid)
}
