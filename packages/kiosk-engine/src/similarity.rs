use std::{cmp::Ordering, sync::Arc};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub id: String,
	pub score: f32,
}

/// Cosine similarity in [-1, 1]. A zero-norm side (or a length mismatch)
/// scores 0 instead of erroring: the candidate stays eligible, ranked
/// below anything positively similar but never dropped.
pub fn cosine_similarity(lhs: &[f32], rhs: &[f32]) -> f32 {
	if lhs.is_empty() || lhs.len() != rhs.len() {
		return 0.0;
	}

	let mut dot = 0.0_f32;
	let mut lhs_norm = 0.0_f32;
	let mut rhs_norm = 0.0_f32;

	for (l, r) in lhs.iter().zip(rhs.iter()) {
		dot += l * r;
		lhs_norm += l * l;
		rhs_norm += r * r;
	}

	if lhs_norm <= f32::EPSILON || rhs_norm <= f32::EPSILON {
		return 0.0;
	}

	(dot / (lhs_norm.sqrt() * rhs_norm.sqrt())).clamp(-1.0, 1.0)
}

pub fn is_zero_norm(vector: &[f32]) -> bool {
	vector.iter().map(|value| value * value).sum::<f32>() <= f32::EPSILON
}

/// Linear scan over the candidates, descending by score with the id as
/// the tie breaker, so identical inputs always rank identically.
pub fn score(query: &[f32], candidates: &[(String, Arc<Vec<f32>>)]) -> Vec<ScoredCandidate> {
	let mut scored: Vec<ScoredCandidate> = candidates
		.iter()
		.map(|(id, vector)| ScoredCandidate {
			id: id.clone(),
			score: cosine_similarity(query, vector),
		})
		.collect();

	scored.sort_by(|a, b| match cmp_score_desc(a.score, b.score) {
		Ordering::Equal => a.id.cmp(&b.id),
		ord => ord,
	});

	scored
}

/// Descending comparison with NaN ordered last.
pub(crate) fn cmp_score_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
