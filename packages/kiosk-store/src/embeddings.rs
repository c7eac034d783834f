use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use time::OffsetDateTime;

use kiosk_domain::Topic;

use crate::error::{Error, Result};

/// The slice of article metadata the candidate selector needs without a
/// round trip to the article store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorMetadata {
	pub topic: Topic,
	pub published_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct VectorEntry {
	pub id: String,
	pub vector: Arc<Vec<f32>>,
	pub metadata: VectorMetadata,
}

#[derive(Debug)]
struct Inner {
	dimensions: Option<usize>,
	entries: AHashMap<String, (Arc<Vec<f32>>, VectorMetadata)>,
}

/// Single-writer id -> embedding map. Readers run concurrently; `put`
/// takes the write lock, so two ingestions of the same id serialize and
/// the last writer wins. `all` re-enumerates current contents on every
/// call and promises no isolation against writes in between.
#[derive(Debug)]
pub struct EmbeddingStore {
	inner: RwLock<Inner>,
}

impl EmbeddingStore {
	/// A store whose dimensionality is established by the first `put`.
	pub fn new() -> Self {
		Self { inner: RwLock::new(Inner { dimensions: None, entries: AHashMap::new() }) }
	}

	/// A store with a fixed dimensionality; every `put` must match it.
	pub fn with_dimensions(dimensions: usize) -> Self {
		Self {
			inner: RwLock::new(Inner { dimensions: Some(dimensions), entries: AHashMap::new() }),
		}
	}

	pub fn put(&self, id: &str, vector: Vec<f32>, metadata: VectorMetadata) -> Result<()> {
		let mut inner = self.inner.write().unwrap_or_else(|err| err.into_inner());

		if let Some(expected) = inner.dimensions {
			if vector.len() != expected {
				return Err(Error::DimensionMismatch {
					id: id.to_string(),
					expected,
					actual: vector.len(),
				});
			}
		} else {
			inner.dimensions = Some(vector.len());
		}

		inner.entries.insert(id.to_string(), (Arc::new(vector), metadata));

		Ok(())
	}

	pub fn get(&self, id: &str) -> Option<Arc<Vec<f32>>> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());

		inner.entries.get(id).map(|(vector, _)| vector.clone())
	}

	/// Ids without an embedding are omitted from the result.
	pub fn batch_get(&self, ids: &[String]) -> AHashMap<String, Arc<Vec<f32>>> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());
		let mut out = AHashMap::with_capacity(ids.len());

		for id in ids {
			if let Some((vector, _)) = inner.entries.get(id) {
				out.insert(id.clone(), vector.clone());
			}
		}

		out
	}

	pub fn all(&self) -> Vec<VectorEntry> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());

		inner
			.entries
			.iter()
			.map(|(id, (vector, metadata))| VectorEntry {
				id: id.clone(),
				vector: vector.clone(),
				metadata: *metadata,
			})
			.collect()
	}

	pub fn dimensions(&self) -> Option<usize> {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).dimensions
	}

	pub fn len(&self) -> usize {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for EmbeddingStore {
	fn default() -> Self {
		Self::new()
	}
}
