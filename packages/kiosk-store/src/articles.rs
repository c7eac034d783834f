use std::{cmp::Ordering, sync::RwLock};

use ahash::AHashMap;

use kiosk_domain::Article;

/// Hydration store for normalized article records. Written only by the
/// ingestion adapter; the orchestrator reads ids back into full records.
#[derive(Debug, Default)]
pub struct ArticleStore {
	inner: RwLock<AHashMap<String, Article>>,
}

impl ArticleStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, article: Article) {
		let mut inner = self.inner.write().unwrap_or_else(|err| err.into_inner());

		inner.insert(article.id.clone(), article);
	}

	pub fn get(&self, id: &str) -> Option<Article> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());

		inner.get(id).cloned()
	}

	/// Ids without a record are omitted from the result.
	pub fn batch_get(&self, ids: &[String]) -> AHashMap<String, Article> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());
		let mut out = AHashMap::with_capacity(ids.len());

		for id in ids {
			if let Some(article) = inner.get(id) {
				out.insert(id.clone(), article.clone());
			}
		}

		out
	}

	/// Most recently published first, id ascending on equal timestamps.
	pub fn recent(&self, limit: usize) -> Vec<Article> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());
		let mut articles: Vec<Article> = inner.values().cloned().collect();

		articles.sort_by(|a, b| match b.published_at.cmp(&a.published_at) {
			Ordering::Equal => a.id.cmp(&b.id),
			ord => ord,
		});
		articles.truncate(limit);

		articles
	}

	pub fn len(&self) -> usize {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
