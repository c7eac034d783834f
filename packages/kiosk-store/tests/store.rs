use time::macros::datetime;

use kiosk_domain::{Article, Topic};
use kiosk_store::{ArticleStore, EmbeddingStore, Error, VectorMetadata};

fn metadata(topic: Topic) -> VectorMetadata {
	VectorMetadata { topic, published_at: datetime!(2026-03-01 12:00:00 UTC) }
}

fn article(id: &str) -> Article {
	Article {
		id: id.to_string(),
		title: format!("Article {id}"),
		summary: String::new(),
		source: "wire".to_string(),
		published_at: datetime!(2026-03-01 12:00:00 UTC),
		topic: Topic::General,
		url: format!("https://example.com/{id}"),
		image_url: None,
		read_time: "1 min read".to_string(),
	}
}

#[test]
fn first_put_establishes_dimensionality() {
	let store = EmbeddingStore::new();

	assert_eq!(store.dimensions(), None);

	store.put("a", vec![1.0, 0.0], metadata(Topic::Technology)).expect("put failed");

	assert_eq!(store.dimensions(), Some(2));
}

#[test]
fn mismatched_put_is_rejected_and_store_unchanged() {
	let store = EmbeddingStore::with_dimensions(2);

	store.put("a", vec![1.0, 0.0], metadata(Topic::Technology)).expect("put failed");

	let err = store.put("b", vec![1.0, 0.0, 0.0], metadata(Topic::Sports)).unwrap_err();

	match err {
		Error::DimensionMismatch { id, expected, actual } => {
			assert_eq!(id, "b");
			assert_eq!(expected, 2);
			assert_eq!(actual, 3);
		},
	}
	assert_eq!(store.len(), 1);
	assert!(store.get("b").is_none());
}

#[test]
fn put_overwrites_existing_entries() {
	let store = EmbeddingStore::with_dimensions(2);

	store.put("a", vec![1.0, 0.0], metadata(Topic::Technology)).expect("put failed");
	store.put("a", vec![0.0, 1.0], metadata(Topic::Technology)).expect("put failed");

	assert_eq!(store.len(), 1);
	assert_eq!(store.get("a").expect("missing entry").as_slice(), &[0.0, 1.0]);
}

#[test]
fn batch_get_omits_unknown_ids() {
	let store = EmbeddingStore::with_dimensions(2);

	store.put("a", vec![1.0, 0.0], metadata(Topic::Technology)).expect("put failed");

	let found =
		store.batch_get(&["a".to_string(), "missing".to_string()]);

	assert_eq!(found.len(), 1);
	assert!(found.contains_key("a"));
}

#[test]
fn all_returns_a_fresh_snapshot() {
	let store = EmbeddingStore::with_dimensions(1);

	store.put("a", vec![1.0], metadata(Topic::Health)).expect("put failed");

	assert_eq!(store.all().len(), 1);

	store.put("b", vec![2.0], metadata(Topic::Health)).expect("put failed");

	assert_eq!(store.all().len(), 2);
}

#[test]
fn recent_orders_by_published_then_id() {
	let store = ArticleStore::new();
	let mut older = article("z-old");

	older.published_at = datetime!(2026-02-01 12:00:00 UTC);

	store.insert(article("b"));
	store.insert(article("a"));
	store.insert(older);

	let recent = store.recent(10);
	let ids: Vec<&str> = recent.iter().map(|article| article.id.as_str()).collect();

	assert_eq!(ids, vec!["a", "b", "z-old"]);

	let capped = store.recent(1);

	assert_eq!(capped.len(), 1);
	assert_eq!(capped[0].id, "a");
}
