use time::macros::datetime;

use kiosk_domain::{NormalizeError, RawArticle, Topic, article};

fn raw() -> RawArticle {
	RawArticle {
		id: Some("a1".to_string()),
		title: Some("Quantum chips hit a milestone".to_string()),
		url: Some("https://example.com/quantum".to_string()),
		source: Some("Example Wire".to_string()),
		published_at: Some("2026-03-01T09:30:00Z".to_string()),
		summary: Some("A short rundown.".to_string()),
		content: None,
		topic: Some("technology".to_string()),
		image_url: None,
	}
}

#[test]
fn normalizes_a_complete_record() {
	let now = datetime!(2026-03-02 00:00:00 UTC);
	let article = article::normalize(&raw(), now).expect("normalize failed");

	assert_eq!(article.id, "a1");
	assert_eq!(article.topic, Topic::Technology);
	assert_eq!(article.published_at, datetime!(2026-03-01 09:30:00 UTC));
	assert_eq!(article.read_time, "1 min read");
}

#[test]
fn missing_id_is_fatal_for_the_record() {
	let now = datetime!(2026-03-02 00:00:00 UTC);
	let mut record = raw();

	record.id = None;
	assert_eq!(article::normalize(&record, now), Err(NormalizeError::MissingId));

	record.id = Some("   ".to_string());
	assert_eq!(article::normalize(&record, now), Err(NormalizeError::MissingId));
}

#[test]
fn missing_title_is_fatal_for_the_record() {
	let now = datetime!(2026-03-02 00:00:00 UTC);
	let mut record = raw();

	record.title = Some(String::new());

	assert_eq!(article::normalize(&record, now), Err(NormalizeError::MissingTitle));
}

#[test]
fn defaults_cover_sparse_records() {
	let now = datetime!(2026-03-02 00:00:00 UTC);
	let record = RawArticle {
		id: Some("a2".to_string()),
		title: Some("Untagged piece".to_string()),
		..RawArticle::default()
	};
	let article = article::normalize(&record, now).expect("normalize failed");

	assert_eq!(article.summary, "");
	assert_eq!(article.source, "unknown");
	assert_eq!(article.topic, Topic::Uncategorized);
	assert_eq!(article.published_at, now);
	assert_eq!(article.image_url, None);
}

#[test]
fn unparseable_timestamps_fall_back_to_now() {
	let now = datetime!(2026-03-02 00:00:00 UTC);
	let mut record = raw();

	record.published_at = Some("yesterday-ish".to_string());

	let article = article::normalize(&record, now).expect("normalize failed");

	assert_eq!(article.published_at, now);
}

#[test]
fn articles_round_trip_through_json() {
	let now = datetime!(2026-03-02 00:00:00 UTC);
	let article = article::normalize(&raw(), now).expect("normalize failed");
	let encoded = serde_json::to_string(&article).expect("encode failed");

	assert!(encoded.contains("\"published_at\":\"2026-03-01T09:30:00Z\""));

	let decoded: kiosk_domain::Article = serde_json::from_str(&encoded).expect("decode failed");

	assert_eq!(decoded, article);
}
