use std::sync::Arc;

use axum::{
	body::Body,
	http::{Request, StatusCode, header},
};
use tower::util::ServiceExt;

use kiosk_api::{routes, state::AppState};
use kiosk_engine::{Providers, RecommendEngine};
use kiosk_testkit::{EchoSummarizer, FixedEmbedding, raw_article, test_config};

fn test_state() -> (AppState, Arc<FixedEmbedding>) {
	let embedding = Arc::new(FixedEmbedding::new());
	let engine = RecommendEngine::with_providers(
		test_config(2),
		Providers::new(embedding.clone(), Arc::new(EchoSummarizer)),
	);

	(AppState::with_engine(engine), embedding)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read body.");

	serde_json::from_slice(&bytes).expect("Body is not JSON.")
}

#[tokio::test]
async fn health_responds_ok() {
	let (state, _) = test_state();
	let app = routes::router(state);
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ingest_then_recommend_round_trips() {
	let (state, embedding) = test_state();

	embedding.insert("Alpha chips", vec![1.0, 0.0]);
	embedding.insert("Beta boards", vec![0.9, 0.1]);
	embedding.insert("Cup final", vec![0.0, 1.0]);

	let app = routes::router(state);
	let articles: Vec<kiosk_domain::RawArticle> = vec![
		raw_article("a", "Alpha chips", "technology", "2026-03-03T09:00:00Z"),
		raw_article("b", "Beta boards", "technology", "2026-03-02T09:00:00Z"),
		raw_article("c", "Cup final", "sports", "2026-03-01T09:00:00Z"),
	];
	let ingest_body = serde_json::json!({ "articles": articles });
	let response = app
		.clone()
		.oneshot(json_request("POST", "/v1/ingest", ingest_body))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let report = json_body(response).await;

	assert_eq!(report["ingested"].as_array().expect("ingested missing").len(), 3);
	assert_eq!(report["skipped"].as_array().expect("skipped missing").len(), 0);

	let recommend_body = serde_json::json!({ "anchor_id": "a", "max_results": 2 });
	let response = app
		.oneshot(json_request("POST", "/v1/recommend", recommend_body))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;
	let ids: Vec<&str> = body["items"]
		.as_array()
		.expect("items missing")
		.iter()
		.map(|item| item["id"].as_str().expect("id missing"))
		.collect();

	assert_eq!(ids, vec!["b", "c"]);
}

#[tokio::test]
async fn ingest_reports_invalid_records_without_failing() {
	let (state, _) = test_state();
	let app = routes::router(state);
	let ingest_body = serde_json::json!({
		"articles": [
			{ "title": "No id here" }
		]
	});
	let response = app
		.oneshot(json_request("POST", "/v1/ingest", ingest_body))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let report = json_body(response).await;

	assert_eq!(report["skipped"][0]["reason"], "invalid_article");
}

#[tokio::test]
async fn unknown_article_lookup_is_a_404() {
	let (state, _) = test_state();
	let app = routes::router(state);
	let response = app
		.oneshot(Request::builder().uri("/v1/articles/ghost").body(Body::empty()).unwrap())
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let body = json_body(response).await;

	assert_eq!(body["error_code"], "unknown_article");
}

#[tokio::test]
async fn article_listing_is_recency_ordered_and_capped() {
	let (state, _) = test_state();
	let app = routes::router(state);
	let ingest_body = serde_json::json!({
		"articles": [
			raw_article("old", "Old piece", "general", "2026-01-01T09:00:00Z"),
			raw_article("new", "New piece", "general", "2026-03-01T09:00:00Z"),
		]
	});

	app.clone()
		.oneshot(json_request("POST", "/v1/ingest", ingest_body))
		.await
		.expect("Request failed.");

	let response = app
		.oneshot(Request::builder().uri("/v1/articles?limit=1").body(Body::empty()).unwrap())
		.await
		.expect("Request failed.");
	let body = json_body(response).await;
	let articles = body.as_array().expect("body is not an array");

	assert_eq!(articles.len(), 1);
	assert_eq!(articles[0]["id"], "new");
}
