use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use kiosk_domain::Article;
use kiosk_engine::{
	Error as EngineError, IngestReport, IngestRequest, RecommendRequest, RecommendResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/recommend", post(recommend))
		.route("/v1/ingest", post(ingest))
		.route("/v1/articles", get(list_articles))
		.route("/v1/articles/{id}", get(article))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Item order in the response is the ranking; clients must not re-sort.
async fn recommend(
	State(state): State<AppState>,
	Json(payload): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
	Json(state.engine.recommend(payload))
}

async fn ingest(
	State(state): State<AppState>,
	Json(payload): Json<IngestRequest>,
) -> Json<IngestReport> {
	Json(state.engine.ingest_batch(&payload.articles).await)
}

#[derive(Debug, Deserialize)]
struct ListParams {
	limit: Option<u32>,
}

async fn list_articles(
	State(state): State<AppState>,
	Query(params): Query<ListParams>,
) -> Json<Vec<Article>> {
	let limit = params.limit.unwrap_or(20) as usize;

	Json(state.engine.recent_articles(limit))
}

async fn article(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
	let article = state.engine.article(&id)?;

	Ok(Json(article))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<EngineError> for ApiError {
	fn from(err: EngineError) -> Self {
		let status = match &err {
			EngineError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			EngineError::UnknownArticle { .. } => StatusCode::NOT_FOUND,
			EngineError::InvalidArticle { .. } | EngineError::Store(_) =>
				StatusCode::UNPROCESSABLE_ENTITY,
			EngineError::EmbeddingUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
		};
		let error_code = match &err {
			EngineError::InvalidRequest { .. } => "invalid_request",
			EngineError::UnknownArticle { .. } => "unknown_article",
			EngineError::InvalidArticle { .. } => "invalid_article",
			EngineError::Store(_) => "dimension_mismatch",
			EngineError::EmbeddingUnavailable { .. } => "embedding_unavailable",
		};

		Self::new(status, error_code, err.to_string())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
