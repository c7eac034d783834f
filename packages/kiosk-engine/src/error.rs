pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Unknown article: {id}")]
	UnknownArticle { id: String },
	#[error("Invalid article: {message}")]
	InvalidArticle { message: String },
	#[error("Embedding unavailable: {message}")]
	EmbeddingUnavailable { message: String },
	#[error(transparent)]
	Store(#[from] kiosk_store::Error),
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::EmbeddingUnavailable { message: err.to_string() }
	}
}
