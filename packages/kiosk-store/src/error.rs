pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Embedding for {id} has {actual} dimensions, store expects {expected}.")]
	DimensionMismatch { id: String, expected: usize, actual: usize },
}
