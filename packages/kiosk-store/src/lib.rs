mod error;

pub mod articles;
pub mod embeddings;

pub use articles::ArticleStore;
pub use embeddings::{EmbeddingStore, VectorEntry, VectorMetadata};
pub use error::{Error, Result};
