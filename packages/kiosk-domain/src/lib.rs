pub mod article;
pub mod read_time;
pub mod time_serde;
pub mod topic;

pub use article::{Article, NormalizeError, RawArticle};
pub use topic::Topic;
