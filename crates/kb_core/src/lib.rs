pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::{CompletionModel, CompletionRequest};
pub use storage::KnowledgeBaseStorage;
pub use types::{numbered_titles, Article};

pub type Result<T> = std::result::Result<T, Error>;
