use std::path::Path;
use std::sync::Arc;
use kb_core::{Error, KnowledgeBaseStorage, Result};

pub mod backends;

pub use backends::*;

pub const DEFAULT_KB_PATH: &str = "articles.json";

/// Builds a storage backend from its CLI name.
pub fn create_storage(kind: &str, path: Option<&Path>) -> Result<Arc<dyn KnowledgeBaseStorage>> {
    match kind {
        "json" | "file" => {
            let path = path.unwrap_or_else(|| Path::new(DEFAULT_KB_PATH));
            Ok(Arc::new(JsonFileStorage::new(path)))
        }
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        other => Err(Error::Config(format!(
            "Unknown storage backend: {} (expected json or memory)",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}
