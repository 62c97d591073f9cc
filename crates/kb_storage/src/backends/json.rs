use async_trait::async_trait;
use kb_core::{Article, KnowledgeBaseStorage, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Knowledge base kept as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KnowledgeBaseStorage for JsonFileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Article>> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let articles: Vec<Article> = serde_json::from_str(&data)?;
        debug!("Loaded {} articles from {}", articles.len(), self.path.display());
        Ok(articles)
    }

    async fn save(&self, articles: &[Article]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_string_pretty(articles)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}
