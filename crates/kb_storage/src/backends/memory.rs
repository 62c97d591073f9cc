use async_trait::async_trait;
use kb_core::{Article, KnowledgeBaseStorage, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: Arc::new(RwLock::new(articles)),
        }
    }
}

#[async_trait]
impl KnowledgeBaseStorage for MemoryStorage {
    fn location(&self) -> String {
        "memory://".to_string()
    }

    async fn load(&self) -> Result<Vec<Article>> {
        Ok(self.articles.read().await.clone())
    }

    async fn save(&self, articles: &[Article]) -> Result<()> {
        *self.articles.write().await = articles.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_empty());

        let articles = vec![Article::new("Test Article", "http://test.com")];
        storage.save(&articles).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), articles);

        storage.save(&[]).await.unwrap();
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::with_articles(vec![Article::new("A", "http://a")]);
        let other = storage.clone();
        other.save(&[Article::new("B", "http://b")]).await.unwrap();
        assert_eq!(storage.load().await.unwrap()[0].title, "B");
    }
}
