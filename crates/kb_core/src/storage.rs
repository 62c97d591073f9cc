use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait KnowledgeBaseStorage: Send + Sync {
    /// Human readable location, used in log lines
    fn location(&self) -> String;

    /// Load every article in stored order
    async fn load(&self) -> Result<Vec<Article>>;

    /// Replace the stored knowledge base with `articles`
    async fn save(&self, articles: &[Article]) -> Result<()>;
}
