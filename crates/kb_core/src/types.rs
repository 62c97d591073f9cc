use serde::{Deserialize, Serialize};

/// A help-centre article as stored in the knowledge base.
///
/// Field order matches the on-disk layout (`link` first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub link: String,
    pub title: String,
}

impl Article {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
        }
    }

    /// An entry the classifier may point at: both fields non-empty.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.link.is_empty()
    }
}

/// Renders the knowledge base as a 1-based numbered list of titles.
pub fn numbered_titles(articles: &[Article]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}", i + 1, a.title))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_titles() {
        let articles = vec![
            Article::new("How to reset your password", "https://help.example.com/a/1"),
            Article::new("What is Reveel?", "https://help.example.com/a/2"),
        ];
        assert_eq!(
            numbered_titles(&articles),
            "1. How to reset your password\n2. What is Reveel?"
        );
        assert_eq!(numbered_titles(&[]), "");
    }

    #[test]
    fn test_serialized_field_order() {
        let article = Article::new("Title", "https://help.example.com/a/1");
        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(json, r#"{"link":"https://help.example.com/a/1","title":"Title"}"#);
    }

    #[test]
    fn test_is_complete() {
        assert!(Article::new("Title", "https://x").is_complete());
        assert!(Article::new("  ", "https://x").is_complete());
        assert!(!Article::new("", "https://x").is_complete());
        assert!(!Article::new("Title", "").is_complete());
    }
}
