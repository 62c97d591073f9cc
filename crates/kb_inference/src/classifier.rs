use std::sync::Arc;
use kb_core::{Article, CompletionModel, CompletionRequest, Result};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use crate::prompts::{self, NOT_A_QUESTION_REPLY, NOT_FOUND_REPLY, SYSTEM_PROMPT};
use crate::question::{is_numeric, is_question};

/// What the model said about a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 1-based article number as replied; not yet checked against the list
    ArticleNumber(i64),
    NotFound,
    NotAQuestion,
    Malformed(String),
}

/// What the endpoint answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    NumericOnly,
    NotAQuestion,
    EmptyKnowledgeBase,
    NotFound,
    Match(Article),
}

impl Answer {
    pub const NUMERIC_ONLY: &'static str = "i cannot answer that";
    pub const EMPTY_KNOWLEDGE_BASE: &'static str = "Knowledge base is empty.";
    pub const MATCH_PREFIX: &'static str = "Here is a blog matching your question: ";

    /// JSON body sent to the widget: a bare string, or `{"error": ...}` for a miss.
    pub fn to_json(&self) -> Value {
        match self {
            Answer::NumericOnly => json!(Self::NUMERIC_ONLY),
            Answer::NotAQuestion => json!(NOT_A_QUESTION_REPLY),
            Answer::EmptyKnowledgeBase => json!(Self::EMPTY_KNOWLEDGE_BASE),
            Answer::NotFound => json!({ "error": NOT_FOUND_REPLY }),
            Answer::Match(article) => json!(format!("{}{}", Self::MATCH_PREFIX, article.link)),
        }
    }
}

/// Reads a number the way JavaScript's `parseInt` does: optional sign, then
/// leading digits; anything after them is ignored.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Parses the model's single-line reply.
pub fn parse_reply(reply: &str) -> Verdict {
    let reply = reply.trim();
    if reply == NOT_FOUND_REPLY {
        return Verdict::NotFound;
    }
    if reply == NOT_A_QUESTION_REPLY {
        return Verdict::NotAQuestion;
    }
    match leading_integer(reply) {
        Some(n) => Verdict::ArticleNumber(n),
        None => Verdict::Malformed(reply.to_string()),
    }
}

/// Turns a verdict into an answer against the list it was made for.
pub fn resolve(verdict: Verdict, articles: &[Article]) -> Answer {
    match verdict {
        Verdict::NotAQuestion => Answer::NotAQuestion,
        Verdict::NotFound => Answer::NotFound,
        Verdict::Malformed(reply) => {
            warn!("Unexpected classifier reply: {:?}", reply);
            Answer::NotFound
        }
        Verdict::ArticleNumber(n) => usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| articles.get(i))
            .filter(|a| a.is_complete())
            .map(|a| Answer::Match(a.clone()))
            .unwrap_or_else(|| {
                debug!("Article number {} does not point at a usable article", n);
                Answer::NotFound
            }),
    }
}

/// Matches free-text questions against the knowledge base through a
/// completion model.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: Arc<dyn CompletionModel>,
}

impl Classifier {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<dyn CompletionModel> {
        &self.model
    }

    /// Asks the model which article (if any) answers `query`.
    pub async fn classify(&self, query: &str, articles: &[Article]) -> Result<Verdict> {
        let prompt = prompts::classification_prompt(articles, query);
        let request = CompletionRequest::new(SYSTEM_PROMPT, prompt);
        let reply = self.model.complete(&request).await?;
        Ok(parse_reply(&reply))
    }

    /// Local gates that answer without the knowledge base or the model.
    pub fn screen(query: &str) -> Option<Answer> {
        if is_numeric(query) {
            Some(Answer::NumericOnly)
        } else if !is_question(query) {
            Some(Answer::NotAQuestion)
        } else {
            None
        }
    }

    /// Full pipeline: local gates first, then the model.
    pub async fn answer(&self, query: &str, articles: &[Article]) -> Result<Answer> {
        if let Some(answer) = Self::screen(query) {
            return Ok(answer);
        }
        if articles.is_empty() {
            return Ok(Answer::EmptyKnowledgeBase);
        }

        let verdict = self.classify(query, articles).await?;
        info!("🧠 {} classified {:?} as {:?}", self.model.name(), query, verdict);
        Ok(resolve(verdict, articles))
    }
}
