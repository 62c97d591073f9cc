pub mod classifier;
pub mod models;
pub mod prompts;
pub mod question;

pub use classifier::{parse_reply, Answer, Classifier, Verdict};
pub use models::create_model;
pub use question::{is_numeric, is_question};

pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    /// Root of an OpenAI-compatible API, without `/chat/completions`
    pub model_url: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::classifier::{Answer, Classifier, Verdict};
    pub use super::models::create_model;
    pub use super::Config;
    pub use kb_core::{Article, CompletionModel, Error, Result};
}
