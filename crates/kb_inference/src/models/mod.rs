use std::sync::Arc;
use kb_core::{CompletionModel, Error, Result};
use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Builds a completion model from its CLI name (`openai` or `dummy`).
pub fn create_model(kind: &str, config: Config) -> Result<Arc<dyn CompletionModel>> {
    match kind.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model: {} (available: openai, dummy)",
            other
        ))),
    }
}
