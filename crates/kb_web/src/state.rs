use std::sync::Arc;
use kb_core::KnowledgeBaseStorage;
use kb_inference::Classifier;

pub struct AppState {
    pub classifier: Classifier,
    pub storage: Arc<dyn KnowledgeBaseStorage>,
}
