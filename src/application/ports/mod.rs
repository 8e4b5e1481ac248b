mod knowledge_base_client;

pub use knowledge_base_client::{BackendError, KnowledgeBaseClient};
