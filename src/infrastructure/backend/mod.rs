mod http_knowledge_base_client;
mod wire;

pub use http_knowledge_base_client::{HttpKnowledgeBaseClient, error_from_body};
