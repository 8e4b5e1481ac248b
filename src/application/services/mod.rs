mod conversation_service;
mod knowledge_base_service;
mod session_store;

pub use conversation_service::{ConversationError, ConversationService};
pub use knowledge_base_service::{
    CLEARED_STATUS, CREATED_STATUS, KnowledgeBaseService, UPLOADED_STATUS,
};
pub use session_store::SessionStore;
