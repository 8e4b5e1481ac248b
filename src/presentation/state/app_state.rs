use std::sync::Arc;

use crate::application::ports::KnowledgeBaseClient;
use crate::application::services::{ConversationService, KnowledgeBaseService, SessionStore};
use crate::presentation::config::SessionSettings;

pub struct AppState<C>
where
    C: KnowledgeBaseClient,
{
    pub conversation_service: Arc<ConversationService<C>>,
    pub knowledge_base_service: Arc<KnowledgeBaseService<C>>,
}

impl<C> AppState<C>
where
    C: KnowledgeBaseClient,
{
    /// Wires both services around one shared backend client.
    pub fn new(client: Arc<C>, session: &SessionSettings) -> Self {
        let sessions = Arc::new(SessionStore::new(session.idle_ttl()));

        Self {
            conversation_service: Arc::new(ConversationService::new(
                Arc::clone(&client),
                sessions,
            )),
            knowledge_base_service: Arc::new(KnowledgeBaseService::new(client)),
        }
    }
}

impl<C> Clone for AppState<C>
where
    C: KnowledgeBaseClient,
{
    fn clone(&self) -> Self {
        Self {
            conversation_service: Arc::clone(&self.conversation_service),
            knowledge_base_service: Arc::clone(&self.knowledge_base_service),
        }
    }
}
