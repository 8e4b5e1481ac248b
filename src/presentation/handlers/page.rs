use axum::extract::State;
use axum::response::Html;

use crate::application::ports::KnowledgeBaseClient;
use crate::domain::SessionId;
use crate::presentation::state::AppState;

const PAGE_TEMPLATE: &str = include_str!("../assets/index.html");
const SESSION_PLACEHOLDER: &str = "{{SESSION_ID}}";

/// Serves the page; every load opens a fresh conversation session.
pub async fn page_handler<C>(State(state): State<AppState<C>>) -> Html<String>
where
    C: KnowledgeBaseClient + 'static,
{
    let session_id = state.conversation_service.start_session().await;
    Html(render_page(session_id))
}

pub fn render_page(session_id: SessionId) -> String {
    PAGE_TEMPLATE.replace(SESSION_PLACEHOLDER, &session_id.to_string())
}
