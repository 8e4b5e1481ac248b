use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::KnowledgeBaseClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    clear_handler, create_document_handler, health_handler, page_handler, resolve_turn_handler,
    submit_turn_handler, transcript_handler, upload_document_handler,
};
use crate::presentation::state::AppState;

pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: KnowledgeBaseClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let chat = Router::new()
        .route(
            "/api/sessions/{session_id}/transcript",
            get(transcript_handler::<C>),
        )
        .route(
            "/api/sessions/{session_id}/turns",
            post(submit_turn_handler::<C>),
        )
        .route(
            "/api/sessions/{session_id}/turns/{index}/answer",
            post(resolve_turn_handler::<C>),
        );

    let knowledge_base = Router::new()
        .route(
            "/api/knowledge-base/documents",
            post(create_document_handler::<C>).layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES)),
        )
        .route(
            "/api/knowledge-base/upload",
            post(upload_document_handler::<C>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/knowledge-base/clear", post(clear_handler::<C>));

    Router::new()
        .route("/", get(page_handler::<C>))
        .route("/health", get(health_handler))
        .merge(chat)
        .merge(knowledge_base)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
