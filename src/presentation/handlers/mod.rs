mod conversation;
mod error;
mod extract;
mod health;
mod knowledge_base;
mod page;
mod transcript_view;

pub use conversation::{
    ResolveTurnResponse, SubmitTurnRequest, SubmitTurnResponse, resolve_turn_handler,
    submit_turn_handler, transcript_handler,
};
pub use error::{ApiError, ErrorMessage, ErrorResponse};
pub use extract::{ApiJson, ApiPath};
pub use health::health_handler;
pub use knowledge_base::{
    CreateDocumentRequest, StatusResponse, clear_handler, create_document_handler,
    upload_document_handler,
};
pub use page::{page_handler, render_page};
pub use transcript_view::{TranscriptResponse, TurnView};
