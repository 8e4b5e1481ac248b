mod session;
mod session_id;
mod transcript;
mod turn;
mod turn_index;
mod uploaded_file;

pub use session::Session;
pub use session_id::SessionId;
pub use transcript::{Transcript, TranscriptError};
pub use turn::{Exchange, Turn, TurnStatus};
pub use turn_index::TurnIndex;
pub use uploaded_file::UploadedFile;
