//! fortuna-core: tipi condivisi tra client e server (modelli, DTO HTTP, errori, stato del pannello partecipanti).
//! Niente I/O o dipendenze non compatibili con WASM.

pub mod error;
pub mod models;
pub mod panel;
pub mod protocol;
pub mod utils;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use error::ErrorBody;
pub use models::{RunningStream, Stream, StreamStatus, StreamUser};
pub use panel::{FetchOutcome, FetchTicket, PanelBody, PanelState, PanelView, ParticipantRow, POLL_INTERVAL};
pub use protocol::http::{
    ParticipantsRequest, ParticipantsResponse, RunningStreamsResponse, StreamParticipants,
    PARTICIPANTS_PATH, RUNNING_STREAMS_PATH, SESSION_COOKIE,
};
pub use utils::{canonical_id, contains_id, format_joined_at, new_id, now_timestamp};
