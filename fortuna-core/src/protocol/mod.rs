pub mod http;

// Re-export comodi
pub use http::{
    ParticipantsRequest, ParticipantsResponse, RunningStreamsResponse, StreamParticipants,
};
