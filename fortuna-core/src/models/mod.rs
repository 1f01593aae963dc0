pub mod stream;
pub mod stream_user;

// Re-export per comodità
pub use stream::{RunningStream, Stream, StreamStatus};
pub use stream_user::StreamUser;
