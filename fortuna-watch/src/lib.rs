//! fortuna-watch: client nativo del pannello partecipanti.
//! Stesso stato del client web (`fortuna_core::panel`), polling con tokio.

pub mod client;
pub mod poller;
pub mod render;

pub use client::{ApiClient, ClientError, ParticipantsSource};
pub use poller::PanelPoller;
pub use render::render_view;
