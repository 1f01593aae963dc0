use serde::{Deserialize, Serialize};

use crate::models::{RunningStream, StreamStatus, StreamUser};
/*
    dto per le richieste http
*/

/// Nome del cookie che trasporta il token di sessione.
pub const SESSION_COOKIE: &str = "user";

pub const RUNNING_STREAMS_PATH: &str = "/api/stream/fetch/running/stream";
pub const PARTICIPANTS_PATH: &str = "/api/admin/stream/participants";

// Running streams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningStreamsResponse {
    pub success: bool,
    pub streams: Vec<RunningStream>,
}

// Partecipanti (pannello admin)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsResponse {
    pub success: bool,
    pub stream: StreamParticipants,
}

/// Proiezione dello stream con i partecipanti completi al posto dei soli id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamParticipants {
    pub id: String,
    pub title: String,
    pub status: StreamStatus,
    #[serde(default)]
    pub participants: Vec<StreamUser>,
}
