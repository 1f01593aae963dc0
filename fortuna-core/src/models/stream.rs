use serde::{Deserialize, Serialize};

/// Stato del ciclo di vita di uno stream. Sul wire è in minuscolo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Upcoming,
    Running,
    Ended,
}

impl StreamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamStatus::Upcoming => "upcoming",
            StreamStatus::Running => "running",
            StreamStatus::Ended => "ended",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "upcoming" => Some(StreamStatus::Upcoming),
            "running" => Some(StreamStatus::Running),
            "ended" => Some(StreamStatus::Ended),
            _ => None,
        }
    }
}

/// Stream (sessione di giveaway) esposto sul wire.
/// `participants` contiene gli id utente nell'ordine di ingresso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: String,
    pub title: String,
    pub status: StreamStatus,
    #[serde(default)]
    pub participants: Vec<String>,
    pub created_at: String, // RFC3339 UTC
}

/// Stream in corso arricchito con il flag `joined` calcolato per la richiesta corrente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningStream {
    #[serde(flatten)]
    pub stream: Stream,
    pub joined: bool,
}

impl RunningStream {
    /// Decora lo stream: `joined` è vero sse `user_id` compare tra i partecipanti,
    /// confrontando gli id in forma canonica.
    pub fn for_user(stream: Stream, user_id: &str) -> Self {
        let joined = crate::utils::ids::contains_id(&stream.participants, user_id);
        Self { stream, joined }
    }
}
