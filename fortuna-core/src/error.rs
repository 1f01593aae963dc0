use serde::{Deserialize, Serialize};

/// Corpo di errore condiviso da tutte le risposte HTTP non riuscite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
