use serde::{Deserialize, Serialize};

/// Partecipante di uno stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamUser {
    pub id: String,
    pub name: String,
    /// Handle di pagamento/identità (UPI).
    pub upi: String,
    pub joined_at: String, // RFC3339 UTC
}
