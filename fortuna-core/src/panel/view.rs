use crate::models::{StreamStatus, StreamUser};
use crate::utils::format_joined_at;

use super::PanelState;

/// Cosa disegnare. Caricamento, roster vuoto e griglia si escludono a vicenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Hidden,
    Open {
        title: String,
        participant_count: usize,
        show_lucky_draw: bool,
        body: PanelBody,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Loading,
    Empty,
    Roster(Vec<ParticipantRow>),
}

/// Riga della griglia partecipanti.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub id: String,
    pub avatar: String,
    pub name: String,
    pub upi: String,
    /// Timestamp RFC3339 così come arriva dal server.
    pub joined_at: String,
    /// `joined_at` in forma leggibile.
    pub joined: String,
}

impl ParticipantRow {
    pub fn from_user(user: &StreamUser) -> Self {
        Self {
            id: user.id.clone(),
            avatar: avatar_glyph(&user.name),
            name: user.name.clone(),
            upi: user.upi.clone(),
            joined_at: user.joined_at.clone(),
            joined: format_joined_at(&user.joined_at),
        }
    }
}

/// Iniziale del nome in maiuscolo; stringa vuota per un nome vuoto.
pub fn avatar_glyph(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

impl PanelView {
    pub(crate) fn of(state: &PanelState) -> Self {
        let Some(stream) = state.stream() else {
            return PanelView::Hidden;
        };
        let participants = state.participants();
        let body = if state.is_loading() {
            PanelBody::Loading
        } else if participants.is_empty() {
            PanelBody::Empty
        } else {
            PanelBody::Roster(participants.iter().map(ParticipantRow::from_user).collect())
        };
        PanelView::Open {
            title: stream.title.clone(),
            participant_count: participants.len(),
            show_lucky_draw: stream.status != StreamStatus::Running && !participants.is_empty(),
            body,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            PanelView::Open { title, .. } => Some(title),
            PanelView::Hidden => None,
        }
    }

    pub fn body(&self) -> Option<&PanelBody> {
        match self {
            PanelView::Open { body, .. } => Some(body),
            PanelView::Hidden => None,
        }
    }
}
