/* Stato del pannello partecipanti, indipendente da UI e rete.
    Il client web (Yew) e il client da terminale usano la stessa macchina a stati:
    select -> cambia stream selezionato, svuota il roster e apre una nuova "generazione"
    ticket -> biglietto per un fetch (iniziale o periodico) dello stream corrente
    apply  -> applica l'esito di un fetch, scartandolo se appartiene a una generazione vecchia
    view   -> cosa va disegnato
*/
pub mod view;

use std::time::Duration;

use crate::models::{Stream, StreamUser};

pub use view::{PanelBody, PanelView, ParticipantRow};

/// Cadenza del polling dei partecipanti.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Identifica un fetch: lo stream richiesto e la generazione della selezione che lo ha emesso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub stream_id: String,
    pub generation: u64,
}

/// Esito di un fetch. L'errore è solo descrittivo: viene loggato, mai mostrato.
pub type FetchOutcome = Result<Vec<StreamUser>, String>;

#[derive(Debug, Clone, Default)]
pub struct PanelState {
    stream: Option<Stream>,
    participants: Vec<StreamUser>,
    /// Nessun fetch della selezione corrente è ancora terminato.
    first_load_pending: bool,
    generation: u64,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream(&self) -> Option<&Stream> {
        self.stream.as_ref()
    }

    pub fn participants(&self) -> &[StreamUser] {
        &self.participants
    }

    pub fn is_loading(&self) -> bool {
        self.stream.is_some() && self.first_load_pending
    }

    /// Cambia la selezione. Restituisce il ticket del fetch immediato quando parte un nuovo ciclo
    /// di polling, `None` se lo stream è lo stesso (si aggiornano solo i metadati) o se il pannello viene chiuso.
    pub fn select(&mut self, stream: Option<Stream>) -> Option<FetchTicket> {
        let same = match (&self.stream, &stream) {
            (Some(current), Some(next)) => current.id == next.id,
            _ => false,
        };
        if same {
            self.stream = stream;
            return None;
        }

        // nuova selezione (o chiusura): i ticket già emessi diventano obsoleti
        self.generation += 1;
        self.participants.clear();
        self.first_load_pending = stream.is_some();
        self.stream = stream;
        self.ticket()
    }

    /// Aggiorna titolo e stato dello stream selezionato senza toccare roster e polling.
    /// Non fa nulla se `stream` non è quello selezionato.
    pub fn refresh(&mut self, stream: &Stream) {
        if let Some(current) = self.stream.as_mut() {
            if current.id == stream.id {
                *current = stream.clone();
            }
        }
    }

    /// Ticket per la selezione corrente, usato ad ogni tick del timer.
    pub fn ticket(&self) -> Option<FetchTicket> {
        self.stream.as_ref().map(|s| FetchTicket {
            stream_id: s.id.clone(),
            generation: self.generation,
        })
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.stream.is_some() && ticket.generation == self.generation
    }

    /// Applica l'esito di un fetch. Gli esiti di generazioni precedenti vengono scartati.
    /// Un errore lascia il roster com'è; il primo esito della generazione chiude lo stato di caricamento.
    pub fn apply(&mut self, ticket: &FetchTicket, outcome: FetchOutcome) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if let Ok(participants) = outcome {
            self.participants = participants;
        }
        self.first_load_pending = false;
        true
    }

    pub fn view(&self) -> PanelView {
        PanelView::of(self)
    }
}
