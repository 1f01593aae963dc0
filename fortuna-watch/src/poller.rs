/* Polling del roster per lo stream selezionato.
    Ad ogni nuova selezione: fetch immediato, poi uno ogni `period` finché la selezione non cambia.
    Il ciclo precedente viene fermato tramite CancellationToken; le risposte ancora in volo
    vengono scartate da PanelState perché appartengono a una generazione vecchia.
*/
use std::{sync::Arc, time::Duration};

use fortuna_core::{FetchTicket, PanelState, PanelView, Stream, POLL_INTERVAL};
use tokio::{
    sync::{watch, Mutex},
    time::MissedTickBehavior,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::ParticipantsSource;

pub struct PanelPoller<S: ParticipantsSource> {
    source: Arc<S>,
    state: Arc<Mutex<PanelState>>,
    views: watch::Sender<PanelView>,
    period: Duration,
    cycle: Option<CancellationToken>,
    current: Option<String>,
}

impl<S: ParticipantsSource> PanelPoller<S> {
    pub fn new(source: S) -> Self {
        Self::with_period(source, POLL_INTERVAL)
    }

    pub fn with_period(source: S, period: Duration) -> Self {
        let (views, _) = watch::channel(PanelView::Hidden);
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(PanelState::new())),
            views,
            period,
            cycle: None,
            current: None,
        }
    }

    /// Ricevitore che vede ogni cambiamento della vista.
    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.views.subscribe()
    }

    pub async fn view(&self) -> PanelView {
        self.state.lock().await.view()
    }

    /// Cambia lo stream selezionato (`None` chiude il pannello).
    pub async fn select(&mut self, stream: Option<Stream>) {
        let next_id = stream.as_ref().map(|s| s.id.clone());
        // il ciclo vecchio va fermato prima di toccare lo stato: nessun tick del vecchio id dopo il cambio
        if next_id != self.current {
            self.stop();
        }

        let ticket = {
            let mut state = self.state.lock().await;
            let ticket = state.select(stream);
            self.views.send_replace(state.view());
            ticket
        };
        self.current = next_id;

        if let Some(ticket) = ticket {
            debug!(stream = %ticket.stream_id, generation = ticket.generation, "starting participants polling");
            let cancel = CancellationToken::new();
            tokio::spawn(run_cycle(
                self.source.clone(),
                self.state.clone(),
                self.views.clone(),
                self.period,
                ticket,
                cancel.clone(),
            ));
            self.cycle = Some(cancel);
        }
    }

    pub async fn close(&mut self) {
        self.select(None).await;
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cycle.take() {
            cancel.cancel();
        }
    }
}

impl<S: ParticipantsSource> Drop for PanelPoller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_cycle<S: ParticipantsSource>(
    source: Arc<S>,
    state: Arc<Mutex<PanelState>>,
    views: watch::Sender<PanelView>,
    period: Duration,
    ticket: FetchTicket,
    cancel: CancellationToken,
) {
    // il primo tick scatta subito: è il fetch iniziale
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        // i fetch possono sovrapporsi: non si attende la risposta prima del tick successivo
        tokio::spawn(fetch_once(
            source.clone(),
            state.clone(),
            views.clone(),
            ticket.clone(),
            cancel.clone(),
        ));
    }
    debug!(stream = %ticket.stream_id, "participants polling stopped");
}

async fn fetch_once<S: ParticipantsSource>(
    source: Arc<S>,
    state: Arc<Mutex<PanelState>>,
    views: watch::Sender<PanelView>,
    ticket: FetchTicket,
    cancel: CancellationToken,
) {
    // tick già partito ma selezione cambiata nel frattempo
    if cancel.is_cancelled() {
        return;
    }
    let outcome = source
        .fetch_participants(&ticket.stream_id)
        .await
        .map_err(|e| {
            warn!(stream = %ticket.stream_id, "Failed to fetch participants: {e}");
            e.to_string()
        });

    let mut state = state.lock().await;
    if state.apply(&ticket, outcome) {
        views.send_replace(state.view());
    } else {
        debug!(stream = %ticket.stream_id, "discarding stale participants response");
    }
}
