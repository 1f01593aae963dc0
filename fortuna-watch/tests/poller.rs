use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use fortuna_core::{PanelBody, PanelView, Stream, StreamStatus, StreamUser};
use fortuna_watch::{ClientError, PanelPoller, ParticipantsSource};
use reqwest::StatusCode;

/// Sorgente finta: registra ogni chiamata e risponde con un roster fisso per stream.
#[derive(Clone, Default)]
struct FakeSource {
    calls: Arc<Mutex<Vec<String>>>,
    rosters: Arc<Mutex<HashMap<String, Vec<StreamUser>>>>,
    failing: Arc<Mutex<bool>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl FakeSource {
    fn calls_for(&self, id: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == id).count()
    }

    fn set_roster(&self, id: &str, roster: Vec<StreamUser>) {
        self.rosters.lock().unwrap().insert(id.to_string(), roster);
    }

    fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn set_delay(&self, id: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(id.to_string(), delay);
    }
}

#[async_trait]
impl ParticipantsSource for FakeSource {
    async fn fetch_participants(&self, stream_id: &str) -> Result<Vec<StreamUser>, ClientError> {
        self.calls.lock().unwrap().push(stream_id.to_string());
        let delay = self.delays.lock().unwrap().get(stream_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.failing.lock().unwrap() {
            return Err(ClientError::Rejected {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "down".to_string(),
            });
        }
        Ok(self.rosters.lock().unwrap().get(stream_id).cloned().unwrap_or_default())
    }
}

fn stream(id: &str, status: StreamStatus) -> Stream {
    Stream {
        id: id.to_string(),
        title: format!("Stream {id}"),
        status,
        participants: vec![],
        created_at: "2025-11-02T10:00:00Z".to_string(),
    }
}

fn user(id: &str, name: &str) -> StreamUser {
    StreamUser {
        id: id.to_string(),
        name: name.to_string(),
        upi: format!("{name}@okbank"),
        joined_at: "2025-11-02T10:20:30Z".to_string(),
    }
}

fn roster_ids(view: &PanelView) -> Vec<String> {
    match view.body() {
        Some(PanelBody::Roster(rows)) => rows.iter().map(|r| r.id.clone()).collect(),
        _ => vec![],
    }
}

async fn settle() {
    // lascia girare i task già pronti senza far avanzare il tempo in modo significativo
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn fetches_immediately_then_every_five_seconds() {
    let source = FakeSource::default();
    source.set_roster("a", vec![user("u1", "anna")]);
    let mut poller = PanelPoller::new(source.clone());

    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    settle().await;
    assert_eq!(source.calls_for("a"), 1);
    assert_eq!(roster_ids(&poller.view().await), ["u1"]);

    tokio::time::sleep(Duration::from_secs(5)).await;
    settle().await;
    assert_eq!(source.calls_for("a"), 2);

    tokio::time::sleep(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(source.calls_for("a"), 4);
}

#[tokio::test(start_paused = true)]
async fn switching_stream_stops_polling_the_previous_one() {
    let source = FakeSource::default();
    let mut poller = PanelPoller::new(source.clone());

    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    tokio::time::sleep(Duration::from_secs(6)).await;
    let before = source.calls_for("a");
    assert_eq!(before, 2);

    poller.select(Some(stream("b", StreamStatus::Ended))).await;
    tokio::time::sleep(Duration::from_secs(12)).await;

    assert_eq!(source.calls_for("a"), before, "no fetch for the old stream after switching");
    assert_eq!(source.calls_for("b"), 3);
}

#[tokio::test(start_paused = true)]
async fn closing_stops_all_polling() {
    let source = FakeSource::default();
    let mut poller = PanelPoller::new(source.clone());

    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    settle().await;
    poller.close().await;
    tokio::time::sleep(Duration::from_secs(20)).await;

    assert_eq!(source.calls_for("a"), 1);
    assert_eq!(poller.view().await, PanelView::Hidden);
}

#[tokio::test(start_paused = true)]
async fn reselecting_same_stream_does_not_restart_the_cycle() {
    let source = FakeSource::default();
    let mut poller = PanelPoller::new(source.clone());

    poller.select(Some(stream("a", StreamStatus::Running))).await;
    settle().await;
    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    settle().await;

    assert_eq!(source.calls_for("a"), 1);
}

#[tokio::test(start_paused = true)]
async fn loading_is_shown_until_first_fetch_completes() {
    let source = FakeSource::default();
    source.set_delay("a", Duration::from_secs(2));
    let mut poller = PanelPoller::new(source.clone());

    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    settle().await;
    assert_eq!(poller.view().await.body(), Some(&PanelBody::Loading));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(poller.view().await.body(), Some(&PanelBody::Empty));
}

#[tokio::test(start_paused = true)]
async fn failures_are_swallowed_and_keep_the_last_roster() {
    let source = FakeSource::default();
    source.set_roster("a", vec![user("u1", "anna"), user("u2", "bruno")]);
    let mut poller = PanelPoller::new(source.clone());

    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    settle().await;
    assert_eq!(roster_ids(&poller.view().await), ["u1", "u2"]);

    source.set_failing(true);
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(source.calls_for("a"), 3, "polling continues after failures");

    let view = poller.view().await;
    assert_eq!(roster_ids(&view), ["u1", "u2"]);
    match view {
        PanelView::Open { show_lucky_draw, participant_count, .. } => {
            assert!(show_lucky_draw);
            assert_eq!(participant_count, 2);
        }
        PanelView::Hidden => panic!("panel should be open"),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_response_for_previous_stream_is_discarded() {
    let source = FakeSource::default();
    source.set_roster("a", vec![user("old", "anna")]);
    source.set_roster("b", vec![user("new", "bruno")]);
    source.set_delay("a", Duration::from_secs(8));
    let mut poller = PanelPoller::new(source.clone());
    let views = poller.subscribe();

    poller.select(Some(stream("a", StreamStatus::Ended))).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    poller.select(Some(stream("b", StreamStatus::Ended))).await;

    // la risposta di "a" arriva dopo quella di "b"
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(roster_ids(&poller.view().await), ["new"]);
    assert_eq!(roster_ids(&views.borrow()), ["new"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rapid_switches_on_worker_threads_leave_no_stale_polling() {
    let source = FakeSource::default();
    let mut poller = PanelPoller::with_period(source.clone(), Duration::from_millis(2));
    let ids = ["a", "b", "c", "d"];

    for _ in 0..10 {
        for id in ids {
            poller.select(Some(stream(id, StreamStatus::Ended))).await;
            tokio::time::sleep(Duration::from_millis(3)).await;
        }
    }
    poller.select(Some(stream("z", StreamStatus::Ended))).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let before: Vec<usize> = ids.iter().map(|id| source.calls_for(id)).collect();
    let z_before = source.calls_for("z");
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after: Vec<usize> = ids.iter().map(|id| source.calls_for(id)).collect();

    assert_eq!(before, after);
    assert!(source.calls_for("z") > z_before);
    poller.close().await;
}
