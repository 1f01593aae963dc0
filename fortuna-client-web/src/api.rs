use fortuna_core::{
    ParticipantsRequest, ParticipantsResponse, RunningStream, RunningStreamsResponse, StreamUser,
    PARTICIPANTS_PATH, RUNNING_STREAMS_PATH,
};
use gloo_net::http::Request;

/// Base degli endpoint; vuota = stessa origine della pagina.
/// Deve restare sulla stessa origine: le richieste usano le credenziali di default
/// (same-origin) e il server non ha CORS, quindi altrove il cookie `user` non partirebbe.
pub const BASE_URL: &str = match option_env!("FORTUNA_BASE_URL") {
    Some(url) => url,
    None => "",
};

/// POST /api/admin/stream/participants. Il cookie di sessione viaggia con la richiesta.
pub async fn fetch_participants(stream_id: &str) -> Result<Vec<StreamUser>, String> {
    let res = Request::post(&format!("{BASE_URL}{PARTICIPANTS_PATH}"))
        .json(&ParticipantsRequest { id: stream_id.to_string() })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !res.ok() {
        return Err(format!("status {}", res.status()));
    }
    let body: ParticipantsResponse = res.json().await.map_err(|e| e.to_string())?;
    if !body.success {
        return Err("server answered without success".to_string());
    }
    Ok(body.stream.participants)
}

pub async fn fetch_running_streams() -> Result<Vec<RunningStream>, String> {
    let res = Request::get(&format!("{BASE_URL}{RUNNING_STREAMS_PATH}"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !res.ok() {
        return Err(format!("status {}", res.status()));
    }
    let body: RunningStreamsResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(body.streams)
}
