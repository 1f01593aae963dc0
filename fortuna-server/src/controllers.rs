use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use fortuna_core::{
    ParticipantsRequest, ParticipantsResponse, RunningStream, RunningStreamsResponse,
};
use std::sync::Arc;

use crate::{auth::SessionUser, error::ApiError, store, AppState};

/// Handler per GET /api/stream/fetch/running/stream
///
/// Restituisce tutti gli stream in corso; `joined` dice se l'utente del cookie è tra i partecipanti.
pub async fn running_streams(
    Extension(state): Extension<Arc<AppState>>,
    user: SessionUser,
) -> Result<Json<RunningStreamsResponse>, ApiError> {
    // un errore del database diventa un 500 generico, il dettaglio finisce solo nei log
    let streams = store::running_streams(&state.pool).await?;

    let streams: Vec<RunningStream> = streams
        .into_iter()
        .map(|s| RunningStream::for_user(s, &user.user_id))
        .collect();
    tracing::debug!(user = %user.user_id, count = streams.len(), "running streams");

    Ok(Json(RunningStreamsResponse { success: true, streams }))
}

/// Handler per POST /api/admin/stream/participants
pub async fn participants(
    Extension(state): Extension<Arc<AppState>>,
    _user: SessionUser,
    payload: Result<Json<ParticipantsRequest>, JsonRejection>,
) -> Result<Json<ParticipantsResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected participants payload");
        ApiError::MalformedPayload
    })?;

    let stream = store::stream_with_participants(&state.pool, req.id.trim())
        .await?
        .ok_or(ApiError::StreamNotFound)?;

    Ok(Json(ParticipantsResponse { success: true, stream }))
}
