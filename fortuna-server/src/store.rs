/* Accesso agli stream persistiti.
    Le proiezioni non includono mai la colonna interna `version`.
    I partecipanti di uno stream sono ordinati per ingresso (joined_at, poi ordine di inserimento).
*/
use std::collections::HashMap;

use fortuna_core::{
    new_id, now_timestamp, Stream, StreamParticipants, StreamStatus, StreamUser,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn status_from_row(row: &SqliteRow) -> Result<StreamStatus, sqlx::Error> {
    let raw: String = row.try_get("status")?;
    StreamStatus::parse(&raw)
        .ok_or_else(|| sqlx::Error::Decode(format!("unknown stream status {raw:?}").into()))
}

/// Crea uno stream senza partecipanti.
pub async fn insert_stream(
    pool: &SqlitePool,
    title: &str,
    status: StreamStatus,
) -> Result<Stream, sqlx::Error> {
    let stream = Stream {
        id: new_id(),
        title: title.to_string(),
        status,
        participants: Vec::new(),
        created_at: now_timestamp(),
    };
    sqlx::query("INSERT INTO streams (stream_id, title, status, created_at) VALUES (?, ?, ?, ?)")
        .bind(&stream.id)
        .bind(&stream.title)
        .bind(stream.status.as_str())
        .bind(&stream.created_at)
        .execute(pool)
        .await?;
    Ok(stream)
}

/// Registra un partecipante. Un secondo ingresso dello stesso utente nello stesso stream viene ignorato.
pub async fn add_participant(
    pool: &SqlitePool,
    stream_id: &str,
    user: &StreamUser,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT OR IGNORE INTO stream_participants (stream_id, user_id, name, upi, joined_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(stream_id)
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.upi)
    .bind(&user.joined_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Tutti gli stream con status "running", con gli id dei partecipanti.
pub async fn running_streams(pool: &SqlitePool) -> Result<Vec<Stream>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT stream_id, title, status, created_at FROM streams WHERE status = ? ORDER BY created_at, rowid",
    )
    .bind(StreamStatus::Running.as_str())
    .fetch_all(pool)
    .await?;

    let mut streams = Vec::with_capacity(rows.len());
    for row in &rows {
        streams.push(Stream {
            id: row.try_get("stream_id")?,
            title: row.try_get("title")?,
            status: status_from_row(row)?,
            participants: Vec::new(),
            created_at: row.try_get("created_at")?,
        });
    }

    // un'unica query per i partecipanti di tutti gli stream in corso, poi raggruppo per stream
    let member_rows = sqlx::query(
        "SELECT p.stream_id, p.user_id FROM stream_participants p \
         JOIN streams s ON s.stream_id = p.stream_id \
         WHERE s.status = ? ORDER BY p.joined_at, p.rowid",
    )
    .bind(StreamStatus::Running.as_str())
    .fetch_all(pool)
    .await?;

    let mut members: HashMap<String, Vec<String>> = HashMap::new();
    for row in &member_rows {
        let stream_id: String = row.try_get("stream_id")?;
        let user_id: String = row.try_get("user_id")?;
        members.entry(stream_id).or_default().push(user_id);
    }
    for stream in &mut streams {
        if let Some(ids) = members.remove(&stream.id) {
            stream.participants = ids;
        }
    }
    Ok(streams)
}

/// Lo stream `stream_id` con i partecipanti completi, `None` se non esiste.
pub async fn stream_with_participants(
    pool: &SqlitePool,
    stream_id: &str,
) -> Result<Option<StreamParticipants>, sqlx::Error> {
    let row = sqlx::query("SELECT stream_id, title, status FROM streams WHERE stream_id = ?")
        .bind(stream_id)
        .fetch_optional(pool)
        .await?;
    let row = match row {
        Some(r) => r,
        None => return Ok(None),
    };

    let participants = sqlx::query(
        "SELECT user_id, name, upi, joined_at FROM stream_participants \
         WHERE stream_id = ? ORDER BY joined_at, rowid",
    )
    .bind(stream_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|r| {
        Ok(StreamUser {
            id: r.try_get("user_id")?,
            name: r.try_get("name")?,
            upi: r.try_get("upi")?,
            joined_at: r.try_get("joined_at")?,
        })
    })
    .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(Some(StreamParticipants {
        id: row.try_get("stream_id")?,
        title: row.try_get("title")?,
        status: status_from_row(&row)?,
        participants,
    }))
}
