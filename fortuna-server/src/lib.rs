use anyhow::Context;
use axum::http::StatusCode;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod routes;
pub mod store;

use auth::JwtKeys;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Chiave per la verifica dei token di sessione.
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: &str) -> Self {
        Self { pool, jwt: JwtKeys::from_secret(jwt_secret) }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite:///{}", s.trim_start_matches('/')))
}

/// Trasforma il valore di DATABASE_URL (percorso o url "sqlite://") in un URL SQLite utilizzabile.
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // Rimuovi il prefisso "sqlite://" se presente, per ottenere il percorso del file.
    // "sqlite:///tmp/x.db" -> "/tmp/x.db", "sqlite://x.db" -> "x.db"
    let path_part = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea le tabelle se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(pool)
        .await
        .context("enable foreign_keys")?;

    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS streams (
            stream_id  TEXT PRIMARY KEY,
            title      TEXT NOT NULL,
            status     TEXT NOT NULL CHECK (status IN ('upcoming', 'running', 'ended')),
            created_at TEXT NOT NULL,
            version    INTEGER NOT NULL DEFAULT 0
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS stream_participants (
            stream_id TEXT NOT NULL,
            user_id   TEXT NOT NULL,
            name      TEXT NOT NULL,
            upi       TEXT NOT NULL,
            joined_at TEXT NOT NULL,
            PRIMARY KEY (stream_id, user_id),
            FOREIGN KEY(stream_id) REFERENCES streams(stream_id)
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_streams_status ON streams(status);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
