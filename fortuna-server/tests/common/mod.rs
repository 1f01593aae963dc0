#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::COOKIE, Request, Response},
    Router,
};
use fortuna_server::{
    auth::SessionClaims, connect_pool, routes, run_migrations, sqlite_url_for_path, AppState,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tempfile::TempDir;

pub const SECRET: &str = "integration-secret";

pub struct TestApp {
    // il db vive finché vive la directory temporanea
    pub _dir: TempDir,
    pub state: Arc<AppState>,
    pub router: Router,
}

pub async fn spawn_app() -> Result<TestApp> {
    let dir = TempDir::new()?;
    let url = sqlite_url_for_path(&dir.path().join("fortuna.db"))?;
    let pool = connect_pool(&url).await?;
    run_migrations(&pool).await?;
    let state = Arc::new(AppState::new(pool, SECRET));
    let router = routes::router(state.clone());
    Ok(TestApp { _dir: dir, state, router })
}

pub fn token_for(user_id: &str) -> String {
    let claims = SessionClaims { user_id: user_id.to_string(), exp: None };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))
        .expect("encode token")
}

pub fn with_cookie(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(t) => builder.header(COOKIE, format!("theme=dark; user={t}")),
        None => builder,
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    with_cookie(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    with_cookie(Request::builder().method("POST").uri(uri), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}
