use async_trait::async_trait;
use fortuna_core::{
    ErrorBody, ParticipantsRequest, ParticipantsResponse, RunningStream, RunningStreamsResponse,
    StreamParticipants, StreamUser, PARTICIPANTS_PATH, RUNNING_STREAMS_PATH, SESSION_COOKIE,
};
use reqwest::{header::COOKIE, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("server answered without success")]
    Unsuccessful,
}

/// Sorgente del roster di uno stream. Il poller dipende solo da questo.
#[async_trait]
pub trait ParticipantsSource: Send + Sync + 'static {
    async fn fetch_participants(&self, stream_id: &str) -> Result<Vec<StreamUser>, ClientError>;
}

/// Client HTTP verso fortuna-server, autenticato con il cookie di sessione.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookie: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: format!("{SESSION_COOKIE}={token}"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Stream con i partecipanti completi (titolo e stato inclusi).
    pub async fn fetch_stream(&self, stream_id: &str) -> Result<StreamParticipants, ClientError> {
        let res = self
            .http
            .post(self.url(PARTICIPANTS_PATH))
            .header(COOKIE, &self.cookie)
            .json(&ParticipantsRequest { id: stream_id.to_string() })
            .send()
            .await?;
        let body: ParticipantsResponse = read_body(res).await?;
        if !body.success {
            return Err(ClientError::Unsuccessful);
        }
        Ok(body.stream)
    }

    /// Stream in corso con il flag `joined` per l'utente del token.
    pub async fn running_streams(&self) -> Result<Vec<RunningStream>, ClientError> {
        let res = self
            .http
            .get(self.url(RUNNING_STREAMS_PATH))
            .header(COOKIE, &self.cookie)
            .send()
            .await?;
        let body: RunningStreamsResponse = read_body(res).await?;
        if !body.success {
            return Err(ClientError::Unsuccessful);
        }
        Ok(body.streams)
    }
}

async fn read_body<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json().await?);
    }
    // il server risponde con { success: false, message }; se non è così si usa il testo dello status
    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Rejected { status, message })
}

#[async_trait]
impl ParticipantsSource for ApiClient {
    async fn fetch_participants(&self, stream_id: &str) -> Result<Vec<StreamUser>, ClientError> {
        Ok(self.fetch_stream(stream_id).await?.participants)
    }
}
