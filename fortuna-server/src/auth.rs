/* Autenticazione tramite il cookie di sessione `user`.
    Il cookie contiene un JWT HS256 il cui payload ha l'id utente nel campo `_id`.
    nessun cookie      -> 401 "Unauthorized: No token"
    verifica fallita   -> 401 "Invalid token"
    verifica riuscita  -> SessionUser con l'id in forma canonica
*/
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use fortuna_core::{canonical_id, SESSION_COOKIE};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

/// Payload del token di sessione.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "_id")]
    pub user_id: String,
    /// Scadenza (secondi unix). Facoltativa; se presente viene verificata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Chiave e regole di verifica dei token.
#[derive(Clone)]
pub struct JwtKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` non è obbligatorio, ma se c'è viene controllato
        validation.required_spec_claims.clear();
        validation.leeway = 0;
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, ApiError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                ApiError::InvalidToken
            })
    }
}

/// Utente autenticato estratto dal cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: String,
}

impl SessionUser {
    pub fn from_jar(jar: &CookieJar, keys: &JwtKeys) -> Result<Self, ApiError> {
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::NoToken)?;
        let claims = keys.verify(token)?;
        Ok(SessionUser { user_id: canonical_id(&claims.user_id) })
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = parts
            .extensions
            .get::<Arc<AppState>>()
            .cloned()
            .ok_or_else(|| ApiError::Internal("AppState extension missing".to_string()))?;
        let jar = CookieJar::from_headers(&parts.headers);
        SessionUser::from_jar(&jar, &state.jwt)
    }
}
