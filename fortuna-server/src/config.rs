use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use anyhow::{anyhow, bail, Context};
use tracing::info;

/// Configurazione del processo, letta dall'ambiente all'avvio.
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Legge l'ambiente. Senza `JWT_SECRET` il server non parte.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET must be set to a non-empty value"))?;

        Ok(Self {
            jwt_secret,
            database_url: try_load(&lookup, "DATABASE_URL", "fortuna.db")?,
            bind_addr: try_load(&lookup, "BIND_ADDR", "127.0.0.1:3000")?,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    match raw.parse() {
        Ok(v) => Ok(v),
        Err(e) => bail!("invalid {key} value {raw:?}: {e}"),
    }
}

/// Come `Config::load`, con il contesto per il messaggio d'errore all'avvio.
pub fn load_config() -> anyhow::Result<Config> {
    Config::load().context("load configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_secret_fails_fast() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn blank_secret_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("JWT_SECRET", "   ")])).is_err());
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let cfg = Config::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.database_url, "fortuna.db");
        assert_eq!(cfg.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn invalid_bind_addr_is_an_error() {
        let res = Config::from_lookup(lookup(&[("JWT_SECRET", "s"), ("BIND_ADDR", "nowhere")]));
        assert!(res.is_err());
    }
}
