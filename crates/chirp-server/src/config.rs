use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read `CHIRP_DB_PATH`, `CHIRP_HOST` and `CHIRP_PORT`, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("CHIRP_DB_PATH").unwrap_or_else(|| "chirp.db".into());
        let host = lookup("CHIRP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = lookup("CHIRP_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("CHIRP_PORT must be a port number")?;

        Ok(Self {
            db_path: PathBuf::from(db_path),
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("chirp.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr().unwrap(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CHIRP_DB_PATH", "/tmp/social.db"),
            ("CHIRP_HOST", "127.0.0.1"),
            ("CHIRP_PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/social.db"));
        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::from_lookup(lookup_from(&[("CHIRP_PORT", "http")])).is_err());
    }

    #[test]
    fn rejects_unparseable_host() {
        let config = Config::from_lookup(lookup_from(&[("CHIRP_HOST", "not a host")])).unwrap();
        assert!(config.bind_addr().is_err());
    }
}
