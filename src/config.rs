use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::error::{config_error, Error};

#[derive(Clone, Debug)]
pub struct Config {
    pub mapbox_access_token: Option<String>,
    pub mapbox_api_base: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mapbox_access_token: None,
            mapbox_api_base: "api.mapbox.com".into(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            log_dir: "logs".into(),
            log_level: LevelFilter::DEBUG,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.mapbox_access_token = lookup("MAPBOX_ACCESS_TOKEN").filter(|t| !t.is_empty());

        if let Some(base) = lookup("MAPBOX_API_BASE") {
            config.mapbox_api_base = base;
        }
        if let Some(host) = lookup("STOPOVER_HOST") {
            config.host = host.parse().map_err(config_error)?;
        }
        if let Some(port) = lookup("STOPOVER_PORT") {
            config.port = port.parse()?;
        }
        if let Some(dir) = lookup("STOPOVER_LOG_DIR") {
            config.log_dir = dir.into();
        }
        if let Some(level) = lookup("STOPOVER_LOG_LEVEL") {
            config.log_level = level.parse().map_err(config_error)?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.mapbox_access_token, None);
    assert_eq!(config.mapbox_api_base, "api.mapbox.com");
    assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
    assert_eq!(config.log_dir, PathBuf::from("logs"));
    assert_eq!(config.log_level, LevelFilter::DEBUG);
}

#[test]
fn reads_overrides() {
    let config = Config::from_lookup(lookup_from(&[
        ("MAPBOX_ACCESS_TOKEN", "pk.test"),
        ("MAPBOX_API_BASE", "localhost:8080"),
        ("STOPOVER_HOST", "127.0.0.1"),
        ("STOPOVER_PORT", "8000"),
        ("STOPOVER_LOG_LEVEL", "info"),
    ]))
    .unwrap();

    assert_eq!(config.mapbox_access_token.as_deref(), Some("pk.test"));
    assert_eq!(config.mapbox_api_base, "localhost:8080");
    assert_eq!(config.addr().to_string(), "127.0.0.1:8000");
    assert_eq!(config.log_level, LevelFilter::INFO);
}

#[test]
fn empty_token_counts_as_missing() {
    let config = Config::from_lookup(lookup_from(&[("MAPBOX_ACCESS_TOKEN", "")])).unwrap();
    assert_eq!(config.mapbox_access_token, None);
}

#[test]
fn rejects_malformed_values() {
    let err = Config::from_lookup(lookup_from(&[("STOPOVER_PORT", "http")])).unwrap_err();
    assert_eq!(err.code, 7);

    let err = Config::from_lookup(lookup_from(&[("STOPOVER_HOST", "not a host")])).unwrap_err();
    assert_eq!(err.code, 7);

    let err = Config::from_lookup(lookup_from(&[("STOPOVER_LOG_LEVEL", "loud")])).unwrap_err();
    assert_eq!(err.code, 7);
}
