use std::{env, net::SocketAddr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
#[error("invalid port '{0}'")]
pub struct InvalidPort(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub port: u16,
}

impl WebConfig {
    /// Reads `PORT`, falling back to 8080.
    pub fn from_env() -> Result<Self, InvalidPort> {
        Self::from_port(env::var("PORT").ok())
    }

    pub fn from_port(port: Option<String>) -> Result<Self, InvalidPort> {
        match port.filter(|port| !port.is_empty()) {
            Some(port) => port
                .parse()
                .map(|port| Self { port })
                .map_err(|_| InvalidPort(port)),
            None => {
                log::info!("No port specified, using {}", DEFAULT_PORT);
                Ok(Self { port: DEFAULT_PORT })
            }
        }
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port() {
        assert_eq!(WebConfig::from_port(None).unwrap().port, 8080);
        assert_eq!(WebConfig::from_port(Some(String::new())).unwrap().port, 8080);
    }

    #[test]
    fn explicit_port() {
        let config = WebConfig::from_port(Some("5000".to_owned())).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.address().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn invalid_port() {
        assert!(WebConfig::from_port(Some("http".to_owned())).is_err());
        assert!(WebConfig::from_port(Some("70000".to_owned())).is_err());
    }
}
