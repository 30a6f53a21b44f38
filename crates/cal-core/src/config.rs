//! Configuration management
//!
//! The server takes a single optional `<host>:<port>` argument. Everything
//! else uses the defaults below; there is no config file and no environment
//! lookup.

use crate::{Error, Result};

/// Main configuration for the calendar server
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Event store configuration
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or IP address to bind
    pub host: String,

    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Parse a `<host>:<port>` address
    ///
    /// The port is taken after the last `:`, so bracketed IPv6 hosts such as
    /// `[::1]:8080` are accepted too.
    pub fn parse(addr: &str) -> Result<Self> {
        let (host, port) = addr.rsplit_once(':').ok_or_else(|| {
            Error::Config(format!("expected <host>:<port>, got '{}'", addr))
        })?;

        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(Error::Config(format!("missing host in '{}'", addr)));
        }

        let port = port
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid port '{}': {}", port, e)))?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to SQLite database file
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "calendar.db".to_string()
}

impl Config {
    /// Build the configuration from command line arguments (program name excluded)
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let mut config = Self::default();

        if let Some(addr) = args.next() {
            config.server = ServerConfig::parse(addr.as_ref())?;
        }

        if let Some(extra) = args.next() {
            return Err(Error::Config(format!(
                "unexpected argument '{}'; usage: cal-server [<host>:<port>]",
                extra.as_ref()
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.db_path, "calendar.db");
        assert_eq!(config.server.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_host_and_port_argument() {
        let config = Config::from_args(["0.0.0.0:8080"]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);

        let config = Config::from_args(["localhost:3000"]).unwrap();
        assert_eq!(config.server.bind_addr(), "localhost:3000");
    }

    #[test]
    fn test_ipv6_host() {
        let server = ServerConfig::parse("[::1]:8000").unwrap();
        assert_eq!(server.host, "::1");
        assert_eq!(server.bind_addr(), "[::1]:8000");
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(Config::from_args(["localhost"]), Err(Error::Config(_))));
        assert!(matches!(Config::from_args([":8080"]), Err(Error::Config(_))));
        assert!(matches!(Config::from_args(["localhost:http"]), Err(Error::Config(_))));
        assert!(matches!(Config::from_args(["localhost:70000"]), Err(Error::Config(_))));
        assert!(matches!(
            Config::from_args(["localhost:8080", "--verbose"]),
            Err(Error::Config(_))
        ));
    }
}
