use std::net::{Ipv4Addr, SocketAddr};

use feed_http::connection::ReaderConfig;
use thiserror::Error;

/// Port used when none is given on the command line
pub const DEFAULT_PORT: u16 = 42069;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {value:?}, expected a number between 0 and 65535")]
    InvalidPort { value: String },

    #[error("unexpected argument {value:?}, usage: tcplistener [PORT]")]
    UnexpectedArgument { value: String },
}

/// Settings for the listener, taken from the command line: `tcplistener [PORT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerConfig {
    port: u16,
    reader: ReaderConfig,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, reader: ReaderConfig::default() }
    }
}

impl ListenerConfig {
    /// Builds the config from the command line arguments, without the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut config = Self::default();

        if let Some(value) = args.next() {
            config.port = value.trim().parse().map_err(|_| ConfigError::InvalidPort { value })?;
        }

        match args.next() {
            Some(value) => Err(ConfigError::UnexpectedArgument { value }),
            None => Ok(config),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_reader(mut self, reader: ReaderConfig) -> Self {
        self.reader = reader;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Listens on every interface.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn reader(&self) -> ReaderConfig {
        self.reader
    }
}
