//! A TCP listener that parses one HTTP/1.1 request per connection and prints it.

mod config;
mod server;

pub use config::{ConfigError, DEFAULT_PORT, ListenerConfig};
pub use server::{Listener, handle_connection};
