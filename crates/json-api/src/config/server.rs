//! Listener settings

use clap::Args;

/// Address the cart API listens on.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind, IPv4 or IPv6
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listener port, next to the store's own
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 3008)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, with IPv6 hosts wrapped in brackets.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');

        if host.contains(':') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }
}
