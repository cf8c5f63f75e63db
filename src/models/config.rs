use serde::Deserialize;

/// Configuration options for the catalog service.
///
/// Loaded from `config/default.yaml`, an optional per-environment file and
/// `APP_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    /// TCP port the HTTP server listens on.
    pub port: u16,
}
