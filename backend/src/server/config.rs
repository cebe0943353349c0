//! Server settings loaded via OrthoConfig.
//!
//! Values come from `JOURNAL_*` environment variables, configuration files
//! and command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    /// `db_max_connections` was zero.
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOURNAL")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. In-memory stores are used when absent
    /// (debug builds only).
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Resolve the listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, falling back to 10.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            n => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = [
        "JOURNAL_BIND_ADDR",
        "JOURNAL_DATABASE_URL",
        "JOURNAL_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("journal-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.db_max_connections().expect("default pool size"),
            DEFAULT_DB_MAX_CONNECTIONS
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("JOURNAL_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "JOURNAL_DATABASE_URL",
                Some("postgres://journal@localhost/journal".to_owned()),
            ),
            ("JOURNAL_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://journal@localhost/journal")
        );
        assert_eq!(settings.db_max_connections().expect("pool size"), 4);
    }

    #[rstest]
    #[case(Some("not-an-address"), None, true, false)]
    #[case(None, Some(0), false, true)]
    fn invalid_values_are_reported(
        #[case] bind_addr: Option<&str>,
        #[case] db_max_connections: Option<u32>,
        #[case] bad_addr: bool,
        #[case] bad_pool: bool,
    ) {
        let settings = ServerSettings {
            bind_addr: bind_addr.map(str::to_owned),
            database_url: Some("   ".to_owned()),
            db_max_connections,
        };
        assert_eq!(settings.bind_addr().is_err(), bad_addr);
        assert_eq!(settings.db_max_connections().is_err(), bad_pool);
        assert!(settings.database_url().is_none());
    }
}
