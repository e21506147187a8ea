use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Tünetnapló";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owner key for resource-cache rows of this installation.
pub const LOCAL_OWNER: &str = "local";

pub const DB_PATH_ENV: &str = "TUNETNAPLO_DB_PATH";
pub const BIND_ENV: &str = "TUNETNAPLO_BIND";
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Get the application data directory
/// ~/Tunetnaplo/ on all platforms. Falls back to the working directory
/// when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Tunetnaplo")
}

/// Default location of the diary database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("tunetnaplo.db")
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "tunetnaplo_lib=debug,tunetnaplo=debug,info"
    } else {
        "tunetnaplo_lib=info,tunetnaplo=info,warn"
    }
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
}

impl ServerConfig {
    /// Reads `TUNETNAPLO_DB_PATH` and `TUNETNAPLO_BIND`, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup(DB_PATH_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(database_path);

        let bind = match lookup(BIND_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid {BIND_ENV}, using {DEFAULT_BIND}");
                default_bind()
            }),
            None => default_bind(),
        };

        Self { db_path, bind }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        if let Some(home) = dirs::home_dir() {
            assert!(dir.starts_with(home));
        }
        assert!(dir.ends_with("Tunetnaplo"));
    }

    #[test]
    fn database_path_under_app_data() {
        assert!(database_path().starts_with(app_data_dir()));
    }

    #[test]
    fn default_bind_matches_constant() {
        assert_eq!(default_bind(), DEFAULT_BIND.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn from_env_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.db_path, database_path());
        assert_eq!(config.bind, default_bind());
    }

    #[test]
    fn from_env_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/tmp/naplo.db"),
            (BIND_ENV, "0.0.0.0:9000"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/naplo.db"));
        assert_eq!(config.bind.port(), 9000);
    }

    #[test]
    fn invalid_bind_falls_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[(BIND_ENV, "not-an-address")]));
        assert_eq!(config.bind, default_bind());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
