use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// `[basic]` table: where atlas listens, where the catalog lives, how loud
/// it logs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// Interface the catalog API binds to. Default `0.0.0.0`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    /// Default `8188`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// sqlx SQLite URL of the catalog store. `sqlite::memory:` gives a
    /// throwaway catalog. Default `sqlite://atlas.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// `EnvFilter` directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `atlas=debug,sqlx=warn`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
        }
    }
}

fn default_listen_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_listen_port() -> u16 {
    8188
}

fn default_database_url() -> String {
    "sqlite://atlas.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}
