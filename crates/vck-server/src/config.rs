use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Settings for the Slack slash-command server, read from the `[server]`
/// table of the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Path Slack posts slash commands to.
    pub endpoint: String,
    /// Requests signed longer ago than this are rejected as replays.
    pub max_request_age_secs: u64,
    /// Fetch from the remote before every search. Off by default: the
    /// clone is expected to be kept fresh by a periodic job.
    pub fetch_on_request: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8888)),
            endpoint: "/salt-version".into(),
            max_request_age_secs: 60 * 5,
            fetch_on_request: false,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Read the `[server]` table from a full config file. Other keys are
    /// ignored; a missing table yields the defaults.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(file.server)
    }

    pub fn max_request_age(&self) -> Duration {
        Duration::from_secs(self.max_request_age_secs)
    }
}
