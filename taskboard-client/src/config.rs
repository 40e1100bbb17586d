use std::path::{Path, PathBuf};
use std::time::Duration;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CLIENT_CONFIG_ENV_PREFIX: &str = "TASKBOARD_CLIENT_";
const SESSION_FILE_NAME: &str = ".taskboard-session.toml";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClientConfig {
    #[serde(default = "client_config_default_base_url")]
    pub base_url: String,

    #[serde(default = "client_config_default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "client_config_default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "client_config_default_max_retries")]
    pub max_retries: u32,

    /// Where the cli keeps its tokens; `$HOME/.taskboard-session.toml` if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Defaults, then the optional toml file, then `TASKBOARD_CLIENT_*`.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let figment = Figment::new()
            .merge(Serialized::defaults(ClientConfig::default()));
        let figment = match config_file {
            Some(file) => figment.merge(Toml::file_exact(file)),
            None => figment,
        };
        figment.merge(Env::prefixed(CLIENT_CONFIG_ENV_PREFIX))
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_file).extract()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn session_file_path(&self) -> PathBuf {
        match (&self.session_file, std::env::var_os("HOME")) {
            (Some(path), _) => path.clone(),
            (None, Some(home)) => PathBuf::from(home).join(SESSION_FILE_NAME),
            (None, None) => PathBuf::from(SESSION_FILE_NAME),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: client_config_default_base_url(),
            timeout_ms: client_config_default_timeout_ms(),
            retry_base_delay_ms: client_config_default_retry_base_delay_ms(),
            max_retries: client_config_default_max_retries(),
            session_file: None,
        }
    }
}

fn client_config_default_base_url() -> String {
    "http://localhost:8000".into()
}

fn client_config_default_timeout_ms() -> u64 {
    10_000
}

fn client_config_default_retry_base_delay_ms() -> u64 {
    1_000
}

fn client_config_default_max_retries() -> u32 {
    3
}
