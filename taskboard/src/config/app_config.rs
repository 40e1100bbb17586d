use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::lib_constants::{DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_DATABASE_URL, DEFAULT_JWT_KEY, DEFAULT_MAX_NAME_LEN, DEFAULT_MAX_TEXT_LEN, DEFAULT_REFRESH_TOKEN_TTL_SECS};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_database_url")]
    pub database_url: String,

    /// HS512 JWK used to sign and verify access tokens.
    #[serde(default = "app_config_default_jwt_key")]
    pub jwt_key: PathBuf,

    #[serde(default = "app_config_default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u64,

    #[serde(default = "app_config_default_refresh_token_ttl_secs")]
    pub refresh_token_ttl_secs: u64,

    #[serde(default = "app_config_default_max_name_len")]
    pub max_name_len: usize,

    #[serde(default = "app_config_default_max_text_len")]
    pub max_text_len: usize,

    #[serde(default)]
    pub hasher_config: ProductionHasherConfigData,
}

impl AppConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            jwt_key: DEFAULT_JWT_KEY.into(),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            hasher_config: ProductionHasherConfigData::default(),
        }
    }
}

fn app_config_default_database_url() -> String {
    DEFAULT_DATABASE_URL.into()
}

fn app_config_default_jwt_key() -> PathBuf {
    DEFAULT_JWT_KEY.into()
}

fn app_config_default_access_token_ttl_secs() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL_SECS
}

fn app_config_default_refresh_token_ttl_secs() -> u64 {
    DEFAULT_REFRESH_TOKEN_TTL_SECS
}

fn app_config_default_max_name_len() -> usize {
    DEFAULT_MAX_NAME_LEN
}

fn app_config_default_max_text_len() -> usize {
    DEFAULT_MAX_TEXT_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults_match() {
        assert_eq!(
            AppConfig::default(),
            serde_json::de::from_str("{}").unwrap(),
        )
    }
}
