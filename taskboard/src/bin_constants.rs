pub const DEFAULT_CONFIG_FILE: &str = "/etc/taskboard/taskboard.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "TASKBOARD_";
