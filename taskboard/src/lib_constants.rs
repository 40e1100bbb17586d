pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db";
pub const DEFAULT_JWT_KEY: &str = "/etc/taskboard/private/jwt_key.json";

pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

pub const DEFAULT_MAX_NAME_LEN: usize = 256;
pub const DEFAULT_MAX_TEXT_LEN: usize = 64 * 1024;

// the defaults are taken from the argon2 crate itself
pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = Some(32);

pub const REFRESH_TOKEN_SIZE: usize = 256 / 8;
pub const MIN_PASSWORD_LEN: usize = 8;
