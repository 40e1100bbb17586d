use std::sync::LazyLock;
use josekit::jwk::Jwk;

pub const MOCK_JWT_KEY_STR: &str = include_str!("mock_jwt_key.json");
pub static MOCK_JWT_KEY: LazyLock<Jwk> = LazyLock::new(||
    Jwk::from_bytes(MOCK_JWT_KEY_STR)
        .expect("failed to parse mock jwt key")
);

/// Password every mock user is registered with.
pub const MOCK_PASSWORD: &str = "password123";

pub fn mock_email(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase())
}
