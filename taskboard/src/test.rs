use api_data::model::{LoginRequest, RegisterRequest};
use api_data::UserId;
use josekit::jwk::Jwk;
use crate::access_token::{AccessTokenDecoder, AccessTokenGenerator};
use crate::auth::AuthService;
use crate::config::app_config::AppConfig;
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::db::DbPool;
use crate::hasher::ProductionHasher;
use crate::service::Limits;

pub fn cheap_hasher() -> ProductionHasher {
    ProductionHasher::new(
        &ProductionHasherConfigData {
            argon2_m_cost: 64,
            argon2_t_cost: 1,
            argon2_p_cost: 1,
            argon2_output_len: Some(32),
        }
    ).expect("failed to make test hasher")
}

pub async fn test_db() -> DbPool {
    DbPool::in_memory().await.expect("failed to make test database")
}

pub fn test_limits() -> Limits {
    Limits {
        max_name_len: 32,
        max_text_len: 256,
    }
}

pub fn test_auth_service(db: &DbPool, config: &AppConfig) -> AuthService<ProductionHasher> {
    let key = Jwk::generate_oct_key(64).expect("failed to make test key");
    AuthService::new(
        db.clone(),
        cheap_hasher(),
        AccessTokenGenerator::from_jwk(&key).expect("failed to make generator"),
        AccessTokenDecoder::from_jwk(&key).expect("failed to make decoder"),
        config,
    )
}

pub fn register_request(email: &str, name: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: Some(email.into()),
        name: Some(name.into()),
        password: Some(password.into()),
    }
}

pub fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: Some(email.into()),
        password: Some(password.into()),
    }
}

/// Register a user straight through the auth service.
pub async fn make_user(db: &DbPool, name: &str) -> UserId {
    test_auth_service(db, &AppConfig::default())
        .register(&register_request(
            &format!("{}@example.com", name.to_lowercase()),
            name,
            "password123",
        ))
        .await
        .expect("failed to register test user")
        .id
}
