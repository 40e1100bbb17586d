use std::error::Error;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;
use thiserror::Error;
use crate::config::hasher_config::ProductionHasherConfigData;

const SALT_SIZE: usize = 16;

pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<String, HasherError>;
    fn check_hash(
        &self,
        hash: &str,
        password: &str,
    ) -> Result<bool, HasherError>;
}

pub struct ProductionHasher {
    argon2_params: argon2::Params,
}

impl ProductionHasher {
    pub fn new(
        config: &ProductionHasherConfigData,
    ) -> Result<Self, HasherError> {
        Ok(
            ProductionHasher {
                argon2_params: config.make_params()
                    .map_err(|e| HasherError::Initialization(Box::new(e)))?,
            }
        )
    }

    fn get_hasher(&self) -> Argon2<'_> {
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.argon2_params.clone(),
        )
    }

    fn make_salt(&self) -> Result<SaltString, HasherError> {
        let bytes: [u8; SALT_SIZE] = rand::rng().random();
        SaltString::encode_b64(&bytes)
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }
}

impl Hasher for ProductionHasher {
    fn generate_hash(&self, password: &str) -> Result<String, HasherError> {
        let salt = self.make_salt()?;
        self.get_hasher()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HasherError::Hash(Box::new(e)))
            .map(|v| v.serialize().to_string())
    }

    fn check_hash(&self, hash: &str, password: &str) -> Result<bool, HasherError> {
        let hash = PasswordHash::new(hash)
            .map_err(|e| HasherError::Hash(Box::new(e)))?;
        self.get_hasher()
            .verify_password(password.as_bytes(), &hash)
            .map(|_| true)
            .or_else(|e|
                if let argon2::password_hash::Error::Password = e {
                    Ok(false)
                } else {
                    Err(e)
                }
            )
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("failed to initialize password hasher: {0}")]
    Initialization(Box<dyn Error + Send + Sync>),

    #[error("failed to hash password: {0}")]
    Hash(Box<dyn Error + Send + Sync>),
}
