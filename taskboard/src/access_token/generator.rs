use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use std::io;
use api_data::UserId;
use josekit::jwk::Jwk;
use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsSigner};
use josekit::jws::JwsHeader;
use josekit::jwt::JwtPayload;
use josekit::{jwt, JoseError};
use thiserror::Error;
use crate::access_token::data::SESSION_ID_CLAIM_NAME;
use crate::data::SessionId;
use errors::AccessTokenGeneratorError;

pub mod errors;

const JWT_KEY_SIZE: usize = 512 / 8;

pub struct AccessTokenGenerator {
    signer: HmacJwsSigner,
}

impl AccessTokenGenerator {
    pub fn from_jwk(key: &Jwk) -> Result<Self, AccessTokenGeneratorError> {
        Ok(
            AccessTokenGenerator {
                signer: HmacJwsAlgorithm::Hs512.signer_from_jwk(key)?,
            }
        )
    }

    pub fn generate_token(
        &self,
        user_id: UserId,
        session_id: SessionId,
        now: SystemTime,
        ttl: Duration,
    ) -> Result<String, AccessTokenGeneratorError> {
        let mut payload = JwtPayload::new();
        payload.set_subject(user_id.to_string());
        payload.set_claim(
            SESSION_ID_CLAIM_NAME,
            Some(serde_json::to_value(session_id.0)?),
        )?;
        let issued_at = whole_seconds(now);
        payload.set_not_before(&issued_at);
        payload.set_expires_at(&whole_seconds(issued_at + ttl));

        Ok(
            jwt::encode_with_signer(
                &payload,
                &JwsHeader::new(),
                &self.signer,
            )?
        )
    }
}

/// NumericDate claims are stored as floats unless they hold whole seconds,
/// and the float does not always read back as the same instant.
pub(crate) fn whole_seconds(time: SystemTime) -> SystemTime {
    let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
    UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs())
}

#[derive(Debug, Error)]
pub enum MakeJwtKeyError {
    #[error("failed generating jwt key")]
    Generation(#[from] JoseError),

    #[error("jwt key serialization failed")]
    Serialization(#[from] serde_json::Error),

    #[error("failed writing generated jwt key")]
    Io(#[from] io::Error),
}

/// Write a fresh HS512 key readable by the owner only.
pub fn make_jwt_key(path: &Path) -> Result<(), MakeJwtKeyError> {
    let mut key = Jwk::generate_oct_key(JWT_KEY_SIZE as u8)?;
    key.set_algorithm("HS512");
    let contents = serde_json::to_string_pretty(&key)? + "\n";
    let mut file = OpenOptions::new()
        .mode(0o600)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
