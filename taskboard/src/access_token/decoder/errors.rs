use josekit::JoseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessTokenDecoderError {
    #[error("cryptographic operation failed: {0}")]
    Crypto(#[from] JoseError),

    #[error("invalid access token payload: {0}")]
    PayloadParse(serde_json::Error),

    #[error("invalid user id: {0}")]
    PayloadUserId(#[from] uuid::Error),

    #[error("missing {part} in the payload")]
    PayloadMissing {
        part: &'static str,
    },
}
