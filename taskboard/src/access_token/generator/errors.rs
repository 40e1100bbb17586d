use josekit::JoseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessTokenGeneratorError {
    #[error("cryptographic operation failed: {0}")]
    Crypto(#[from] JoseError),

    #[error("error serializing jwt claims: {0}")]
    Serialization(#[from] serde_json::Error),
}
