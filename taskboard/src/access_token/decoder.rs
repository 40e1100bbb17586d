use std::str::FromStr;
use api_data::UserId;
use josekit::jwk::Jwk;
use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsVerifier};
use josekit::jwt;
use log::info;
use uuid::Uuid;
use crate::access_token::data::{AccessTokenData, SESSION_ID_CLAIM_NAME};
use crate::data::SessionId;
use errors::AccessTokenDecoderError;

pub mod errors;

pub struct AccessTokenDecoder {
    verifier: HmacJwsVerifier,
}

impl AccessTokenDecoder {
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, AccessTokenDecoderError> {
        Ok(
            AccessTokenDecoder {
                verifier: HmacJwsAlgorithm::Hs512.verifier_from_jwk(jwk)?,
            }
        )
    }

    /// Decode the access token and verify its signature. The validity
    /// period is not checked here.
    ///
    /// # Errors
    /// All possible error values signify incorrect token data.
    pub fn decode_token(
        &self,
        token: impl AsRef<[u8]>,
    ) -> Result<AccessTokenData, AccessTokenDecoderError> {
        let token = token.as_ref();
        let (payload, _) = jwt::decode_with_verifier(
            token,
            &self.verifier,
        )?;
        let session_id = payload.claim(SESSION_ID_CLAIM_NAME)
            .map(|v| serde_json::from_value::<Uuid>(v.clone()))
            .transpose()
            .map_err(|e| {
                info!("invalid {SESSION_ID_CLAIM_NAME} in access token: {e}");
                AccessTokenDecoderError::PayloadParse(e)
            })?
            .map(SessionId)
            .ok_or_else(|| missing_field(SESSION_ID_CLAIM_NAME))?;
        let user_id = payload.subject()
            .map(UserId::from_str)
            .transpose()?
            .ok_or_else(|| missing_field("subject"))?;
        let not_before = payload.not_before()
            .ok_or_else(|| missing_field("not_before"))?;
        let expires_at = payload.expires_at()
            .ok_or_else(|| missing_field("expires_at"))?;
        Ok(
            AccessTokenData {
                session_id,
                user_id,
                not_before,
                expires_at,
            }
        )
    }
}

fn missing_field(part: &'static str) -> AccessTokenDecoderError {
    info!("missing field {part} in access token");
    AccessTokenDecoderError::PayloadMissing { part }
}
