mod data;
mod decoder;
mod generator;

pub use data::AccessTokenData;
pub use decoder::AccessTokenDecoder;
pub use decoder::errors::AccessTokenDecoderError;
pub use generator::{make_jwt_key, AccessTokenGenerator, MakeJwtKeyError};
pub use generator::errors::AccessTokenGeneratorError;

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use api_data::UserId;
    use josekit::jwk::Jwk;
    use crate::data::SessionId;
    use super::*;

    fn key() -> Jwk {
        Jwk::generate_oct_key(64).expect("key generation failed")
    }

    #[test]
    fn generated_token_decodes() {
        let key = key();
        let generator = AccessTokenGenerator::from_jwk(&key).unwrap();
        let decoder = AccessTokenDecoder::from_jwk(&key).unwrap();
        let user_id = UserId::generate();
        let session_id = SessionId::generate();
        let now = SystemTime::now();

        let token = generator
            .generate_token(user_id, session_id, now, Duration::from_secs(60))
            .expect("token generation failed");
        let data = decoder.decode_token(&token)
            .expect("token decoding failed");

        assert_eq!(data.user_id, user_id);
        assert_eq!(data.session_id, session_id);
        assert!(data.is_valid_at(now));
        assert!(!data.is_valid_at(now + Duration::from_secs(61)));
    }

    #[test]
    fn fractional_issue_time_is_valid_immediately() {
        let key = key();
        let generator = AccessTokenGenerator::from_jwk(&key).unwrap();
        let decoder = AccessTokenDecoder::from_jwk(&key).unwrap();
        let now = UNIX_EPOCH + Duration::new(1_700_000_000, 999_999_999);

        let token = generator
            .generate_token(UserId::generate(), SessionId::generate(), now, Duration::from_secs(60))
            .expect("token generation failed");
        let data = decoder.decode_token(&token)
            .expect("token decoding failed");

        assert_eq!(data.not_before, UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        assert_eq!(data.expires_at, UNIX_EPOCH + Duration::from_secs(1_700_000_060));
        assert!(data.is_valid_at(now));
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let generator = AccessTokenGenerator::from_jwk(&key()).unwrap();
        let decoder = AccessTokenDecoder::from_jwk(&key()).unwrap();
        let token = generator
            .generate_token(
                UserId::generate(),
                SessionId::generate(),
                SystemTime::now(),
                Duration::from_secs(60),
            )
            .unwrap();
        let err = decoder.decode_token(&token).expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::Crypto(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn garbage_is_rejected() {
        let decoder = AccessTokenDecoder::from_jwk(&key()).unwrap();
        decoder.decode_token("not.a.token").expect_err("should fail");
    }
}
