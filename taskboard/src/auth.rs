//! Users, password login and refresh sessions.
//!
//! Access tokens are short-lived JWTs bound to a refresh session. The
//! refresh token is an opaque random string stored server-side; deleting
//! the session on logout also invalidates every access token issued for it.

mod errors;
mod model;

use std::time::{Duration, SystemTime};
use api_data::model::{LoginRequest, RegisterRequest};
use api_data::UserId;
use base64ct::{Base64UrlUnpadded, Encoding};
use log::{debug, info, trace, warn};
use rand::Rng;
use time::OffsetDateTime;
use crate::access_token::{AccessTokenDecoder, AccessTokenGenerator};
use crate::config::app_config::AppConfig;
use crate::data::{RefreshSessionRow, SessionId, UserRow};
use crate::db::{self, DbError, DbPool};
use crate::hasher::{Hasher, ProductionHasher};
use crate::lib_constants::{MIN_PASSWORD_LEN, REFRESH_TOKEN_SIZE};
use crate::util::StrExt;

pub use errors::AuthError;
pub use model::{KnownSession, LoginResult, SessionInfo};

pub type ProductionAuthService = AuthService<ProductionHasher>;

pub struct AuthService<H: Hasher> {
    db: DbPool,
    hasher: H,
    token_generator: AccessTokenGenerator,
    token_decoder: AccessTokenDecoder,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    max_name_len: usize,
}

impl<H: Hasher> AuthService<H> {
    pub fn new(
        db: DbPool,
        hasher: H,
        token_generator: AccessTokenGenerator,
        token_decoder: AccessTokenDecoder,
        config: &AppConfig,
    ) -> Self {
        AuthService {
            db,
            hasher,
            token_generator,
            token_decoder,
            access_token_ttl: config.access_token_ttl(),
            refresh_token_ttl: config.refresh_token_ttl(),
            max_name_len: config.max_name_len,
        }
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<UserRow, AuthError> {
        let name = request.name.as_deref()
            .and_then(|n| n.nonblank_to_some())
            .ok_or_else(|| AuthError::Validation("Name is required".into()))?;
        if name.chars().count() > self.max_name_len {
            return Err(AuthError::Validation(
                format!("Name must be at most {} characters", self.max_name_len)
            ));
        }
        let email = request.email.as_deref()
            .map(normalize_email)
            .filter(|e| is_plausible_email(e))
            .ok_or_else(|| AuthError::Validation("A valid email is required".into()))?;
        let password = request.password.as_deref()
            .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN)
            .ok_or_else(|| AuthError::Validation(
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long")
            ))?;
        debug!("registering user \"{email}\"");

        let user = UserRow {
            id: UserId::generate(),
            email,
            name,
            password_hash: self.hasher.generate_hash(password)?,
            created_at: OffsetDateTime::now_utc(),
        };
        let mut conn = self.db.acquire().await?;
        match db::users::insert_user(&mut conn, &user).await {
            Ok(()) => (),
            Err(DbError::UniqueViolation) => return Err(AuthError::Validation(
                "A user with this email already exists".into()
            )),
            Err(e) => return Err(e.into()),
        }
        info!("registered user {} \"{}\"", user.id, user.email);
        Ok(user)
    }

    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<LoginResult, AuthError> {
        let (Some(email), Some(password)) = (&request.email, &request.password) else {
            return Err(AuthError::Validation("Email and password are required".into()));
        };
        let email = normalize_email(email);
        debug!("logging user \"{email}\" in");

        let mut conn = self.db.acquire().await?;
        let user = match db::users::find_user_by_email(&mut conn, &email).await? {
            Some(user) => user,
            None => {
                warn!("login attempt for unknown user \"{email}\"");
                return Err(AuthError::InvalidCredentials);
            },
        };
        if !self.hasher.check_hash(&user.password_hash, password)? {
            warn!("wrong password for user \"{email}\"");
            return Err(AuthError::InvalidCredentials);
        }

        let now = OffsetDateTime::now_utc();
        let session = RefreshSessionRow {
            id: SessionId::generate(),
            user_id: user.id,
            token: make_refresh_token(),
            expires_at: now + self.refresh_token_ttl,
            created_at: now,
        };
        db::sessions::insert_session(&mut conn, &session).await?;
        let access_token = self.token_generator.generate_token(
            user.id,
            session.id,
            SystemTime::now(),
            self.access_token_ttl,
        )?;
        info!("user {} logged in, session {}", user.id, session.id);
        Ok(
            LoginResult {
                user,
                access_token,
                refresh_token: session.token,
            }
        )
    }

    /// Issue a new access token for the session holding the refresh token.
    /// The refresh token itself is not rotated.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<String, AuthError> {
        let mut conn = self.db.acquire().await?;
        let session = db::sessions::find_session_by_token(&mut conn, refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;
        if session.expires_at <= OffsetDateTime::now_utc() {
            debug!("refresh session {} expired, removing", session.id);
            db::sessions::delete_session(&mut conn, session.id).await?;
            return Err(AuthError::InvalidRefreshToken);
        }
        trace!("refreshing access token for session {}", session.id);
        Ok(
            self.token_generator.generate_token(
                session.user_id,
                session.id,
                SystemTime::now(),
                self.access_token_ttl,
            )?
        )
    }

    pub async fn logout(&self, session_id: SessionId) -> Result<(), AuthError> {
        debug!("deleting session {session_id}");
        let mut conn = self.db.acquire().await?;
        if !db::sessions::delete_session(&mut conn, session_id).await? {
            debug!("session {session_id} was already gone");
        }
        Ok(())
    }

    pub async fn check_user_access(
        &self,
        auth_header_value: &str,
    ) -> Result<SessionInfo, AuthError> {
        let token = auth_header_value.strip_prefix("Bearer ")
            .ok_or(AuthError::HeaderFormat)?;
        let token = self.token_decoder.decode_token(token.trim())
            .map_err(|e| {
                warn!("failed to decode token: {e}");
                AuthError::InvalidToken
            })?;
        let known_session = KnownSession {
            session_id: token.session_id,
            user_id: token.user_id,
        };
        if !token.is_valid_at(SystemTime::now()) {
            trace!("expired valid token for user {}", known_session.user_id);
            return Ok(SessionInfo::Expired(known_session));
        }

        let mut conn = self.db.acquire().await?;
        match db::sessions::find_session(&mut conn, token.session_id).await? {
            Some(session) if session.user_id == token.user_id => {
                trace!("valid token for user {}", known_session.user_id);
                Ok(SessionInfo::Valid(known_session))
            },
            _ => {
                debug!("token for a closed session {}", token.session_id);
                Err(AuthError::InvalidToken)
            },
        }
    }

    pub async fn me(&self, user_id: UserId) -> Result<UserRow, AuthError> {
        let mut conn = self.db.acquire().await?;
        db::users::find_user(&mut conn, user_id).await?
            .ok_or(AuthError::InvalidToken)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !email.contains(char::is_whitespace),
        None => false,
    }
}

fn make_refresh_token() -> String {
    let bytes: [u8; REFRESH_TOKEN_SIZE] = rand::rng().random();
    Base64UrlUnpadded::encode_string(&bytes)
}
