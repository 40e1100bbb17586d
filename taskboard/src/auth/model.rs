use api_data::UserId;
use crate::data::{SessionId, UserRow};

#[derive(Debug)]
pub struct LoginResult {
    pub user: UserRow,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug)]
pub enum SessionInfo {
    Valid(KnownSession),
    Expired(KnownSession),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KnownSession {
    pub session_id: SessionId,
    pub user_id: UserId,
}
