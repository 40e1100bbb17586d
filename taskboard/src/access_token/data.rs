use std::time::SystemTime;
use api_data::UserId;
use crate::data::SessionId;

pub const SESSION_ID_CLAIM_NAME: &str = "session_id";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessTokenData {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub not_before: SystemTime,
    pub expires_at: SystemTime,
}

impl AccessTokenData {
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        self.not_before <= now && now < self.expires_at
    }
}
