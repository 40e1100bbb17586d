mod api;

use std::time::Duration;
use api_data::model::RefreshResponse;
use log::{debug, error, info, warn};
use serde_json::json;
use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::retry::{classify, Outcome, RequestState, RetryContext};
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Transport};

const REFRESH_PATH: &str = "/auth/refresh";

/// Invoked when the session cannot be refreshed and the user has to log in
/// again.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

impl<F: Fn() + Send + Sync> LoginRedirect for F {
    fn redirect_to_login(&self) {
        self()
    }
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    session: Session,
    login_redirect: Box<dyn LoginRedirect>,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        transport: impl Transport + 'static,
        session: Session,
        login_redirect: impl LoginRedirect + 'static,
    ) -> Self {
        ApiClient {
            transport: Box::new(transport),
            session,
            login_redirect: Box::new(login_redirect),
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send the request, applying the retry and refresh policy, until it
    /// succeeds or fails for good.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut context = if request.authenticated {
            RetryContext::new(self.max_retries)
        } else {
            RetryContext::without_refresh(self.max_retries)
        };
        let mut state = RequestState::Sending;
        loop {
            state = match state {
                RequestState::Sending => {
                    let bearer = if request.authenticated {
                        self.session.access_token().await
                    } else {
                        None
                    };
                    let result = self.transport.send(request, bearer.as_deref()).await;
                    match classify(result, &context, self.retry_base_delay) {
                        Outcome::Success(response) => RequestState::Done(Ok(response)),
                        Outcome::Refresh => {
                            context.refreshed = true;
                            RequestState::AwaitingRefresh
                        },
                        Outcome::Retry { delay } => {
                            context.attempt += 1;
                            RequestState::Retrying(delay)
                        },
                        Outcome::Fatal(e) => RequestState::Done(Err(e)),
                    }
                },
                RequestState::AwaitingRefresh => match self.refresh_access_token().await {
                    Ok(()) => RequestState::Sending,
                    Err(e) => RequestState::Done(Err(e)),
                },
                RequestState::Retrying(delay) => {
                    debug!(
                        "retrying {} {} in {delay:?} (retry {} of {})",
                        request.method,
                        request.path,
                        context.attempt,
                        context.max_attempts,
                    );
                    self.transport.sleep(delay).await;
                    RequestState::Sending
                },
                RequestState::Done(result) => return result,
            }
        }
    }

    /// Exchange the refresh token for a new access token. A single
    /// unauthenticated call, never retried.
    async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            debug!("no refresh token to refresh with");
            return self.expire_session().await;
        };
        let request = ApiRequest::post(REFRESH_PATH, json!({ "refreshToken": refresh_token }))
            .unauthenticated();
        let response = self.transport.send(&request, None).await?;
        if response.is_success() {
            let RefreshResponse { access_token } = response.json()?;
            self.session.refresh(access_token).await?;
            info!("access token refreshed");
            Ok(())
        } else if response.status == 401 {
            self.expire_session().await
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    async fn expire_session(&self) -> Result<(), ApiError> {
        warn!("session expired, login required");
        if let Err(e) = self.session.clear().await {
            error!("could not clear the saved session: {e}");
        }
        self.login_redirect.redirect_to_login();
        Err(ApiError::SessionExpired)
    }
}
