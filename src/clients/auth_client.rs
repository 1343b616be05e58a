use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::actors::{AuthRequest, Session};
use crate::error::AuthError;

/// Client for the auth provider. The tracking view never requires a session;
/// this exists for checkout and account flows.
#[derive(Clone)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, AuthError>>) -> AuthRequest,
    ) -> Result<T, AuthError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| AuthError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| AuthError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<Session, AuthError> {
        debug!("Sending request");
        self.request(|respond_to| AuthRequest::SignUp {
            name,
            email,
            password,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: String, password: String) -> Result<Session, AuthError> {
        debug!("Sending request");
        self.request(|respond_to| AuthRequest::SignIn {
            email,
            password,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, token))]
    pub async fn sign_out(&self, token: String) -> Result<(), AuthError> {
        debug!("Sending request");
        self.request(|respond_to| AuthRequest::SignOut { token, respond_to })
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn current_session(&self, token: String) -> Result<Option<Session>, AuthError> {
        debug!("Sending request");
        self.request(|respond_to| AuthRequest::CurrentSession { token, respond_to })
            .await
    }
}
