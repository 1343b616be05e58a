use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::actors::ServiceResponse;
use crate::clients::AuthClient;
use crate::error::AuthError;

/// An authenticated session handed back by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub account_id: String,
    pub email: String,
}

#[derive(Debug, Clone)]
struct Account {
    id: String,
    name: String,
    email: String,
    password: String,
}

#[derive(Debug)]
pub enum AuthRequest {
    SignUp {
        name: String,
        email: String,
        password: String,
        respond_to: ServiceResponse<Session, AuthError>,
    },
    SignIn {
        email: String,
        password: String,
        respond_to: ServiceResponse<Session, AuthError>,
    },
    SignOut {
        token: String,
        respond_to: ServiceResponse<(), AuthError>,
    },
    /// Nullable lookup: an unknown or expired token yields `None`, not an error.
    CurrentSession {
        token: String,
        respond_to: ServiceResponse<Option<Session>, AuthError>,
    },
}

/// In-memory stand-in for the hosted auth provider. Accounts and sessions
/// live only for the lifetime of the process; this is a collaborator
/// interface, not a credential store.
pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, Session>,
    next_id: u64,
}

impl AuthService {
    pub fn new(buffer_size: usize) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            accounts: HashMap::new(),
            sessions: HashMap::new(),
            next_id: 1,
        };
        (service, AuthClient::new(sender))
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!("AuthService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::SignUp {
                    name,
                    email,
                    password,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_sign_up(name, email, password));
                }
                AuthRequest::SignIn {
                    email,
                    password,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_sign_in(email, password));
                }
                AuthRequest::SignOut { token, respond_to } => {
                    let _ = respond_to.send(self.handle_sign_out(token));
                }
                AuthRequest::CurrentSession { token, respond_to } => {
                    debug!("Processing current_session request");
                    let _ = respond_to.send(Ok(self.sessions.get(&token).cloned()));
                }
            }
        }
        info!("AuthService stopped");
    }

    #[instrument(fields(email = %email), skip(self, name, email, password))]
    fn handle_sign_up(
        &mut self,
        name: String,
        email: String,
        password: String,
    ) -> Result<Session, AuthError> {
        if self.accounts.contains_key(&email) {
            warn!("Sign-up for existing account");
            return Err(AuthError::AlreadyExists(email));
        }
        let id = format!("account_{}", self.next_id);
        self.next_id += 1;
        self.accounts.insert(
            email.clone(),
            Account {
                id: id.clone(),
                name,
                email: email.clone(),
                password,
            },
        );
        info!(account_id = %id, "Account created");
        Ok(self.open_session(id, email))
    }

    #[instrument(fields(email = %email), skip(self, email, password))]
    fn handle_sign_in(&mut self, email: String, password: String) -> Result<Session, AuthError> {
        let matched = match self.accounts.get(&email) {
            Some(account) if account.password == password => {
                Some((account.id.clone(), account.email.clone()))
            }
            _ => None,
        };
        match matched {
            Some((id, email)) => {
                info!(account_id = %id, "Sign-in successful");
                Ok(self.open_session(id, email))
            }
            None => {
                warn!("Sign-in rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    #[instrument(skip(self, token))]
    fn handle_sign_out(&mut self, token: String) -> Result<(), AuthError> {
        match self.sessions.remove(&token) {
            Some(_) => Ok(()),
            None => Err(AuthError::UnknownSession(token)),
        }
    }

    fn open_session(&mut self, account_id: String, email: String) -> Session {
        let token = format!("session_{}", self.next_id);
        self.next_id += 1;
        let session = Session {
            token: token.clone(),
            account_id,
            email,
        };
        self.sessions.insert(token, session.clone());
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_service() -> AuthClient {
        let (service, client) = AuthService::new(8);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_sign_up_sign_out_round_trip() {
        let client = spawn_service();

        let session = client
            .sign_up("Alice".into(), "alice@example.com".into(), "secret".into())
            .await
            .unwrap();

        let current = client.current_session(session.token.clone()).await.unwrap();
        assert_eq!(current, Some(session.clone()));

        client.sign_out(session.token.clone()).await.unwrap();
        let current = client.current_session(session.token).await.unwrap();
        assert_eq!(current, None);
    }

    #[tokio::test]
    async fn test_sign_in_rejects_bad_password() {
        let client = spawn_service();
        client
            .sign_up("Alice".into(), "alice@example.com".into(), "secret".into())
            .await
            .unwrap();

        let err = client
            .sign_in("alice@example.com".into(), "wrong".into())
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        let session = client
            .sign_in("alice@example.com".into(), "secret".into())
            .await
            .unwrap();
        assert_eq!(session.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_rejected() {
        let client = spawn_service();
        client
            .sign_up("Alice".into(), "alice@example.com".into(), "secret".into())
            .await
            .unwrap();
        let err = client
            .sign_up("Alice".into(), "alice@example.com".into(), "other".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists(_)));
    }
}
