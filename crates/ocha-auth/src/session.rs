//! Session store: credential lifecycle and the signed-in profile.

use crate::{AuthError, Profile};
use ocha_cache::{keys, Cache};
use ocha_data::ApiClient;
use serde::Serialize;
use serde_json::Value;

/// Backend endpoints used by the session store.
pub mod paths {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
}

const LOGIN_FAILED: &str = "Unable to sign in.";
const REGISTER_FAILED: &str = "Unable to create the account.";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No credential held.
    #[default]
    Anonymous,
    /// A login or registration request is in flight.
    Authenticating,
    /// A credential is held.
    Authenticated,
    /// The last login or registration failed; no credential is held.
    Error,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

/// What a successful login or registration hands back.
#[derive(Debug)]
struct Grant {
    token: String,
    user: Option<Profile>,
}

impl Grant {
    fn from_body(body: &Value) -> Result<Self, AuthError> {
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;
        Ok(Self {
            token: token.to_string(),
            user: body.get("user").and_then(Profile::from_value),
        })
    }
}

/// Authentication state of one application session.
///
/// The credential is loaded from the cache at construction and every change
/// to it is written back before the operation returns.
#[derive(Debug)]
pub struct SessionStore {
    client: ApiClient,
    cache: Cache,
    token: Option<String>,
    user: Option<Profile>,
    status: SessionStatus,
    loading: bool,
    error: Option<String>,
}

impl SessionStore {
    /// Create the store, restoring any credential left in the cache.
    pub fn new(client: ApiClient, cache: Cache) -> Self {
        let token = cache
            .load_or_default::<Option<String>>(keys::AUTH_TOKEN)
            .filter(|t| !t.trim().is_empty());
        let status = if token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };
        Self {
            client,
            cache,
            token,
            user: None,
            status,
            loading: false,
            error: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&Profile> {
        self.user.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message describing the last failure, cleared by the next attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(Profile::is_admin)
    }

    /// Fail with [`AuthError::NotAuthenticated`] unless a credential is held.
    pub fn require_authenticated(&self) -> Result<(), AuthError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }

    /// Sign in with email and password.
    ///
    /// A response without a token is a failure even when the HTTP status
    /// is 2xx.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let body = LoginRequest { email, password };
        self.authenticate(paths::LOGIN, &body, LOGIN_FAILED).await
    }

    /// Create an account; same contract as [`login`](Self::login).
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<(), AuthError> {
        let body = RegisterRequest {
            email,
            password,
            display_name,
        };
        self.authenticate(paths::REGISTER, &body, REGISTER_FAILED)
            .await
    }

    /// Drop the credential and profile. No network call.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.token = None;
        self.user = None;
        self.error = None;
        self.status = SessionStatus::Anonymous;
        self.cache.delete(keys::AUTH_TOKEN)?;
        tracing::info!("signed out");
        Ok(())
    }

    async fn authenticate<B: Serialize>(
        &mut self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<(), AuthError> {
        self.status = SessionStatus::Authenticating;
        self.loading = true;
        self.error = None;

        let result = match self.client.post_json(path, body).await {
            Ok(response) => Grant::from_body(&response).and_then(|grant| self.establish(grant)),
            Err(e) => Err(e.into()),
        };

        self.loading = false;
        if let Err(err) = &result {
            self.fail(err, fallback);
        }
        result
    }

    fn establish(&mut self, grant: Grant) -> Result<(), AuthError> {
        self.cache.set(keys::AUTH_TOKEN, &grant.token)?;
        self.token = Some(grant.token);
        self.user = grant.user;
        self.status = SessionStatus::Authenticated;
        tracing::info!(
            user = self.user.as_ref().and_then(Profile::email).unwrap_or("-"),
            "signed in"
        );
        Ok(())
    }

    fn fail(&mut self, err: &AuthError, fallback: &str) {
        self.token = None;
        self.user = None;
        if let Err(e) = self.cache.delete(keys::AUTH_TOKEN) {
            tracing::warn!(error = %e, "failed to clear cached credential");
        }
        self.error = Some(err.user_message(fallback));
        self.status = SessionStatus::Error;
        tracing::warn!(error = %err, "authentication failed");
    }
}
