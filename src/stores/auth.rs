//! Session store: in-memory identity plus the gateway's bearer slot.
//!
//! Token and user live only in this store; durable storage and route
//! guarding belong to the embedding application. Login and register
//! report success through their return value instead of raising, so a
//! login form only branches on a bool and reads `error` for the text.

use std::sync::Arc;

use log::debug;

use crate::api::AuthApi;
use crate::types::models::{AuthResponse, User};

pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthStore {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            token: None,
            user: None,
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    fn save_auth(&mut self, response: AuthResponse) {
        self.api.set_auth_token(Some(response.token.clone()));
        self.token = Some(response.token);
        self.user = Some(response.user);
    }

    fn clear_auth(&mut self) {
        self.token = None;
        self.user = None;
        self.api.set_auth_token(None);
    }

    /// Authenticate and push the credential into the gateway slot.
    /// Returns false on failure with `error` set.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.loading = true;
        self.error = None;
        let result = self.api.login(email, password).await;
        self.loading = false;
        match result {
            Ok(response) => {
                self.save_auth(response);
                true
            }
            Err(err) => {
                self.error = Some(err.user_message("Login failed"));
                false
            }
        }
    }

    /// Create an account; a successful registration also signs in.
    pub async fn register(&mut self, email: &str, password: &str, player_name: &str) -> bool {
        self.loading = true;
        self.error = None;
        let result = self.api.register(email, password, player_name).await;
        self.loading = false;
        match result {
            Ok(response) => {
                self.save_auth(response);
                true
            }
            Err(err) => {
                self.error = Some(err.user_message("Registration failed"));
                false
            }
        }
    }

    /// End the session. The endpoint call is best-effort; the local
    /// session is cleared either way.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            debug!("Logout call failed, clearing session anyway: {err}");
        }
        self.clear_auth();
    }

    /// Validate the held token against the backend, refreshing `user`.
    /// Without a token this is false with no I/O; a rejected token
    /// clears the whole session.
    pub async fn check_auth(&mut self) -> bool {
        if self.token.is_none() {
            return false;
        }
        match self.api.me().await {
            Ok(user) => {
                self.user = Some(user);
                true
            }
            Err(err) => {
                debug!("Session check failed: {err}");
                self.clear_auth();
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
