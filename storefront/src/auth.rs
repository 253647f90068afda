//! Simulated authentication against a single static test user.
//!
//! There is no authentication server: login checks the configured
//! credentials, registration accepts any well-formed input, and the
//! signed-in user is just a record under the `static_user` key.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::io::config::TestUserConfig;
use crate::io::storage::{ClientStore, USER_KEY};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct AuthService {
    store: ClientStore,
    test_user: TestUserConfig,
}

impl AuthService {
    pub fn new(store: ClientStore, test_user: TestUserConfig) -> Self {
        Self { store, test_user }
    }

    /// The signed-in user, if any. A malformed stored record reads as
    /// signed out.
    pub fn current_user(&self) -> Option<User> {
        self.store.load_json_opt(USER_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Check credentials against the static test user and persist the
    /// session. Wrong credentials fail without touching state.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        if email != self.test_user.email || password != self.test_user.password {
            bail!("invalid email or password");
        }
        let user = User {
            id: "1".to_string(),
            email: self.test_user.email.clone(),
            first_name: self.test_user.first_name.clone(),
            last_name: self.test_user.last_name.clone(),
        };
        self.store
            .save_json(USER_KEY, &user)
            .context("persist signed-in user")?;
        Ok(user)
    }

    /// Register a new user. Accepted for any non-empty input; the account
    /// exists only in client storage.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User> {
        if email.trim().is_empty() || password.trim().is_empty() {
            bail!("email and password are required");
        }
        let user = User {
            id: Utc::now().timestamp_millis().to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.store
            .save_json(USER_KEY, &user)
            .context("persist registered user")?;
        Ok(user)
    }

    /// Sign out: removes the stored session.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(USER_KEY).context("remove signed-in user")
    }
}
