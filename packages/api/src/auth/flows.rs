//! Sign-in, sign-up and sign-out against the backend's `users` auth collection.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AuthRecord;
use crate::client::{PocketBase, USERS};
use crate::error::{AuthError, RegistrationError};
use crate::models::UserInfo;

#[derive(Serialize)]
struct PasswordLogin<'a> {
    identity: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewAccount<'a> {
    email: &'a str,
    password: &'a str,
    password_confirm: &'a str,
    name: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    record: UserInfo,
}

impl PocketBase {
    /// Exchange credentials for a session. Subscribers of the auth store are notified.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        let builder = self
            .request(
                Method::POST,
                self.url(&format!("/api/collections/{USERS}/auth-with-password")),
            )
            .json(&PasswordLogin {
                identity: email,
                password,
            });
        let response: AuthResponse = self.send(builder).await.map_err(|err| {
            warn!(%err, "sign in failed");
            AuthError::from(err)
        })?;
        info!(user = %response.record.id, "signed in");
        let user = response.record.clone();
        self.auth_store().save(AuthRecord {
            token: response.token,
            user: response.record,
        });
        Ok(user)
    }

    /// Create an account, then sign in with the same credentials.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserInfo, RegistrationError> {
        let builder = self
            .request(Method::POST, self.records_url(USERS))
            .json(&NewAccount {
                email,
                password,
                password_confirm: password,
                name,
            });
        let created: UserInfo = self.send(builder).await.map_err(|err| {
            warn!(%err, "registration failed");
            RegistrationError::Rejected(err)
        })?;
        info!(user = %created.id, "account created");
        self.login(email, password)
            .await
            .map_err(RegistrationError::Login)
    }

    /// Drop the session locally. No request is made.
    pub fn logout(&self) {
        self.auth_store().clear();
        info!("signed out");
    }
}
