//! `/auth` and self-service profile endpoints

use shared::client::{ChangePasswordRequest, LoginRequest, LoginResponse};
use shared::models::{ProfileUpdate, User};

use crate::error::{ClientError, ClientResult, PasswordError};
use crate::http::HttpClient;
use crate::AttendoClient;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check a password change form before it is sent
pub fn validate_password_change(new_password: &str, confirm: &str) -> Result<(), PasswordError> {
    if new_password != confirm {
        return Err(PasswordError::Mismatch);
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordError::TooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

impl<C: HttpClient> AttendoClient<C> {
    /// Login with email and password
    ///
    /// Populates the session and persists the token. A 401 here means bad
    /// credentials and does not count toward the forced-logout streak.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.http.post("/auth/login", &req).await.map_err(|e| match e {
            ClientError::Unauthorized => ClientError::Validation("Invalid credentials".into()),
            other => other,
        })?;

        self.http.set_token(Some(resp.token.clone()));
        if let Err(e) = self.store.save(&resp.token) {
            tracing::warn!("failed to persist token: {e}");
        }
        self.session.begin(resp.token, resp.user.clone());
        Ok(resp.user)
    }

    /// Restore a session from the configured or stored token
    ///
    /// Returns `Ok(None)` when no token is available. Any failure while
    /// validating the token tears the session down.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        let Some(token) = self.config.token.clone().or_else(|| self.store.load()) else {
            return Ok(None);
        };
        self.http.set_token(Some(token.clone()));
        match self.me().await {
            Ok(user) => {
                self.session.begin(token, user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!("session expired or invalid: {e}");
                self.logout()?;
                match e {
                    ClientError::Unauthorized => Ok(None),
                    other => Err(other),
                }
            }
        }
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<User> {
        self.fetch("/auth/me").await
    }

    /// Re-fetch the current user into the session; logs out on failure
    pub async fn refresh_user(&self) -> ClientResult<User> {
        match self.me().await {
            Ok(user) => {
                self.session.update_user(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::error!("failed to refresh user data: {e}");
                self.logout()?;
                Err(e)
            }
        }
    }

    /// Update own profile, then refresh the cached user
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.send_put("/users/profile", update).await?;
        self.refresh_user().await
    }

    /// Change own password after local validation
    pub async fn change_password(&self, old_password: &str, new_password: &str, confirm: &str) -> ClientResult<()> {
        validate_password_change(new_password, confirm)?;
        let req = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.send_put("/users/profile/change-password", &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password_change("abcdef", "abcdeg"), Err(PasswordError::Mismatch));
        assert_eq!(validate_password_change("abc", "abc"), Err(PasswordError::TooShort(6)));
        assert!(validate_password_change("abcdef", "abcdef").is_ok());
        assert_eq!(
            PasswordError::TooShort(6).to_string(),
            "Password must be at least 6 characters long."
        );
    }
}
