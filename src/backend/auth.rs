use async_trait::async_trait;
use tracing::warn;

use crate::error::Error;
use crate::models::{Session, User};

use super::{HttpBackend, check, dto};

/// What a sign-up produced. Deployments with email confirmation enabled
/// answer without a token set; the caller shows "check your inbox".
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired,
}

/// Auth API of the hosted backend. Sessions are minted and revoked here;
/// the rest of the crate only ever forwards them.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, Error>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error>;
    async fn sign_out(&self, session: &Session) -> Result<(), Error>;
    async fn refresh(&self, refresh_token: &str) -> Result<Session, Error>;
    async fn current_user(&self, session: &Session) -> Result<User, Error>;
    /// Remote procedure that erases the account itself. Not every
    /// deployment installs it; absence surfaces as a 404 `Error::Api`.
    async fn delete_user(&self, session: &Session) -> Result<(), Error>;
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, Error> {
        let body = dto::Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let request = self.client().post(self.config().auth_url("signup")).json(&body);
        let response = self.keyed(request).send().await?;
        let parsed = check(response).await?.json::<dto::SignUpResponse>().await?;

        match (parsed.access_token, parsed.refresh_token, parsed.user) {
            (Some(access_token), Some(refresh_token), Some(user)) => {
                Ok(SignUpOutcome::SignedIn(Session {
                    access_token,
                    refresh_token,
                    expires_at: parsed
                        .expires_at
                        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
                    user: user.into(),
                }))
            }
            _ => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let body = dto::Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let request = self
            .client()
            .post(self.config().auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&body);
        let response = self.keyed(request).send().await?;
        let parsed = check(response).await?.json::<dto::TokenResponse>().await?;
        Ok(parsed.into_session())
    }

    async fn sign_out(&self, session: &Session) -> Result<(), Error> {
        let request = self.client().post(self.config().auth_url("logout"));
        let response = self.authed(request, &session.access_token).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, Error> {
        let body = dto::RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let request = self
            .client()
            .post(self.config().auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&body);
        let response = self.keyed(request).send().await?;
        let parsed = check(response).await?.json::<dto::TokenResponse>().await?;
        Ok(parsed.into_session())
    }

    async fn current_user(&self, session: &Session) -> Result<User, Error> {
        let request = self.client().get(self.config().auth_url("user"));
        let response = self.authed(request, &session.access_token).send().await?;
        let parsed = check(response).await?.json::<dto::UserBody>().await?;
        Ok(parsed.into())
    }

    async fn delete_user(&self, session: &Session) -> Result<(), Error> {
        let request = self.client().post(self.config().rest_url("rpc/delete_user"));
        let response = self.authed(request, &session.access_token).send().await?;
        if let Err(err) = check(response).await {
            if err.is_not_found() {
                warn!("delete_user procedure not installed on this deployment");
            }
            return Err(err);
        }
        Ok(())
    }
}
