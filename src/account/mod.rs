//! Profile-page flows: the deletion confirmation gate and the
//! account-deletion sequence.

pub mod password;

use tracing::{error, info, warn};

use crate::backend::{AuthApi, TaskApi};
use crate::error::Error;
use crate::models::{Session, User};

pub use password::{PASSWORD_RULES, is_password_valid, password_checklist, validate_password};

/// The phrase the user must type before the destructive confirm button
/// becomes clickable.
pub const DELETE_CONFIRM_PHRASE: &str = "DELETE";

/// Exact match, no trimming or case folding. Anything else keeps the
/// confirm action disabled.
pub fn deletion_confirmed(input: &str) -> bool {
    input == DELETE_CONFIRM_PHRASE
}

/// How far the deletion got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountDeletion {
    /// Tasks and the account itself are gone.
    Deleted,
    /// Tasks are gone, but the deployment has no `delete_user`
    /// procedure: the user was signed out and must contact support to
    /// remove the account record.
    DataDeletedAccountRetained,
}

/// Deletes every task the user owns, then the account. When the backend
/// lacks the deletion procedure the flow falls back to a plain sign-out
/// rather than failing, so the user's data is at least gone.
pub async fn delete_account(
    auth: &dyn AuthApi,
    tasks: &dyn TaskApi,
    session: &Session,
) -> Result<AccountDeletion, Error> {
    tasks.delete_all(session).await.map_err(|err| {
        error!("Error deleting account data: {}", err);
        err
    })?;

    match auth.delete_user(session).await {
        Ok(()) => {
            info!("Account deleted for {}", session.user.email);
            Ok(AccountDeletion::Deleted)
        }
        // Transport failures abort; we cannot tell what state the
        // backend is in.
        Err(err @ Error::Http(_)) => Err(err),
        Err(err) => {
            warn!("delete_user unavailable ({}), signing out instead", err);
            auth.sign_out(session).await?;
            Ok(AccountDeletion::DataDeletedAccountRetained)
        }
    }
}

/// "Member Since" line on the profile card.
pub fn member_since(user: &User) -> String {
    user.created_at.format("%B %-d, %Y").to_string()
}
