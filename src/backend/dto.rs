use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Priority, Session, TaskDraft, User};

/// Insert body for the tasks table. The backend fills `id`,
/// `created_at` and `updated_at` on the new row.
#[derive(Debug, Serialize)]
pub struct InsertTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    pub pinned: bool,
    pub archived: bool,
    pub due_date: Option<NaiveDate>,
}

impl InsertTask {
    pub fn from_draft(user_id: Uuid, draft: &TaskDraft) -> Self {
        Self {
            user_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            completed: draft.completed,
            pinned: draft.pinned,
            archived: draft.archived,
            due_date: draft.due_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserBody> for User {
    fn from(body: UserBody) -> Self {
        User {
            id: body.id,
            email: body.email,
            created_at: body.created_at,
        }
    }
}

/// Password and refresh grants answer with a full token set.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: UserBody,
}

impl TokenResponse {
    pub fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_at
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a token set when the deployment auto-confirms,
/// or with the bare user record (top-level fields) when a confirmation
/// email is on its way.
#[derive(Debug, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<UserBody>,
}

/// The backend spells its error field differently per surface; take
/// whichever is present.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self, fallback: &str) -> String {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_becomes_session() {
        let body = r#"{
            "access_token": "at",
            "refresh_token": "rt",
            "expires_at": 1770000000,
            "user": {
                "id": "5f6c40dc-72c2-4bd3-b0d0-9b3a4b3f8a11",
                "email": "you@example.com",
                "created_at": "2026-01-05T09:00:00Z"
            }
        }"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        let session = parsed.into_session();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.user.email, "you@example.com");
        assert!(session.expires_at.is_some());
    }

    #[test]
    fn error_body_prefers_first_present_field() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"msg": "bad key"}"#).unwrap();
        assert_eq!(body.into_message("fallback"), "bad key");

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message("fallback"), "fallback");
    }
}
