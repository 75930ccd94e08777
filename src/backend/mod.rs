pub mod auth;
pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::Error;
use crate::models::{Session, SortKey, Task, TaskPatch};

pub use auth::{AuthApi, SignUpOutcome};

/// Table API for the `tasks` table. Every call is scoped to the
/// authenticated user; `update` and `delete` additionally scope by row id
/// so one user can never touch another's rows even with a forged id.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Full user-scoped list, pinned rows first, then `sort` descending.
    async fn list(&self, session: &Session, sort: SortKey) -> Result<Vec<Task>, Error>;
    async fn insert(&self, session: &Session, task: &dto::InsertTask) -> Result<Task, Error>;
    async fn update(&self, session: &Session, id: Uuid, patch: &TaskPatch) -> Result<Task, Error>;
    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), Error>;
    /// Removes every row the user owns. Only the account-deletion flow
    /// calls this.
    async fn delete_all(&self, session: &Session) -> Result<(), Error>;
}

/// HTTP client for the hosted backend. One instance serves both the
/// table API (here) and the auth API (`backend::auth`).
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Project key plus the caller's bearer token, as the table and auth
    /// surfaces both expect.
    pub(crate) fn authed(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", access_token))
    }

    /// Key-only headers, for calls made before a session exists.
    pub(crate) fn keyed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.api_key)
    }

    fn tasks_url(&self) -> String {
        self.config.rest_url("tasks")
    }
}

/// Maps a non-success response to `Error::Api`, pulling the message out
/// of the body when the backend sent one.
pub(crate) async fn check(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("request rejected")
        .to_string();
    let body = response
        .json::<dto::ApiErrorBody>()
        .await
        .unwrap_or_default();

    Err(Error::Api {
        status: status.as_u16(),
        message: body.into_message(&fallback),
    })
}

#[async_trait]
impl TaskApi for HttpBackend {
    async fn list(&self, session: &Session, sort: SortKey) -> Result<Vec<Task>, Error> {
        let owner = format!("eq.{}", session.user_id());
        let order = format!("pinned.desc,{}.desc", sort.column());
        let request = self.client.get(self.tasks_url()).query(&[
            ("select", "*"),
            ("user_id", owner.as_str()),
            ("order", order.as_str()),
        ]);

        let response = self.authed(request, &session.access_token).send().await?;
        let tasks = check(response).await?.json::<Vec<Task>>().await?;
        Ok(tasks)
    }

    async fn insert(&self, session: &Session, task: &dto::InsertTask) -> Result<Task, Error> {
        let request = self
            .client
            .post(self.tasks_url())
            .header("Prefer", "return=representation")
            .json(task);

        let response = self.authed(request, &session.access_token).send().await?;
        let mut rows = check(response).await?.json::<Vec<Task>>().await?;
        // return=representation answers with the inserted rows as an array
        rows.pop().ok_or(Error::Api {
            status: 500,
            message: "Insert returned no representation".to_string(),
        })
    }

    async fn update(&self, session: &Session, id: Uuid, patch: &TaskPatch) -> Result<Task, Error> {
        let row = format!("eq.{}", id);
        let owner = format!("eq.{}", session.user_id());
        let request = self
            .client
            .patch(self.tasks_url())
            .query(&[("id", row.as_str()), ("user_id", owner.as_str())])
            .header("Prefer", "return=representation")
            .json(patch);

        let response = self.authed(request, &session.access_token).send().await?;
        let mut rows = check(response).await?.json::<Vec<Task>>().await?;
        // An empty array means the predicate matched nothing: wrong id or
        // a row the user does not own.
        rows.pop().ok_or(Error::TaskNotFound(id))
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), Error> {
        let row = format!("eq.{}", id);
        let owner = format!("eq.{}", session.user_id());
        let request = self
            .client
            .delete(self.tasks_url())
            .query(&[("id", row.as_str()), ("user_id", owner.as_str())]);

        let response = self.authed(request, &session.access_token).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_all(&self, session: &Session) -> Result<(), Error> {
        let owner = format!("eq.{}", session.user_id());
        let request = self
            .client
            .delete(self.tasks_url())
            .query(&[("user_id", owner.as_str())]);

        let response = self.authed(request, &session.access_token).send().await?;
        check(response).await?;
        Ok(())
    }
}
