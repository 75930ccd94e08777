use std::env;

use crate::error::Error;

/// Connection settings for the hosted backend. `base_url` is the project
/// root (auth lives under `/auth/v1`, the table API under `/rest/v1`);
/// `api_key` is the project's public API key, sent on every request.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn new_from_env() -> Result<Self, Error> {
        let base_url = env::var("TASKFLOW_BACKEND_URL")
            .map_err(|_| Error::Config("TASKFLOW_BACKEND_URL is not set".to_string()))?;
        let api_key = env::var("TASKFLOW_API_KEY")
            .map_err(|_| Error::Config("TASKFLOW_API_KEY is not set".to_string()))?;

        Ok(Self::new(base_url, api_key))
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }
}
