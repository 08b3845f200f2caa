//! [`Connector`] over the TrainerDex V1 HTTP API.

use async_trait::async_trait;
use reqwest::{
    header::{AUTHORIZATION, USER_AGENT},
    Method,
};
use serde_json::Value;
use uuid::Uuid;

use super::{retry::RetryPolicy, Connector, LeaderboardPage, TrainerFilter};
use crate::{
    config::Config,
    error::Error,
    leaderboard::LeaderboardScope,
    model::{
        expect_record, expect_records,
        id::{TrainerId, UserId},
        Record,
    },
};

const API_PREFIX: &str = "api/v1/";

/// HTTP transport for the V1 API.
///
/// Sends JSON bodies, authenticates with `Authorization: Token <token>` when a token
/// is configured and retries 500/502 responses and dropped connections with
/// exponential backoff.
#[derive(Clone)]
pub struct HttpConnector {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    user_agent: String,
    retry: RetryPolicy,
}

impl HttpConnector {
    /// Creates a connector for the service at `host`.
    ///
    /// # Arguments
    /// - `host` - Service root, e.g. `https://trainerdex.app/`
    /// - `token` - Optional API token
    pub fn new(host: &str, token: Option<String>) -> Self {
        let defaults = Config::default();
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/{}", host.trim_end_matches('/'), API_PREFIX),
            token: token.filter(|token| !token.is_empty()),
            user_agent: defaults.user_agent,
            retry: RetryPolicy {
                max_attempts: defaults.max_attempts,
                initial_backoff: defaults.initial_backoff,
            },
        }
    }

    /// Creates a connector from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.host, config.token.clone())
            .with_user_agent(config.user_agent.clone())
            .with_retry(RetryPolicy {
                max_attempts: config.max_attempts,
                initial_backoff: config.initial_backoff,
            })
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL every route is appended to, ending in `/api/v1/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Record>,
    ) -> Result<Value, Error> {
        let description = format!("{method} {path}");
        self.retry
            .execute(&description, move || {
                self.send(method.clone(), path, query, body)
            })
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Record>,
    ) -> Result<Value, Error> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(USER_AGENT, &self.user_agent);
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("{} {} has returned {}", method, url, status);

        if !status.is_success() {
            return Err(Error::from_status(status, text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get_one(&self, path: &str) -> Result<Record, Error> {
        expect_record(self.request(Method::GET, path, &[], None).await?)
    }

    async fn get_many(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Record>, Error> {
        expect_records(self.request(Method::GET, path, query, None).await?)
    }

    async fn send_record(
        &self,
        method: Method,
        path: &str,
        payload: &Record,
    ) -> Result<Record, Error> {
        expect_record(self.request(method, path, &[], Some(payload)).await?)
    }
}

impl std::fmt::Debug for HttpConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnector")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Builds a connector for `(host, token)`, an empty token meaning anonymous access.
impl From<(String, String)> for HttpConnector {
    fn from((host, token): (String, String)) -> Self {
        Self::new(&host, Some(token))
    }
}

fn leaderboard_path(stat: &str, scope: &LeaderboardScope) -> String {
    let prefix = match scope {
        LeaderboardScope::Global => "v1.1".to_string(),
        LeaderboardScope::Guild(guild_id) => format!("discord/{guild_id}"),
        LeaderboardScope::Community(community) => format!("community/{community}"),
        LeaderboardScope::Country(country_code) => format!("country/{country_code}"),
    };
    format!("leaderboard/{prefix}/{stat}/")
}

fn take_string(object: &mut Record, key: &str) -> Option<String> {
    match object.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn get_trainer(&self, id: TrainerId) -> Result<Record, Error> {
        self.get_one(&format!("trainers/{id}/")).await
    }

    async fn get_trainers(&self, filter: &TrainerFilter) -> Result<Vec<Record>, Error> {
        let mut query = Vec::new();
        if let Some(faction) = filter.faction {
            query.push(("t", faction.id().to_string()));
        }
        if let Some(q) = &filter.query {
            query.push(("q", q.clone()));
        }
        self.get_many("trainers/", &query).await
    }

    async fn create_trainer(&self, payload: Record) -> Result<Record, Error> {
        self.send_record(Method::POST, "trainers/", &payload).await
    }

    async fn edit_trainer(&self, id: TrainerId, payload: Record) -> Result<Record, Error> {
        self.send_record(Method::PATCH, &format!("trainers/{id}/"), &payload)
            .await
    }

    async fn get_update(&self, trainer: TrainerId, update: Uuid) -> Result<Record, Error> {
        self.get_one(&format!("trainers/{trainer}/updates/{update}/"))
            .await
    }

    async fn get_updates_for_trainer(&self, trainer: TrainerId) -> Result<Vec<Record>, Error> {
        self.get_many(&format!("trainers/{trainer}/updates/"), &[])
            .await
    }

    async fn create_update(&self, trainer: TrainerId, payload: Record) -> Result<Record, Error> {
        self.send_record(
            Method::POST,
            &format!("trainers/{trainer}/updates/"),
            &payload,
        )
        .await
    }

    async fn edit_update(
        &self,
        trainer: TrainerId,
        update: Uuid,
        mut payload: Record,
    ) -> Result<Record, Error> {
        // The service validates the owning trainer on every patch.
        payload.insert("trainer".to_string(), Value::from(trainer.0));
        self.send_record(
            Method::PATCH,
            &format!("trainers/{trainer}/updates/{update}/"),
            &payload,
        )
        .await
    }

    async fn get_user(&self, id: UserId) -> Result<Record, Error> {
        self.get_one(&format!("users/{id}/")).await
    }

    async fn get_users(&self) -> Result<Vec<Record>, Error> {
        self.get_many("users/", &[]).await
    }

    async fn create_user(&self, payload: Record) -> Result<Record, Error> {
        self.send_record(Method::POST, "users/", &payload).await
    }

    async fn edit_user(&self, id: UserId, payload: Record) -> Result<Record, Error> {
        self.send_record(Method::PATCH, &format!("users/{id}/"), &payload)
            .await
    }

    async fn get_social_connections(
        &self,
        provider: &str,
        uids: &[String],
    ) -> Result<Vec<Record>, Error> {
        let query = [("provider", provider.to_string()), ("uid", uids.join(","))];
        self.get_many("users/social/", &query).await
    }

    async fn get_social_connections_for_user(&self, user: UserId) -> Result<Vec<Record>, Error> {
        self.get_many("users/social/", &[("user", user.to_string())])
            .await
    }

    async fn create_social_connection(&self, payload: Record) -> Result<Record, Error> {
        self.send_record(Method::PUT, "users/social/", &payload)
            .await
    }

    async fn get_leaderboard(
        &self,
        stat: &str,
        scope: &LeaderboardScope,
    ) -> Result<LeaderboardPage, Error> {
        let path = leaderboard_path(stat, scope);

        match self.request(Method::GET, &path, &[], None).await? {
            // Older boards are a bare list of rows.
            rows @ Value::Array(_) => Ok(LeaderboardPage {
                entries: expect_records(rows)?,
                ..Default::default()
            }),
            other => {
                let mut object = expect_record(other)?;
                let rows = object.remove("leaderboard").unwrap_or(Value::Null);
                let entries = expect_records(rows)?;
                let aggregations = match object.remove("aggregations") {
                    Some(Value::Null) | None => None,
                    Some(value) => Some(expect_record(value)?),
                };
                Ok(LeaderboardPage {
                    entries,
                    aggregations,
                    title: take_string(&mut object, "title"),
                    stat: take_string(&mut object, "stat"),
                })
            }
        }
    }
}
