use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::dao::{kv::KeyValueStore, storage::StorageResult};

use super::{
    config::KvConfig,
    error::{KvError, KvResult},
};

/// Key-value client speaking the Redis-over-HTTP command protocol: each call
/// POSTs a JSON array `[COMMAND, key, args...]` and reads `{"result": ...}`.
///
/// Documents are stored as JSON strings so other clients of the same database
/// read them back unchanged.
#[derive(Clone)]
pub struct RestKvStore {
    client: Client,
    base_url: Arc<str>,
    token: Arc<str>,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl RestKvStore {
    /// Build the HTTP client. No request is sent until the first command.
    pub fn connect(config: KvConfig) -> KvResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| KvError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            token: Arc::from(config.token),
        })
    }

    async fn command(&self, command: &'static str, key: &str, args: Vec<Value>) -> KvResult<Value> {
        let mut body = Vec::with_capacity(args.len() + 2);
        body.push(Value::from(command));
        if !key.is_empty() {
            body.push(Value::from(key));
        }
        body.extend(args);

        let response = self
            .client
            .post(&*self.base_url)
            .bearer_auth(&*self.token)
            .json(&body)
            .send()
            .await
            .map_err(|source| KvError::RequestSend {
                command,
                key: key.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<CommandResponse>()
                .await
                .ok()
                .and_then(|payload| payload.error)
                .unwrap_or_default();
            return Err(KvError::RequestStatus {
                command,
                key: key.to_owned(),
                status,
                message,
            });
        }

        let payload =
            response
                .json::<CommandResponse>()
                .await
                .map_err(|source| KvError::DecodeResponse {
                    command,
                    key: key.to_owned(),
                    source,
                })?;

        if let Some(message) = payload.error {
            return Err(KvError::Command {
                command,
                key: key.to_owned(),
                message,
            });
        }

        Ok(payload.result.unwrap_or(Value::Null))
    }

    async fn integer(&self, command: &'static str, key: &str, args: Vec<Value>) -> KvResult<i64> {
        let result = self.command(command, key, args).await?;
        result.as_i64().ok_or_else(|| KvError::UnexpectedResult {
            command,
            key: key.to_owned(),
            result: result.to_string(),
        })
    }

    async fn get_value(&self, key: &str) -> KvResult<Option<Value>> {
        match self.command("GET", key, Vec::new()).await? {
            Value::Null => Ok(None),
            Value::String(raw) => {
                Ok(Some(serde_json::from_str(&raw).unwrap_or(Value::String(raw))))
            }
            other => Ok(Some(other)),
        }
    }

    async fn set_value(&self, key: &str, value: Value) -> KvResult<()> {
        self.command("SET", key, vec![Value::String(value.to_string())])
            .await
            .map(|_| ())
    }

    async fn list_values(&self, key: &str) -> KvResult<Vec<String>> {
        let result = self
            .command("LRANGE", key, vec![Value::from(0), Value::from(-1)])
            .await?;

        match result {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items
                .into_iter()
                .map(|item| match item {
                    Value::String(member) => member,
                    other => other.to_string(),
                })
                .collect()),
            other => Err(KvError::UnexpectedResult {
                command: "LRANGE",
                key: key.to_owned(),
                result: other.to_string(),
            }),
        }
    }
}

impl KeyValueStore for RestKvStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let store = self.clone();
        let key = key.to_owned();
        Box::pin(async move { store.get_value(&key).await.map_err(Into::into) })
    }

    fn set(&self, key: &str, value: Value) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let key = key.to_owned();
        Box::pin(async move { store.set_value(&key, value).await.map_err(Into::into) })
    }

    fn delete(&self, key: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            let removed = store.integer("DEL", &key, Vec::new()).await?;
            Ok(removed > 0)
        })
    }

    fn push_front(&self, key: &str, member: &str) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let key = key.to_owned();
        let member = member.to_owned();
        Box::pin(async move {
            store
                .integer("LPUSH", &key, vec![Value::String(member)])
                .await?;
            Ok(())
        })
    }

    fn list(&self, key: &str) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        let key = key.to_owned();
        Box::pin(async move { store.list_values(&key).await.map_err(Into::into) })
    }

    fn remove_from_list(
        &self,
        key: &str,
        member: &str,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let key = key.to_owned();
        let member = member.to_owned();
        Box::pin(async move {
            let removed = store
                .integer("LREM", &key, vec![Value::from(1), Value::String(member)])
                .await?;
            Ok(removed > 0)
        })
    }

    fn list_len(&self, key: &str) -> BoxFuture<'static, StorageResult<usize>> {
        let store = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            let len = store.integer("LLEN", &key, Vec::new()).await?;
            Ok(usize::try_from(len).unwrap_or(0))
        })
    }

    fn ping(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.command("PING", "", Vec::new()).await?;
            Ok(())
        })
    }
}
