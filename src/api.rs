use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::AppError,
    models::{Operator, OperatorAddon},
    value_utils::FromRawRecord,
};

pub const OPERATOR_PATH: &str = "/operator";
pub const OPERATOR_ADDON_PATH: &str = "/operatorAddon";

/// Outcome of checking a payload against the record schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(Vec<T>),
    /// The payload did not match; records are recovered leniently from `raw`.
    Fallback { raw: Vec<Value>, reason: String },
}

impl<T: DeserializeOwned + FromRawRecord> Validated<T> {
    pub fn check(payload: Value) -> Self {
        let raw = match payload {
            Value::Array(items) => items,
            other => {
                return Validated::Fallback {
                    raw: Vec::new(),
                    reason: format!("expected a JSON array, got {}", json_kind(&other)),
                }
            }
        };
        match raw
            .iter()
            .map(|item| serde_json::from_value::<T>(item.clone()))
            .collect::<Result<Vec<T>, _>>()
        {
            Ok(records) => Validated::Valid(records),
            Err(err) => Validated::Fallback {
                raw,
                reason: err.to_string(),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn into_records(self) -> Vec<T> {
        match self {
            Validated::Valid(records) => records,
            Validated::Fallback { raw, .. } => raw.iter().map(T::from_raw).collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Holds the last successful result for `ttl`. Failures are never stored.
///
/// `refill` serialises misses: only one caller fetches at a time, and callers
/// queued behind it see the value it stored.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(Instant, Arc<Vec<T>>)>>,
    refill: tokio::sync::Mutex<()>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
            refill: tokio::sync::Mutex::new(()),
        }
    }

    pub fn get(&self) -> Option<Arc<Vec<T>>> {
        self.get_at(Instant::now())
    }

    pub fn get_at(&self, now: Instant) -> Option<Arc<Vec<T>>> {
        let guard = self.slot.lock();
        match guard.as_ref() {
            Some((stored, value)) if now.saturating_duration_since(*stored) < self.ttl => {
                Some(Arc::clone(value))
            }
            _ => None,
        }
    }

    pub fn put(&self, value: Arc<Vec<T>>) {
        self.put_at(Instant::now(), value);
    }

    pub fn put_at(&self, now: Instant, value: Arc<Vec<T>>) {
        *self.slot.lock() = Some((now, value));
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}

/// Reads the two record lists from the mock REST backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    operators: TtlCache<Operator>,
    addons: TtlCache<OperatorAddon>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            operators: TtlCache::new(config.cache_ttl()),
            addons: TtlCache::new(config.cache_ttl()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_operators(&self) -> Result<Arc<Vec<Operator>>, AppError> {
        self.fetch_cached(OPERATOR_PATH, &self.operators).await
    }

    pub async fn fetch_addons(&self) -> Result<Arc<Vec<OperatorAddon>>, AppError> {
        self.fetch_cached(OPERATOR_ADDON_PATH, &self.addons).await
    }

    /// Drops cached results so the next fetch goes to the network.
    pub fn invalidate(&self) {
        self.operators.invalidate();
        self.addons.invalidate();
    }

    async fn fetch_cached<T>(
        &self,
        path: &str,
        cache: &TtlCache<T>,
    ) -> Result<Arc<Vec<T>>, AppError>
    where
        T: DeserializeOwned + FromRawRecord,
    {
        if let Some(hit) = cache.get() {
            tracing::debug!(path, records = hit.len(), "serving cached records");
            return Ok(hit);
        }
        let _refill = cache.refill.lock().await;
        if let Some(hit) = cache.get() {
            tracing::debug!(path, records = hit.len(), "joined in-flight fetch");
            return Ok(hit);
        }
        let validated = self.fetch_validated::<T>(path).await?;
        if let Validated::Fallback { reason, raw } = &validated {
            tracing::warn!(path, records = raw.len(), "record validation failed: {}", reason);
        }
        let records = Arc::new(validated.into_records());
        cache.put(Arc::clone(&records));
        Ok(records)
    }

    pub async fn fetch_validated<T>(&self, path: &str) -> Result<Validated<T>, AppError>
    where
        T: DeserializeOwned + FromRawRecord,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!(%url, "fetching records");
        let payload: Value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let validated = Validated::check(payload);
        tracing::info!(%url, valid = validated.is_valid(), "records received");
        Ok(validated)
    }
}
