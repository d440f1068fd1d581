use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::{
    api::ApiClient,
    error::AppError,
    models::{Operator, OperatorAddon},
};

/// Where one record list stands. A failed list is absent, not empty.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(Arc<Vec<T>>),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Idle | LoadState::Loading)
    }

    pub fn records(&self) -> Option<&Arc<Vec<T>>> {
        match self {
            LoadState::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn from_result(result: Result<Arc<Vec<T>>, AppError>) -> Self {
        match result {
            Ok(records) => LoadState::Ready(records),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }

    fn status(&self) -> ListStatus {
        match self {
            LoadState::Idle => ListStatus::Idle,
            LoadState::Loading => ListStatus::Loading,
            LoadState::Ready(records) => ListStatus::Ready {
                records: records.len(),
            },
            LoadState::Failed(message) => ListStatus::Failed {
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ListStatus {
    Idle,
    Loading,
    Ready { records: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedStatus {
    pub operators: ListStatus,
    pub addons: ListStatus,
    pub loading: bool,
}

/// Both lists as observed at one instant.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub operators: LoadState<Operator>,
    pub addons: LoadState<OperatorAddon>,
}

impl FeedSnapshot {
    /// True while either list has not resolved yet.
    pub fn is_loading(&self) -> bool {
        self.operators.is_pending() || self.addons.is_pending()
    }

    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(message) = self.operators.error() {
            errors.push(format!("operators: {}", message));
        }
        if let Some(message) = self.addons.error() {
            errors.push(format!("addons: {}", message));
        }
        errors
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus {
            operators: self.operators.status(),
            addons: self.addons.status(),
            loading: self.is_loading(),
        }
    }
}

pub struct RecordFeed {
    operators: Mutex<LoadState<Operator>>,
    addons: Mutex<LoadState<OperatorAddon>>,
}

impl Default for RecordFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFeed {
    pub fn new() -> Self {
        Self {
            operators: Mutex::new(LoadState::Idle),
            addons: Mutex::new(LoadState::Idle),
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            operators: self.operators.lock().clone(),
            addons: self.addons.lock().clone(),
        }
    }

    /// Fetches both lists concurrently. Each list settles on its own; a
    /// failure in one leaves the other usable. Nothing is retried.
    ///
    /// A list that already holds records keeps showing them until the new
    /// result lands.
    pub async fn refresh(&self, client: &ApiClient) -> FeedSnapshot {
        mark_loading(&self.operators);
        mark_loading(&self.addons);

        let (operators, addons) = tokio::join!(client.fetch_operators(), client.fetch_addons());

        if let Err(err) = &operators {
            tracing::warn!("operator fetch failed: {}", err);
        }
        if let Err(err) = &addons {
            tracing::warn!("addon fetch failed: {}", err);
        }
        *self.operators.lock() = LoadState::from_result(operators);
        *self.addons.lock() = LoadState::from_result(addons);
        self.snapshot()
    }
}

fn mark_loading<T>(list: &Mutex<LoadState<T>>) {
    let mut guard = list.lock();
    if guard.records().is_none() {
        *guard = LoadState::Loading;
    }
}
