use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    addons::{build_columns_pinned, build_dictionary},
    api::ApiClient,
    config::{AppConfig, TableConfig},
    error::AppError,
    export::export_csv_file,
    feed::{FeedStatus, RecordFeed},
    models::{SortOrder, TableFilters, TableSort, TableState, WorkingFilter},
    projection::filter_and_sort,
    table::{render_table, TableView},
};

/// The seven table-state operations, in a form the UI can send as one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TableAction {
    SetPage(i64),
    SetRowsPerPage(usize),
    SetSort(TableSort),
    SetSearch(String),
    SetWorking(WorkingFilter),
    SetDateFrom(Option<String>),
    SetDateTo(Option<String>),
}

fn normalize_bound(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TableState {
    pub fn with_config(table: &TableConfig) -> Self {
        Self {
            page: 0,
            rows_per_page: table.rows_per_page,
            sort: table.default_sort.clone(),
            filters: TableFilters::default(),
        }
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: TableSort) {
        self.sort = sort;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.page = 0;
    }

    pub fn set_working(&mut self, working: WorkingFilter) {
        self.filters.working = working;
        self.page = 0;
    }

    pub fn set_date_from(&mut self, date_from: Option<String>) {
        self.filters.date_from = normalize_bound(date_from);
        self.page = 0;
    }

    pub fn set_date_to(&mut self, date_to: Option<String>) {
        self.filters.date_to = normalize_bound(date_to);
        self.page = 0;
    }

    /// Header-click behaviour: ascending on a new column, flip on the same one.
    pub fn toggle_sort(&mut self, order_by: &str) {
        let is_asc = self.sort.order_by == order_by && self.sort.order == SortOrder::Asc;
        let order = if is_asc { SortOrder::Desc } else { SortOrder::Asc };
        self.set_sort(TableSort::new(order_by, order));
    }

    pub fn apply(&mut self, action: TableAction) {
        match action {
            TableAction::SetPage(page) => self.set_page(page),
            TableAction::SetRowsPerPage(rows) => self.set_rows_per_page(rows),
            TableAction::SetSort(sort) => self.set_sort(sort),
            TableAction::SetSearch(search) => self.set_search(search),
            TableAction::SetWorking(working) => self.set_working(working),
            TableAction::SetDateFrom(date) => self.set_date_from(date),
            TableAction::SetDateTo(date) => self.set_date_to(date),
        }
    }
}

/// Single owner of the session's [`TableState`]. Each operation replaces the
/// state under the lock, so readers never see a half-applied update.
pub struct ViewStore {
    inner: Mutex<TableState>,
}

impl ViewStore {
    pub fn new(initial: TableState) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    pub fn snapshot(&self) -> TableState {
        self.inner.lock().clone()
    }

    pub fn dispatch(&self, action: TableAction) -> TableState {
        tracing::debug!(?action, "table action");
        let mut guard = self.inner.lock();
        guard.apply(action);
        guard.clone()
    }

    pub fn toggle_sort(&self, order_by: &str) -> TableState {
        let mut guard = self.inner.lock();
        guard.toggle_sort(order_by);
        tracing::debug!(sort = ?guard.sort, "sort toggled");
        guard.clone()
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub client: ApiClient,
    pub feed: RecordFeed,
    pub view: ViewStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let client = ApiClient::new(&config.api)?;
        let view = ViewStore::new(TableState::with_config(&config.table));
        Ok(Self {
            config,
            client,
            feed: RecordFeed::new(),
            view,
        })
    }

    /// Fetches both lists; `force` bypasses the result cache.
    pub async fn load_records(&self, force: bool) -> FeedStatus {
        if force {
            self.client.invalidate();
        }
        self.feed.refresh(&self.client).await.status()
    }

    pub fn table_view(&self) -> TableView {
        render_table(&self.feed.snapshot(), &self.view.snapshot(), &self.config.table)
    }

    /// Writes the filtered and sorted rows (all pages) to `destination`.
    pub fn export_table(&self, destination: &Path) -> Result<usize, AppError> {
        let feed = self.feed.snapshot();
        let (Some(operators), Some(addons)) = (feed.operators.records(), feed.addons.records())
        else {
            return Err(AppError::Message("Records are not loaded.".into()));
        };
        let state = self.view.snapshot();
        let addon_columns = build_columns_pinned(addons, &self.config.table.pinned_columns);
        let dict = build_dictionary(addons);
        let rows = filter_and_sort(operators, &dict, &state);
        export_csv_file(destination, &rows, &addon_columns, &dict)?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged_state() -> TableState {
        let mut state = TableState::default();
        state.set_page(4);
        state
    }

    #[test]
    fn filter_and_page_size_changes_reset_page() {
        let actions = vec![
            TableAction::SetRowsPerPage(25),
            TableAction::SetSearch("ann".into()),
            TableAction::SetWorking(WorkingFilter::NotWorking),
            TableAction::SetDateFrom(Some("2023-01-01T00:00".into())),
            TableAction::SetDateTo(None),
        ];
        for action in actions {
            let mut state = paged_state();
            state.apply(action.clone());
            assert_eq!(state.page, 0, "{:?} should reset the page", action);
        }
    }

    #[test]
    fn page_and_sort_changes_keep_filters() {
        let mut state = TableState::default();
        state.set_search("bob");
        state.set_working(WorkingFilter::Working);
        state.set_page(3);
        state.set_sort(TableSort::new("user", SortOrder::Asc));
        assert_eq!(state.page, 3);
        assert_eq!(state.filters.search, "bob");
        assert_eq!(state.filters.working, WorkingFilter::Working);
    }

    #[test]
    fn blank_date_bounds_become_null() {
        let mut state = TableState::default();
        state.set_date_from(Some("  ".into()));
        state.set_date_to(Some(String::new()));
        assert_eq!(state.filters.date_from, None);
        assert_eq!(state.filters.date_to, None);
    }

    #[test]
    fn toggle_sort_flips_only_same_ascending_column() {
        let mut state = TableState::default();
        assert_eq!(state.sort, TableSort::new("createdAt", SortOrder::Desc));

        state.toggle_sort("createdAt");
        assert_eq!(state.sort, TableSort::new("createdAt", SortOrder::Asc));
        state.toggle_sort("createdAt");
        assert_eq!(state.sort, TableSort::new("createdAt", SortOrder::Desc));
        state.toggle_sort("user");
        assert_eq!(state.sort, TableSort::new("user", SortOrder::Asc));
    }

    #[test]
    fn actions_deserialize_from_ui_messages() {
        let action: TableAction =
            serde_json::from_str(r#"{"type":"setWorking","payload":"not_working"}"#).unwrap();
        assert_eq!(action, TableAction::SetWorking(WorkingFilter::NotWorking));

        let action: TableAction =
            serde_json::from_str(r#"{"type":"setDateTo","payload":null}"#).unwrap();
        assert_eq!(action, TableAction::SetDateTo(None));

        let action: TableAction =
            serde_json::from_str(r#"{"type":"setPage","payload":-1}"#).unwrap();
        assert_eq!(action, TableAction::SetPage(-1));
    }

    #[test]
    fn export_requires_loaded_records() {
        let app = AppState::new(AppConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("operators.csv");
        let err = app.export_table(&dest).unwrap_err();
        assert_eq!(err.to_string(), "Records are not loaded.");
        assert_eq!(app.table_view().body, crate::table::TableBody::Loading);
        assert!(!dest.exists());
    }

    #[test]
    fn store_dispatch_returns_new_state() {
        let config = TableConfig {
            rows_per_page: 5,
            ..TableConfig::default()
        };
        let store = ViewStore::new(TableState::with_config(&config));
        assert_eq!(store.snapshot().rows_per_page, 5);

        store.dispatch(TableAction::SetPage(2));
        let state = store.dispatch(TableAction::SetSearch("x".into()));
        assert_eq!(state.page, 0);
        assert_eq!(store.snapshot(), state);

        let state = store.toggle_sort("isWorking");
        assert_eq!(state.sort, TableSort::new("isWorking", SortOrder::Asc));
    }
}
