//! View model handed to the UI: headers, cells, body state and pagination.

use serde::Serialize;

use crate::{
    addons::{build_columns_pinned, build_dictionary, AddonDictionary},
    config::TableConfig,
    feed::FeedSnapshot,
    models::{Operator, SortOrder, TableSort, TableState},
    projection::{project, SortColumn},
    timestamps::{format_display, PLACEHOLDER},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Set only on the column the table is currently sorted by.
    pub sorted: Option<SortOrder>,
}

impl ColumnSpec {
    fn new(key: impl Into<String>, label: impl Into<String>, sortable: bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable,
            sorted: None,
        }
    }
}

/// `#`, user, working flag, join date, then one column per addon field name.
pub fn table_columns(addon_columns: &[String], sort: &TableSort) -> Vec<ColumnSpec> {
    let mut columns = vec![
        ColumnSpec::new("#", "#", false),
        ColumnSpec::new("user", "Користувач", true),
        ColumnSpec::new("isWorking", "Працює", true),
        ColumnSpec::new("createdAt", "Дата доєднання", true),
    ];
    columns.extend(
        addon_columns
            .iter()
            .map(|name| ColumnSpec::new(SortColumn::addon_key(name), format!("`{}`", name), true)),
    );
    for column in &mut columns {
        if column.sortable && column.key == sort.order_by {
            column.sorted = Some(sort.order);
        }
    }
    columns
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Cell {
    Index { number: usize },
    User { name: String, avatar: String },
    Working { checked: bool },
    Date { display: String, raw: String },
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<Cell>,
}

/// Cells for one operator. Addon cells come from the global dictionary, so
/// every row shows the same value for a given addon column.
pub fn row_cells(
    op: &Operator,
    number: usize,
    addon_columns: &[String],
    dict: &AddonDictionary,
) -> Vec<Cell> {
    let mut cells = vec![
        Cell::Index { number },
        Cell::User {
            name: op.name.clone(),
            avatar: op.avatar.clone(),
        },
        Cell::Working {
            checked: op.is_working,
        },
        Cell::Date {
            display: format_display(&op.created_at),
            raw: op.created_at.clone(),
        },
    ];
    cells.extend(addon_columns.iter().map(|name| Cell::Text {
        text: dict
            .get(name)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }));
    cells
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TableBody {
    Loading,
    Failed { errors: Vec<String> },
    Empty,
    Rows { rows: Vec<TableRow> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub count: usize,
    pub page: i64,
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<ColumnSpec>,
    pub body: TableBody,
    pub pagination: Pagination,
    pub state: TableState,
}

/// Builds everything the table needs for one frame. Rows are projected only
/// once both lists have resolved successfully.
pub fn render_table(feed: &FeedSnapshot, state: &TableState, config: &TableConfig) -> TableView {
    let addons = feed.addons.records().map(|a| a.as_slice()).unwrap_or_default();
    let addon_columns = build_columns_pinned(addons, &config.pinned_columns);
    let dict = build_dictionary(addons);
    let columns = table_columns(&addon_columns, &state.sort);

    let mut count = 0;
    let body = if feed.is_loading() {
        TableBody::Loading
    } else {
        let errors = feed.errors();
        match feed.operators.records() {
            Some(operators) if errors.is_empty() => {
                let projection = project(operators, &dict, &addon_columns, state);
                count = projection.total_count;
                let first = usize::try_from(state.page)
                    .unwrap_or_default()
                    .saturating_mul(state.rows_per_page);
                let rows: Vec<TableRow> = projection
                    .page_rows
                    .iter()
                    .enumerate()
                    .map(|(idx, op)| TableRow {
                        id: op.id.clone(),
                        cells: row_cells(op, first + idx + 1, &addon_columns, &dict),
                    })
                    .collect();
                if rows.is_empty() {
                    TableBody::Empty
                } else {
                    TableBody::Rows { rows }
                }
            }
            _ => TableBody::Failed { errors },
        }
    };

    TableView {
        columns,
        body,
        pagination: Pagination {
            count,
            page: state.page,
            rows_per_page: state.rows_per_page,
            rows_per_page_options: config.rows_per_page_options.clone(),
        },
        state: state.clone(),
    }
}
