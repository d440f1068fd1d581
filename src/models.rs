use serde::{Deserialize, Serialize};

/// One operator record as served by `GET {base}/operator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub is_working: bool,
    /// ISO-8601 expected, not guaranteed.
    pub created_at: String,
}

/// One named attribute from `GET {base}/operatorAddon`. Addons are a global
/// dictionary keyed by `field_name`; they carry no operator reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorAddon {
    pub id: String,
    pub field_name: String,
    pub text: String,
    pub is_checked: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingFilter {
    #[default]
    All,
    Working,
    NotWorking,
}

impl WorkingFilter {
    pub fn matches(self, is_working: bool) -> bool {
        match self {
            WorkingFilter::All => true,
            WorkingFilter::Working => is_working,
            WorkingFilter::NotWorking => !is_working,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSort {
    pub order_by: String,
    pub order: SortOrder,
}

impl TableSort {
    pub fn new(order_by: impl Into<String>, order: SortOrder) -> Self {
        Self {
            order_by: order_by.into(),
            order,
        }
    }
}

impl Default for TableSort {
    fn default() -> Self {
        Self::new("createdAt", SortOrder::Desc)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFilters {
    pub search: String,
    pub working: WorkingFilter,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

/// Session-local table state. Mutated only through the operations in
/// [`crate::state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Zero-based and signed: any integer the UI sends is kept, and one outside
    /// the row range selects an empty page.
    pub page: i64,
    pub rows_per_page: usize,
    pub sort: TableSort,
    pub filters: TableFilters,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: 10,
            sort: TableSort::default(),
            filters: TableFilters::default(),
        }
    }
}
