use crate::{
    models::{Operator, TableFilters, WorkingFilter},
    timestamps::timestamp_millis,
};

/// Case-insensitive name substring. An empty needle matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || name.to_lowercase().contains(&self.needle)
    }
}

/// Inclusive createdAt window. Exists only while at least one bound is set.
///
/// A bound that fails to parse constrains nothing, but the window still
/// rejects rows whose own timestamp is unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: Option<i64>,
    to: Option<i64>,
}

impl DateRange {
    pub fn from_bounds(date_from: Option<&str>, date_to: Option<&str>) -> Option<Self> {
        let (from, to) = (active_bound(date_from), active_bound(date_to));
        if from.is_none() && to.is_none() {
            return None;
        }
        Some(Self {
            from: from.and_then(timestamp_millis),
            to: to.and_then(timestamp_millis),
        })
    }

    pub fn contains(&self, created_at: &str) -> bool {
        let Some(ts) = timestamp_millis(created_at) else {
            return false;
        };
        if self.from.is_some_and(|from| ts < from) {
            return false;
        }
        if self.to.is_some_and(|to| ts > to) {
            return false;
        }
        true
    }
}

fn active_bound(bound: Option<&str>) -> Option<&str> {
    bound.filter(|b| !b.trim().is_empty())
}

/// The three filter stages, compiled once per projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    name: NameQuery,
    working: WorkingFilter,
    dates: Option<DateRange>,
}

impl RowFilter {
    pub fn from_filters(filters: &TableFilters) -> Self {
        Self {
            name: NameQuery::new(&filters.search),
            working: filters.working,
            dates: DateRange::from_bounds(filters.date_from.as_deref(), filters.date_to.as_deref()),
        }
    }

    pub fn matches(&self, op: &Operator) -> bool {
        if !self.name.matches(&op.name) {
            return false;
        }
        if !self.working.matches(op.is_working) {
            return false;
        }
        match &self.dates {
            Some(range) => range.contains(&op.created_at),
            None => true,
        }
    }
}
