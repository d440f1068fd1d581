use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    addons::AddonDictionary,
    models::{Operator, SortOrder, TableSort, TableState},
    search::RowFilter,
    timestamps::timestamp_millis,
};

pub const ADDON_SORT_PREFIX: &str = "addon:";

/// What `sort.orderBy` refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortColumn {
    User,
    IsWorking,
    CreatedAt,
    Addon(String),
    /// No ordering signal; every row compares equal.
    Unknown,
}

impl SortColumn {
    pub fn parse(order_by: &str) -> Self {
        match order_by {
            "user" => SortColumn::User,
            "isWorking" => SortColumn::IsWorking,
            "createdAt" => SortColumn::CreatedAt,
            other => match other.strip_prefix(ADDON_SORT_PREFIX) {
                Some(field) => SortColumn::Addon(field.to_string()),
                None => SortColumn::Unknown,
            },
        }
    }

    pub fn addon_key(field_name: &str) -> String {
        format!("{}{}", ADDON_SORT_PREFIX, field_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(i64),
    Text(String),
}

fn sort_key(column: &SortColumn, op: &Operator, dict: &AddonDictionary) -> SortKey {
    match column {
        SortColumn::User => SortKey::Text(op.name.clone()),
        SortColumn::IsWorking => SortKey::Number(i64::from(op.is_working)),
        SortColumn::CreatedAt => SortKey::Number(timestamp_millis(&op.created_at).unwrap_or(0)),
        SortColumn::Addon(field) => SortKey::Text(
            dict.get(field)
                .map(|text| text.to_lowercase())
                .unwrap_or_default(),
        ),
        SortColumn::Unknown => SortKey::Text(String::new()),
    }
}

/// Sorts in place by the derived key of `sort.orderBy`.
pub fn sort_rows(rows: &mut [Operator], sort: &TableSort, dict: &AddonDictionary) {
    let column = SortColumn::parse(&sort.order_by);
    if column == SortColumn::Unknown {
        return;
    }
    rows.sort_by(|a, b| {
        let ord: Ordering = sort_key(&column, a, dict).cmp(&sort_key(&column, b, dict));
        match sort.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Filter stages followed by the sort. Not paginated.
pub fn filter_and_sort(
    operators: &[Operator],
    dict: &AddonDictionary,
    state: &TableState,
) -> Vec<Operator> {
    let filter = RowFilter::from_filters(&state.filters);
    let mut rows: Vec<Operator> = operators
        .iter()
        .filter(|op| filter.matches(op))
        .cloned()
        .collect();
    sort_rows(&mut rows, &state.sort, dict);
    rows
}

/// `rows[page*per_page .. page*per_page + per_page]`, clamped to bounds.
/// Negative pages are empty.
pub fn paginate<T>(rows: &[T], page: i64, rows_per_page: usize) -> &[T] {
    let Ok(page) = usize::try_from(page) else {
        return &rows[..0];
    };
    let start = page.saturating_mul(rows_per_page).min(rows.len());
    let end = start.saturating_add(rows_per_page).min(rows.len());
    &rows[start..end]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub page_rows: Vec<Operator>,
    /// Rows left after filtering, independent of page and sort.
    pub total_count: usize,
}

/// Filter, sort and slice `operators` for the current view.
///
/// `column_keys` are the addon columns shown beside the rows; they do not
/// influence which rows are selected.
pub fn project(
    operators: &[Operator],
    dict: &AddonDictionary,
    column_keys: &[String],
    state: &TableState,
) -> Projection {
    let rows = filter_and_sort(operators, dict, state);
    let total_count = rows.len();
    let page_rows = paginate(&rows, state.page, state.rows_per_page).to_vec();
    tracing::trace!(
        total_count,
        page = state.page,
        shown = page_rows.len(),
        addon_columns = column_keys.len(),
        "projected operator rows"
    );
    Projection {
        page_rows,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TableFilters, WorkingFilter};

    fn op(id: &str, name: &str, is_working: bool, created_at: &str) -> Operator {
        Operator {
            id: id.to_string(),
            name: name.to_string(),
            avatar: format!("https://avatars.example/{}.png", id),
            is_working,
            created_at: created_at.to_string(),
        }
    }

    fn names(rows: &[Operator]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn state_sorted(order_by: &str, order: SortOrder) -> TableState {
        TableState {
            page: 0,
            rows_per_page: 50,
            sort: TableSort::new(order_by, order),
            filters: TableFilters::default(),
        }
    }

    fn sample() -> Vec<Operator> {
        vec![
            op("1", "Carol", true, "2023-03-01T00:00:00Z"),
            op("2", "Anna", false, "2021-01-01T00:00:00Z"),
            op("3", "Bob", true, "garbage"),
            op("4", "Dave", false, "2022-06-15T12:00:00Z"),
        ]
    }

    #[test]
    fn parses_sort_columns() {
        assert_eq!(SortColumn::parse("user"), SortColumn::User);
        assert_eq!(SortColumn::parse("addon:SMTP"), SortColumn::Addon("SMTP".into()));
        assert_eq!(SortColumn::parse("addon:a:b"), SortColumn::Addon("a:b".into()));
        assert_eq!(SortColumn::parse("avatar"), SortColumn::Unknown);
        assert_eq!(SortColumn::addon_key("JBOD"), "addon:JBOD");
    }

    #[test]
    fn sorts_by_name() {
        let rows = filter_and_sort(&sample(), &AddonDictionary::new(), &state_sorted("user", SortOrder::Asc));
        assert_eq!(names(&rows), vec!["Anna", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn sorts_by_created_at_with_unparseable_as_zero() {
        let rows = filter_and_sort(
            &sample(),
            &AddonDictionary::new(),
            &state_sorted("createdAt", SortOrder::Asc),
        );
        assert_eq!(names(&rows), vec!["Bob", "Anna", "Dave", "Carol"]);

        let rows = filter_and_sort(
            &sample(),
            &AddonDictionary::new(),
            &state_sorted("createdAt", SortOrder::Desc),
        );
        assert_eq!(names(&rows), vec!["Carol", "Dave", "Anna", "Bob"]);
    }

    #[test]
    fn sorts_working_flag_numerically() {
        let rows = filter_and_sort(
            &sample(),
            &AddonDictionary::new(),
            &state_sorted("isWorking", SortOrder::Desc),
        );
        assert!(rows[0].is_working && rows[1].is_working);
        assert!(!rows[2].is_working && !rows[3].is_working);
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let rows = filter_and_sort(
            &sample(),
            &AddonDictionary::new(),
            &state_sorted("avatar", SortOrder::Desc),
        );
        assert_eq!(names(&rows), vec!["Carol", "Anna", "Bob", "Dave"]);
    }

    #[test]
    fn addon_sort_is_global_so_all_rows_tie() {
        let mut dict = AddonDictionary::new();
        dict.insert("SMTP".into(), "Enabled".into());
        let rows = filter_and_sort(&sample(), &dict, &state_sorted("addon:SMTP", SortOrder::Asc));
        assert_eq!(rows.len(), 4);
        assert_eq!(names(&rows), vec!["Carol", "Anna", "Bob", "Dave"]);
    }

    #[test]
    fn total_count_ignores_paging() {
        let mut state = state_sorted("user", SortOrder::Asc);
        state.filters.working = WorkingFilter::Working;
        state.rows_per_page = 1;
        state.page = 1;
        let projection = project(&sample(), &AddonDictionary::new(), &[], &state);
        assert_eq!(projection.total_count, 2);
        assert_eq!(names(&projection.page_rows), vec!["Carol"]);
    }

    #[test]
    fn paginate_clamps_to_bounds() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&items, 0, 2), &[1, 2]);
        assert_eq!(paginate(&items, 2, 2), &[5]);
        assert!(paginate(&items, 3, 2).is_empty());
        assert!(paginate(&items, i64::MAX, usize::MAX).is_empty());
        assert!(paginate(&items, -1, 2).is_empty());
        assert!(paginate(&items, i64::MIN, 2).is_empty());
        assert!(paginate(&items, 0, 0).is_empty());
    }
}
