use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

use feruca::Collator;

use crate::models::OperatorAddon;

pub const DEFAULT_PINNED_COLUMNS: [&str; 2] = ["SMTP", "JBOD"];

/// fieldName → text. Later addons overwrite earlier ones with the same name.
pub type AddonDictionary = HashMap<String, String>;

pub fn build_dictionary(addons: &[OperatorAddon]) -> AddonDictionary {
    let mut dict = AddonDictionary::new();
    for addon in addons {
        dict.insert(addon.field_name.clone(), addon.text.clone());
    }
    dict
}

/// Distinct addon field names in column order, using the default pinned set.
pub fn build_columns(addons: &[OperatorAddon]) -> Vec<String> {
    build_columns_pinned(addons, &DEFAULT_PINNED_COLUMNS)
}

/// Distinct addon field names: present pinned names first (in `pinned` order),
/// then the rest in locale order.
pub fn build_columns_pinned<S: AsRef<str>>(addons: &[OperatorAddon], pinned: &[S]) -> Vec<String> {
    let distinct: BTreeSet<&str> = addons.iter().map(|a| a.field_name.as_str()).collect();

    let mut columns: Vec<String> = pinned
        .iter()
        .map(|p| p.as_ref())
        .filter(|name| distinct.contains(name))
        .map(str::to_string)
        .collect();
    columns.dedup();

    let mut rest: Vec<&str> = distinct
        .into_iter()
        .filter(|name| !pinned.iter().any(|p| p.as_ref() == *name))
        .collect();
    let mut collator = Collator::default();
    rest.sort_by(|a, b| collator.collate(*a, *b));
    columns.extend(rest.into_iter().map(str::to_string));
    columns
}

/// Unicode collation (root locale): accents and case only break ties, and
/// lowercase sorts ahead of uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}
