use std::collections::{BTreeMap, BTreeSet};

use super::model::{Table, Value};

/// Columns with more distinct values than this are not offered as filters.
pub const MAX_FILTER_VALUES: usize = 12;

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of selected values.
/// If a column is absent it means "no filter" (show all).
pub type FilterState = BTreeMap<String, BTreeSet<Value>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(unique_values: &BTreeMap<String, BTreeSet<Value>>) -> FilterState {
    unique_values.clone()
}

/// Return indices of rows that pass all active filters.
///
/// A row passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * The filter set for that column is empty → nothing selected → fails
/// * The row's value for that column is in the selected set → passes
pub fn filtered_indices(
    table: &Table,
    unique_values: &BTreeMap<String, BTreeSet<Value>>,
    filters: &FilterState,
) -> Vec<usize> {
    // Resolve column positions once; drop filters that select everything.
    let active: Vec<(usize, &BTreeSet<Value>)> = filters
        .iter()
        .filter(|(col, selected)| {
            unique_values
                .get(*col)
                .map_or(true, |all| selected.len() != all.len())
        })
        .filter_map(|(col, selected)| table.column_index(col).map(|idx| (idx, selected)))
        .collect();

    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| active.iter().all(|(idx, selected)| selected.contains(&row[*idx])))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_records(
            &["Name", "Hazardous"],
            vec![
                vec![Value::String("A".into()), Value::Bool(true)],
                vec![Value::String("B".into()), Value::Bool(false)],
                vec![Value::String("C".into()), Value::Bool(true)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn everything_selected_shows_all_rows() {
        let t = table();
        let uv = t.unique_values(MAX_FILTER_VALUES);
        let filters = init_filter_state(&uv);
        assert_eq!(filtered_indices(&t, &uv, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn deselecting_a_value_hides_its_rows() {
        let t = table();
        let uv = t.unique_values(MAX_FILTER_VALUES);
        let mut filters = init_filter_state(&uv);
        filters
            .get_mut("Hazardous")
            .unwrap()
            .remove(&Value::Bool(true));
        assert_eq!(filtered_indices(&t, &uv, &filters), vec![1]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let t = table();
        let uv = t.unique_values(MAX_FILTER_VALUES);
        let mut filters = init_filter_state(&uv);
        filters.insert("Name".into(), BTreeSet::new());
        assert!(filtered_indices(&t, &uv, &filters).is_empty());
    }
}
