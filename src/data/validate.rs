use crate::error::{DataError, Result};

use super::model::Table;

/// Gate used by every stage: the table must have rows and carry every column
/// in `required`. Missing columns are reported in the order requested.
pub fn check(table: &Table, required: &[&str]) -> Result<()> {
    if table.is_empty() {
        return Err(DataError::EmptyTable);
    }
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns(missing));
    }
    Ok(())
}

/// Boolean form of [`check`]; logs the reason on failure.
pub fn validate(table: &Table, required: &[&str]) -> bool {
    require(table, required).is_ok()
}

/// [`check`] plus the diagnostic, for stages that propagate the error.
pub(crate) fn require(table: &Table, required: &[&str]) -> Result<()> {
    check(table, required).map_err(DataError::logged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    fn table() -> Table {
        Table::from_records(
            &["Name", "Orbit ID"],
            vec![vec![Value::String("A".into()), Value::Integer(1)]],
        )
        .unwrap()
    }

    #[test]
    fn empty_table_never_validates() {
        let empty = Table::empty(vec!["Name".into()]);
        assert!(!validate(&empty, &[]));
        assert!(!validate(&empty, &["Name"]));
        assert!(matches!(check(&empty, &[]), Err(DataError::EmptyTable)));
    }

    #[test]
    fn subset_of_schema_validates() {
        let t = table();
        assert!(validate(&t, &[]));
        assert!(validate(&t, &["Name"]));
        assert!(validate(&t, &["Orbit ID", "Name"]));
    }

    #[test]
    fn missing_columns_are_listed() {
        let t = table();
        match check(&t, &["Hazardous", "Name", "Equinox"]) {
            Err(DataError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["Hazardous".to_string(), "Equinox".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!validate(&t, &["Hazardous"]));
    }

    #[test]
    fn column_names_are_case_and_whitespace_sensitive() {
        let t = table();
        assert!(!validate(&t, &["name"]));
        assert!(!validate(&t, &["Name "]));
    }
}
