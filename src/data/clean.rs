use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Result;

use super::model::{Table, TableDetails, Value};
use super::validate::require;

pub const CLOSE_APPROACH_DATE: &str = "Close Approach Date";

/// Keep the rows whose `Close Approach Date` is on or after `cutoff`.
///
/// The date column is converted to [`Value::Date`] in the returned table.
/// Cells that do not parse as a date become [`Value::Null`] and are dropped.
/// An empty result is logged as a warning but is still `Ok`.
pub fn filter_by_date(table: &Table, cutoff: NaiveDate) -> Result<Table> {
    require(table, &[CLOSE_APPROACH_DATE])?;

    let converted = table
        .map_column(CLOSE_APPROACH_DATE, to_date)
        .unwrap_or_else(|| table.clone());

    let keep: Vec<usize> = converted
        .column(CLOSE_APPROACH_DATE)
        .into_iter()
        .flatten()
        .enumerate()
        .filter(|(_, v)| matches!(v, Value::Date(d) if *d >= cutoff))
        .map(|(i, _)| i)
        .collect();

    let filtered = converted.select_rows(&keep);
    if filtered.is_empty() {
        log::warn!("Warning: No data from {cutoff} and onwards.");
    } else {
        log::debug!(
            "Date filter kept {} of {} rows (cutoff {cutoff})",
            filtered.len(),
            table.len()
        );
    }
    Ok(filtered)
}

/// Drop `names` from the table and report the resulting shape.
/// Names that are not in the schema are ignored.
pub fn drop_columns(table: &Table, names: &[String]) -> Result<TableDetails> {
    require(table, &[])?;
    Ok(table.without_columns(names).details())
}

fn to_date(value: &Value) -> Value {
    match value {
        Value::Date(d) => Value::Date(*d),
        Value::String(s) => parse_date(s).map(Value::Date).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Accepts ISO dates, ISO date-times, and US-style `MM/DD/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(dates: &[&str]) -> Table {
        Table::from_records(
            &["Name", CLOSE_APPROACH_DATE],
            dates.iter().enumerate().map(|(i, d)| {
                vec![Value::String(format!("row{i}")), Value::String(d.to_string())]
            }),
        )
        .unwrap()
    }

    #[test]
    fn keeps_rows_on_or_after_cutoff() {
        let t = dated(&["1999-05-01", "2001-02-02"]);
        let out = filter_by_date(&t, date(2000, 1, 1)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.value(0, "Name"), Some(&Value::String("row1".into())));
        assert_eq!(out.value(0, CLOSE_APPROACH_DATE), Some(&Value::Date(date(2001, 2, 2))));
    }

    #[test]
    fn cutoff_is_inclusive_and_order_preserved() {
        let t = dated(&["2005-01-01", "2000-01-01", "1990-01-01", "2003-03-03"]);
        let out = filter_by_date(&t, date(2000, 1, 1)).unwrap();
        let names: Vec<String> = out.column("Name").unwrap().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["row0", "row1", "row3"]);
    }

    #[test]
    fn unparsable_dates_are_excluded() {
        let t = dated(&["not a date", "2010-06-01", ""]);
        let out = filter_by_date(&t, date(2000, 1, 1)).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn empty_result_is_ok() {
        let t = dated(&["1980-01-01"]);
        let out = filter_by_date(&t, date(2000, 1, 1)).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns().len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = dated(&["1999-12-31", "2000-01-01", "2012-07-04", "bogus"]);
        let once = filter_by_date(&t, date(2000, 1, 1)).unwrap();
        let twice = filter_by_date(&once, date(2000, 1, 1)).unwrap();
        let earlier = filter_by_date(&once, date(1990, 1, 1)).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, earlier);
    }

    #[test]
    fn requires_date_column() {
        let t = Table::from_records(&["Name"], vec![vec![Value::String("A".into())]]).unwrap();
        let err = filter_by_date(&t, date(2000, 1, 1)).unwrap_err();
        assert!(matches!(err, DataError::MissingColumns(_)));
    }

    #[test]
    fn parses_common_date_layouts() {
        assert_eq!(parse_date("2001-02-02"), Some(date(2001, 2, 2)));
        assert_eq!(parse_date("2001-02-02 10:30:00"), Some(date(2001, 2, 2)));
        assert_eq!(parse_date("2001-02-02T10:30:00"), Some(date(2001, 2, 2)));
        assert_eq!(parse_date("2001-02-02 10:30"), Some(date(2001, 2, 2)));
        assert_eq!(parse_date("02/03/2001"), Some(date(2001, 2, 3)));
        assert_eq!(parse_date("2001-13-40"), None);
    }

    #[test]
    fn drop_columns_reports_shape() {
        let t = Table::from_records(
            &["Name", "Equinox", "Orbiting Body", "Orbit ID"],
            vec![vec![
                Value::String("A".into()),
                Value::String("J2000".into()),
                Value::String("Earth".into()),
                Value::Integer(1),
            ]],
        )
        .unwrap();
        let names = ["Orbiting Body", "Neo Reference ID", "Equinox"].map(String::from);
        let details = drop_columns(&t, &names).unwrap();
        assert_eq!(details.rows, 1);
        assert_eq!(details.columns, 2);
        assert_eq!(details.column_names, vec!["Name".to_string(), "Orbit ID".to_string()]);
    }

    #[test]
    fn drop_columns_rejects_empty_table() {
        let t = Table::empty(vec!["Name".into()]);
        assert!(matches!(drop_columns(&t, &[]), Err(DataError::EmptyTable)));
    }
}
