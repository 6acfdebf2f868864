//! Tests for feature engineering and training-set extraction

use chrono::{Datelike, NaiveDate, Weekday};

use super::*;
use crate::data::{validate, CanonicalRecord, Table, Value, CANONICAL_COLUMNS, DAILY_COST, DATE};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn record(d: u32, cost: f64) -> CanonicalRecord {
    CanonicalRecord {
        date: day(d),
        ec2_hours: 100.0 + f64::from(d),
        storage_gb: 500.0,
        data_transfer_gb: 20.0,
        rds_usage: 3.0,
        lambda_invocations: 10_000,
        daily_cost: cost,
    }
}

/// Ten consecutive days starting Monday 2024-01-01 with costs 1..=10
fn ten_days() -> Table {
    let records: Vec<_> = (1..=10).map(|d| record(d, f64::from(d))).collect();
    Table::from_records(&records)
}

fn floats(table: &Table, column: &str) -> Vec<f64> {
    table.numeric_column(column).unwrap()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[test]
fn test_lag_feature() {
    assert_eq!(lag_feature(&[5.0, 6.0, 7.0]), vec![0.0, 5.0, 6.0]);
    assert!(lag_feature(&[]).is_empty());
}

#[test]
fn test_trailing_mean_excludes_current_row() {
    let values = [3.0, 6.0, 9.0, 12.0, 100.0];
    let means = trailing_mean(&values, 3);
    assert_eq!(&means[..3], &[3.0, 6.0, 9.0]);
    assert_eq!(means[3], 6.0); // mean(3, 6, 9)
    assert_eq!(means[4], 9.0); // mean(6, 9, 12), not the 100
}

#[test]
fn test_trailing_mean_short_series_self_fills() {
    assert_eq!(trailing_mean(&[4.0, 2.0], 7), vec![4.0, 2.0]);
}

#[test]
fn test_is_weekend() {
    for d in 1..=14 {
        let date = day(d);
        let expected = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        assert_eq!(is_weekend(date), expected, "{date}");
    }
    assert!(is_weekend(day(6)));
    assert!(is_weekend(day(7)));
    assert!(!is_weekend(day(8)));
}

// ---------------------------------------------------------------------------
// engineer
// ---------------------------------------------------------------------------

#[test]
fn test_engineer_appends_derived_columns() {
    let out = engineer(&ten_days()).unwrap();
    let mut expected: Vec<&str> = CANONICAL_COLUMNS.to_vec();
    expected.extend(DERIVED_COLUMNS);
    assert_eq!(out.columns(), expected.as_slice());
    assert_eq!(out.len(), 10);
}

#[test]
fn test_engineer_lag_and_rolling_values() {
    let out = engineer(&ten_days()).unwrap();

    let lag = floats(&out, LAG_1);
    assert_eq!(lag[0], 0.0);
    assert_eq!(lag[1..], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);

    let r3 = floats(&out, ROLLING_3);
    assert_eq!(&r3[..3], &[1.0, 2.0, 3.0]);
    assert_eq!(r3[3], 2.0);
    assert_eq!(r3[9], 8.0);

    let r7 = floats(&out, ROLLING_7);
    assert_eq!(&r7[..7], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(r7[7], 4.0);
    assert_eq!(r7[9], 6.0);
}

#[test]
fn test_engineer_weekend_flags() {
    let out = engineer(&ten_days()).unwrap();
    let flags = floats(&out, IS_WEEKEND);
    // 2024-01-06 and 2024-01-07 are Saturday and Sunday
    assert_eq!(flags, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_engineer_sorts_by_date() {
    let records = vec![record(3, 30.0), record(1, 10.0), record(2, 20.0)];
    let out = engineer(&Table::from_records(&records)).unwrap();

    assert_eq!(floats(&out, DAILY_COST), vec![10.0, 20.0, 30.0]);
    assert_eq!(floats(&out, LAG_1), vec![0.0, 10.0, 20.0]);
    let dates: Vec<_> = out.column(DATE).unwrap().map(|v| v.as_date().unwrap()).collect();
    assert_eq!(dates, vec![day(1), day(2), day(3)]);
}

#[test]
fn test_engineer_sort_is_stable_for_equal_dates() {
    let records = vec![record(2, 7.0), record(1, 1.0), record(2, 5.0), record(2, 6.0)];
    let out = engineer(&Table::from_records(&records)).unwrap();
    assert_eq!(floats(&out, DAILY_COST), vec![1.0, 7.0, 5.0, 6.0]);
}

#[test]
fn test_engineer_does_not_mutate_input() {
    let input = ten_days();
    let before = input.clone();
    let _ = engineer(&input).unwrap();
    assert_eq!(input, before);
}

#[test]
fn test_engineer_is_repeatable_on_own_output() {
    let once = engineer(&ten_days()).unwrap();
    let twice = engineer(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_engineer_output_canonical_subset_revalidates() {
    let out = engineer(&ten_days()).unwrap();
    assert!(validate(&out.select(&CANONICAL_COLUMNS)).is_ok());
}

#[test]
fn test_engineer_accepts_textual_dates() {
    let csv = "date,daily_cost\n2024-01-02,2.0\n2024-01-01,1.0\n";
    let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
    let out = engineer(&table).unwrap();
    assert_eq!(out.rows()[0][0], Value::Date(day(1)));
}

#[test]
fn test_engineer_missing_daily_cost() {
    let table = ten_days().select(&["date", "ec2_hours"]);
    let err = engineer(&table).unwrap_err();
    match err {
        FeatureError::MissingColumn { columns, available } => {
            assert_eq!(columns, vec![DAILY_COST.to_string()]);
            assert_eq!(available, vec!["date".to_string(), "ec2_hours".to_string()]);
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_engineer_missing_both_key_and_target() {
    let table = ten_days().select(&["ec2_hours"]);
    let err = engineer(&table).unwrap_err();
    assert!(matches!(
        err,
        FeatureError::MissingColumn { ref columns, .. } if columns.len() == 2
    ));
    let msg = err.to_string();
    assert!(msg.contains("date"));
    assert!(msg.contains("daily_cost"));
}

#[test]
fn test_engineer_rejects_non_numeric_cost() {
    let table = Table::new(
        vec!["date".into(), "daily_cost".into()],
        vec![vec![Value::Date(day(1)), Value::Text("free".into())]],
    );
    let err = engineer(&table).unwrap_err();
    assert!(matches!(err, FeatureError::InvalidValue { row: 0, .. }));
}

#[test]
fn test_engineer_empty_table() {
    let table = Table::new(vec!["date".into(), "daily_cost".into()], vec![]);
    let out = engineer(&table).unwrap();
    assert!(out.is_empty());
    assert!(out.has_column(ROLLING_7));
}

// ---------------------------------------------------------------------------
// TrainingSet
// ---------------------------------------------------------------------------

#[test]
fn test_training_set_shape_and_order() {
    let out = engineer(&ten_days()).unwrap();
    let set = TrainingSet::from_features(&out).unwrap();

    assert_eq!(set.features.dim(), (10, FEATURE_COLUMNS.len()));
    assert_eq!(set.target.len(), 10);
    assert_eq!(set.target[0], 1.0);
    assert_eq!(set.column(LAG_1).unwrap()[1], 1.0);
    assert_eq!(set.column("ec2_hours").unwrap()[0], 101.0);
    assert!(set.column(DAILY_COST).is_none());
}

#[test]
fn test_training_set_requires_engineered_columns() {
    let err = TrainingSet::from_features(&ten_days()).unwrap_err();
    match err {
        FeatureError::MissingColumn { columns, .. } => {
            assert_eq!(columns, DERIVED_COLUMNS.map(String::from).to_vec());
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_split_chronological() {
    let set = TrainingSet::from_features(&engineer(&ten_days()).unwrap()).unwrap();
    let (train, test) = set.split_chronological(DEFAULT_TRAIN_RATIO).unwrap();

    assert_eq!(train.len(), 8);
    assert_eq!(test.len(), 2);
    assert!(train.dates.iter().max() < test.dates.iter().min());
    assert_eq!(test.target.to_vec(), vec![9.0, 10.0]);
    assert_eq!(train.features.nrows() + test.features.nrows(), set.len());
}

#[test]
fn test_split_rejects_bad_ratio() {
    let set = TrainingSet::from_features(&engineer(&ten_days()).unwrap()).unwrap();
    assert!(set.split_chronological(0.0).is_err());
    assert!(set.split_chronological(1.0).is_err());
    assert!(set.split_chronological(f64::NAN).is_err());
}

#[test]
fn test_split_index() {
    assert_eq!(split_index(10, 0.8), 8);
    assert_eq!(split_index(7, 0.8), 5);
    assert_eq!(split_index(0, 0.8), 0);
}
