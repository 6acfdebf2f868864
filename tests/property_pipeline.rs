//! Property tests for the usage pipeline
//!
//! - Derived features only look backwards in time
//! - Engineering is order-independent and repeatable
//! - KS statistics and p-values stay in [0, 1]
//! - Normalization keeps every non-total row

use approx::abs_diff_eq;
use chrono::{Duration, NaiveDate};
use costcast::data::{normalize, validate, CanonicalRecord, NormalizeOptions, Table, Value};
use costcast::eval::drift::{ks_exact_p_value, ks_p_value, ks_statistic, ks_two_sample_p_value};
use costcast::features::{engineer, lag_feature, trailing_mean, LAG_1, ROLLING_3, ROLLING_7};
use costcast::train::{Metric, MAE, RMSE};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

fn costs(len: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = Vec<f64>> {
    vec(0.0f64..1_000.0, len)
}

fn sample(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    vec(-1_000.0f64..1_000.0, len)
}

fn usage_table(costs: &[f64]) -> Table {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records: Vec<CanonicalRecord> = costs
        .iter()
        .enumerate()
        .map(|(i, &daily_cost)| CanonicalRecord {
            date: start + Duration::days(i as i64),
            ec2_hours: daily_cost * 2.0,
            storage_gb: 100.0,
            data_transfer_gb: 1.0,
            rds_usage: 1.0,
            lambda_invocations: i as u64,
            daily_cost,
        })
        .collect();
    Table::from_records(&records)
}

fn reversed(table: &Table) -> Table {
    let rows = table.rows().iter().rev().cloned().collect();
    Table::new(table.columns().to_vec(), rows)
}

fn head(table: &Table, n: usize) -> Table {
    Table::new(table.columns().to_vec(), table.rows()[..n].to_vec())
}

// =============================================================================
// Feature Engineering Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_lag_shifts_by_one(values in costs(0..60)) {
        let lag = lag_feature(&values);
        prop_assert_eq!(lag.len(), values.len());
        if let Some(first) = lag.first() {
            prop_assert_eq!(*first, 0.0);
        }
        for i in 1..values.len() {
            prop_assert_eq!(lag[i], values[i - 1]);
        }
    }

    #[test]
    fn prop_trailing_mean_uses_prior_window(values in costs(0..60), window in 1usize..10) {
        let means = trailing_mean(&values, window);
        prop_assert_eq!(means.len(), values.len());
        for (i, mean) in means.iter().enumerate() {
            if i < window {
                prop_assert_eq!(*mean, values[i]);
            } else {
                let lo = values[i - window..i].iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = values[i - window..i].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(*mean >= lo - 1e-9 && *mean <= hi + 1e-9);
            }
        }
    }

    #[test]
    fn prop_features_ignore_future_rows(values in costs(1..40), cut in 0usize..40) {
        let table = usage_table(&values);
        let k = cut.min(values.len());
        let full = engineer(&table).unwrap();
        let prefix = engineer(&head(&table, k)).unwrap();

        for column in [LAG_1, ROLLING_3, ROLLING_7] {
            let full_values = full.numeric_column(column).unwrap();
            let prefix_values = prefix.numeric_column(column).unwrap();
            prop_assert_eq!(&full_values[..k], &prefix_values[..]);
        }
    }

    #[test]
    fn prop_engineer_ignores_input_order(values in costs(1..40)) {
        let table = usage_table(&values);
        prop_assert_eq!(engineer(&table).unwrap(), engineer(&reversed(&table)).unwrap());
    }

    #[test]
    fn prop_engineer_is_repeatable(values in costs(0..40)) {
        let table = usage_table(&values);
        let once = engineer(&table).unwrap();
        prop_assert_eq!(&once, &engineer(&table).unwrap());
        prop_assert_eq!(&once, &engineer(&once).unwrap());
        prop_assert!(validate(&once).is_ok());
    }
}

// =============================================================================
// KS Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn prop_ks_statistic_bounded_and_symmetric(a in sample(1..80), b in sample(1..80)) {
        let d = ks_statistic(&a, &b);
        prop_assert!((0.0..=1.0).contains(&d), "D {} not in [0, 1]", d);
        prop_assert!(abs_diff_eq!(d, ks_statistic(&b, &a), epsilon = 1e-12));
    }

    #[test]
    fn prop_ks_self_comparison_is_zero(a in sample(1..80)) {
        prop_assert_eq!(ks_statistic(&a, &a), 0.0);
        prop_assert_eq!(ks_two_sample_p_value(0.0, a.len(), a.len()), 1.0);
    }

    #[test]
    fn prop_ks_p_value_bounded(a in sample(1..80), b in sample(1..80)) {
        let d = ks_statistic(&a, &b);
        let p = ks_two_sample_p_value(d, a.len(), b.len());
        prop_assert!(p.is_finite());
        prop_assert!((0.0..=1.0).contains(&p), "p {} not in [0, 1]", p);
    }

    #[test]
    fn prop_ks_p_value_monotone(x in 0.0f64..5.0, step in 0.0f64..1.0) {
        prop_assert!(ks_p_value(x + step) <= ks_p_value(x) + 1e-6);
    }

    #[test]
    fn prop_exact_p_value_non_increasing(
        n1 in 1usize..40,
        n2 in 1usize..40,
        d in 0.0f64..1.0,
        step in 0.0f64..0.5,
    ) {
        let p = ks_exact_p_value(d, n1, n2);
        prop_assert!((0.0..=1.0).contains(&p));
        prop_assert!(ks_exact_p_value(d + step, n1, n2) <= p + 1e-9);
    }

    #[test]
    fn prop_shift_never_lowers_statistic(a in sample(5..60), shift in 2_001.0f64..5_000.0) {
        // all shifted values exceed every original value
        let b: Vec<f64> = a.iter().map(|v| v + shift).collect();
        prop_assert_eq!(ks_statistic(&a, &b), 1.0);
    }
}

// =============================================================================
// Normalization and Metric Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_service_breakdown_keeps_non_total_rows(
        amounts in vec((0.0f64..50.0, 0.0f64..5.0, 0.0f64..0.001), 1..30),
        with_total in any::<bool>(),
    ) {
        let columns: Vec<String> = [
            "Service", "EC2-Other($)", "S3($)", "Lambda($)", "Total costs($)",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();

        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let mut rows: Vec<Vec<Value>> = amounts
            .iter()
            .enumerate()
            .map(|(i, &(ec2, s3, lambda))| {
                vec![
                    Value::Text((start + Duration::days(i as i64)).to_string()),
                    Value::Float(ec2),
                    Value::Float(s3),
                    Value::Float(lambda),
                    Value::Float(ec2 + s3 + lambda),
                ]
            })
            .collect();
        if with_total {
            rows.insert(0, vec![
                Value::Text("Service total".to_string()),
                Value::Float(1.0),
                Value::Float(1.0),
                Value::Float(1.0),
                Value::Float(3.0),
            ]);
        }

        let table = normalize(&Table::new(columns, rows), &NormalizeOptions::default()).unwrap();
        prop_assert_eq!(table.len(), amounts.len());
        prop_assert!(validate(&table).is_ok());

        let ec2 = table.numeric_column("ec2_hours").unwrap();
        for (hours, (ec2_cost, _, _)) in ec2.iter().zip(&amounts) {
            prop_assert!(abs_diff_eq!(*hours, ec2_cost * 24.0, epsilon = 1e-9));
        }
        // CloudWatch column is absent, so transfer defaults to zero
        prop_assert!(table.numeric_column("data_transfer_gb").unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn prop_rmse_dominates_mae(pairs in vec((-100.0f64..100.0, -100.0f64..100.0), 1..50)) {
        let (predictions, targets): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let mae = MAE.compute(&predictions, &targets);
        let rmse = RMSE.compute(&predictions, &targets);
        prop_assert!(mae >= 0.0);
        prop_assert!(rmse + 1e-9 >= mae);
    }
}
