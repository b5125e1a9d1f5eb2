use serde_json::{Number, Value};

use crate::error::TickerError;

/// Adds `increment` to `field` on every object element that has it.
/// Returns how many records were touched. Non-object elements and objects
/// without the field are left alone; a present but non-numeric field is an error.
pub fn increment_field(records: &mut [Value], field: &str, increment: i64) -> Result<usize, TickerError> {
    let mut touched = 0;

    for (index, record) in records.iter_mut().enumerate() {
        let Some(slot) = record.as_object_mut().and_then(|obj| obj.get_mut(field)) else {
            continue;
        };

        let Value::Number(current) = slot else {
            return Err(TickerError::NonNumericField {
                index,
                field: field.to_string(),
            });
        };

        *current = add(current, increment);
        touched += 1;
    }

    Ok(touched)
}

/// True when any record's `field` is strictly greater than `total`.
pub fn exceeds_total(records: &[Value], field: &str, total: i64) -> bool {
    records
        .iter()
        .filter_map(|record| record.get(field))
        .filter_map(Value::as_number)
        .any(|n| greater_than(n, total))
}

fn add(n: &Number, increment: i64) -> Number {
    let exact = n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from));
    if let Some(v) = exact {
        let sum = v + i128::from(increment);
        if let Ok(sum) = i64::try_from(sum) {
            return Number::from(sum);
        }
        if let Ok(sum) = u64::try_from(sum) {
            return Number::from(sum);
        }
    }

    let sum = n.as_f64().unwrap_or_default() + increment as f64;
    // NaN/inf cannot be represented; keep the old value in that case
    Number::from_f64(sum).unwrap_or_else(|| n.clone())
}

fn greater_than(n: &Number, total: i64) -> bool {
    if let Some(v) = n.as_i64() {
        v > total
    } else if let Some(v) = n.as_u64() {
        // only reachable above i64::MAX
        u64::try_from(total).map_or(true, |t| v > t)
    } else {
        n.as_f64().is_some_and(|v| v > total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn increments_only_records_with_field() {
        let mut records = vec![
            json!({"distance": 0, "id": 1}),
            json!({"id": 2, "name": "idle"}),
            json!({"distance": 7, "id": 3}),
        ];
        let touched = increment_field(&mut records, "distance", 5).unwrap();

        assert_eq!(touched, 2);
        assert_eq!(
            records,
            vec![
                json!({"distance": 5, "id": 1}),
                json!({"id": 2, "name": "idle"}),
                json!({"distance": 12, "id": 3}),
            ]
        );
    }

    #[test]
    fn non_objects_pass_through() {
        let mut records = vec![json!(3), json!("distance"), json!(["distance"]), json!(null)];
        let before = records.clone();
        assert_eq!(increment_field(&mut records, "distance", 1).unwrap(), 0);
        assert_eq!(records, before);
    }

    #[test]
    fn float_values_stay_float() {
        let mut records = vec![json!({"distance": 1.5})];
        increment_field(&mut records, "distance", 2).unwrap();
        assert_eq!(records[0]["distance"], json!(3.5));
    }

    #[test]
    fn negative_increment_counts_down() {
        let mut records = vec![json!({"distance": 3})];
        increment_field(&mut records, "distance", -5).unwrap();
        assert_eq!(records[0]["distance"], json!(-2));
    }

    #[test]
    fn sum_past_i64_max_stays_exact() {
        let mut records = vec![json!({"distance": i64::MAX})];
        increment_field(&mut records, "distance", 1).unwrap();
        assert_eq!(records[0]["distance"], json!(9_223_372_036_854_775_808_u64));
        assert_eq!(records[0]["distance"].to_string(), "9223372036854775808");
        assert!(exceeds_total(&records, "distance", i64::MAX));
    }

    #[test]
    fn large_unsigned_counts_back_into_i64() {
        let mut records = vec![json!({"distance": 9_223_372_036_854_775_808_u64})];
        increment_field(&mut records, "distance", -1).unwrap();
        assert_eq!(records[0]["distance"], json!(i64::MAX));
    }

    #[test]
    fn sum_past_u64_max_falls_back_to_float() {
        let mut records = vec![json!({"distance": u64::MAX})];
        increment_field(&mut records, "distance", 1).unwrap();
        assert!(records[0]["distance"].is_f64());
        assert!(records[0]["distance"].as_f64().unwrap() >= u64::MAX as f64);
    }

    #[test]
    fn non_numeric_field_is_error() {
        let mut records = vec![json!({"distance": 1}), json!({"distance": "far"})];
        let err = increment_field(&mut records, "distance", 1).unwrap_err();
        assert!(matches!(err, TickerError::NonNumericField { index: 1, .. }));
    }

    #[test]
    fn threshold_is_strict() {
        let at = vec![json!({"distance": 12})];
        let over = vec![json!({"distance": 13})];
        assert!(!exceeds_total(&at, "distance", 12));
        assert!(exceeds_total(&over, "distance", 12));
        assert!(exceeds_total(&[json!({"distance": 12.5})], "distance", 12));
        assert!(!exceeds_total(&[json!({"other": 99})], "distance", 12));
    }

    #[test]
    fn any_record_over_total_is_enough() {
        let records = vec![json!({"distance": 1}), json!({"distance": 20}), json!({"distance": 30})];
        assert!(exceeds_total(&records, "distance", 12));
    }
}
