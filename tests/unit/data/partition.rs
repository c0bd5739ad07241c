use super::*;
use crate::data::dataset::Column;

fn shuffled() -> Dataset {
    Dataset::new(vec![
        Column::new("t", [3i64, 1, 2, 1, 3, 2]),
        Column::new("row", [0i64, 1, 2, 3, 4, 5]),
    ])
    .unwrap()
}

#[test]
fn slices_are_ascending_and_distinct() {
    let slices = partition(&shuffled(), "t").unwrap();
    let times: Vec<_> = slices.iter().map(|s| s.time.clone()).collect();
    assert_eq!(times, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn slices_preserve_source_row_order_and_columns() {
    let slices = partition(&shuffled(), "t").unwrap();
    let rows_of = |i: usize| slices[i].rows.column("row").unwrap().values().to_vec();
    assert_eq!(rows_of(0), vec![Value::Int(1), Value::Int(3)]);
    assert_eq!(rows_of(1), vec![Value::Int(2), Value::Int(5)]);
    assert_eq!(rows_of(2), vec![Value::Int(0), Value::Int(4)]);
    assert!(slices.iter().all(|s| s.rows.has_column("t")));
}

#[test]
fn every_row_lands_in_exactly_one_slice() {
    let ds = shuffled();
    let slices = partition(&ds, "t").unwrap();
    let total: usize = slices.iter().map(|s| s.rows.n_rows()).sum();
    assert_eq!(total, ds.n_rows());
}

#[test]
fn int_and_float_times_that_compare_equal_share_a_frame() {
    let ds = Dataset::new(vec![Column::new("t", [Value::Int(1), Value::Float(1.0), Value::Float(0.5)])])
        .unwrap();
    assert_eq!(distinct_times(&ds, "t").unwrap().len(), 2);
}

#[test]
fn null_times_are_skipped() {
    let ds = Dataset::new(vec![Column::new("t", [Value::Null, Value::Int(4), Value::Null])]).unwrap();
    let slices = partition(&ds, "t").unwrap();
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].rows.n_rows(), 1);
}

#[test]
fn text_times_sort_lexically() {
    let ds = Dataset::new(vec![Column::new("t", ["b", "a", "c", "a"])]).unwrap();
    assert_eq!(
        distinct_times(&ds, "t").unwrap(),
        vec![Value::from("a"), Value::from("b"), Value::from("c")]
    );
}

#[test]
fn missing_time_column_is_schema_error() {
    assert!(matches!(
        partition(&shuffled(), "time"),
        Err(DatagifError::Schema(_))
    ));
}

#[test]
fn mixed_kinds_are_schema_error() {
    let ds = Dataset::new(vec![Column::new("t", [Value::Int(1), Value::from("two")])]).unwrap();
    assert!(matches!(partition(&ds, "t"), Err(DatagifError::Schema(_))));
}
