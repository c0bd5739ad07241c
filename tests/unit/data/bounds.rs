use super::*;
use crate::data::dataset::Column;
use crate::foundation::value::Value;

#[test]
fn single_column_bounds() {
    let ds = Dataset::new(vec![Column::new("x", [3.0f64, -1.0, 7.5])]).unwrap();
    assert_eq!(global_bounds(&ds, ["x"]).unwrap().as_tuple(), (-1.0, 7.5));
}

// Multiple columns share one combined range rather than per-column ranges.
#[test]
fn multiple_columns_combine_into_one_range() {
    let ds = Dataset::new(vec![
        Column::new("lon", [0.0f64, 5.0]),
        Column::new("lat", [-3.0f64, 2.0]),
    ])
    .unwrap();
    let b = global_bounds(&ds, ["lon", "lat", "lon"]).unwrap();
    assert_eq!(b.as_tuple(), (-3.0, 5.0));
}

#[test]
fn nulls_are_skipped() {
    let ds = Dataset::new(vec![Column::new("x", [Value::Null, Value::Int(2), Value::Int(9)])]).unwrap();
    assert_eq!(global_bounds(&ds, ["x"]).unwrap().as_tuple(), (2.0, 9.0));
}

#[test]
fn all_null_column_is_schema_error() {
    let ds = Dataset::new(vec![Column::new("x", [Value::Null])]).unwrap();
    assert!(matches!(global_bounds(&ds, ["x"]), Err(DatagifError::Schema(_))));
}

#[test]
fn missing_column_is_schema_error() {
    let ds = Dataset::new(vec![Column::new("x", [1i64])]).unwrap();
    assert!(matches!(global_bounds(&ds, ["y"]), Err(DatagifError::Schema(_))));
}
