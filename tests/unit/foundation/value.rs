use super::*;

#[test]
fn numeric_values_compare_across_int_and_float() {
    assert_eq!(Value::Int(2).total_cmp(&Value::Float(2.0)), Ordering::Equal);
    assert_eq!(Value::Int(1).total_cmp(&Value::Float(1.5)), Ordering::Less);
    assert_eq!(Value::Float(-0.5).total_cmp(&Value::Int(0)), Ordering::Less);
}

#[test]
fn kinds_order_before_contents() {
    assert_eq!(Value::Null.total_cmp(&Value::Int(-10)), Ordering::Less);
    assert_eq!(Value::Text("a".into()).total_cmp(&Value::Int(99)), Ordering::Greater);
}

#[test]
fn file_labels_are_path_safe_and_keep_float_fraction() {
    assert_eq!(Value::Int(3).file_label(), "3");
    assert_eq!(Value::Float(2.0).file_label(), "2.0");
    assert_eq!(Value::Float(0.25).file_label(), "0.25");
    assert_eq!(Value::Text("2021/01".into()).file_label(), "2021_01");
    assert_eq!(Value::Bool(true).file_label(), "true");
}

#[test]
fn parse_cell_picks_narrowest_type() {
    assert_eq!(Value::parse_cell("12"), Value::Int(12));
    assert_eq!(Value::parse_cell(" 1.5 "), Value::Float(1.5));
    assert_eq!(Value::parse_cell("True"), Value::Bool(true));
    assert_eq!(Value::parse_cell(""), Value::Null);
    assert_eq!(Value::parse_cell("north"), Value::Text("north".into()));
}

#[test]
fn from_json_rejects_nested_values() {
    assert_eq!(
        Value::from_json(&serde_json::json!(7)).unwrap(),
        Value::Int(7)
    );
    assert_eq!(
        Value::from_json(&serde_json::json!(0.5)).unwrap(),
        Value::Float(0.5)
    );
    let err = Value::from_json(&serde_json::json!([1, 2])).unwrap_err();
    assert!(matches!(err, DatagifError::Schema(_)));
}
