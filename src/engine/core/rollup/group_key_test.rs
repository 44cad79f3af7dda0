use std::collections::HashMap;

use serde_json::json;

use crate::engine::core::rollup::{Bucket, GroupKey, GroupValue};
use crate::test_helpers::factory::Factory;

#[test]
fn group_value_maps_each_json_kind() {
    assert_eq!(GroupValue::from_json(&json!(null)), GroupValue::Null);
    assert_eq!(GroupValue::from_json(&json!(true)), GroupValue::Bool(true));
    assert_eq!(GroupValue::from_json(&json!(-3)), GroupValue::Int(-3));
    assert_eq!(GroupValue::from_json(&json!(u64::MAX)), GroupValue::UInt(u64::MAX));
    assert_eq!(GroupValue::from_json(&json!("x")), GroupValue::Str("x".into()));
    assert!(matches!(GroupValue::from_json(&json!(1.5)), GroupValue::Float(_)));
    assert!(matches!(GroupValue::from_json(&json!([1, 2])), GroupValue::Nested(_)));
}

#[test]
fn group_value_converts_back_to_json() {
    for value in [
        json!(null),
        json!(false),
        json!(42),
        json!(u64::MAX),
        json!(2.25),
        json!("text"),
        json!({"b": [1, {"c": null}], "a": 1}),
    ] {
        assert_eq!(GroupValue::from_json(&value).to_json(), value);
    }
}

#[test]
fn integer_string_and_float_values_stay_distinct() {
    let int = GroupValue::from_json(&json!(1));
    let string = GroupValue::from_json(&json!("1"));
    let float = GroupValue::from_json(&json!(1.5));
    assert_ne!(int, string);
    assert_ne!(int, float);
    assert_ne!(string, float);
}

#[test]
fn negative_zero_groups_with_zero() {
    assert_eq!(
        GroupValue::from_json(&json!(-0.0)),
        GroupValue::from_json(&json!(0.0))
    );
}

#[test]
fn nested_values_with_same_content_are_equal() {
    let a = GroupValue::from_json(&json!({"x": 1, "y": [true]}));
    let b = GroupValue::from_json(&json!({"y": [true], "x": 1}));
    assert_eq!(a, b);
}

#[test]
fn bucket_reads_missing_field_as_null() {
    let tuple = Factory::tuple().with("b", json!(1)).create();
    assert_eq!(Bucket::new("a").bucket_value(&tuple), GroupValue::Null);
    assert_eq!(Bucket::new("b").bucket_value(&tuple), GroupValue::Int(1));
}

#[test]
fn buckets_compare_by_field_name() {
    assert_eq!(Bucket::new("a"), Bucket::new("a"));
    assert_ne!(Bucket::new("a"), Bucket::new("b"));
    assert_eq!(Bucket::new("region").to_string(), "region");
}

#[test]
fn group_key_follows_bucket_order() {
    let buckets = vec![Bucket::new("c"), Bucket::new("a")];
    let tuple = Factory::tuple()
        .with("a", json!(1))
        .with("c", json!("x"))
        .create();

    let key = GroupKey::from_tuple(&buckets, &tuple);
    assert_eq!(
        key.parts(),
        &[GroupValue::Str("x".into()), GroupValue::Int(1)]
    );
    assert_eq!(key.len(), 2);
}

#[test]
fn equal_keys_share_one_map_slot() {
    let buckets = vec![Bucket::new("a"), Bucket::new("c")];
    let first = Factory::tuple().with("a", json!(1)).with("c", json!(null)).create();
    let second = Factory::tuple().with("c", json!(null)).with("a", json!(1)).with("z", 9).create();
    let third = Factory::tuple().with("a", json!(1)).create();
    let other = Factory::tuple().with("a", json!(1)).with("c", json!(2)).create();

    let mut counts: HashMap<GroupKey, usize> = HashMap::new();
    for tuple in [&first, &second, &third, &other] {
        *counts.entry(GroupKey::from_tuple(&buckets, tuple)).or_default() += 1;
    }

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&GroupKey::from_tuple(&buckets, &first)], 3);
    assert_eq!(counts[&GroupKey::from_tuple(&buckets, &other)], 1);
}

#[test]
fn empty_bucket_list_gives_empty_key() {
    let key = GroupKey::from_tuple(&[], &Factory::tuple().with("a", 1).create());
    assert!(key.is_empty());
    assert_eq!(key, GroupKey::new(Vec::new()));
}
