#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use serde::Serialize;

use mark::{to_value, Value};

#[test]
fn to_value_bool() {
    assert_eq!(to_value(true).unwrap(), Value::Bool(true));
}

#[test]
fn to_value_integers() {
    assert_eq!(to_value(7_u8).unwrap(), Value::Integer(7));
    assert_eq!(to_value(-7_i32).unwrap(), Value::Integer(-7));
    assert_eq!(to_value(7_u64).unwrap(), Value::Integer(7));
}

#[test]
fn to_value_u64_out_of_range() {
    let err = to_value(u64::MAX).unwrap_err();
    assert_eq!(err.to_string(), "integer out of range, maximum is i64::MAX");
}

#[test]
fn to_value_float() {
    assert_eq!(to_value(1.5_f32).unwrap(), Value::Float(1.5));
}

#[test]
fn to_value_char() {
    assert_eq!(to_value('a').unwrap(), Value::String(String::from('a')));
}

#[test]
fn to_value_str() {
    assert_eq!(
        to_value("testing...").unwrap(),
        Value::String(String::from("testing..."))
    );
}

#[test]
fn to_value_none() {
    assert_eq!(to_value(None::<i32>).unwrap(), Value::None);
}

#[test]
fn to_value_some() {
    assert_eq!(to_value(Some(3)).unwrap(), Value::Integer(3));
}

#[test]
fn to_value_unit() {
    assert_eq!(to_value(()).unwrap(), Value::None);
}

#[test]
fn to_value_unit_struct() {
    #[derive(Serialize)]
    struct Test;

    assert_eq!(to_value(Test).unwrap(), Value::None);
}

#[test]
fn to_value_unit_variant() {
    #[derive(Serialize)]
    enum Test {
        Variant,
    }

    assert_eq!(to_value(Test::Variant).unwrap(), Value::from("Variant"));
}

#[test]
fn to_value_newtype_struct() {
    #[derive(Serialize)]
    struct Test(&'static str);

    assert_eq!(to_value(Test("inner")).unwrap(), Value::from("inner"));
}

#[test]
fn to_value_newtype_variant() {
    #[derive(Serialize)]
    enum Test {
        Variant(&'static str),
    }

    assert_eq!(
        to_value(Test::Variant("inner")).unwrap(),
        Value::from([("Variant", "inner")])
    );
}

#[test]
fn to_value_seq() {
    assert_eq!(
        to_value(vec!["a", "b"]).unwrap(),
        Value::from([Value::from("a"), Value::from("b")])
    );
}

#[test]
fn to_value_tuple() {
    assert_eq!(
        to_value((1, "two", false)).unwrap(),
        Value::List(vec![Value::from(1), Value::from("two"), Value::from(false)])
    );
}

#[test]
fn to_value_tuple_variant() {
    #[derive(Serialize)]
    enum Test {
        Variant(i32, i32),
    }

    assert_eq!(
        to_value(Test::Variant(1, 2)).unwrap(),
        Value::from([("Variant", [1, 2])])
    );
}

#[test]
fn to_value_map() {
    let mut map = BTreeMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    assert_eq!(to_value(map).unwrap(), Value::from([("a", 1), ("b", 2)]));
}

#[test]
fn to_value_map_integer_key() {
    let mut map = BTreeMap::new();
    map.insert(1, "one");
    assert_eq!(to_value(map).unwrap(), Value::from([("1", "one")]));
}

#[test]
fn to_value_map_key_not_string() {
    let mut map = BTreeMap::new();
    map.insert(vec![1], "one");
    let err = to_value(map).unwrap_err();
    assert_eq!(err.to_string(), "map key must be a string, found list");
}

#[test]
fn to_value_struct() {
    #[derive(Serialize)]
    struct Test {
        name: &'static str,
        tags: Vec<&'static str>,
        extra: Option<i32>,
    }

    let test = Test {
        name: "John",
        tags: vec!["a"],
        extra: None,
    };
    assert_eq!(
        to_value(test).unwrap(),
        Value::from([
            ("name", Value::from("John")),
            ("tags", Value::from(["a"])),
            ("extra", Value::None),
        ])
    );
}

#[test]
fn to_value_struct_variant() {
    #[derive(Serialize)]
    enum Test {
        Variant { a: i32 },
    }

    assert_eq!(
        to_value(Test::Variant { a: 1 }).unwrap(),
        Value::from([("Variant", Value::from([("a", 1)]))])
    );
}

#[test]
fn to_value_value_round_trips() {
    let value = mark::value! { a: [1, None], b: { c: "d" } };
    assert_eq!(to_value(&value).unwrap(), value);
}
