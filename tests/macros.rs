use std::collections::BTreeMap;

use mark::{value, Value};

#[test]
fn value_empty() {
    let v = value! {};
    let exp = Value::Map(Default::default());
    assert_eq!(v, exp);
}

#[test]
fn value_literal() {
    let tests = [
        (value! { f: None }, Value::from([("f", Value::None)])),
        (value! { f: true }, Value::from([("f", true)])),
        (value! { f: false }, Value::from([("f", false)])),
        (value! { f: 123 }, Value::from([("f", 123)])),
        (value! { f: -123 }, Value::from([("f", -123)])),
        (value! { f: 12.3 }, Value::from([("f", 12.3)])),
        (value! { f: -12.3 }, Value::from([("f", -12.3)])),
        (value! { f: "test" }, Value::from([("f", "test")])),
    ];
    for (v, exp) in tests {
        assert_eq!(v, exp);
    }
}

#[test]
fn value_string_keys() {
    let v = value! { "first name": "John", "last-name": "Smith" };
    let exp = Value::from([("first name", "John"), ("last-name", "Smith")]);
    assert_eq!(v, exp);
}

#[test]
fn value_expression() {
    let name = String::from("John");
    let v = value! { name: name.clone(), len: name.len() };
    let exp = Value::from([("name", Value::from("John")), ("len", Value::from(4))]);
    assert_eq!(v, exp);
}

#[test]
fn value_list() {
    let v = value! { list: [1, "two", None, [3], { four: 4 }] };
    let exp = Value::from([(
        "list",
        Value::List(vec![
            Value::from(1),
            Value::from("two"),
            Value::None,
            Value::from([3]),
            Value::from([("four", 4)]),
        ]),
    )]);
    assert_eq!(v, exp);
}

#[test]
fn value_nested_map() {
    let v = value! {
        user: {
            name: "John",
            address: {
                city: "Paris",
            },
        },
    };
    let mut address = BTreeMap::new();
    address.insert("city", Value::from("Paris"));
    let mut user = BTreeMap::new();
    user.insert("name", Value::from("John"));
    user.insert("address", Value::from(address));
    let exp = Value::from([("user", user)]);
    assert_eq!(v, exp);
}

#[test]
fn value_renders() {
    let ctx = value! { greeting: "Hello", names: ["Ann", "Bob"] };
    let result = mark::render_from("{{greeting}}, {{names|join> and }}", &ctx).unwrap();
    assert_eq!(result, "Hello, Ann and Bob");
}
