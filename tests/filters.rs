use std::collections::BTreeMap;

use mark::{value, Engine, Error, Iter, Value};

#[test]
fn render_filter_arity_1() {
    let mut engine = Engine::new();
    engine.add_filter("lower", |v: String| v.to_lowercase());
    let result = engine
        .render_from("{{ name | lower }}", &value! { name: "JOHN" })
        .unwrap();
    assert_eq!(result, "john");
}

#[test]
fn render_filter_arity_2() {
    let mut engine = Engine::new();
    engine.add_filter("append", |mut v: String, a: String| {
        v.push_str(&a);
        v
    });
    let result = engine
        .render_from("{{ name | append> Smith }}", &value! { name: "John" })
        .unwrap();
    assert_eq!(result, "John Smith ");
}

#[test]
fn render_filter_arity_3() {
    let mut engine = Engine::new();
    engine.add_filter("replace", |v: String, from: String, to: String| {
        v.replace(&from, &to)
    });
    let result = engine
        .render_from("{{ name | replace>Smith>Newton}}", &value! { name: "John Smith" })
        .unwrap();
    assert_eq!(result, "John Newton");
}

#[test]
fn render_filter_arity_4() {
    let mut engine = Engine::new();
    engine.add_filter("sum", |v: i64, a: i64, b: i64, c: i64| v + a + b + c);
    let result = engine
        .render_from("{{ n | sum>1>2>3 }}", &value! { n: 4 })
        .unwrap();
    assert_eq!(result, "10");
}

#[test]
fn render_filter_arity_5() {
    let mut engine = Engine::new();
    engine.add_filter(
        "concat",
        |v: String, a: String, b: String, c: String, d: String| format!("{v}{a}{b}{c}{d}"),
    );
    let result = engine
        .render_from("{{ s | concat>b>c>d>e}}", &value! { s: "a" })
        .unwrap();
    assert_eq!(result, "abcde");
}

#[test]
fn render_filter_fn_item() {
    fn add(a: i64, b: i64) -> i64 {
        a + b
    }

    let mut engine = Engine::new();
    engine.add_filter("add", add);
    let result = engine
        .render_from("{{ n | add>10 | add>-1 }}", &value! { n: 5 })
        .unwrap();
    assert_eq!(result, "14");
}

#[test]
fn render_filter_returns_result() {
    let mut engine = Engine::new();
    engine.add_filter("halve", |n: i64| -> mark::Result<i64> {
        if n % 2 == 0 {
            Ok(n / 2)
        } else {
            Err(Error::new("odd number"))
        }
    });
    let template = "{{ n | halve | halve }}";
    assert_eq!(engine.render_from(template, &value! { n: 12 }).unwrap(), "3");
    assert_eq!(engine.render_from(template, &value! { n: 6 }).unwrap(), "3");
    assert_eq!(engine.render_from(template, &value! { n: 7 }).unwrap(), "7");
}

#[test]
fn render_filter_returns_option() {
    let mut engine = Engine::new();
    engine.add_filter("initial", |s: String| s.chars().next());
    let template = "[{{ s | initial }}]";
    assert_eq!(engine.render_from(template, &value! { s: "John" }).unwrap(), "[J]");
    assert_eq!(engine.render_from(template, &value! { s: "" }).unwrap(), "[null]");
}

#[test]
fn render_filter_missing_argument_passes_through() {
    let mut engine = Engine::new();
    engine.add_filter("add", |a: i64, b: i64| a + b);
    let result = engine
        .render_from("{{ n | add }}", &value! { n: 5 })
        .unwrap();
    assert_eq!(result, "5");
}

#[test]
fn render_filter_extra_arguments_are_ignored() {
    let mut engine = Engine::new();
    engine.add_filter("add", |a: i64, b: i64| a + b);
    let result = engine
        .render_from("{{ n | add>1>2>3 }}", &value! { n: 5 })
        .unwrap();
    assert_eq!(result, "6");
}

#[test]
fn render_filter_optional_argument() {
    let mut engine = Engine::new();
    engine.add_filter("greet", |name: String, greeting: Option<String>| {
        format!("{}, {name}", greeting.as_deref().unwrap_or("Hello"))
    });
    let ctx = value! { name: "Ann" };
    assert_eq!(engine.render_from("{{name|greet}}", &ctx).unwrap(), "Hello, Ann");
    assert_eq!(engine.render_from("{{name|greet>Hi}}", &ctx).unwrap(), "Hi, Ann");
}

#[test]
fn render_filter_bad_argument_passes_through() {
    let mut engine = Engine::new();
    engine.add_filter("add", |a: i64, b: i64| a + b);
    let result = engine
        .render_from("{{ n | add>ten }}", &value! { n: 5 })
        .unwrap();
    assert_eq!(result, "5");
}

#[test]
fn render_filter_bad_value_passes_through() {
    let mut engine = Engine::new();
    engine.add_filter("first", |list: Vec<Value>| list.into_iter().next());
    let result = engine
        .render_from("{{ s | first }}", &value! { s: "text" })
        .unwrap();
    assert_eq!(result, "text");
}

#[test]
fn render_filter_numeric_string_value() {
    let mut engine = Engine::new();
    engine.add_filter("double", |n: f64| n * 2.0);
    let result = engine
        .render_from("{{ n | double }}", &value! { n: "2.5" })
        .unwrap();
    assert_eq!(result, "5");
}

#[test]
fn render_filter_bool_argument() {
    let mut engine = Engine::new();
    engine.add_filter("shout", |s: String, loud: bool| {
        if loud {
            s.to_uppercase()
        } else {
            s
        }
    });
    let ctx = value! { s: "hey" };
    assert_eq!(engine.render_from("{{s|shout>true}}", &ctx).unwrap(), "HEY");
    assert_eq!(engine.render_from("{{s|shout>0}}", &ctx).unwrap(), "hey");
}

#[test]
fn render_filter_map_value() {
    let mut engine = Engine::new();
    engine.add_filter("keys", |m: BTreeMap<String, Value>| {
        m.into_keys().collect::<Vec<_>>().join("+")
    });
    let result = engine
        .render_from("{{ user | keys }}", &value! { user: { b: 1, a: 2 } })
        .unwrap();
    assert_eq!(result, "a+b");
}

#[test]
fn render_filter_iter_value() {
    let mut engine = Engine::new();
    engine.add_filter("remaining", |iter: Iter| iter.size() - iter.idx() - 1);
    let result = engine
        .render_from(
            "{{items}}{{# | remaining}}{{/items}}",
            &value! { items: ["a", "b", "c"] },
        )
        .unwrap();
    assert_eq!(result, "210");
}

#[test]
fn render_filter_overrides_builtin() {
    let mut engine = Engine::new();
    engine.add_filter("upcase", |s: String| format!("<{s}>"));
    let result = engine
        .render_from("{{ s | upcase }}", &value! { s: "x" })
        .unwrap();
    assert_eq!(result, "<x>");
}

#[test]
fn render_filter_in_block_tag() {
    let mut engine = Engine::new();
    engine.add_filter("evens", |list: Vec<Value>| {
        list.into_iter()
            .filter(|v| matches!(v, Value::Integer(i) if i % 2 == 0))
            .collect::<Vec<_>>()
    });
    let result = engine
        .render_from(
            "{{nums|evens}}{{.}};{{/nums}}",
            &value! { nums: [1, 2, 3, 4] },
        )
        .unwrap();
    assert_eq!(result, "2;4;");
}
