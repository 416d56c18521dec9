#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde::Serialize;

#[derive(Debug, Serialize, Arbitrary)]
#[serde(untagged)]
enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

#[derive(Debug, Arbitrary)]
struct Options {
    delimiter: char,
    compact: bool,
}

fuzz_target!(|data: (&str, Vec<(&str, &str)>, Value, Options)| {
    let (root, includes, value, options) = data;
    let mut engine = mark::Engine::new();
    engine.set_delimiter(options.delimiter);
    engine.set_compact(options.compact);
    engine.set_max_depth(16);
    for (name, source) in includes {
        engine.add_include(name, source);
    }
    let _ = engine.render(root, &value);
});
