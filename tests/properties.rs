use mark::{value, Engine, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn text_without_tags_is_unchanged(text in "[^{]*") {
        let result = mark::render_from(&text, &value! {}).unwrap();
        prop_assert_eq!(result, text);
    }

    #[test]
    fn compact_is_idempotent(text in "[<>a-z \t\n]*") {
        let mut engine = Engine::new();
        engine.set_compact(true);
        let once = engine.render_from(&text, &value! {}).unwrap();
        let twice = engine.render_from(&once, &value! {}).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn property_is_substituted(name in "[a-z]{1,8}", text in "[a-zA-Z0-9 <>]*") {
        let key = format!("v_{name}");
        let ctx = Value::from([(key.as_str(), text.as_str())]);
        let result = mark::render_from(&format!("[{{{{{key}}}}}]"), &ctx).unwrap();
        prop_assert_eq!(result, format!("[{text}]"));
    }

    #[test]
    fn list_block_repeats_body(items in prop::collection::vec("[a-z]{0,5}", 0..8)) {
        let ctx = value! { items: items.clone() };
        let result = mark::render_from("{{items}}{{.}};{{/items}}", &ctx).unwrap();
        let expected: String = items.iter().map(|item| format!("{item};")).collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn chop_limits_length(text in "[a-z ]{0,40}", n in 0usize..20) {
        let ctx = value! { text: text.clone() };
        let result = mark::render_from(&format!("{{{{text|chop>{n}}}}}"), &ctx).unwrap();
        if text.chars().count() > n {
            prop_assert_eq!(result.chars().count(), n + 3);
            prop_assert!(result.ends_with("..."));
        } else {
            prop_assert_eq!(result, text);
        }
    }
}
