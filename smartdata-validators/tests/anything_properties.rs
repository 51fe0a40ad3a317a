//! Property-based tests for the pass-through validator.

use proptest::prelude::*;
use serde_json::{Value, json};
use smartdata_validators::{Anything, Options, Validator};

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,64}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Anything is the identity for every value
    #[test]
    fn anything_is_identity(value in value_strategy()) {
        let out = Anything.validate(value.clone(), &Options::new()).unwrap();
        prop_assert_eq!(out, value);
    }

    /// Options never change what Anything returns
    #[test]
    fn anything_ignores_options(value in value_strategy(), flag in any::<bool>()) {
        let mut options = Options::new();
        options.insert("allowNull".into(), json!(flag));
        let out = Anything.validate(value.clone(), &options).unwrap();
        prop_assert_eq!(out, value);
    }
}
