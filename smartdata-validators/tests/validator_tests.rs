use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use smartdata_validators::{Anything, Options, ValidationError, Validator, ValidatorRegistry};
use std::sync::Arc;

fn options(value: Value) -> Options {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn non_empty(value: Value, _options: &Options) -> smartdata_validators::Result<Value> {
    match value.as_str() {
        Some("") => Err(ValidationError::rejected("must not be empty")),
        _ => Ok(value),
    }
}

// ── Anything ─────────────────────────────────────────────────────

#[test]
fn anything_returns_value_unchanged() {
    let v = Anything.validate(json!("Some Validated Value"), &Options::new()).unwrap();
    assert_eq!(v, json!("Some Validated Value"));
}

#[test]
fn anything_accepts_null() {
    let v = Anything.validate(Value::Null, &Options::new()).unwrap();
    assert_eq!(v, Value::Null);
}

#[test]
fn anything_ignores_options() {
    let opts = options(json!({"allowNull": true, "max": 3}));
    let v = Anything.validate(json!([1, 2, 3, 4]), &opts).unwrap();
    assert_eq!(v, json!([1, 2, 3, 4]));
}

#[test]
fn anything_id() {
    assert_eq!(Anything::ID, "Anything");
}

// ── Function validators ──────────────────────────────────────────

#[test]
fn plain_fn_is_a_validator() {
    assert_eq!(non_empty(json!("x"), &Options::new()).unwrap(), json!("x"));
    assert_eq!(
        non_empty(json!(""), &Options::new()),
        Err(ValidationError::Rejected("must not be empty".into()))
    );
}

#[test]
fn closure_can_coerce_using_options() {
    let clamp = |value: Value, options: &Options| -> smartdata_validators::Result<Value> {
        let max = options.get("max").and_then(Value::as_i64).unwrap_or(i64::MAX);
        let n = value
            .as_i64()
            .ok_or_else(|| ValidationError::rejected("not an integer"))?;
        Ok(json!(n.min(max)))
    };

    let opts = options(json!({"max": 10}));
    assert_eq!(clamp.validate(json!(42), &opts).unwrap(), json!(10));
    assert_eq!(clamp.validate(json!(7), &opts).unwrap(), json!(7));
    assert!(clamp.validate(json!("seven"), &opts).is_err());
}

// ── ValidationError ──────────────────────────────────────────────

#[test]
fn validation_error_messages() {
    assert_eq!(
        ValidationError::rejected("too long").to_string(),
        "value rejected: too long"
    );
    let e = ValidationError::InvalidOption {
        option: "max".into(),
        reason: "must be a number".into(),
    };
    assert_eq!(e.to_string(), "invalid option 'max': must be a number");
}

// ── Registry ─────────────────────────────────────────────────────

#[test]
fn empty_registry() {
    let registry = ValidatorRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.contains(Anything::ID));
    assert!(registry.get(Anything::ID).is_none());
}

#[test]
fn builtins_contain_anything() {
    let registry = ValidatorRegistry::with_builtins();
    assert!(registry.contains("Anything"));
    assert_eq!(registry.ids(), vec!["Anything"]);

    let v = registry
        .get("Anything")
        .unwrap()
        .validate(json!({"k": 1}), &Options::new())
        .unwrap();
    assert_eq!(v, json!({"k": 1}));
}

#[test]
fn register_adds_and_replaces() {
    let mut registry = ValidatorRegistry::with_builtins();
    assert!(registry.register("NonEmpty", non_empty).is_none());
    assert_eq!(registry.len(), 2);

    let previous = registry.register("NonEmpty", Anything);
    assert!(previous.is_some());
    assert_eq!(registry.len(), 2);

    // The replacement is now in effect.
    let v = registry
        .get("NonEmpty")
        .unwrap()
        .validate(json!(""), &Options::new())
        .unwrap();
    assert_eq!(v, json!(""));
}

#[test]
fn register_shared_reuses_instance() {
    let shared: Arc<dyn Validator> = Arc::new(Anything);
    let mut registry = ValidatorRegistry::new();
    registry.register_shared("a", Arc::clone(&shared));
    registry.register_shared("b", shared);
    assert_eq!(registry.ids(), vec!["a", "b"]);
}

#[test]
fn ids_are_sorted() {
    let mut registry = ValidatorRegistry::new();
    registry.register("zeta", Anything);
    registry.register("alpha", Anything);
    registry.register("mid", Anything);
    assert_eq!(registry.ids(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn debug_lists_ids() {
    let registry = ValidatorRegistry::with_builtins();
    assert_eq!(
        format!("{registry:?}"),
        r#"ValidatorRegistry { ids: ["Anything"] }"#
    );
}
