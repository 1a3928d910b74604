//! Boundary contract tests: registration and the hello capability.

use beacon_native::{initialize, CallContext, Exports, Value, GREETING, HELLO};
use proptest::prelude::*;

fn loaded() -> Exports {
    let mut exports = initialize(Exports::new()).expect("initialize failed");
    exports.seal();
    exports
}

fn call_hello(exports: &Exports, args: &[Value]) -> Value {
    exports
        .get(HELLO)
        .expect("hello not bound")
        .invoke(&CallContext::new(args))
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        Just(Value::Opaque),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::Number),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

#[test]
fn test_load_then_hello() {
    let exports = loaded();
    let result = call_hello(&exports, &[]);
    assert_eq!(result.as_str().map(str::as_bytes), Some(GREETING.as_bytes()));
}

#[test]
fn test_hello_with_extra_arguments() {
    let exports = loaded();
    let bare = call_hello(&exports, &[]);
    let extra = call_hello(&exports, &[Value::from("ignored"), Value::from(123), Value::Null]);
    assert_eq!(bare, extra);
}

#[test]
fn test_only_hello_is_bound() {
    let exports = loaded();
    assert_eq!(exports.names().collect::<Vec<_>>(), vec!["hello"]);
}

#[test]
fn test_repeated_calls_stable() {
    let exports = loaded();
    let first = call_hello(&exports, &[]);
    for _ in 0..1000 {
        assert_eq!(call_hello(&exports, &[]), first);
    }
}

#[test]
fn test_concurrent_calls_match_single_threaded() {
    let exports = loaded();
    let baseline = call_hello(&exports, &[]);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| (0..500).map(|_| call_hello(&exports, &[])).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            for result in handle.join().unwrap() {
                assert_eq!(result, baseline);
            }
        }
    });
}

proptest! {
    #[test]
    fn prop_hello_ignores_any_arguments(args in prop::collection::vec(arb_value(), 0..8)) {
        let exports = loaded();
        let result = call_hello(&exports, &args);
        prop_assert_eq!(result, Value::String(GREETING.to_owned()));
    }
}
