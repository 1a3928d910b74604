//! End-to-end: load the beacon module in the in-process host and call it.

use beacon_host::{HostError, LoadState, ModuleHost};
use beacon_native::{Value, GREETING, MODULE};
use proptest::prelude::*;

fn loaded_host() -> ModuleHost {
    let mut host = ModuleHost::new(MODULE);
    host.load().expect("load failed");
    host
}

#[test]
fn test_load_and_call_hello() {
    let host = loaded_host();
    assert_eq!(host.state(), LoadState::Registered);

    let result = host.invoke("hello", &[]).unwrap();
    assert_eq!(result.as_str().unwrap().as_bytes(), GREETING.as_bytes());
}

#[test]
fn test_call_hello_with_ignored_arguments() {
    let host = loaded_host();
    let bare = host.invoke("hello", &[]).unwrap();
    let extra = host
        .invoke("hello", &[Value::from("ignored"), Value::from(123), Value::Null])
        .unwrap();
    assert_eq!(extra, bare);
}

#[test]
fn test_exports_hold_only_hello() {
    let host = loaded_host();
    assert_eq!(host.capabilities().unwrap(), vec!["hello"]);
    assert!(matches!(
        host.invoke("Hello", &[]),
        Err(HostError::UnknownCapability(name)) if name == "Hello"
    ));
}

#[test]
fn test_concurrent_invocation() {
    let host = loaded_host().with_trace();
    let baseline = host.invoke("hello", &[]).unwrap();

    std::thread::scope(|s| {
        for t in 0..8 {
            let host = &host;
            let baseline = &baseline;
            s.spawn(move || {
                for i in 0..250 {
                    let args = vec![Value::from(t), Value::from(i)];
                    assert_eq!(&host.invoke("hello", &args).unwrap(), baseline);
                }
            });
        }
    });

    let trace = host.trace().unwrap();
    assert_eq!(trace.len(), 1 + 8 * 250);
    assert!(trace.calls.iter().all(|c| c.output == serde_json::json!(GREETING)));
}

proptest! {
    #[test]
    fn prop_json_arguments_ignored(raw in prop::collection::vec(any::<i32>(), 0..6), text in ".{0,12}") {
        let host = loaded_host();
        let mut args: Vec<Value> = raw.into_iter().map(Value::from).collect();
        args.push(Value::from(text));
        prop_assert_eq!(host.invoke("hello", &args).unwrap(), Value::from(GREETING));
    }
}
