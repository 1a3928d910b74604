//! Run with: wasm-pack test --node crates/beacon-native --features wasm

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use beacon_native::{wasm, GREETING};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_direct_hello() {
    assert_eq!(wasm::hello(), GREETING);
}

#[wasm_bindgen_test]
fn test_initialize_binds_hello_on_object() {
    let exports = wasm::initialize(Object::new()).unwrap();
    let keys = Object::keys(&exports);
    assert_eq!(keys.length(), 1);
    assert_eq!(keys.get(0).as_string().as_deref(), Some("hello"));

    let hello: Function = Reflect::get(&exports, &JsValue::from_str("hello"))
        .unwrap()
        .dyn_into()
        .unwrap();
    let bare = hello.call0(&JsValue::NULL).unwrap();
    let extra = hello
        .call3(&JsValue::NULL, &JsValue::from_str("ignored"), &JsValue::from_f64(123.0), &JsValue::NULL)
        .unwrap();
    assert_eq!(bare.as_string().as_deref(), Some(GREETING));
    assert_eq!(extra.as_string(), bare.as_string());
}
