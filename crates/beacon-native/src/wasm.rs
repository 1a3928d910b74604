//! WASM bindings
//!
//! ```javascript
//! import init, { hello, initialize } from './beacon_native.js';
//!
//! await init();
//! hello();                          // greeting
//! const exports = initialize({});   // { hello: [Function] }
//! exports.hello('ignored', 123);    // greeting
//! ```

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::{CallContext, Capability, ExportSurface, Value};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Direct export of the `hello` capability
#[wasm_bindgen]
pub fn hello() -> String {
    crate::GREETING.to_owned()
}

/// Bind the module's capabilities onto a JS object and return it
#[wasm_bindgen]
pub fn initialize(exports: Object) -> Result<Object, JsValue> {
    let surface = crate::initialize(JsExports { exports })?;
    Ok(surface.exports)
}

/// Plain JS object used as an export surface
pub struct JsExports {
    pub exports: Object,
}

impl ExportSurface for JsExports {
    type Error = JsValue;

    fn set(&mut self, name: &'static str, capability: Capability) -> Result<(), JsValue> {
        // closures see no positional arguments: wasm-bindgen has no variadic closures
        let function = Closure::<dyn Fn() -> JsValue>::new(move || {
            to_js(&capability.invoke(&CallContext::empty()))
        })
        .into_js_value();
        Reflect::set(&self.exports, &JsValue::from_str(name), &function)?;
        Ok(())
    }
}

pub fn to_js(value: &Value) -> JsValue {
    match value {
        Value::Undefined | Value::Opaque => JsValue::UNDEFINED,
        Value::Null => JsValue::NULL,
        Value::Bool(b) => JsValue::from_bool(*b),
        Value::Number(n) => JsValue::from_f64(*n),
        Value::String(s) => JsValue::from_str(s),
        Value::Array(items) => items.iter().map(to_js).collect::<Array>().into(),
        Value::Object(map) => {
            let object = Object::new();
            for (key, item) in map {
                // setting a data property on a fresh object cannot throw
                let _ = Reflect::set(&object, &JsValue::from_str(key), &to_js(item));
            }
            object.into()
        }
    }
}
