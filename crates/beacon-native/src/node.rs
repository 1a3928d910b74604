//! Node-API entry point
//!
//! Built with `--features node` the cdylib is the `beacon-native.node` add-on:
//!
//! ```javascript
//! const native = require('./beacon-native.node');
//! native.hello();                      // greeting
//! native.hello('ignored', 123, null);  // same greeting
//! ```

use napi::{Env, JsObject, JsUnknown, Result, ValueType};
use napi_derive::module_exports;

use crate::{initialize, CallContext, Capability, ExportSurface, Value};

/// The `exports` object node hands the add-on at load time
struct NodeExports {
    env: Env,
    exports: JsObject,
}

impl ExportSurface for NodeExports {
    type Error = napi::Error;

    fn set(&mut self, name: &'static str, capability: Capability) -> Result<()> {
        let function = self.env.create_function_from_closure(name, move |ctx| {
            let args = (0..ctx.length)
                .map(|i| ctx.get::<JsUnknown>(i).and_then(from_js))
                .collect::<Result<Vec<_>>>()?;
            let result = capability.invoke(&CallContext::new(&args));
            to_js(ctx.env, &result)
        })?;
        self.exports.set_named_property(name, function)
    }
}

#[module_exports]
fn init(exports: JsObject, env: Env) -> Result<()> {
    initialize(NodeExports { env, exports })?;
    Ok(())
}

/// Objects, arrays and functions arrive as [`Value::Opaque`]
fn from_js(value: JsUnknown) -> Result<Value> {
    Ok(match value.get_type()? {
        ValueType::Undefined => Value::Undefined,
        ValueType::Null => Value::Null,
        ValueType::Boolean => Value::Bool(value.coerce_to_bool()?.get_value()?),
        ValueType::Number => Value::Number(value.coerce_to_number()?.get_double()?),
        ValueType::String => Value::String(value.coerce_to_string()?.into_utf8()?.into_owned()?),
        _ => Value::Opaque,
    })
}

fn to_js(env: &Env, value: &Value) -> Result<JsUnknown> {
    Ok(match value {
        Value::Undefined | Value::Opaque => env.get_undefined()?.into_unknown(),
        Value::Null => env.get_null()?.into_unknown(),
        Value::Bool(b) => env.get_boolean(*b)?.into_unknown(),
        Value::Number(n) => env.create_double(*n)?.into_unknown(),
        Value::String(s) => env.create_string(s)?.into_unknown(),
        Value::Array(items) => {
            let mut array = env.create_array_with_length(items.len())?;
            for (i, item) in items.iter().enumerate() {
                array.set_element(i as u32, to_js(env, item)?)?;
            }
            array.into_unknown()
        }
        Value::Object(map) => {
            let mut object = env.create_object()?;
            for (key, item) in map {
                object.set_named_property(key, to_js(env, item)?)?;
            }
            object.into_unknown()
        }
    })
}
