//! Beacon native add-on
//!
//! The boundary module behind `beacon-native.node`. It registers a single
//! capability, `hello`, on whatever export surface the host hands it at load
//! time, and `hello` answers every call with the same greeting.
//!
//! ## Hosts
//!
//! - `node`: Node-API entry point, `require('beacon-native.node').hello()`
//! - `wasm`: `wasm-bindgen` exports plus `initialize(exports)` for JS objects
//! - `ffi`: `beacon_hello()` C symbol for `dlopen` hosts
//!
//! Without any feature the crate is the plain Rust boundary, which is what
//! `beacon-host` loads in-process.
//!
//! ```
//! use beacon_native::{initialize, CallContext, Exports, Value, GREETING};
//!
//! let exports = initialize(Exports::new()).unwrap();
//! let hello = exports.get("hello").unwrap();
//! assert_eq!(hello.invoke(&CallContext::empty()), Value::from(GREETING));
//! ```

mod error;
pub mod exports;
pub mod value;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "node")]
mod node;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ExportError, Result};
pub use exports::{Capability, ExportSurface, Exports};
pub use value::{CallContext, Value};

/// Name the greeting capability is exported under
pub const HELLO: &str = "hello";

/// The text `hello` returns, byte-for-byte what existing callers expect
pub const GREETING: &str = "Hello from C++ native add-on (finally building!)!";

/// A loadable module: its name and its registration entry point
#[derive(Clone, Copy)]
pub struct ModuleDef {
    pub name: &'static str,
    pub init: fn(Exports) -> Result<Exports>,
}

impl std::fmt::Debug for ModuleDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDef").field("name", &self.name).finish()
    }
}

/// Module declaration used by in-process hosts
pub const MODULE: ModuleDef = ModuleDef {
    name: "beacon-native",
    init: initialize,
};

/// Registration entry point
///
/// Binds [`HELLO`] on the surface and hands the surface back. Runs once per
/// load; a surface that refuses the binding reports through its own error.
pub fn initialize<S: ExportSurface>(mut exports: S) -> std::result::Result<S, S::Error> {
    exports.set(HELLO, Capability::new(hello))?;
    tracing::debug!(capability = HELLO, "bound capability");
    Ok(exports)
}

/// The `hello` capability. Arguments are ignored.
pub fn hello(_ctx: &CallContext<'_>) -> Value {
    Value::String(GREETING.to_owned())
}
