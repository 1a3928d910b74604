//! Beacon Host - in-process runtime for native modules
//!
//! Plays the host side of the boundary without node: hands a module a fresh
//! export surface, keeps the registration record it produces, and resolves
//! capabilities by name.
//!
//! ## Lifecycle
//!
//! ```text
//! Unregistered --load()--> Registered --unload()--> Unregistered
//! ```
//!
//! The module's entry point runs exactly once per `load()`. The registration
//! record is sealed as soon as the entry point returns, so invocation reads
//! it without locking.
//!
//! ```
//! use beacon_host::ModuleHost;
//! use beacon_native::{Value, GREETING, MODULE};
//!
//! let mut host = ModuleHost::new(MODULE);
//! host.load().unwrap();
//! assert_eq!(host.invoke("hello", &[Value::Null]).unwrap(), Value::from(GREETING));
//! ```

use std::sync::{Mutex, PoisonError};

use beacon_native::{CallContext, Exports, ModuleDef, Value};

mod error;
pub mod trace;

pub use error::{HostError, Result};
use trace::{CallRecord, CallTrace};

/// Lifecycle of a module inside the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unregistered,
    Registered,
}

/// Host runtime for a single module
#[derive(Debug)]
pub struct ModuleHost {
    module: ModuleDef,
    /// Registration record, present while registered
    exports: Option<Exports>,
    /// Invocation trace, when enabled
    trace: Option<Mutex<CallTrace>>,
}

impl ModuleHost {
    pub fn new(module: ModuleDef) -> Self {
        Self {
            module,
            exports: None,
            trace: None,
        }
    }

    /// Record every invocation
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Mutex::new(CallTrace::new(self.module.name)));
        self
    }

    pub fn module_name(&self) -> &'static str {
        self.module.name
    }

    pub fn state(&self) -> LoadState {
        match self.exports {
            Some(_) => LoadState::Registered,
            None => LoadState::Unregistered,
        }
    }

    /// Run the module's entry point against a fresh surface
    pub fn load(&mut self) -> Result<()> {
        if self.exports.is_some() {
            return Err(HostError::AlreadyLoaded(self.module.name));
        }

        let mut exports = (self.module.init)(Exports::new()).map_err(|source| HostError::Load {
            module: self.module.name,
            source,
        })?;
        exports.seal();

        tracing::info!(
            module = self.module.name,
            capabilities = exports.len(),
            "loaded module"
        );
        self.exports = Some(exports);
        Ok(())
    }

    /// Drop the registration record
    ///
    /// The module has no teardown of its own; this only forgets its bindings.
    pub fn unload(&mut self) {
        if self.exports.take().is_some() {
            tracing::info!(module = self.module.name, "unloaded module");
        }
    }

    /// Names bound by the module, sorted
    pub fn capabilities(&self) -> Result<Vec<&'static str>> {
        Ok(self.registered()?.names().collect())
    }

    /// Invoke a capability by name
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        let capability = self
            .registered()?
            .get(name)
            .ok_or_else(|| HostError::UnknownCapability(name.to_owned()))?;

        let result = capability.invoke(&CallContext::new(args));
        tracing::trace!(capability = name, args = args.len(), result = result.kind(), "invoked");

        if let Some(trace) = &self.trace {
            trace
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record(CallRecord::new(name, args.len(), &result));
        }
        Ok(result)
    }

    /// Snapshot of the invocation trace, `None` unless tracing was enabled
    pub fn trace(&self) -> Option<CallTrace> {
        self.trace.as_ref().map(|t| {
            let mut snapshot = t.lock().unwrap_or_else(PoisonError::into_inner).clone();
            snapshot.finalize();
            snapshot
        })
    }

    fn registered(&self) -> Result<&Exports> {
        self.exports.as_ref().ok_or(HostError::NotLoaded)
    }
}
