//! Export surfaces
//!
//! An export surface is whatever the host gives the module at load time to
//! bind named capabilities into: the `exports` object in Node, a plain JS
//! object under wasm, or the in-memory [`Exports`] map used by
//! `beacon-host`. Each host adapter implements [`ExportSurface`].

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ExportError, Result};
use crate::value::{CallContext, Value};

/// A callable unit exposed across the boundary
#[derive(Clone, Copy)]
pub struct Capability(fn(&CallContext<'_>) -> Value);

impl Capability {
    pub const fn new(call: fn(&CallContext<'_>) -> Value) -> Self {
        Self(call)
    }

    pub fn invoke(&self, ctx: &CallContext<'_>) -> Value {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({:p})", self.0 as *const ())
    }
}

/// Registration surface provided by a host
pub trait ExportSurface {
    type Error;

    /// Bind `name` to `capability`
    fn set(&mut self, name: &'static str, capability: Capability) -> std::result::Result<(), Self::Error>;
}

impl<S: ExportSurface + ?Sized> ExportSurface for &mut S {
    type Error = S::Error;

    fn set(&mut self, name: &'static str, capability: Capability) -> std::result::Result<(), Self::Error> {
        (**self).set(name, capability)
    }
}

/// In-memory export surface
///
/// Rejects a second binding for the same name, and any binding once sealed.
#[derive(Debug, Default, Clone)]
pub struct Exports {
    bindings: BTreeMap<&'static str, Capability>,
    sealed: bool,
}

impl Exports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop accepting bindings. Hosts seal after the entry point returns.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ExportSurface for Exports {
    type Error = ExportError;

    fn set(&mut self, name: &'static str, capability: Capability) -> Result<()> {
        if self.sealed {
            return Err(ExportError::Sealed(name.to_owned()));
        }
        if self.bindings.contains_key(name) {
            return Err(ExportError::Duplicate(name.to_owned()));
        }
        self.bindings.insert(name, capability);
        Ok(())
    }
}
