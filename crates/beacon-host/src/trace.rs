//! Invocation tracing

use beacon_native::Value;
use serde::{Deserialize, Serialize};

/// A single capability invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Capability name as requested by the caller
    pub capability: String,
    /// Number of arguments passed
    pub arg_count: usize,
    /// Returned value, json-encoded
    pub output: serde_json::Value,
    pub timestamp_ms: u64,
}

impl CallRecord {
    pub fn new(capability: &str, arg_count: usize, output: &Value) -> Self {
        Self {
            capability: capability.to_owned(),
            arg_count,
            output: output.into(),
            timestamp_ms: now_ms(),
        }
    }
}

/// All invocations made against one loaded module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallTrace {
    pub module: String,
    pub calls: Vec<CallRecord>,
    pub start_time_ms: u64,
    pub end_time_ms: u64,
}

impl CallTrace {
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_owned(),
            calls: Vec::new(),
            start_time_ms: now_ms(),
            end_time_ms: 0,
        }
    }

    pub fn record(&mut self, call: CallRecord) {
        self.calls.push(call);
    }

    pub fn finalize(&mut self) {
        self.end_time_ms = now_ms();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calls made to `capability`
    pub fn calls_to<'a>(&'a self, capability: &'a str) -> impl Iterator<Item = &'a CallRecord> + 'a {
        self.calls.iter().filter(move |c| c.capability == capability)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
