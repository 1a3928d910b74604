//! C ABI exports for hosts that `dlopen` the cdylib

use std::ffi::{c_char, CStr};

static GREETING_C: &CStr = c"Hello from C++ native add-on (finally building!)!";

/// Returns the greeting as a NUL-terminated string.
///
/// The pointer refers to static data inside the library: valid until the
/// library is unloaded, never freed by the caller.
#[no_mangle]
pub extern "C" fn beacon_hello() -> *const c_char {
    GREETING_C.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GREETING;

    #[test]
    fn test_c_greeting_matches() {
        let s = unsafe { CStr::from_ptr(beacon_hello()) };
        assert_eq!(s.to_str().unwrap(), GREETING);
    }

    #[test]
    fn test_pointer_is_stable() {
        assert_eq!(beacon_hello(), beacon_hello());
    }
}
