//! C API
//!
//! Plain C entry points over the core, for hosts that link the static or
//! dynamic library directly. Strings returned from here are owned by the
//! caller and must be released with [`ffi_example_free_string`].

use std::ffi::{CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::{ptr, slice};

use anyhow::Context;
use libc::{c_char, c_int, size_t};

use crate::config::{self, Config};

/// `ffi_example_transform` completed.
pub const FFI_OK: c_int = 0;
/// A required pointer was null.
pub const FFI_ERR_NULL: c_int = -1;
/// The core panicked; the output buffer is unspecified.
pub const FFI_ERR_PANIC: c_int = -2;
/// The output buffer could not hold the result.
pub const FFI_ERR_BUFFER: c_int = -3;

static VERSION_CSTR: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();

// Runs the body behind catch_unwind, turning Err and panics into `$fallback`.
macro_rules! ffi_guard {
    ($name:literal, $fallback:expr, $body:block) => {{
        let result = panic::catch_unwind(AssertUnwindSafe(|| -> anyhow::Result<_> { $body }));
        match result {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => {
                log::warn!("{}: {e:#}", $name);
                $fallback
            }
            Err(_) => {
                log::error!("{}: panic caught at FFI boundary", $name);
                $fallback
            }
        }
    }};
}

pub(crate) fn ok_json<T: serde::Serialize>(data: T) -> String {
    serde_json::json!({ "ok": true, "data": data }).to_string()
}

pub(crate) fn err_json(code: &str, message: &str) -> String {
    serde_json::json!({
        "ok": false,
        "error": { "code": code, "message": message }
    })
    .to_string()
}

fn into_raw(s: String) -> *mut c_char {
    // Hex digests and JSON envelopes never contain interior NULs.
    CString::new(s).map_or(ptr::null_mut(), CString::into_raw)
}

unsafe fn cstr_bytes<'a>(p: *const c_char) -> anyhow::Result<&'a [u8]> {
    if p.is_null() {
        anyhow::bail!("null c string");
    }
    // SAFETY: caller guarantees `p` is a valid NUL-terminated string that
    // outlives the returned slice.
    Ok(unsafe { CStr::from_ptr(p) }.to_bytes())
}

/// Static version string. Do not free.
#[no_mangle]
pub extern "C" fn ffi_example_version() -> *const c_char {
    VERSION_CSTR.as_ptr() as *const c_char
}

/// Parse `cfg_json` (null means defaults), install it for the process and
/// start logging.
///
/// Returns a JSON envelope: `{"ok":true,"data":{"version":..,"config":..}}`
/// or `{"ok":false,"error":{"code":..,"message":..}}`. Only the first
/// successful init takes effect; repeating it with the same config succeeds,
/// a different config fails with `ALREADY_INITIALIZED`.
///
/// # Safety
///
/// `cfg_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn ffi_example_init(cfg_json: *const c_char) -> *mut c_char {
    let envelope = panic::catch_unwind(AssertUnwindSafe(|| {
        let cfg = if cfg_json.is_null() {
            Ok(Config::default())
        } else {
            // SAFETY: forwarded from the caller's contract.
            let bytes = unsafe { CStr::from_ptr(cfg_json) }.to_bytes();
            std::str::from_utf8(bytes)
                .map_err(crate::Error::from)
                .and_then(Config::from_json)
        };
        match cfg.and_then(config::install) {
            Ok(active) => ok_json(serde_json::json!({
                "version": crate::VERSION,
                "config": active,
            })),
            Err(e) => err_json(e.code(), &e.to_string()),
        }
    }))
    .unwrap_or_else(|_| err_json("PANIC", "panicked during init"));
    into_raw(envelope)
}

/// Hex MD5 digest of a NUL-terminated UTF-8 string.
///
/// Returns null if `input` is null or not valid UTF-8.
///
/// # Safety
///
/// `input` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn ffi_example_md5(input: *const c_char) -> *mut c_char {
    ffi_guard!("ffi_example_md5", ptr::null_mut(), {
        // SAFETY: forwarded from the caller's contract.
        let bytes = unsafe { cstr_bytes(input) }?;
        let hex = crate::digest_utf8(bytes).context("md5 input")?;
        Ok(into_raw(hex))
    })
}

/// Apply the installed transform (doubling before `ffi_example_init`) to
/// `len` floats from `input`, writing them to `output`.
///
/// `input` and `output` may be null only when `len` is zero. They may be the
/// same buffer but must not partially overlap.
///
/// # Safety
///
/// When `len > 0`, `input` must be valid for `len` reads and `output` for
/// `len` writes of `f32`.
#[no_mangle]
pub unsafe extern "C" fn ffi_example_transform(
    input: *const f32,
    len: size_t,
    output: *mut f32,
) -> c_int {
    if len == 0 {
        return FFI_OK;
    }
    if input.is_null() || output.is_null() {
        return FFI_ERR_NULL;
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let t = config::installed_transform();
        if ptr::eq(input, output) {
            // SAFETY: `output` is valid for `len` reads and writes and is the
            // only view of the buffer.
            let values = unsafe { slice::from_raw_parts_mut(output, len) };
            t.apply_in_place(values);
            Ok(())
        } else {
            // SAFETY: distinct, non-overlapping buffers of `len` elements per
            // the caller's contract.
            let (src, dst) = unsafe {
                (
                    slice::from_raw_parts(input, len),
                    slice::from_raw_parts_mut(output, len),
                )
            };
            t.apply_into(src, dst)
        }
    }));
    match result {
        Ok(Ok(())) => FFI_OK,
        Ok(Err(e)) => {
            log::warn!("ffi_example_transform: {e}");
            FFI_ERR_BUFFER
        }
        Err(_) => {
            log::error!("ffi_example_transform: panic caught at FFI boundary");
            FFI_ERR_PANIC
        }
    }
}

/// Free a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a pointer previously returned by this library that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn ffi_example_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    // SAFETY: `s` came from `CString::into_raw` in this module.
    unsafe { drop(CString::from_raw(s)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(p: *mut c_char) -> String {
        assert!(!p.is_null());
        let s = unsafe { CStr::from_ptr(p) }.to_str().unwrap().to_owned();
        unsafe { ffi_example_free_string(p) };
        s
    }

    #[test]
    fn version_is_crate_version() {
        let v = unsafe { CStr::from_ptr(ffi_example_version()) };
        assert_eq!(v.to_str().unwrap(), crate::VERSION);
    }

    #[test]
    fn md5_round_trip() {
        let input = CString::new("foo").unwrap();
        let out = take(unsafe { ffi_example_md5(input.as_ptr()) });
        assert_eq!(out, "acbd18db4cc2f85cedef654fccc4a4d8");
    }

    #[test]
    fn md5_null_input() {
        assert!(unsafe { ffi_example_md5(ptr::null()) }.is_null());
    }

    #[test]
    fn md5_invalid_utf8() {
        let input = CString::new(vec![0xffu8, 0xfe]).unwrap();
        assert!(unsafe { ffi_example_md5(input.as_ptr()) }.is_null());
    }

    #[test]
    fn transform_writes_output() {
        let input = [1.0f32, 2.0, 3.0];
        let mut output = [0.0f32; 3];
        let rc = unsafe { ffi_example_transform(input.as_ptr(), input.len(), output.as_mut_ptr()) };
        assert_eq!(rc, FFI_OK);
        assert_eq!(output, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn transform_in_place() {
        let mut buf = [0.5f32, -1.0];
        let p = buf.as_mut_ptr();
        let rc = unsafe { ffi_example_transform(p, buf.len(), p) };
        assert_eq!(rc, FFI_OK);
        assert_eq!(buf, [1.0, -2.0]);
    }

    #[test]
    fn transform_null_pointers() {
        let mut output = [0.0f32; 1];
        assert_eq!(
            unsafe { ffi_example_transform(ptr::null(), 1, output.as_mut_ptr()) },
            FFI_ERR_NULL
        );
        assert_eq!(
            unsafe { ffi_example_transform(ptr::null(), 0, ptr::null_mut()) },
            FFI_OK
        );
    }

    #[test]
    fn init_default_envelope() {
        let out = take(unsafe { ffi_example_init(ptr::null()) });
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["ok"], true);
        assert_eq!(v["data"]["version"], crate::VERSION);
        assert_eq!(v["data"]["config"]["transform"]["factor"], 2.0);
    }

    #[test]
    fn init_error_envelope() {
        let cfg = CString::new(r#"{"log_level":"nope"}"#).unwrap();
        let out = take(unsafe { ffi_example_init(cfg.as_ptr()) });
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"]["code"], "INVALID_CONFIG");
    }

    #[test]
    fn free_null_is_noop() {
        unsafe { ffi_example_free_string(ptr::null_mut()) };
    }
}
