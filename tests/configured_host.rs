//! A host that installs its own config through the C API.
//!
//! Kept in its own test binary: the config is process-wide.

use std::ffi::{CStr, CString};

use ffi_example::ffi::{ffi_example_free_string, ffi_example_init, ffi_example_transform, FFI_OK};

fn init(json: &str) -> serde_json::Value {
    let cfg = CString::new(json).unwrap();
    let p = unsafe { ffi_example_init(cfg.as_ptr()) };
    assert!(!p.is_null());
    let out = unsafe { CStr::from_ptr(p) }.to_str().unwrap().to_owned();
    unsafe { ffi_example_free_string(p) };
    serde_json::from_str(&out).unwrap()
}

fn run_transform(input: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; input.len()];
    let rc = unsafe { ffi_example_transform(input.as_ptr(), input.len(), out.as_mut_ptr()) };
    assert_eq!(rc, FFI_OK);
    out
}

#[test]
fn installed_factor_reaches_c_transform() {
    let cfg = r#"{"log_level":"debug","transform":{"factor":3.0}}"#;

    let v = init(cfg);
    assert_eq!(v["ok"], true);
    assert_eq!(v["data"]["config"]["transform"]["factor"], 3.0);
    assert_eq!(run_transform(&[1.0, 2.0, 3.0]), vec![3.0, 6.0, 9.0]);

    // Same config again is accepted.
    assert_eq!(init(cfg)["ok"], true);

    // A different one is refused and leaves the installed factor alone.
    let v = init(r#"{"transform":{"factor":5.0}}"#);
    assert_eq!(v["ok"], false);
    assert_eq!(v["error"]["code"], "ALREADY_INITIALIZED");
    assert_eq!(run_transform(&[1.0]), vec![3.0]);

    assert_eq!(
        ffi_example::config::installed_transform(),
        ffi_example::Transform::new(3.0).unwrap()
    );

    // The Rust-level `transform` keeps its fixed doubling.
    assert_eq!(ffi_example::transform(&[1.0]), vec![2.0]);
}
