//! JNI bindings for Android
//!
//! Native methods of the Kotlin class `rust.ffi.Demo`:
//!
//! ```kotlin
//! external fun md5(buf: String): String
//! external fun transform(array: FloatArray): FloatArray
//! ```
//!
//! Failures surface as a thrown `java.lang.Exception` and a null return.

use std::ffi::c_void;
use std::panic;
use std::ptr;

use anyhow::Context;
use jni::objects::{JClass, JFloatArray, JString};
use jni::sys::{jfloatArray, jint, jstring, JNI_VERSION_1_6};
use jni::JNIEnv;

use crate::config::{self, Config};

fn throw(env: &mut JNIEnv, err: &anyhow::Error) {
    log::warn!("throwing to java: {err:#}");
    // A failed JNI call may have left its own exception pending.
    let _ = env.exception_clear();
    if let Err(e) = env.throw_new("java/lang/Exception", format!("{err:#}")) {
        log::error!("failed to throw java exception: {e}");
    }
}

/// Called by the VM on `System.loadLibrary("ffi_example")`. The Kotlin side
/// has no config channel, so the default config is installed.
#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    match panic::catch_unwind(|| config::install(Config::default()).map(|_| ())) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::error!("config install failed: {e}"),
        Err(_) => log::error!("panic during config install"),
    }
    JNI_VERSION_1_6
}

/// MD5 hex digest of a Java string.
#[no_mangle]
pub extern "system" fn Java_rust_ffi_Demo_md5<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    buf: JString<'local>,
) -> jstring {
    let result = (|| -> anyhow::Result<jstring> {
        // Strict decode: lone surrogates must not be hashed as U+FFFD.
        let hex = {
            let java_str = env.get_string(&buf).context("read md5 input")?;
            crate::digest::digest_modified_utf8(java_str.to_bytes())
                .context("decode md5 input")?
        };
        let output = env.new_string(hex).context("allocate md5 result")?;
        Ok(output.into_raw())
    })();

    match result {
        Ok(s) => s,
        Err(e) => {
            throw(&mut env, &e);
            ptr::null_mut()
        }
    }
}

/// Element-wise transform of a Java `float[]` into a new array.
#[no_mangle]
pub extern "system" fn Java_rust_ffi_Demo_transform<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    array: JFloatArray<'local>,
) -> jfloatArray {
    let result = (|| -> anyhow::Result<jfloatArray> {
        let len = env.get_array_length(&array).context("read array length")?;
        let mut input = vec![0f32; len as usize];
        env.get_float_array_region(&array, 0, &mut input)
            .context("copy float array")?;

        let transformed = config::installed_transform().apply(&input);

        let output = env.new_float_array(len).context("allocate float array")?;
        env.set_float_array_region(&output, 0, &transformed)
            .context("fill float array")?;
        Ok(output.into_raw())
    })();

    match result {
        Ok(a) => a,
        Err(e) => {
            throw(&mut env, &e);
            ptr::null_mut()
        }
    }
}
