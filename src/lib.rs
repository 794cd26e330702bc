//! ffi-example
//!
//! Native core for the FFI demo app: an MD5 hex digest over text and an
//! element-wise float transform, with a formatter for showing float arrays.
//!
//! The core is plain Rust. [`ffi`] exposes it over a C ABI and, with the
//! `android` feature, `jni` exposes it to the Kotlin class `rust.ffi.Demo`.
//!
//! ```
//! assert_eq!(ffi_example::digest("foo"), "acbd18db4cc2f85cedef654fccc4a4d8");
//! let doubled = ffi_example::transform(&[1.0, 2.0, 3.0]);
//! assert_eq!(ffi_example::render(&doubled), "[2.0, 4.0, 6.0, ]");
//! ```

pub mod config;
pub mod digest;
pub mod error;
pub mod ffi;
mod logging;
pub mod render;
pub mod transform;

#[cfg(feature = "android")]
mod jni;

pub use config::{Config, TransformConfig};
pub use digest::{
    decode_modified_utf8, digest, digest_bytes, digest_modified_utf8, digest_utf8, Md5Digest,
};
pub use error::{Error, Result};
pub use render::render;
pub use transform::{transform, Transform};

/// Crate version, as reported by `ffi_example_version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
