#![deny(
    // The following are allowed by default lints according to
    // https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html
    anonymous_parameters,
    bare_trait_objects,
    // elided_lifetimes_in_paths, // allow anonymous lifetime
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    single_use_lifetimes,
    // trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    // unsafe_code,
    unstable_features,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    variant_size_differences,

    clippy::all,
    // clippy::restriction,
    clippy::pedantic,
    // clippy::nursery, // It's still under development
)]
#![allow(
    // Some explicitly allowed Clippy lints, must have clear reason to allow
    clippy::blanket_clippy_restriction_lints, // allow clippy::restriction
    clippy::implicit_return, // actually omitting the return keyword is idiomatic Rust code
    clippy::module_name_repetitions, // repeation of module name in a struct name is not big deal
    clippy::multiple_crate_versions, // multi-version dependency crates is not able to fix
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::wildcard_imports,
)]

//! Observe-and-forward layer for the socket family of libc calls.
//!
//! Each intercepted call is resolved to the next implementation in the
//! loader's search order, invoked with the caller's exact arguments,
//! described by one trace line and handed back untouched, `errno` included.

#[allow(missing_docs)]
pub mod log;

/// Constants.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{AddressError, Error};

/// Socket address rendering.
pub mod address;

/// One trace record per intercepted call.
pub mod record;

/// Trace sink abstraction and impl.
pub mod sink;

/// Symbol resolver abstraction and impl.
pub mod resolver;

/// Syscall abstraction and impl.
#[allow(
    missing_docs,
    clippy::not_unsafe_ptr_arg_deref,
    clippy::similar_names
)]
#[cfg(unix)]
pub mod syscall;
