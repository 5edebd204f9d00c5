#![deny(
    // The following are allowed by default lints according to
    // https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html
    anonymous_parameters,
    bare_trait_objects,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    single_use_lifetimes,
    trivial_numeric_casts,
    unreachable_pub,
    unstable_features,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    variant_size_differences,

    clippy::all,
    clippy::pedantic,
)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref, // pointers are handed to libc untouched
)]

//! Preload this library to get one trace line on stdout for every
//! `socket`, `bind`, `listen`, `accept`, `connect`, `shutdown` and
//! `setsockopt` the host process makes:
//!
//! ```text
//! LD_PRELOAD=target/release/libnetinterpose_hooks.so curl http://127.0.0.1:8080/
//! ```

/// The exported socket symbols.
#[cfg(unix)]
pub mod unix;
