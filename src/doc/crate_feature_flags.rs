//! Crate Feature Flags
//!
//! The following crate feature flags are available. They are configured in your
//! `Cargo.toml` where the dependency on `multiarray` is defined.
//!
//! ## `mmap`
//!   - Memory-mapped storage through the `memmap2` crate (enabled by default).
//!   - Provides `MultiArray::map_file`, whose arrays report
//!     [`Ownership::Mapped`](crate::Ownership::Mapped) and unmap the file
//!     when the last array sharing the storage is dropped.
//!   - Disable it with `default-features = false` on platforms without
//!     memory maps.
//!
//! ## `approx`
//!   - Enables implementations of traits of the `approx` crate for
//!     `MultiArray`, and the `abs_diff_eq` and `relative_eq` methods.
