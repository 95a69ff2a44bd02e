// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![doc(html_root_url = "https://docs.rs/multiarray/0.1/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::len_without_is_empty
)]

//! The `multiarray` crate provides [`MultiArray`], an *n*-dimensional,
//! row-major container with shared, explicitly owned storage.
//!
//! It was built to carry the buffers of audio feature extraction pipelines
//! (short-time Fourier analysis, mel filtering), where the same samples are
//! looked at through many shapes and sub-regions without being copied.
//!
//! ## Highlights
//!
//! - The buffer is always contiguous and row-major; strides are derived from
//!   the shape and never supplied by the user.
//! - [`.view()`](MultiArray::view) and [`.reshape()`](MultiArray::reshape)
//!   are O(1): the result shares the storage of its source and keeps it alive,
//!   regardless of which of the two is dropped first.
//! - Storage knows how to release itself ([`Ownership`]): freed, unmapped,
//!   left alone for a foreign owner, or handed to a release callback.
//! - A *transaction* ([`MultiArray::transaction`]) composes reshape, slice,
//!   transpose and offset steps into one pass over the source that writes
//!   straight into a single destination buffer.
//!
//! ## Crate Feature Flags
//!
//! See [the feature flag documentation](doc::crate_feature_flags).
//!
//! ## Example
//!
//! ```
//! use multiarray::MultiArray;
//!
//! let a = MultiArray::from_shape_fn(&[2, 4, 2], |ix| ix[0] * 100 + ix[1] * 10 + ix[2]).unwrap();
//!
//! // swap the first two axes, then drop the first row, in one pass
//! let b = a.transaction(|t| t.transposed(0, 1).sliced([Some(1..4), None, None])).unwrap();
//! assert_eq!(b.shape(), &[3, 2, 2]);
//! assert_eq!(b[[0, 1, 1]], a[[1, 1, 1]]);
//! ```

use std::ptr::NonNull;
use std::sync::Arc;

pub use crate::data_repr::{Ownership, RawBuffer, ReleaseFn};
pub use crate::error::{ArrayError, ErrorKind, LoadError};
pub use crate::export::ExportedTensor;
pub use crate::free_functions::{arr0, arr1, arr2, arr3};
pub use crate::indexes::{indices, Indices, Odometer};
pub use crate::transaction::{
    execute, execute_into, IndexFlow, StageGeometry, StageShape, TransactionProxy, WorkItem,
};

use crate::data_repr::Storage;

#[macro_use]
mod free_functions;

#[cfg(feature = "approx")]
mod array_approx;
mod arrayformat;
mod arraytraits;
mod data_repr;
pub mod dimension;
pub mod doc;
mod error;
mod export;
mod extension {
    pub(crate) mod nonnull;
}
mod impl_1d;
mod impl_constructors;
mod impl_methods;
mod impl_special_element_types;
mod indexes;
mod load;
pub mod prelude;
pub mod transaction;

/// An *n*-dimensional array with contiguous row-major storage.
///
/// The array is a window onto shared, reference-counted storage: its
/// own shape, strides and the start of its region, plus a handle that keeps
/// the storage alive. Arrays derived from it (with [`.view()`],
/// [`.reshape()`] or `clone()`) hold further handles to the same storage.
/// The storage's release policy ([`Ownership`]) fires exactly once, after the
/// last handle is dropped.
///
/// ## Invariants
///
/// - `len == product(shape)`, and the region `ptr .. ptr + len` lies inside
///   the storage.
/// - `strides` are the contiguous row-major strides of `shape`.
///
/// ## Access
///
/// Reading is always possible through `&self`. Writing needs `&mut self`
/// *and* that this array is the only holder of its storage; while views or
/// clones exist, mutating methods fail with
/// [`ErrorKind::OwnershipViolation`]. For in-place vectorized code over
/// shared buffers there is [`.as_mut_ptr()`](MultiArray::as_mut_ptr), with
/// the single-writer discipline left to the caller.
///
/// [`.view()`]: MultiArray::view
/// [`.reshape()`]: MultiArray::reshape
pub struct MultiArray<A> {
    storage: Arc<Storage<A>>,
    /// A non-null pointer into the storage, the first element of this array
    ptr: NonNull<A>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
    /// Created by deriving from another array rather than from a buffer
    derived: bool,
}

// Shared storage is only read through shared references; see `Storage`.
unsafe impl<A: Send + Sync> Send for MultiArray<A> {}
unsafe impl<A: Send + Sync> Sync for MultiArray<A> {}

impl<A> MultiArray<A> {
    /// The caller must make sure `shape` describes `storage`.
    pub(crate) fn from_storage(storage: Storage<A>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), storage.len());
        MultiArray {
            ptr: storage.as_nonnull(),
            len: storage.len(),
            strides: dimension::default_strides(&shape),
            shape,
            storage: Arc::new(storage),
            derived: false,
        }
    }

    /// A new array over `product(shape)` elements starting `offset` elements
    /// into this one, sharing the storage.
    ///
    /// The caller must make sure the new region lies inside this array.
    pub(crate) fn derive(&self, offset: usize, shape: Vec<usize>) -> Self {
        let len = shape.iter().product::<usize>();
        debug_assert!(offset + len <= self.len || len == 0);
        MultiArray {
            storage: Arc::clone(&self.storage),
            ptr: unsafe { self.ptr_at_offset(offset) },
            strides: dimension::default_strides(&shape),
            shape,
            len,
            derived: true,
        }
    }
}
