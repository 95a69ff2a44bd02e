// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::mem::size_of;

use crate::MultiArray;

/// The storage of an array handed to a foreign tensor object.
///
/// The export holds a handle to the storage, so the pointer stays valid for
/// as long as the export (or the release callback made from it) is alive.
/// The foreign side reads `(data_ptr, shape, strides)` and keeps the
/// callback from [`.into_release()`](Self::into_release) next to its tensor,
/// invoking it when the tensor is destroyed.
///
/// ```
/// use multiarray::arr2;
///
/// let a = arr2(&[[1f32, 2.], [3., 4.]]);
/// let exported = a.export();
/// assert_eq!(exported.shape(), &[2, 2]);
/// assert_eq!(exported.byte_strides(), vec![8, 4]);
/// let release = exported.into_release();
/// drop(a);
/// release();
/// ```
#[derive(Clone, Debug)]
pub struct ExportedTensor<A> {
    array: MultiArray<A>,
}

impl<A> MultiArray<A> {
    /// Export the array's storage for adoption by a foreign tensor object,
    /// without copying.
    pub fn export(&self) -> ExportedTensor<A> {
        ExportedTensor { array: self.clone() }
    }
}

impl<A> ExportedTensor<A> {
    /// Pointer to the first element.
    pub fn data_ptr(&self) -> *const A {
        self.array.as_ptr()
    }

    /// Mutable pointer to the first element, for foreign tensors that write.
    ///
    /// As with [`MultiArray::as_mut_ptr`], the storage stays shared with the
    /// exporting array, and the caller must keep writes from overlapping
    /// reads through any array sharing it.
    pub fn data_ptr_mut(&mut self) -> *mut A {
        self.array.as_mut_ptr()
    }

    pub fn shape(&self) -> &[usize] {
        self.array.shape()
    }

    /// Strides in elements.
    pub fn strides(&self) -> &[usize] {
        self.array.strides()
    }

    /// Strides in bytes, as most foreign tensor descriptors expect them.
    pub fn byte_strides(&self) -> Vec<usize> {
        self.array.strides().iter().map(|&s| s * size_of::<A>()).collect()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Turn the export into a release callback that keeps the storage alive
    /// until it is called or dropped.
    pub fn into_release(self) -> Box<dyn FnOnce() + Send>
    where
        A: Send + Sync + 'static,
    {
        let array = self.array;
        Box::new(move || drop(array))
    }
}
