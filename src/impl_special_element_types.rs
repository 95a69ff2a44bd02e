// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::mem::{ManuallyDrop, MaybeUninit};

use crate::data_repr::{RawBuffer, Release, Storage};
use crate::dimension::size_of_shape_checked;
use crate::error::ArrayError;
use crate::MultiArray;

/// Methods specific to arrays with `MaybeUninit` elements.
impl<A> MultiArray<MaybeUninit<A>> {
    /// Create an array with uninitialized elements, shape `shape`.
    ///
    /// Every element must be written before [`.assume_init()`] may be
    /// called. This is how the transaction engine builds a fresh destination
    /// without first filling it with placeholder values.
    ///
    /// [`.assume_init()`]: Self::assume_init
    pub fn uninit(shape: &[usize]) -> Result<Self, ArrayError> {
        let size = size_of_shape_checked(shape)?;
        let mut v = Vec::with_capacity(size);
        v.resize_with(size, MaybeUninit::uninit);
        Ok(MultiArray::from_vec_shape(shape.to_vec(), v))
    }

    /// **Promise** that the array's elements are all fully initialized, and
    /// convert the array from element type `MaybeUninit<A>` to `A`.
    ///
    /// **Errors** with `OwnershipViolation` unless the array is the sole
    /// holder of owned or borrowed storage, as for
    /// [`.into_buffer()`](MultiArray::into_buffer); the array is handed back
    /// with the error.
    ///
    /// ## Safety
    ///
    /// Safe to use if all the array's elements have been initialized.
    pub unsafe fn assume_init(self) -> Result<MultiArray<A>, (Self, ArrayError)> {
        let shape = self.shape().to_vec();
        match self.into_buffer()? {
            RawBuffer::Owned(v) => {
                let mut v = ManuallyDrop::new(v);
                let (ptr, len, capacity) = (v.as_mut_ptr(), v.len(), v.capacity());
                // MaybeUninit<A> has the layout of A
                let v = Vec::from_raw_parts(ptr.cast::<A>(), len, capacity);
                Ok(MultiArray::from_vec_shape(shape, v))
            }
            RawBuffer::Borrowed { ptr, len } => {
                let storage = Storage::from_raw_parts(ptr.cast::<A>(), len, Release::Borrowed);
                Ok(MultiArray::from_storage(storage, shape))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_assume_init() {
        let mut a = MultiArray::<MaybeUninit<u32>>::uninit(&[2, 3]).unwrap();
        for (i, slot) in a.as_slice_mut().unwrap().iter_mut().enumerate() {
            *slot = MaybeUninit::new(i as u32);
        }
        let a = unsafe { a.assume_init() }.unwrap();
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn shared_storage_cannot_assume_init() {
        let mut a = MultiArray::<MaybeUninit<u8>>::uninit(&[2]).unwrap();
        a.as_slice_mut().unwrap().fill(MaybeUninit::new(9));
        let b = a.clone();
        let (a, err) = unsafe { a.assume_init() }.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::OwnershipViolation);
        drop(b);
        let a = unsafe { a.assume_init() }.unwrap();
        assert_eq!(a.as_slice(), &[9, 9]);
    }
}
