// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ptr::NonNull;
use std::slice;
use std::sync::Arc;

use rawpointer::PointerExt;

use crate::data_repr::{Ownership, RawBuffer, Storage};
use crate::dimension::{self, check_index, infer_reshape, offset_from_index};
use crate::error::{from_kind, invalid_index, not_exclusive, ArrayError, ErrorKind};
use crate::indexes::{indices, Indices, Odometer};
use crate::MultiArray;

impl<A> MultiArray<A> {
    /// Return the total number of elements in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return whether the array has any elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the shape of the array as a slice.
    ///
    /// For a 2D array (matrix), the shape is in height-width order.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Return the strides of the array: the number of elements to step to
    /// move one position along each axis.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Return the number of dimensions (axes) in the array
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Return who releases the storage behind this array.
    ///
    /// Arrays derived from another array report [`Ownership::View`],
    /// whatever the policy of the storage they share.
    pub fn ownership(&self) -> Ownership {
        if self.derived {
            Ownership::View
        } else {
            self.storage.ownership()
        }
    }

    /// Return `true` if the array was derived from another array.
    pub fn is_view(&self) -> bool {
        self.derived
    }

    /// Return `true` if no other array shares this array's storage, that is,
    /// if mutable access is possible.
    pub fn is_unique(&mut self) -> bool {
        Arc::get_mut(&mut self.storage).is_some()
    }

    /// Return `true` if `self` and `other` share the same storage.
    pub fn shares_storage_with<B>(&self, other: &MultiArray<B>) -> bool {
        Arc::as_ptr(&self.storage) as *const u8 == Arc::as_ptr(&other.storage) as *const u8
    }

    /// Return the array's elements as a slice, in row-major order.
    pub fn as_slice(&self) -> &[A] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Return the array's elements as a mutable slice, in row-major order.
    ///
    /// **Errors** with `OwnershipViolation` if the storage is shared with
    /// another array.
    pub fn as_slice_mut(&mut self) -> Result<&mut [A], ArrayError> {
        if Arc::get_mut(&mut self.storage).is_none() {
            return Err(not_exclusive().with_detail("storage is shared with another array"));
        }
        Ok(unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) })
    }

    /// Return a pointer to the first element of the array.
    ///
    /// Together with [`.len()`](Self::len) this is the buffer handed to
    /// vectorized math routines.
    pub fn as_ptr(&self) -> *const A {
        self.ptr.as_ptr()
    }

    /// Return a mutable pointer to the first element of the array.
    ///
    /// Writing through the pointer is allowed for `len()` elements, even
    /// while the storage is shared. The caller then has to make sure no other
    /// array sharing the storage is read or written at the same time.
    pub fn as_mut_ptr(&mut self) -> *mut A {
        self.ptr.as_ptr()
    }

    /// Return an iterator of references to the elements, in row-major order.
    pub fn iter(&self) -> slice::Iter<'_, A> {
        self.as_slice().iter()
    }

    /// Return an iterator over the indices of the array, in row-major order.
    pub fn indices(&self) -> Indices {
        indices(&self.shape)
    }

    /// Return a reference to the element at `index`.
    ///
    /// **Errors** with `InvalidIndex` if `index` has the wrong number of
    /// components or any component is out of bounds.
    ///
    /// Arrays also support indexing syntax: `array[[i, j]]`.
    ///
    /// ```
    /// use multiarray::arr2;
    ///
    /// let a = arr2(&[[1., 2.],
    ///                [3., 4.]]);
    ///
    /// assert!(
    ///     a.get(&[0, 1]) == Ok(&2.) &&
    ///     a.get(&[0, 2]).is_err() &&
    ///     a[[1, 0]] == 3.
    /// );
    /// ```
    pub fn get(&self, index: &[usize]) -> Result<&A, ArrayError> {
        check_index(index, &self.shape)?;
        let offset = offset_from_index(index, &self.strides);
        Ok(&self.as_slice()[offset])
    }

    /// Return a mutable reference to the element at `index`.
    ///
    /// **Errors** with `InvalidIndex` for a bad index, and with
    /// `OwnershipViolation` if the storage is shared.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut A, ArrayError> {
        check_index(index, &self.shape)?;
        let offset = offset_from_index(index, &self.strides);
        Ok(&mut self.as_slice_mut()?[offset])
    }

    /// Store `value` at `index`, the checked counterpart of `array[index] = value`.
    pub fn set(&mut self, index: &[usize], value: A) -> Result<(), ArrayError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: A) -> Result<(), ArrayError>
    where
        A: Clone,
    {
        self.as_slice_mut()?.fill(value);
        Ok(())
    }

    /// Return a view of the subarray at the leading `index`.
    ///
    /// This mimics subscripting nested vectors: for an array of shape
    /// `[a, b, c]`, `view(&[i])` has shape `[b, c]` and `view(&[i, j])` has
    /// shape `[c]`. The view shares the storage of `self` and keeps it alive
    /// for as long as the view exists.
    ///
    /// **Errors** with `InvalidIndex` unless `index` has fewer components
    /// than the array has axes, each in bounds.
    ///
    /// ```
    /// use multiarray::arr3;
    ///
    /// let a = arr3(&[[[1, 2], [3, 4]]]);
    /// assert_eq!(a.view(&[0]).unwrap(), arr3(&[[[1, 2], [3, 4]]]).reshape(&[2, 2]).unwrap());
    /// assert_eq!(a.view(&[0, 1]).unwrap().as_slice(), &[3, 4]);
    /// ```
    pub fn view(&self, index: &[usize]) -> Result<MultiArray<A>, ArrayError> {
        let offset = self.block_offset(index)?;
        Ok(self.derive(offset, self.shape[index.len()..].to_vec()))
    }

    /// Return the elements of the subarray at the leading `index` as one
    /// contiguous slice, the region [`.view()`](Self::view) would cover.
    pub fn block(&self, index: &[usize]) -> Result<&[A], ArrayError> {
        let offset = self.block_offset(index)?;
        let n = self.block_len(index.len());
        Ok(&self.as_slice()[offset..offset + n])
    }

    /// Return the elements of the subarray at the leading `index` as one
    /// contiguous mutable slice.
    ///
    /// This is how a sub-region is written in place: views share the
    /// storage and so are read-only, while `block_mut` borrows the array
    /// itself.
    ///
    /// **Errors** like [`.view()`](Self::view), and with
    /// `OwnershipViolation` if the storage is shared.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let mut weights = MultiArray::<f32>::zeros(&[3, 2, 4]).unwrap();
    /// weights.block_mut(&[1]).unwrap().fill(0.5);
    /// assert_eq!(weights[[1, 1, 3]], 0.5);
    /// assert_eq!(weights[[2, 0, 0]], 0.);
    /// ```
    pub fn block_mut(&mut self, index: &[usize]) -> Result<&mut [A], ArrayError> {
        let offset = self.block_offset(index)?;
        let n = self.block_len(index.len());
        Ok(&mut self.as_slice_mut()?[offset..offset + n])
    }

    fn block_offset(&self, index: &[usize]) -> Result<usize, ArrayError> {
        let k = index.len();
        if k >= self.ndim() {
            return Err(from_kind(ErrorKind::InvalidIndex).with_detail(format!(
                "prefix {:?} must be shorter than shape {:?}",
                index, self.shape
            )));
        }
        check_index(index, &self.shape[..k])?;
        Ok(offset_from_index(index, &self.strides[..k]))
    }

    /// Number of elements below a prefix of `k` components.
    fn block_len(&self, k: usize) -> usize {
        self.shape[k..].iter().product()
    }

    /// Return a view of the array with a new shape, in O(1).
    ///
    /// One entry of `shape` may be `-1`; that axis length is inferred from
    /// the element count.
    ///
    /// **Errors** with `ShapeMismatch` if the shape does not describe the
    /// same number of elements.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::<f32>::zeros(&[3, 4]).unwrap();
    /// assert_eq!(a.reshape(&[-1, 3]).unwrap().shape(), &[4, 3]);
    /// assert!(a.reshape(&[-1, 5]).is_err());
    /// ```
    pub fn reshape(&self, shape: &[isize]) -> Result<MultiArray<A>, ArrayError> {
        let shape = infer_reshape(self.len, shape)?;
        Ok(self.derive(0, shape))
    }

    /// Return the contiguous run of elements along the last axis at the
    /// leading `index`.
    ///
    /// `index` must have one component less than the array has axes.
    pub fn lane(&self, index: &[usize]) -> Result<&[A], ArrayError> {
        let offset = self.lane_offset(index)?;
        let n = self.shape[self.ndim() - 1];
        Ok(&self.as_slice()[offset..offset + n])
    }

    /// Return the contiguous run of elements along the last axis at the
    /// leading `index`, mutably.
    pub fn lane_mut(&mut self, index: &[usize]) -> Result<&mut [A], ArrayError> {
        let offset = self.lane_offset(index)?;
        let n = self.shape[self.ndim() - 1];
        Ok(&mut self.as_slice_mut()?[offset..offset + n])
    }

    fn lane_offset(&self, index: &[usize]) -> Result<usize, ArrayError> {
        let n = self.ndim();
        if n == 0 || index.len() != n - 1 {
            return Err(invalid_index(index, &self.shape));
        }
        check_index(index, &self.shape[..n - 1])?;
        Ok(offset_from_index(index, &self.strides[..n - 1]))
    }

    /// Call `f` with the index and a reference to every element, in
    /// row-major order (the last axis varies fastest).
    ///
    /// ```
    /// use multiarray::arr2;
    ///
    /// let a = arr2(&[[1, 2], [3, 4]]);
    /// let mut visited = Vec::new();
    /// a.for_each(|index, &x| visited.push((index.to_vec(), x)));
    /// assert_eq!(visited[2], (vec![1, 0], 3));
    /// ```
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&[usize], &A),
    {
        let mut odometer = Odometer::new(&self.shape);
        for elt in self.iter() {
            match odometer.next_index() {
                Some(index) => f(index, elt),
                None => break,
            }
        }
    }

    /// Call `f` with the index and a mutable reference to every element, in
    /// row-major order.
    pub fn for_each_mut<F>(&mut self, mut f: F) -> Result<(), ArrayError>
    where
        F: FnMut(&[usize], &mut A),
    {
        let mut odometer = Odometer::new(&self.shape);
        for elt in self.as_slice_mut()? {
            match odometer.next_index() {
                Some(index) => f(index, elt),
                None => break,
            }
        }
        Ok(())
    }

    /// Return an array with a copy of the elements in a fresh owned buffer.
    pub fn to_owned(&self) -> MultiArray<A>
    where
        A: Clone,
    {
        MultiArray::from_vec_shape(self.shape.clone(), self.as_slice().to_vec())
    }

    /// Return the elements as a vector, in row-major order.
    pub fn to_vec(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Give up the buffer: afterwards the array releases nothing, and the
    /// caller is responsible for the returned buffer.
    ///
    /// Only arrays that own their buffer or wrap borrowed memory can do this,
    /// and only while no other array shares the storage.
    ///
    /// **Errors** with `OwnershipViolation` for views and clones, for mapped
    /// and custom storage, and while other arrays share the storage. The
    /// array is handed back with the error, so the call can be retried once
    /// the other holders are gone.
    ///
    /// ```
    /// use multiarray::{MultiArray, RawBuffer};
    ///
    /// let a = MultiArray::from_vec(vec![1, 2, 3]);
    /// let view = a.reshape(&[3, 1]).unwrap();
    /// let (a, _) = a.into_buffer().unwrap_err();
    /// drop(view);
    /// assert!(matches!(a.into_buffer(), Ok(RawBuffer::Owned(_))));
    /// ```
    pub fn into_buffer(self) -> Result<RawBuffer<A>, (MultiArray<A>, ArrayError)> {
        if self.derived {
            return Err((self, not_exclusive().with_detail("cannot take the buffer of a derived array")));
        }
        match self.storage.ownership() {
            Ownership::Owned | Ownership::Borrowed => {}
            other => {
                let err = not_exclusive().with_detail(format!("cannot take the buffer of {:?} storage", other));
                return Err((self, err));
            }
        }
        let MultiArray {
            storage,
            ptr,
            shape,
            strides,
            len,
            derived,
        } = self;
        let rebuild = |storage: Arc<Storage<A>>| MultiArray {
            storage,
            ptr,
            shape,
            strides,
            len,
            derived,
        };
        match Arc::try_unwrap(storage) {
            Ok(storage) => storage.take_buffer().map_err(|storage| {
                (rebuild(Arc::new(storage)), from_kind(ErrorKind::OwnershipViolation))
            }),
            Err(storage) => Err((
                rebuild(storage),
                not_exclusive().with_detail("storage is shared with another array"),
            )),
        }
    }

    /// Pointer to the element `offset` elements past the start of the array.
    ///
    /// ## Safety
    ///
    /// `offset` must be at most `len()`.
    pub(crate) unsafe fn ptr_at_offset(&self, offset: usize) -> NonNull<A> {
        NonNull::new_unchecked(self.ptr.as_ptr().stride_offset(1, offset))
    }

    #[inline]
    pub(crate) fn offset_of(&self, index: &[usize]) -> usize {
        dimension::offset_from_index(index, &self.strides)
    }
}
