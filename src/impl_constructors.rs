// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for multiarray
//!
use std::ptr::NonNull;

use num_traits::{One, Zero};

use crate::data_repr::{Release, Storage};
use crate::dimension::size_of_shape_checked;
use crate::error::{from_kind, shape_mismatch, ArrayError, ErrorKind};
use crate::extension::nonnull::nonnull_or_dangling;
use crate::indexes::Odometer;
use crate::MultiArray;

/// # Constructor Methods for Owned Arrays
///
/// Each constructor allocates a fresh buffer and returns an array with
/// [`Ownership::Owned`](crate::Ownership::Owned).
///
/// **Errors** with `DimensionTooLarge` if the product of the axis lengths
/// overflows `usize`.
impl<A> MultiArray<A> {
    /// Create an array of `shape` with default-initialized elements.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::<f32>::allocate(&[4, 3, 2]).unwrap();
    /// assert_eq!(a.len(), 24);
    /// assert_eq!(a.strides(), &[6, 2, 1]);
    /// ```
    pub fn allocate(shape: &[usize]) -> Result<Self, ArrayError>
    where
        A: Clone + Default,
    {
        Self::from_elem(shape, A::default())
    }

    /// Create an array with copies of `elem`, shape `shape`.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::from_elem(&[2, 2], f32::NAN).unwrap();
    /// assert!(a.iter().all(|x| x.is_nan()));
    /// ```
    pub fn from_elem(shape: &[usize], elem: A) -> Result<Self, ArrayError>
    where
        A: Clone,
    {
        let size = size_of_shape_checked(shape)?;
        Ok(Self::from_vec_shape(shape.to_vec(), vec![elem; size]))
    }

    /// Create an array of zeros with shape `shape`.
    pub fn zeros(shape: &[usize]) -> Result<Self, ArrayError>
    where
        A: Clone + Zero,
    {
        Self::from_elem(shape, A::zero())
    }

    /// Create an array of ones with shape `shape`.
    pub fn ones(shape: &[usize]) -> Result<Self, ArrayError>
    where
        A: Clone + One,
    {
        Self::from_elem(shape, A::one())
    }

    /// Create an array with values created by the function `f`, which is
    /// called with the index of each element in row-major order.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::from_shape_fn(&[2, 3], |ix| ix[0] * 10 + ix[1]).unwrap();
    /// assert_eq!(a.as_slice(), &[0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Result<Self, ArrayError>
    where
        F: FnMut(&[usize]) -> A,
    {
        let size = size_of_shape_checked(shape)?;
        let mut v = Vec::with_capacity(size);
        let mut odometer = Odometer::new(shape);
        while let Some(index) = odometer.next_index() {
            v.push(f(index));
        }
        Ok(Self::from_vec_shape(shape.to_vec(), v))
    }

    /// Create an array of `shape` that takes over the vector `v` without
    /// copying; `v` holds the elements in row-major order.
    ///
    /// **Errors** with `ShapeMismatch` if `v.len()` is not the product of
    /// `shape`.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(a[[1, 0]], 4);
    /// assert!(MultiArray::from_shape_vec(&[4], vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_shape_vec(shape: &[usize], v: Vec<A>) -> Result<Self, ArrayError> {
        let size = size_of_shape_checked(shape)?;
        if size != v.len() {
            return Err(shape_mismatch(v.len(), shape));
        }
        Ok(Self::from_vec_shape(shape.to_vec(), v))
    }

    /// Create a 1-D array from a vector (no copying needed).
    pub fn from_vec(v: Vec<A>) -> Self {
        Self::from_vec_shape(vec![v.len()], v)
    }

    /// Create a two-dimensional array from a vector of rows.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::from_rows(vec![[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(a.shape(), &[2, 3]);
    /// ```
    pub fn from_rows<const N: usize>(rows: Vec<[A; N]>) -> Self {
        let shape = vec![rows.len(), N];
        Self::from_vec_shape(shape, rows.into_iter().flatten().collect())
    }

    /// Create a three-dimensional array from a vector of matrices.
    pub fn from_planes<const N: usize, const M: usize>(planes: Vec<[[A; M]; N]>) -> Self {
        let shape = vec![planes.len(), N, M];
        Self::from_vec_shape(shape, planes.into_iter().flatten().flatten().collect())
    }

    /// Create a two-dimensional array from nested vectors.
    ///
    /// **Errors** with `ShapeMismatch` if the rows are ragged.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::from_nested(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    /// assert_eq!(a.shape(), &[3, 2]);
    /// assert!(MultiArray::from_nested(vec![vec![1, 2], vec![3]]).is_err());
    /// ```
    pub fn from_nested(rows: Vec<Vec<A>>) -> Result<Self, ArrayError> {
        let ncols = rows.first().map_or(0, Vec::len);
        let shape = [rows.len(), ncols];
        if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
            return Err(from_kind(ErrorKind::ShapeMismatch).with_detail(format!(
                "ragged rows: found a row of length {}, expected {}",
                row.len(),
                ncols
            )));
        }
        Self::from_shape_vec(&shape, rows.into_iter().flatten().collect())
    }

    /// Wrap memory owned by someone else, without copying.
    ///
    /// Dropping the array (and everything derived from it) leaves the memory
    /// alone.
    ///
    /// **Errors** with `ShapeMismatch` if `len` is not the product of
    /// `shape`; `ptr` may only be null if `len` is zero.
    ///
    /// ## Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` initialized elements
    /// of `A`, suitably aligned, for as long as the array or any array
    /// derived from it exists, and nothing else may access the memory
    /// during that time.
    pub unsafe fn from_raw_parts_borrowed(
        ptr: *mut A,
        len: usize,
        shape: &[usize],
    ) -> Result<Self, ArrayError> {
        Self::from_raw_parts_release(ptr, len, shape, Release::Borrowed)
    }

    /// Adopt memory owned by someone else, without copying, and call
    /// `release` with the pointer and length once the array and everything
    /// derived from it are gone.
    ///
    /// `release` is typically a closure that keeps the foreign owner alive
    /// and drops it.
    ///
    /// **Errors** with `ShapeMismatch` if `len` is not the product of
    /// `shape`, or if `ptr` is null for a non-empty buffer; `release` is then
    /// dropped without being called.
    ///
    /// ## Safety
    ///
    /// As for [`from_raw_parts_borrowed`](Self::from_raw_parts_borrowed),
    /// with "as long as the array exists" extending until `release` is
    /// called.
    pub unsafe fn from_raw_parts_with_release<F>(
        ptr: *mut A,
        len: usize,
        shape: &[usize],
        release: F,
    ) -> Result<Self, ArrayError>
    where
        F: FnOnce(NonNull<A>, usize) + Send + 'static,
    {
        Self::from_raw_parts_release(ptr, len, shape, Release::Custom(Box::new(release)))
    }

    unsafe fn from_raw_parts_release(
        ptr: *mut A,
        len: usize,
        shape: &[usize],
        release: Release<A>,
    ) -> Result<Self, ArrayError> {
        let size = size_of_shape_checked(shape)?;
        if size != len {
            return Err(shape_mismatch(len, shape));
        }
        let ptr = nonnull_or_dangling(ptr, len).ok_or_else(|| {
            from_kind(ErrorKind::ShapeMismatch).with_detail("null pointer for a non-empty buffer")
        })?;
        Ok(Self::from_storage(Storage::from_raw_parts(ptr, len, release), shape.to_vec()))
    }

    /// The caller must make sure `v.len()` is the product of `shape`.
    pub(crate) fn from_vec_shape(shape: Vec<usize>, v: Vec<A>) -> Self {
        Self::from_storage(Storage::from_vec(v), shape)
    }
}
