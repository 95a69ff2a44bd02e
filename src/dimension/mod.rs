// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shape and stride arithmetic for contiguous row-major arrays.
//!
//! Every array in this crate is laid out contiguously in row-major order, so
//! the strides are a pure function of the shape. The helpers here convert
//! between a multi-index and a flat offset in both directions.

use num_integer::Integer;

use crate::error::{from_kind, invalid_index, ArrayError, ErrorKind};

pub(crate) use self::reshape::infer_reshape;

mod reshape;

/// Returns the number of elements of `shape`, or an error if the product
/// overflows `usize`.
///
/// The empty shape (a rank-0 array) has one element.
pub fn size_of_shape_checked(shape: &[usize]) -> Result<usize, ArrayError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| {
            from_kind(ErrorKind::DimensionTooLarge).with_detail(format!("shape {:?}", shape))
        })
}

/// Compute the contiguous row-major strides of `shape`.
///
/// Shape (a, b, c) => strides (b * c, c, 1)
///
/// ```
/// use multiarray::dimension::default_strides;
///
/// assert_eq!(default_strides(&[5, 4, 3, 2]), vec![24, 6, 2, 1]);
/// assert_eq!(default_strides(&[]), Vec::<usize>::new());
/// ```
pub fn default_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    fill_default_strides(shape, &mut strides);
    strides
}

/// Write the contiguous row-major strides of `shape` into `strides`.
///
/// **Panics** if the two slices differ in length.
pub fn fill_default_strides(shape: &[usize], strides: &mut [usize]) {
    assert_eq!(shape.len(), strides.len(), "shape and strides must have the same length");
    let mut cum_prod = 1;
    for (s, &d) in strides.iter_mut().rev().zip(shape.iter().rev()) {
        *s = cum_prod;
        cum_prod *= d;
    }
}

/// Flat offset of `index` under `strides`: `Σ index[i] * strides[i]`.
///
/// The index is not bounds checked; see [`check_index`].
#[inline]
pub fn offset_from_index(index: &[usize], strides: &[usize]) -> usize {
    debug_assert_eq!(index.len(), strides.len());
    index
        .iter()
        .zip(strides)
        .fold(0, |offset, (&i, &s)| offset + i * s)
}

/// Expand the flat `offset` into `index` under the contiguous `strides`.
///
/// This is the inverse of [`offset_from_index`] for offsets inside the array.
/// Axes with a zero stride (only possible when the array is empty) get index 0.
#[inline]
pub fn index_from_offset(offset: usize, strides: &[usize], index: &mut [usize]) {
    debug_assert_eq!(index.len(), strides.len());
    let mut rem = offset;
    for (ix, &s) in index.iter_mut().zip(strides) {
        if s == 0 {
            *ix = 0;
            continue;
        }
        let (q, r) = rem.div_rem(&s);
        *ix = q;
        rem = r;
    }
}

/// Check that `index` has one in-range component per axis of `shape`.
pub fn check_index(index: &[usize], shape: &[usize]) -> Result<(), ArrayError> {
    if index.len() != shape.len() || index.iter().zip(shape).any(|(&i, &d)| i >= d) {
        return Err(invalid_index(index, shape));
    }
    Ok(())
}
