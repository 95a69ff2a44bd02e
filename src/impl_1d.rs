// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Methods for one-dimensional arrays.
use crate::error::{from_kind, ArrayError, ErrorKind};
use crate::MultiArray;

/// # Methods For 1-D Arrays
impl<A> MultiArray<A>
where
    A: Clone,
{
    /// Return a new array with `pad` elements mirrored onto each end, the
    /// edge element itself not repeated.
    ///
    /// This is the padding applied to a signal before framing it for
    /// short-time analysis.
    ///
    /// **Errors** with `ShapeMismatch` unless the array is one-dimensional,
    /// and with `InvalidIndex` unless `pad < len()`.
    ///
    /// ```
    /// use multiarray::arr1;
    ///
    /// let a = arr1(&[1, 2, 3, 4, 5]);
    /// let padded = a.reflection_pad(3).unwrap();
    /// assert_eq!(padded.as_slice(), &[4, 3, 2, 1, 2, 3, 4, 5, 4, 3, 2]);
    /// ```
    pub fn reflection_pad(&self, pad: usize) -> Result<MultiArray<A>, ArrayError> {
        if self.ndim() != 1 {
            return Err(from_kind(ErrorKind::ShapeMismatch).with_detail(format!(
                "reflection padding needs a 1-D array, got shape {:?}",
                self.shape()
            )));
        }
        let n = self.len();
        if n == 0 || pad >= n {
            return Err(from_kind(ErrorKind::InvalidIndex).with_detail(format!(
                "padding {} needs at least {} elements, found {}",
                pad,
                pad + 1,
                n
            )));
        }
        let xs = self.as_slice();
        let mut v = Vec::with_capacity(n + 2 * pad);
        v.extend(xs[1..=pad].iter().rev().cloned());
        v.extend_from_slice(xs);
        v.extend(xs[n - 1 - pad..n - 1].iter().rev().cloned());
        Ok(MultiArray::from_vec(v))
    }
}
