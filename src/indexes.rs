// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::iter::FusedIterator;

/// Row-major enumeration of the multi-indices of a shape.
///
/// The last axis varies fastest: each step increments the last component and,
/// when it reaches the length of its axis, resets it to zero and carries into
/// the previous component. All arrays of this crate are contiguous row-major,
/// so the `n`th index produced is the index of the `n`th element of the
/// buffer.
///
/// `Odometer` yields a borrowed index so that a traversal needs one index
/// buffer in total; use [`Indices`] for an ordinary iterator.
///
/// ```
/// use multiarray::Odometer;
///
/// let mut odometer = Odometer::new(&[2, 2]);
/// let mut seen = Vec::new();
/// while let Some(index) = odometer.next_index() {
///     seen.push(index.to_vec());
/// }
/// assert_eq!(seen, [[0, 0], [0, 1], [1, 0], [1, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct Odometer {
    shape: Vec<usize>,
    index: Vec<usize>,
    remaining: usize,
    started: bool,
}

impl Odometer {
    /// Create an odometer over `shape`.
    ///
    /// The count of remaining indices saturates at `usize::MAX` for shapes
    /// whose product overflows; no array can have such a shape.
    pub fn new(shape: &[usize]) -> Self {
        let remaining = if shape.contains(&0) {
            0
        } else {
            shape.iter().fold(1usize, |n, &d| n.saturating_mul(d))
        };
        Odometer {
            index: vec![0; shape.len()],
            remaining,
            shape: shape.to_vec(),
            started: false,
        }
    }

    /// Advance to the next index, or return `None` once every index has been
    /// produced.
    #[inline]
    pub fn next_index(&mut self) -> Option<&[usize]> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            // carry
            for (ix, &dim) in self.index.iter_mut().zip(&self.shape).rev() {
                *ix += 1;
                if *ix == dim {
                    *ix = 0;
                } else {
                    break;
                }
            }
        } else {
            self.started = true;
        }
        self.remaining -= 1;
        Some(&self.index)
    }

    /// Number of indices left to produce.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

/// An iterator over the indices of an array shape, in row-major order.
///
/// Iterator element type is `Vec<usize>`.
#[derive(Clone, Debug)]
pub struct Indices {
    odometer: Odometer,
}

/// Create an iterator over the indices of `shape`.
///
/// ```
/// use multiarray::indices;
///
/// let all: Vec<_> = indices(&[2, 3]).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[4], [1, 1]);
/// ```
pub fn indices(shape: &[usize]) -> Indices {
    Indices {
        odometer: Odometer::new(shape),
    }
}

impl Iterator for Indices {
    type Item = Vec<usize>;

    #[inline]
    fn next(&mut self) -> Option<Vec<usize>> {
        self.odometer.next_index().map(<[usize]>::to_vec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.odometer.remaining();
        (l, Some(l))
    }
}

impl ExactSizeIterator for Indices {}

impl FusedIterator for Indices {}
