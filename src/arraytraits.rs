// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::hash;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::dimension::check_index;
use crate::MultiArray;

#[cold]
#[inline(never)]
pub(crate) fn array_out_of_bounds(index: &[usize], shape: &[usize]) -> ! {
    panic!("multiarray: index {:?} is out of bounds for array of shape {:?}", index, shape);
}

#[cold]
#[inline(never)]
fn array_not_exclusive() -> ! {
    panic!("multiarray: cannot index mutably into an array whose storage is shared");
}

/// Access the element at **index**.
///
/// **Panics** if index is out of bounds.
impl<'a, A> Index<&'a [usize]> for MultiArray<A> {
    type Output = A;
    #[inline]
    fn index(&self, index: &'a [usize]) -> &A {
        if check_index(index, self.shape()).is_err() {
            array_out_of_bounds(index, self.shape());
        }
        &self.as_slice()[self.offset_of(index)]
    }
}

/// Access the element at **index** mutably.
///
/// **Panics** if index is out of bounds, or if the storage is shared with
/// another array.
impl<'a, A> IndexMut<&'a [usize]> for MultiArray<A> {
    #[inline]
    fn index_mut(&mut self, index: &'a [usize]) -> &mut A {
        if check_index(index, self.shape()).is_err() {
            array_out_of_bounds(index, self.shape());
        }
        let offset = self.offset_of(index);
        match self.as_slice_mut() {
            Ok(elements) => &mut elements[offset],
            Err(_) => array_not_exclusive(),
        }
    }
}

impl<A, const N: usize> Index<[usize; N]> for MultiArray<A> {
    type Output = A;
    #[inline]
    fn index(&self, index: [usize; N]) -> &A {
        &self[&index[..]]
    }
}

impl<A, const N: usize> IndexMut<[usize; N]> for MultiArray<A> {
    #[inline]
    fn index_mut(&mut self, index: [usize; N]) -> &mut A {
        &mut self[&index[..]]
    }
}

/// Return `true` if the array shapes and all elements of `self` and
/// `other` are equal. Return `false` otherwise.
impl<A, B> PartialEq<MultiArray<B>> for MultiArray<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &MultiArray<B>) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<A: Eq> Eq for MultiArray<A> {}

impl<A: hash::Hash> hash::Hash for MultiArray<A> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        self.as_slice().hash(state);
    }
}

/// Cloning an array is cheap: the clone is another handle to the same
/// storage, reported as [`Ownership::View`](crate::Ownership::View). Use
/// [`.to_owned()`](MultiArray::to_owned) for a deep copy.
impl<A> Clone for MultiArray<A> {
    fn clone(&self) -> Self {
        MultiArray {
            storage: Arc::clone(&self.storage),
            ptr: self.ptr,
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            len: self.len,
            derived: true,
        }
    }
}

/// Create a one-dimensional array from a vector (no copying needed).
impl<A> From<Vec<A>> for MultiArray<A> {
    fn from(v: Vec<A>) -> Self {
        MultiArray::from_vec(v)
    }
}

impl<'a, A> IntoIterator for &'a MultiArray<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
