// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ptr::NonNull;

use crate::extension::nonnull;

/// Who releases the storage of an array, and how.
///
/// Returned by [`MultiArray::ownership`](crate::MultiArray::ownership).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// The array allocated its buffer and frees it on drop.
    Owned,
    /// The buffer is a memory map, unmapped on drop.
    Mapped,
    /// The buffer belongs to someone else; nothing happens on drop.
    Borrowed,
    /// A release callback supplied at construction runs on drop.
    Custom,
    /// The array was derived from another one (view, reshape, clone) and
    /// keeps the shared storage alive.
    View,
}

/// Release callback of custom storage: receives the start of the buffer and
/// its length in elements.
pub type ReleaseFn<A> = Box<dyn FnOnce(NonNull<A>, usize) + Send>;

pub(crate) enum Release<A> {
    Owned { capacity: usize },
    #[cfg(feature = "mmap")]
    Mapped(memmap2::MmapMut),
    Borrowed,
    Custom(ReleaseFn<A>),
}

impl<A> Release<A> {
    fn ownership(&self) -> Ownership {
        match self {
            Release::Owned { .. } => Ownership::Owned,
            #[cfg(feature = "mmap")]
            Release::Mapped(_) => Ownership::Mapped,
            Release::Borrowed => Ownership::Borrowed,
            Release::Custom(_) => Ownership::Custom,
        }
    }
}

/// Flat contiguous storage shared by an array and everything derived from it.
///
/// The release policy fires exactly once, when the last `Arc` holding the
/// storage is dropped.
pub(crate) struct Storage<A> {
    ptr: NonNull<A>,
    len: usize,
    release: Release<A>,
}

// Elements are only read through shared references and only written through
// the sole holder of the storage. The release callback is only touched from
// `drop`, which has exclusive access.
unsafe impl<A: Send + Sync> Send for Storage<A> {}
unsafe impl<A: Send + Sync> Sync for Storage<A> {}

impl<A> Storage<A> {
    pub(crate) fn from_vec(v: Vec<A>) -> Self {
        let mut v = ManuallyDrop::new(v);
        let len = v.len();
        let capacity = v.capacity();
        let ptr = nonnull::nonnull_from_vec_data(&mut v);
        Storage {
            ptr,
            len,
            release: Release::Owned { capacity },
        }
    }

    /// ## Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` elements for as long
    /// as the storage lives, and `release` (if any) must be sound to call
    /// with `ptr` and `len`.
    pub(crate) unsafe fn from_raw_parts(ptr: NonNull<A>, len: usize, release: Release<A>) -> Self {
        Storage { ptr, len, release }
    }

    pub(crate) fn as_nonnull(&self) -> NonNull<A> {
        self.ptr
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn ownership(&self) -> Ownership {
        self.release.ownership()
    }

    /// Take the buffer out without releasing it.
    ///
    /// Mapped and custom storage cannot be handed over without their
    /// release and are returned unchanged as the error.
    pub(crate) fn take_buffer(self) -> Result<RawBuffer<A>, Self> {
        if !matches!(self.release, Release::Owned { .. } | Release::Borrowed) {
            return Err(self);
        }
        // neither policy holds anything that needs dropping
        let this = ManuallyDrop::new(self);
        let (ptr, len) = (this.ptr, this.len);
        match this.release {
            Release::Owned { capacity } => Ok(RawBuffer::Owned(unsafe {
                Vec::from_raw_parts(ptr.as_ptr(), len, capacity)
            })),
            _ => Ok(RawBuffer::Borrowed { ptr, len }),
        }
    }
}

impl<A> Drop for Storage<A> {
    fn drop(&mut self) {
        let policy = self.release.ownership();
        tracing::trace!(?policy, len = self.len, "releasing array storage");
        match mem::replace(&mut self.release, Release::Borrowed) {
            Release::Owned { capacity } => unsafe {
                drop(Vec::from_raw_parts(self.ptr.as_ptr(), self.len, capacity));
            },
            #[cfg(feature = "mmap")]
            Release::Mapped(map) => drop(map),
            Release::Borrowed => {}
            Release::Custom(release) => release(self.ptr, self.len),
        }
    }
}

impl<A> fmt::Debug for Storage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("ownership", &self.ownership())
            .finish()
    }
}

/// A buffer handed back by [`MultiArray::into_buffer`](crate::MultiArray::into_buffer).
#[derive(Debug)]
pub enum RawBuffer<A> {
    /// The array's own allocation.
    Owned(Vec<A>),
    /// Borrowed memory the array was wrapped around; the caller is again
    /// solely responsible for it.
    Borrowed { ptr: NonNull<A>, len: usize },
}

impl<A> RawBuffer<A> {
    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            RawBuffer::Owned(v) => v.len(),
            RawBuffer::Borrowed { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
