// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Filling arrays from raw native-endian element bytes.
//!
//! The files hold nothing but the elements in row-major order; the shape
//! comes from the array being filled, and the byte count must match it
//! exactly.

use std::fs::File;
use std::io::Read;
use std::mem::size_of;
use std::path::Path;

use bytemuck::Pod;
use tracing::debug;

use crate::error::{from_kind, ErrorKind, LoadError};
use crate::MultiArray;

fn byte_len<A>(len: usize) -> Result<usize, LoadError> {
    len.checked_mul(size_of::<A>())
        .ok_or_else(|| LoadError::Array(from_kind(ErrorKind::DimensionTooLarge)))
}

/// # Loading
impl<A: Pod> MultiArray<A> {
    /// Overwrite the elements of the array with the bytes of `reader`.
    ///
    /// **Errors** with `LoadError::Decode` unless `reader` yields exactly
    /// `len() * size_of::<A>()` bytes (`found` counts at most one byte past
    /// the expected length), with `LoadError::Array` if the storage is
    /// shared, and with `LoadError::Io` if reading fails. The array is left
    /// untouched on error.
    pub fn load_from_reader<R: Read>(&mut self, reader: R) -> Result<(), LoadError> {
        let expected = byte_len::<A>(self.len())?;
        let slots = self.as_slice_mut()?;
        let mut bytes = Vec::with_capacity(expected);
        reader.take(expected as u64 + 1).read_to_end(&mut bytes)?;
        if bytes.len() != expected {
            return Err(LoadError::Decode {
                expected,
                found: bytes.len(),
            });
        }
        bytemuck::cast_slice_mut::<A, u8>(slots).copy_from_slice(&bytes);
        Ok(())
    }

    /// Overwrite the elements of the array with the contents of the file at
    /// `path`.
    ///
    /// ```no_run
    /// use multiarray::MultiArray;
    ///
    /// let mut window = MultiArray::<f32>::zeros(&[400]).unwrap();
    /// window.load_from_path("hann_window.bin").unwrap();
    /// ```
    ///
    /// **Errors** as [`.load_from_reader()`](Self::load_from_reader), with
    /// `found` the size of the file.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let expected = byte_len::<A>(self.len())?;
        let file = File::open(path)?;
        let found = file.metadata()?.len();
        debug!(path = %path.display(), bytes = found, "loading array data");
        if found != expected as u64 {
            return Err(LoadError::Decode {
                expected,
                found: found as usize,
            });
        }
        self.load_from_reader(file)
    }

    /// Memory-map the file at `path` as an array of shape `shape`, without
    /// copying. Writes through the array go to the file; the map is removed
    /// when the last array sharing the storage is dropped.
    ///
    /// A shape without elements maps nothing and gives an empty owned array.
    ///
    /// **Errors** with `LoadError::Decode` unless the file holds exactly
    /// `product(shape) * size_of::<A>()` bytes, and with `LoadError::Io` if
    /// the file cannot be opened for reading and writing or mapped.
    ///
    /// The caller must make sure no one else modifies or truncates the file
    /// while it is mapped.
    #[cfg(feature = "mmap")]
    pub fn map_file<P: AsRef<Path>>(path: P, shape: &[usize]) -> Result<Self, LoadError> {
        use crate::data_repr::{Release, Storage};
        use crate::dimension::size_of_shape_checked;
        use memmap2::MmapMut;
        use std::fs::OpenOptions;
        use std::ptr::NonNull;

        let path = path.as_ref();
        let len = size_of_shape_checked(shape)?;
        let expected = byte_len::<A>(len)?;
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let found = file.metadata()?.len();
        debug!(path = %path.display(), bytes = found, "mapping array data");
        if found != expected as u64 {
            return Err(LoadError::Decode {
                expected,
                found: found as usize,
            });
        }
        if len == 0 {
            return Ok(MultiArray::from_vec_shape(shape.to_vec(), Vec::new()));
        }

        let mut map = unsafe { MmapMut::map_mut(&file)? };
        let ptr = bytemuck::try_cast_slice_mut::<u8, A>(&mut map[..])
            .map_err(|_| LoadError::Decode { expected, found: found as usize })?
            .as_mut_ptr();
        let ptr = NonNull::new(ptr)
            .ok_or_else(|| LoadError::Array(from_kind(ErrorKind::ShapeMismatch)))?;
        // the mapped pages stay put when the map handle moves
        let storage = unsafe { Storage::from_raw_parts(ptr, len, Release::Mapped(map)) };
        Ok(MultiArray::from_storage(storage, shape.to_vec()))
    }
}
