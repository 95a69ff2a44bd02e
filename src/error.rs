// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;
use std::io;

/// An error related to array shape, indexing, storage ownership or
/// transaction chains.
#[derive(Clone, Debug)]
pub struct ArrayError {
    // we want to be able to change this representation later
    repr: ErrorKind,
    detail: Option<Box<str>>,
}

impl ArrayError {
    /// Create a new `ArrayError`
    pub fn from_kind(kind: ErrorKind) -> Self {
        from_kind(kind)
    }

    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.repr
    }

    /// Return the extra context recorded with this error, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into().into_boxed_str());
        self
    }
}

/// Error code for an error related to array shape, indexing, ownership or
/// transaction chains.
///
/// This enumeration is not exhaustive. The representation of the enum
/// is not guaranteed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// buffer length or reshape target does not match the element count
    ShapeMismatch,
    /// wrong number of index components, or a component out of range
    InvalidIndex,
    /// exclusive access requested on storage with other holders
    OwnershipViolation,
    /// offset used before the end of a chain, or without a destination
    ChainContractViolation,
    /// supplied destination disagrees with the shape computed by the chain
    DestinationShapeMismatch,
    /// shape product overflows `usize`
    DimensionTooLarge,
}

#[inline(always)]
pub fn from_kind(k: ErrorKind) -> ArrayError {
    ArrayError {
        repr: k,
        detail: None,
    }
}

impl PartialEq for ArrayError {
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool {
        self.repr == rhs.repr
    }
}

impl ErrorKind {
    fn description(self) -> &'static str {
        match self {
            ErrorKind::ShapeMismatch => "shape does not match the element count",
            ErrorKind::InvalidIndex => "invalid index",
            ErrorKind::OwnershipViolation => "storage is not exclusively held",
            ErrorKind::ChainContractViolation => "offset must be the final work item of a transaction into a destination",
            ErrorKind::DestinationShapeMismatch => "destination shape does not match the transaction",
            ErrorKind::DimensionTooLarge => "dimension too large",
        }
    }
}

impl Error for ArrayError {}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.kind().description())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

pub(crate) fn shape_mismatch(len: usize, shape: &[usize]) -> ArrayError {
    from_kind(ErrorKind::ShapeMismatch)
        .with_detail(format!("{} elements cannot have shape {:?}", len, shape))
}

pub(crate) fn invalid_index(index: &[usize], shape: &[usize]) -> ArrayError {
    from_kind(ErrorKind::InvalidIndex)
        .with_detail(format!("index {:?} for shape {:?}", index, shape))
}

pub(crate) fn not_exclusive() -> ArrayError {
    from_kind(ErrorKind::OwnershipViolation)
}

/// An error produced while filling an array from bytes.
#[derive(Debug)]
pub enum LoadError {
    /// reading the source failed
    Io(io::Error),
    /// the source holds a different number of bytes than the array, (expected, found)
    Decode { expected: usize, found: usize },
    /// the array itself rejected the operation
    Array(ArrayError),
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Decode { .. } => None,
            LoadError::Array(e) => Some(e),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "could not read array data: {}", e),
            LoadError::Decode { expected, found } => {
                write!(f, "corrupt array data, expected {} bytes, found {}", expected, found)
            }
            LoadError::Array(e) => e.fmt(f),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ArrayError> for LoadError {
    fn from(e: ArrayError) -> Self {
        LoadError::Array(e)
    }
}
