// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! multiarray prelude.
//!
//! This module contains the most used types, functions and macros that you
//! can import easily as a group.
//!
//! ```
//! use multiarray::prelude::*;
//!
//! let a = array![[1, 2], [3, 4]];
//! assert_eq!(a.ownership(), Ownership::Owned);
//! ```

#[doc(no_inline)]
pub use crate::{ArrayError, ErrorKind, MultiArray, Ownership};

#[doc(no_inline)]
pub use crate::{TransactionProxy, WorkItem};

#[doc(no_inline)]
pub use crate::{arr0, arr1, arr2, arr3, array};
