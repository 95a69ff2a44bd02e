// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fused chains of reshape, slice, transpose and offset steps.
//!
//! A transaction is planned once: the shape and strides of every stage are
//! computed up front and every contract is checked, so a failing chain never
//! writes anything. The source is then traversed a single time in row-major
//! order; each element's index is threaded through all work items and the
//! element is written straight into the destination.
//!
//! ```
//! use multiarray::MultiArray;
//!
//! let source = MultiArray::from_shape_fn(&[1, 7, 3], |ix| (ix[1] * 3 + ix[2]) as f32).unwrap();
//! let mut destination = MultiArray::from_elem(&[2, 7, 3], f32::NAN).unwrap();
//!
//! source.transaction_into(&mut destination, |t| t.offset([1, 0, 0])).unwrap();
//! assert!(destination[[0, 4, 1]].is_nan());
//! assert_eq!(destination[[1, 4, 1]], source[[0, 4, 1]]);
//! ```

use std::mem::MaybeUninit;
use std::ops::Range;

use tracing::debug;

use crate::dimension::{default_strides, offset_from_index};
use crate::error::{from_kind, ArrayError, ErrorKind};
use crate::indexes::Odometer;
use crate::MultiArray;

pub use self::work::{IndexFlow, StageGeometry, StageShape, WorkItem};

use self::work::check_offset_fits;

mod work;

/// Builder of a work item chain that tracks the shape after each item.
///
/// The first failing item latches its error; later items are still recorded
/// but not planned. Planning at execution repeats every check, so the proxy
/// is only needed for building and inspecting chains.
///
/// ```
/// use multiarray::{ErrorKind, TransactionProxy};
///
/// let t = TransactionProxy::new(&[3, 4]).reshape(&[-1, 3]).transposed(0, 1);
/// assert_eq!(t.shape(), Some(&[3, 4][..]));
///
/// let t = TransactionProxy::new(&[3, 4]).reshape(&[-1, 5]);
/// assert_eq!(t.error().map(|e| e.kind()), Some(ErrorKind::ShapeMismatch));
/// ```
#[derive(Clone, Debug)]
pub struct TransactionProxy {
    items: Vec<WorkItem>,
    shape: Result<StageShape, ArrayError>,
}

impl TransactionProxy {
    /// Start an empty chain over a source of shape `shape`.
    pub fn new(shape: &[usize]) -> Self {
        TransactionProxy {
            items: Vec::new(),
            shape: Ok(StageShape::Known(shape.to_vec())),
        }
    }

    /// Return the shape after the last item, or `None` if the chain ends in
    /// an offset or has failed.
    pub fn shape(&self) -> Option<&[usize]> {
        match &self.shape {
            Ok(StageShape::Known(shape)) => Some(shape),
            _ => None,
        }
    }

    /// Return the error of the first invalid item, if any.
    pub fn error(&self) -> Option<&ArrayError> {
        self.shape.as_ref().err()
    }

    pub fn work_items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<WorkItem> {
        self.items
    }

    /// Append `item` to the chain.
    pub fn push(mut self, item: WorkItem) -> Self {
        self.shape = match self.shape {
            Ok(StageShape::Known(shape)) => item.transform_shape(&shape),
            Ok(StageShape::DeferToDestination) => Err(offset_not_last()),
            Err(e) => Err(e),
        };
        self.items.push(item);
        self
    }

    /// Append a reshape; one entry of `shape` may be `-1`.
    pub fn reshape(self, shape: &[isize]) -> Self {
        self.push(WorkItem::Reshape(shape.to_vec()))
    }

    /// Append a slice with one range per axis, `None` for the whole axis.
    pub fn sliced<I>(self, ranges: I) -> Self
    where
        I: IntoIterator<Item = Option<Range<usize>>>,
    {
        self.push(WorkItem::Slice(ranges.into_iter().collect()))
    }

    /// Append a swap of axes `a` and `b`.
    pub fn transposed(self, a: usize, b: usize) -> Self {
        self.push(WorkItem::Transpose(a, b))
    }

    /// Append a per-axis shift of every index.
    ///
    /// Only valid as the last item, with a transaction into a destination.
    pub fn offset<I>(self, delta: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.push(WorkItem::Offset(delta.into_iter().collect()))
    }
}

fn offset_not_last() -> ArrayError {
    from_kind(ErrorKind::ChainContractViolation).with_detail("offset must be the last work item")
}

/// Shape and strides of every stage of a chain; stage 0 is the source.
#[derive(Debug)]
struct Plan {
    shapes: Vec<Vec<usize>>,
    strides: Vec<Vec<usize>>,
    max_rank: usize,
}

impl Plan {
    fn new(
        source: &[usize],
        items: &[WorkItem],
        destination: Option<&[usize]>,
    ) -> Result<Plan, ArrayError> {
        let mut shapes = Vec::with_capacity(items.len() + 1);
        shapes.push(source.to_vec());
        for (k, item) in items.iter().enumerate() {
            let current = &shapes[k];
            let next = match item.transform_shape(current)? {
                StageShape::Known(next) => next,
                StageShape::DeferToDestination => {
                    if k + 1 != items.len() {
                        return Err(offset_not_last());
                    }
                    let destination = destination.ok_or_else(|| {
                        from_kind(ErrorKind::ChainContractViolation)
                            .with_detail("offset needs a transaction into a destination")
                    })?;
                    if let WorkItem::Offset(delta) = item {
                        check_offset_fits(current, delta, destination)?;
                    }
                    destination.to_vec()
                }
            };
            shapes.push(next);
        }

        let target = &shapes[items.len()];
        if let Some(destination) = destination {
            if destination != &target[..] {
                return Err(from_kind(ErrorKind::DestinationShapeMismatch).with_detail(format!(
                    "transaction produces shape {:?}, destination has shape {:?}",
                    target, destination
                )));
            }
        }

        debug!(
            stages = items.len(),
            source = ?source,
            target = ?target,
            into_destination = destination.is_some(),
            "planned transaction"
        );
        let strides = shapes.iter().map(|shape| default_strides(shape)).collect();
        let max_rank = shapes.iter().map(Vec::len).max().unwrap_or(0);
        Ok(Plan {
            shapes,
            strides,
            max_rank,
        })
    }

    fn target_shape(&self) -> &[usize] {
        &self.shapes[self.shapes.len() - 1]
    }

    fn target_strides(&self) -> &[usize] {
        &self.strides[self.strides.len() - 1]
    }

    fn geometry(&self, stage: usize) -> StageGeometry<'_> {
        StageGeometry {
            current_shape: &self.shapes[stage],
            next_shape: &self.shapes[stage + 1],
            current_strides: &self.strides[stage],
            next_strides: &self.strides[stage + 1],
        }
    }

    /// Call `write` with the destination offset of every surviving element
    /// of `source`, in source order, and return how many survived.
    fn traverse<A, F>(&self, items: &[WorkItem], source: &MultiArray<A>, mut write: F) -> usize
    where
        F: FnMut(usize, &A),
    {
        let mut odometer = Odometer::new(source.shape());
        let mut index = Vec::with_capacity(self.max_rank);
        let mut written = 0;
        'elements: for value in source.iter() {
            match odometer.next_index() {
                Some(source_index) => {
                    index.clear();
                    index.extend_from_slice(source_index);
                }
                None => break,
            }
            for (stage, item) in items.iter().enumerate() {
                if item.transform_index(&mut index, &self.geometry(stage)) == IndexFlow::Drop {
                    continue 'elements;
                }
            }
            write(offset_from_index(&index, self.target_strides()), value);
            written += 1;
        }
        written
    }
}

/// Run the chain `items` over `source` and return the result in a fresh
/// owned array.
///
/// **Errors** if any item is invalid for the shape it is applied to, and
/// with `ChainContractViolation` if the chain contains an offset, which
/// needs [`execute_into`].
pub fn execute<A: Clone>(source: &MultiArray<A>, items: &[WorkItem]) -> Result<MultiArray<A>, ArrayError> {
    let plan = Plan::new(source.shape(), items, None)?;
    let mut destination = MultiArray::<MaybeUninit<A>>::uninit(plan.target_shape())?;
    let slots = destination.as_slice_mut()?;
    let written = plan.traverse(items, source, |offset, value| {
        slots[offset] = MaybeUninit::new(value.clone());
    });
    // reshape and transpose are bijections and slices are validated to lie
    // inside their axes, so every slot has been written exactly once
    assert_eq!(written, destination.len(), "transaction left destination slots unwritten");
    unsafe { destination.assume_init() }.map_err(|(_, e)| e)
}

/// Run the chain `items` over `source`, writing the surviving elements into
/// `destination` and leaving every other element of it as it was.
///
/// **Errors** if any item is invalid, with `DestinationShapeMismatch` if the
/// destination does not have the shape the chain produces (or, for a chain
/// ending in an offset, cannot hold the shifted region), and with
/// `OwnershipViolation` if the destination shares its storage. Nothing is
/// written on error.
pub fn execute_into<A: Clone>(
    source: &MultiArray<A>,
    items: &[WorkItem],
    destination: &mut MultiArray<A>,
) -> Result<(), ArrayError> {
    let plan = Plan::new(source.shape(), items, Some(destination.shape()))?;
    let slots = destination.as_slice_mut()?;
    plan.traverse(items, source, |offset, value| slots[offset] = value.clone());
    Ok(())
}

/// # Transactions
impl<A: Clone> MultiArray<A> {
    /// Build a chain with `build` and run it over `self` into a fresh array.
    ///
    /// ```
    /// use multiarray::MultiArray;
    ///
    /// let a = MultiArray::from_shape_fn(&[3, 7, 3], |ix| ix[0] * 100 + ix[1] * 10 + ix[2]).unwrap();
    /// let b = a.transaction(|t| t.sliced([None, Some(4..6), None])).unwrap();
    /// assert_eq!(b.shape(), &[3, 2, 3]);
    /// assert_eq!(b[[2, 1, 0]], a[[2, 5, 0]]);
    /// ```
    pub fn transaction<F>(&self, build: F) -> Result<MultiArray<A>, ArrayError>
    where
        F: FnOnce(TransactionProxy) -> TransactionProxy,
    {
        let proxy = build(TransactionProxy::new(self.shape()));
        execute(self, proxy.work_items())
    }

    /// Build a chain with `build` and run it over `self` into `destination`.
    pub fn transaction_into<F>(&self, destination: &mut MultiArray<A>, build: F) -> Result<(), ArrayError>
    where
        F: FnOnce(TransactionProxy) -> TransactionProxy,
    {
        let proxy = build(TransactionProxy::new(self.shape()));
        execute_into(self, proxy.work_items(), destination)
    }

    /// Return a copy of the array with axes `a` and `b` swapped.
    pub fn transposed(&self, a: usize, b: usize) -> Result<MultiArray<A>, ArrayError> {
        execute(self, &[WorkItem::Transpose(a, b)])
    }

    /// Return a copy of the sub-region given by one range per axis, `None`
    /// for the whole axis.
    pub fn sliced<I>(&self, ranges: I) -> Result<MultiArray<A>, ArrayError>
    where
        I: IntoIterator<Item = Option<Range<usize>>>,
    {
        execute(self, &[WorkItem::Slice(ranges.into_iter().collect())])
    }
}
