// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ops::Range;

use crate::dimension::{index_from_offset, infer_reshape, offset_from_index};
use crate::error::{from_kind, ArrayError, ErrorKind};

/// One step of a transaction: a pure transform of shape and index.
///
/// A chain of work items is planned once, stage by stage, with
/// [`transform_shape`](Self::transform_shape); every source element is then
/// threaded through [`transform_index`](Self::transform_index) of each item
/// in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkItem {
    /// View the elements with a new shape; one entry may be `-1`.
    Reshape(Vec<isize>),
    /// Keep one half-open range per axis, `None` for the whole axis.
    Slice(Vec<Option<Range<usize>>>),
    /// Swap two axes.
    Transpose(usize, usize),
    /// Shift every index by a per-axis delta.
    ///
    /// Only valid as the last item of a chain executed into a destination,
    /// whose shape is then the shape of the final stage.
    Offset(Vec<usize>),
}

/// The shape after a work item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageShape {
    Known(Vec<usize>),
    /// The item moves indices without producing a shape of its own; the
    /// destination supplies it.
    DeferToDestination,
}

/// What happens to an element after a work item transformed its index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexFlow {
    /// The element continues to the next stage.
    Keep,
    /// The element is not part of the result and is not written.
    Drop,
}

/// Shapes and strides on both sides of one stage of a planned chain.
#[derive(Copy, Clone, Debug)]
pub struct StageGeometry<'a> {
    pub current_shape: &'a [usize],
    pub next_shape: &'a [usize],
    pub current_strides: &'a [usize],
    pub next_strides: &'a [usize],
}

impl WorkItem {
    /// Return the shape of the stage after this item, given the shape before
    /// it.
    ///
    /// **Errors** with `ShapeMismatch` for a reshape that does not conserve
    /// the element count, and with `InvalidIndex` for a slice or offset of
    /// the wrong rank, a slice range that is reversed or reaches past its
    /// axis, or a transpose axis out of range.
    pub fn transform_shape(&self, shape: &[usize]) -> Result<StageShape, ArrayError> {
        match self {
            WorkItem::Reshape(target) => {
                let len = shape.iter().product();
                infer_reshape(len, target).map(StageShape::Known)
            }
            WorkItem::Slice(ranges) => {
                if ranges.len() != shape.len() {
                    return Err(rank_mismatch("slice", ranges.len(), shape));
                }
                let mut next = Vec::with_capacity(shape.len());
                for (axis, (range, &d)) in ranges.iter().zip(shape).enumerate() {
                    match range {
                        None => next.push(d),
                        Some(r) if r.start <= r.end && r.end <= d => next.push(r.end - r.start),
                        Some(r) => {
                            return Err(from_kind(ErrorKind::InvalidIndex).with_detail(format!(
                                "slice {:?} is not inside axis {} of length {}",
                                r, axis, d
                            )))
                        }
                    }
                }
                Ok(StageShape::Known(next))
            }
            WorkItem::Transpose(a, b) => {
                let n = shape.len();
                if *a >= n || *b >= n {
                    return Err(from_kind(ErrorKind::InvalidIndex).with_detail(format!(
                        "cannot swap axes {} and {} of shape {:?}",
                        a, b, shape
                    )));
                }
                let mut next = shape.to_vec();
                next.swap(*a, *b);
                Ok(StageShape::Known(next))
            }
            WorkItem::Offset(delta) => {
                if delta.len() != shape.len() {
                    return Err(rank_mismatch("offset", delta.len(), shape));
                }
                Ok(StageShape::DeferToDestination)
            }
        }
    }

    /// Move `index` from the frame of the current stage into the frame of the
    /// next one.
    ///
    /// `index` must have been allocated with room for the largest rank of the
    /// chain; a reshape changes its length in place.
    #[inline]
    pub fn transform_index(&self, index: &mut Vec<usize>, geometry: &StageGeometry<'_>) -> IndexFlow {
        match self {
            WorkItem::Reshape(_) => {
                let offset = offset_from_index(index, geometry.current_strides);
                index.resize(geometry.next_shape.len(), 0);
                index_from_offset(offset, geometry.next_strides, index);
            }
            WorkItem::Slice(ranges) => {
                for (ix, range) in index.iter_mut().zip(ranges) {
                    if let Some(r) = range {
                        if !r.contains(&*ix) {
                            return IndexFlow::Drop;
                        }
                        *ix -= r.start;
                    }
                }
            }
            WorkItem::Transpose(a, b) => index.swap(*a, *b),
            WorkItem::Offset(delta) => {
                for (ix, &d) in index.iter_mut().zip(delta) {
                    *ix += d;
                }
            }
        }
        IndexFlow::Keep
    }
}

fn rank_mismatch(what: &str, rank: usize, shape: &[usize]) -> ArrayError {
    from_kind(ErrorKind::InvalidIndex).with_detail(format!(
        "{} of rank {} for shape {:?}",
        what, rank, shape
    ))
}

/// Check that the region `shape`, shifted by `delta`, lies inside a
/// destination of shape `destination`.
pub(crate) fn check_offset_fits(
    shape: &[usize],
    delta: &[usize],
    destination: &[usize],
) -> Result<(), ArrayError> {
    let fits = shape.len() == destination.len()
        && shape
            .iter()
            .zip(delta)
            .zip(destination)
            .all(|((&s, &d), &n)| s.checked_add(d).map_or(false, |end| end <= n));
    if !fits {
        return Err(from_kind(ErrorKind::DestinationShapeMismatch).with_detail(format!(
            "region {:?} shifted by {:?} does not fit into {:?}",
            shape, delta, destination
        )));
    }
    Ok(())
}
