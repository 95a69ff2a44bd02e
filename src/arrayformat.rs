// Copyright 2025 multiarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::indexes::Odometer;
use crate::MultiArray;

fn format_array<A, F>(array: &MultiArray<A>, f: &mut fmt::Formatter<'_>, mut format: F) -> fmt::Result
where
    F: FnMut(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let ndim = array.ndim();
    let mut last_index = vec![0; ndim];
    for _ in 0..ndim {
        write!(f, "[")?;
    }
    let mut first = true;
    let mut odometer = Odometer::new(array.shape());
    let mut elements = array.iter();
    // Index wraparounds tell where rows end and how many brackets to close.
    while let (Some(index), Some(elt)) = (odometer.next_index(), elements.next()) {
        let take_n = ndim.saturating_sub(1);
        let changed = index[..take_n]
            .iter()
            .zip(&last_index)
            .position(|(a, b)| a != b);
        if let Some(i) = changed {
            let n = ndim - i - 1;
            for _ in 0..n {
                write!(f, "]")?;
            }
            writeln!(f, ",")?;
            for _ in 0..ndim - n {
                write!(f, " ")?;
            }
            for _ in 0..n {
                write!(f, "[")?;
            }
            first = true;
            last_index.copy_from_slice(index);
        }
        if !first {
            write!(f, ", ")?;
        }
        first = false;
        format(elt, f)?;
    }
    for _ in 0..ndim {
        write!(f, "]")?;
    }
    Ok(())
}

/// Format the array using `Debug` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<A: fmt::Debug> fmt::Debug for MultiArray<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)?;
        write!(
            f,
            " shape={:?}, strides={:?}, ownership={:?}",
            self.shape(),
            self.strides(),
            self.ownership()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{arr1, arr2, arr3, MultiArray};

    #[test]
    fn debug_nested_rows() {
        let a = arr2(&[[1, 2, 3], [4, 5, 6]]);
        assert!(format!("{:?}", a).starts_with("[[1, 2, 3],\n [4, 5, 6]] shape=[2, 3]"));

        let b = arr3(&[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]);
        assert!(format!("{:?}", b).starts_with("[[[1, 2],\n  [3, 4]],\n [[5, 6],\n  [7, 8]]]"));
    }

    #[test]
    fn debug_vectors_and_scalars() {
        assert!(format!("{:.1?}", arr1(&[1., 2.5])).starts_with("[1.0, 2.5] "));
        let scalar = MultiArray::from_shape_vec(&[], vec![7]).unwrap();
        assert!(format!("{:?}", scalar).starts_with("7 shape=[]"));
        let empty = MultiArray::<i32>::zeros(&[0, 3]).unwrap();
        assert!(format!("{:?}", empty).starts_with("[[]] "));
    }

    #[test]
    fn debug_shows_layout() {
        let a = arr1(&[1, 2]);
        assert_eq!(
            format!("{:?}", a),
            "[1, 2] shape=[2], strides=[1], ownership=Owned"
        );
    }
}
