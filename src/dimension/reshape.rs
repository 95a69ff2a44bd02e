
use crate::error::{from_kind, ArrayError, ErrorKind};

/// The wildcard axis length in a reshape target.
pub(crate) const INFER: isize = -1;

/// Resolve a reshape target for an array of `len` elements.
///
/// At most one axis may be `-1`; its length is inferred from the others.
///
/// This function returns:
///
/// - ShapeMismatch if any entry is negative other than one `-1`, if the
///   wildcard cannot be inferred exactly, or if the product of the target is
///   not `len`
/// - Ok with the concrete shape otherwise
pub(crate) fn infer_reshape(len: usize, target: &[isize]) -> Result<Vec<usize>, ArrayError> {
    let mismatch = || {
        from_kind(ErrorKind::ShapeMismatch)
            .with_detail(format!("cannot reshape {} elements into {:?}", len, target))
    };

    let mut wildcard = None;
    let mut known = 1usize;
    for (axis, &d) in target.iter().enumerate() {
        if d == INFER {
            if wildcard.replace(axis).is_some() {
                return Err(mismatch());
            }
        } else if d < 0 {
            return Err(mismatch());
        } else {
            known = known
                .checked_mul(d as usize)
                .ok_or_else(|| from_kind(ErrorKind::DimensionTooLarge))?;
        }
    }

    let mut shape: Vec<usize> = target.iter().map(|&d| d.max(0) as usize).collect();
    match wildcard {
        Some(axis) => {
            // 0 * n == 0 for every n, nothing to infer from
            if known == 0 || len % known != 0 {
                return Err(mismatch());
            }
            shape[axis] = len / known;
        }
        None => {
            if known != len {
                return Err(mismatch());
            }
        }
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_wildcard() {
        assert_eq!(infer_reshape(12, &[-1, 3]).unwrap(), vec![4, 3]);
        assert_eq!(infer_reshape(42, &[-1, 7]).unwrap(), vec![6, 7]);
        assert_eq!(infer_reshape(12, &[2, -1, 2]).unwrap(), vec![2, 3, 2]);
        assert_eq!(infer_reshape(12, &[12]).unwrap(), vec![12]);
        assert_eq!(infer_reshape(1, &[]).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn reject_bad_targets() {
        let kind = |len, t: &[isize]| infer_reshape(len, t).unwrap_err().kind();
        assert_eq!(kind(12, &[-1, 5]), ErrorKind::ShapeMismatch);
        assert_eq!(kind(12, &[5, 2]), ErrorKind::ShapeMismatch);
        assert_eq!(kind(12, &[-1, -1]), ErrorKind::ShapeMismatch);
        assert_eq!(kind(12, &[-2, 6]), ErrorKind::ShapeMismatch);
        assert_eq!(kind(0, &[-1, 0]), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn empty_arrays() {
        assert_eq!(infer_reshape(0, &[0, 5]).unwrap(), vec![0, 5]);
        assert_eq!(infer_reshape(0, &[2, -1, 0]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }
}
