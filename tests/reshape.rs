use multiarray::prelude::*;

#[test]
fn reshape() {
    let a = MultiArray::from_shape_vec(&[8], (1..=8).collect()).unwrap();
    assert!(a.reshape(&[3, 3]).is_err());
    let u = a.reshape(&[2, 2, 2]).unwrap();
    assert_eq!(u.shape(), &[2, 2, 2]);
    assert_eq!(u.strides(), &[4, 2, 1]);
    let s = u.reshape(&[4, 2]).unwrap();
    assert_eq!(s, arr2(&[[1, 2], [3, 4], [5, 6], [7, 8]]));
    assert!(s.shares_storage_with(&a));
    assert_eq!(s.as_ptr(), a.as_ptr());
}

#[test]
fn reshape_wildcard() {
    let a = MultiArray::<f32>::zeros(&[3, 4]).unwrap();
    assert_eq!(a.reshape(&[-1, 3]).unwrap().shape(), &[4, 3]);
    assert_eq!(a.reshape(&[2, -1, 2]).unwrap().shape(), &[2, 3, 2]);
    assert_eq!(a.reshape(&[-1]).unwrap().shape(), &[12]);

    let err = a.reshape(&[-1, 5]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn reshape_errors() {
    let a = MultiArray::<u8>::zeros(&[3, 4]).unwrap();
    for target in [&[-1, -1][..], &[-2, -6], &[5, 2], &[12, 0], &[0, -1]] {
        assert_eq!(
            a.reshape(target).unwrap_err().kind(),
            ErrorKind::ShapeMismatch,
            "reshape to {:?}",
            target
        );
    }
}

#[test]
fn reshape_empty_and_scalar() {
    let empty = MultiArray::<u8>::zeros(&[0, 4]).unwrap();
    assert_eq!(empty.reshape(&[4, 0, 7]).unwrap().len(), 0);
    assert!(empty.reshape(&[-1, 0]).is_err());

    let scalar = arr0(5u8);
    let r = scalar.reshape(&[1, 1]).unwrap();
    assert_eq!(r[[0, 0]], 5);
    assert_eq!(r.reshape(&[]).unwrap()[[]], 5);
}

#[test]
fn reshape_round_trip() {
    let a = MultiArray::from_shape_fn(&[2, 7, 3], |ix| (ix[0] * 21 + ix[1] * 3 + ix[2]) as f32).unwrap();
    let b = a.reshape(&[-1, 7]).unwrap();
    assert_eq!(b.shape(), &[6, 7]);
    assert_eq!(b[[3, 1]], a[[1, 0, 1]]);
    assert_eq!(b.reshape(&[2, 7, 3]).unwrap(), a);
}

#[test]
fn reshape_of_view() {
    let a = MultiArray::from_shape_fn(&[3, 2, 2], |ix| ix[0] * 4 + ix[1] * 2 + ix[2]).unwrap();
    let v = a.view(&[2]).unwrap().reshape(&[4]).unwrap();
    assert_eq!(v.as_slice(), &[8, 9, 10, 11]);
    assert_eq!(v.ownership(), Ownership::View);
}
