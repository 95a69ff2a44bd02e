use std::mem::MaybeUninit;

use multiarray::prelude::*;
use multiarray::RawBuffer;

#[test]
fn owned_buffer_comes_back_as_vec() {
    let a = MultiArray::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    match a.into_buffer().unwrap() {
        RawBuffer::Owned(v) => assert_eq!(v, [1, 2, 3, 4, 5, 6]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn borrowed_buffer_comes_back_as_pointer() {
    let mut data = vec![0.5f32; 4];
    let a = unsafe { MultiArray::from_raw_parts_borrowed(data.as_mut_ptr(), 4, &[2, 2]) }.unwrap();
    let buffer = a.into_buffer().unwrap();
    assert_eq!(buffer.len(), 4);
    match buffer {
        RawBuffer::Borrowed { ptr, len } => {
            assert_eq!(ptr.as_ptr(), data.as_mut_ptr());
            assert_eq!(len, 4);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn derived_arrays_keep_their_buffer() {
    let a = MultiArray::<u8>::zeros(&[2, 2]).unwrap();
    let view = a.view(&[0]).unwrap();
    assert_eq!(view.into_buffer().unwrap_err().1.kind(), ErrorKind::OwnershipViolation);
    let reshaped = a.reshape(&[4]).unwrap();
    assert_eq!(reshaped.into_buffer().unwrap_err().1.kind(), ErrorKind::OwnershipViolation);
    let clone = a.clone();
    let (clone, err) = clone.into_buffer().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OwnershipViolation);
    assert_eq!(clone.ownership(), Ownership::View);
    drop(clone);
    assert!(a.into_buffer().is_ok());
}

#[test]
fn shared_storage_keeps_its_buffer() {
    let a = MultiArray::<u8>::zeros(&[2, 2]).unwrap();
    let view = a.view(&[1]).unwrap();
    let (a, err) = a.into_buffer().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OwnershipViolation);
    assert_eq!(a.shape(), &[2, 2]);
    assert_eq!(view.as_slice(), &[0, 0]);

    drop(view);
    match a.into_buffer() {
        Ok(RawBuffer::Owned(v)) => assert_eq!(v, [0, 0, 0, 0]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn custom_storage_keeps_its_buffer() {
    let mut data = vec![1u64, 2, 3];
    let ptr = data.as_mut_ptr();
    let a = unsafe { MultiArray::from_raw_parts_with_release(ptr, 3, &[3], move |_, _| drop(data)) }
        .unwrap();
    assert_eq!(a.ownership(), Ownership::Custom);
    let (a, err) = a.into_buffer().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OwnershipViolation);
    assert_eq!(a.as_slice(), &[1, 2, 3]);
}

#[test]
fn ownership_of_every_kind() {
    let owned = MultiArray::<i16>::zeros(&[3]).unwrap();
    assert_eq!(owned.ownership(), Ownership::Owned);
    assert!(!owned.is_view());
    let view = owned.reshape(&[1, 3]).unwrap();
    assert_eq!(view.ownership(), Ownership::View);
    assert!(view.is_view());
    assert_eq!(owned.clone().ownership(), Ownership::View);
    assert_eq!(view.to_owned().ownership(), Ownership::Owned);
}

#[test]
fn uninit_destination() {
    let mut a = MultiArray::<MaybeUninit<String>>::uninit(&[2]).unwrap();
    a.set(&[0], MaybeUninit::new("left".to_owned())).unwrap();
    a.set(&[1], MaybeUninit::new("right".to_owned())).unwrap();
    let a = unsafe { a.assume_init() }.unwrap();
    assert_eq!(a.as_slice(), &["left".to_owned(), "right".to_owned()]);
    assert_eq!(a.ownership(), Ownership::Owned);
}
