use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use itertools::iproduct;
use multiarray::prelude::*;

/// An array over foreign memory that counts how often it is released.
fn counted(shape: &[usize], released: &Arc<AtomicUsize>) -> MultiArray<f32> {
    let len = shape.iter().product();
    let mut data: Vec<f32> = (0..len).map(|x| x as f32).collect();
    let ptr = data.as_mut_ptr();
    let counter = Arc::clone(released);
    unsafe {
        MultiArray::from_raw_parts_with_release(ptr, len, shape, move |p: NonNull<f32>, n| {
            assert_eq!(p.as_ptr(), data.as_mut_ptr());
            assert_eq!(n, data.len());
            drop(data);
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap()
    }
}

#[test]
fn view_of_leading_index() {
    let a = MultiArray::from_shape_fn(&[3, 4, 2], |ix| ix[0] * 100 + ix[1] * 10 + ix[2]).unwrap();
    let v = a.view(&[1]).unwrap();
    assert_eq!(v.shape(), &[4, 2]);
    assert_eq!(v.strides(), &[2, 1]);
    assert_eq!(v[[3, 1]], 131);
    assert_eq!(v.ownership(), Ownership::View);
    assert!(v.shares_storage_with(&a));

    let w = a.view(&[2, 3]).unwrap();
    assert_eq!(w.as_slice(), &[230, 231]);
}

#[test]
fn view_rejects_bad_prefix() {
    let a = MultiArray::<u8>::zeros(&[3, 4]).unwrap();
    assert_eq!(a.view(&[0, 0]).unwrap_err().kind(), ErrorKind::InvalidIndex);
    assert_eq!(a.view(&[3]).unwrap_err().kind(), ErrorKind::InvalidIndex);
    assert_eq!(a.view(&[0, 0, 0]).unwrap_err().kind(), ErrorKind::InvalidIndex);
    assert_eq!(a.view(&[]).unwrap().shape(), &[3, 4]);
}

#[test]
fn view_of_view() {
    let a = MultiArray::from_shape_fn(&[2, 3, 4], |ix| ix.iter().sum::<usize>()).unwrap();
    let v = a.view(&[1]).unwrap().view(&[2]).unwrap();
    assert_eq!(v.as_slice(), a.view(&[1, 2]).unwrap().as_slice());
}

#[test]
fn view_outlives_source() {
    let released = Arc::new(AtomicUsize::new(0));
    let source = counted(&[2, 7, 3], &released);
    assert_eq!(source.ownership(), Ownership::Custom);
    let view = source.view(&[1]).unwrap();
    drop(source);

    assert_eq!(released.load(Ordering::SeqCst), 0);
    assert_eq!(view.shape(), &[7, 3]);
    assert_eq!(view[[0, 0]], 21.);
    assert_eq!(view[[6, 2]], 41.);

    drop(view);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn release_fires_once_after_every_holder() {
    let released = Arc::new(AtomicUsize::new(0));
    let source = counted(&[4, 3], &released);
    let reshaped = source.reshape(&[-1]).unwrap();
    let clone = source.clone();
    let views: Vec<_> = (0..4).map(|i| source.view(&[i]).unwrap()).collect();
    drop(source);
    drop(reshaped);
    assert_eq!(released.load(Ordering::SeqCst), 0);
    drop(views);
    assert_eq!(clone.as_slice()[11], 11.);
    drop(clone);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn release_from_another_thread() {
    let released = Arc::new(AtomicUsize::new(0));
    let source = counted(&[8], &released);
    let view = source.reshape(&[2, 4]).unwrap();
    let sum = thread::spawn(move || view.iter().sum::<f32>()).join().unwrap();
    assert_eq!(sum, 28.);
    assert_eq!(released.load(Ordering::SeqCst), 0);
    drop(source);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn shared_storage_cannot_be_mutated() {
    let mut a = MultiArray::<i32>::zeros(&[2, 2]).unwrap();
    let view = a.view(&[0]).unwrap();
    assert!(!a.is_unique());
    assert_eq!(a.as_slice_mut().unwrap_err().kind(), ErrorKind::OwnershipViolation);
    assert_eq!(a.set(&[0, 0], 1).unwrap_err().kind(), ErrorKind::OwnershipViolation);
    assert_eq!(a.fill(3).unwrap_err().kind(), ErrorKind::OwnershipViolation);
    drop(view);
    assert!(a.is_unique());
    a.set(&[0, 0], 1).unwrap();
    assert_eq!(a.as_slice(), &[1, 0, 0, 0]);
}

#[test]
fn block_mut_writes_a_sub_region() {
    let mut weights = MultiArray::<f32>::zeros(&[3, 2, 4]).unwrap();
    for (i, w) in weights.block_mut(&[1]).unwrap().iter_mut().enumerate() {
        *w = i as f32;
    }
    weights.block_mut(&[2, 1]).unwrap().fill(-1.);
    for (j, k) in iproduct!(0..2, 0..4) {
        assert_eq!(weights[[0, j, k]], 0.);
        assert_eq!(weights[[1, j, k]], (j * 4 + k) as f32);
    }
    assert_eq!(weights.block(&[2]).unwrap(), &[0., 0., 0., 0., -1., -1., -1., -1.]);
    assert_eq!(weights.block(&[]).unwrap().len(), 24);
    assert_eq!(
        weights.view(&[1]).unwrap().as_slice(),
        weights.block(&[1]).unwrap()
    );

    assert_eq!(weights.block_mut(&[3]).unwrap_err().kind(), ErrorKind::InvalidIndex);
    assert_eq!(weights.block_mut(&[0, 0, 0]).unwrap_err().kind(), ErrorKind::InvalidIndex);

    let view = weights.view(&[0]).unwrap();
    assert_eq!(weights.block_mut(&[0]).unwrap_err().kind(), ErrorKind::OwnershipViolation);
    drop(view);
    weights.block_mut(&[0, 1]).unwrap()[2] = 7.;
    assert_eq!(weights[[0, 1, 2]], 7.);
}

#[test]
fn to_owned_is_independent() {
    let a = arr2(&[[1, 2], [3, 4]]);
    let v = a.view(&[1]).unwrap();
    let mut copy = v.to_owned();
    assert_eq!(copy.ownership(), Ownership::Owned);
    assert!(!copy.shares_storage_with(&a));
    copy.set(&[0], 30).unwrap();
    assert_eq!(v.as_slice(), &[3, 4]);
    assert_eq!(copy.as_slice(), &[30, 4]);
}

#[test]
fn borrowed_memory_is_left_alone() {
    let mut data = vec![1u32, 2, 3, 4, 5, 6];
    {
        let a = unsafe { MultiArray::from_raw_parts_borrowed(data.as_mut_ptr(), data.len(), &[2, 3]) }
            .unwrap();
        assert_eq!(a.ownership(), Ownership::Borrowed);
        let v = a.view(&[1]).unwrap();
        assert_eq!(v.as_slice(), &[4, 5, 6]);
    }
    data.push(7);
    assert_eq!(data.len(), 7);
}

#[test]
fn adoption_checks_length() {
    let mut data = vec![0f64; 5];
    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let err = unsafe {
        MultiArray::from_raw_parts_with_release(data.as_mut_ptr(), data.len(), &[2, 3], move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(released.load(Ordering::SeqCst), 0);

    let err = unsafe { MultiArray::<f64>::from_raw_parts_borrowed(std::ptr::null_mut(), 4, &[4]) }
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    let empty = unsafe { MultiArray::<f64>::from_raw_parts_borrowed(std::ptr::null_mut(), 0, &[0]) };
    assert!(empty.unwrap().is_empty());
}

#[test]
fn export_keeps_storage_alive() {
    let released = Arc::new(AtomicUsize::new(0));
    let source = counted(&[2, 3], &released);
    let mut exported = source.export();
    assert_eq!(exported.data_ptr(), source.as_ptr());
    unsafe { *exported.data_ptr_mut().add(4) = 40. };
    assert_eq!(source[[1, 1]], 40.);
    assert_eq!(exported.shape(), &[2, 3]);
    assert_eq!(exported.strides(), &[3, 1]);
    assert_eq!(exported.byte_strides(), vec![12, 4]);
    assert_eq!(exported.len(), 6);

    let release = exported.into_release();
    drop(source);
    assert_eq!(released.load(Ordering::SeqCst), 0);
    release();
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
