use std::ptr::NonNull;

/// Return a NonNull<T> pointer to the vector's data
pub(crate) fn nonnull_from_vec_data<T>(v: &mut Vec<T>) -> NonNull<T> {
    // this pointer is guaranteed to be non-null
    unsafe { NonNull::new_unchecked(v.as_mut_ptr()) }
}

/// Converts `ptr` to `NonNull<T>`, or `None` for a null pointer.
///
/// A null pointer is accepted for empty buffers, which are then given a
/// dangling pointer.
#[inline]
pub(crate) fn nonnull_or_dangling<T>(ptr: *mut T, len: usize) -> Option<NonNull<T>> {
    match NonNull::new(ptr) {
        Some(p) => Some(p),
        None if len == 0 => Some(NonNull::dangling()),
        None => None,
    }
}
