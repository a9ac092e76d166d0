//!
//! Runtime Array Type
//!
//! `Array<T>` is the growable sequence generated code builds from list
//! literals. It exclusively owns its elements: cloning duplicates them,
//! `Array::transfer` hands the backing storage over and leaves the source
//! empty.
//!
//! Indexing and popping come in three flavours: the panicking Rust forms,
//! `unsafe` unchecked forms for the hot path, and `try_` forms that report
//! `OutOfRange` / `EmptyContainer`.
//!
//! The C ABI at the bottom of this file exposes arrays of 64-bit slots
//! through opaque `BiggieArray` handles.
//!

use std::fmt;
use std::io::{self, Write};
use std::ops::Index;

use crate::error::{Result, RuntimeError, BIGGIE_OK};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Array<T> {
    data: Vec<T>,
}

/// Build an `Array` from a literal element list
#[macro_export]
macro_rules! array {
    () => {
        $crate::array::Array::new()
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::array::Array::from(vec![$($elem),+])
    };
}

impl<T> Array<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    /// Take over `source`'s storage. `source` is left empty.
    pub fn transfer(source: &mut Array<T>) -> Array<T> {
        Array { data: std::mem::take(&mut source.data) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append an element, returning the new length
    pub fn push(&mut self, element: T) -> usize {
        self.data.push(element);
        self.data.len()
    }

    /// Remove and return the last element.
    ///
    /// # Panics
    /// Panics if the array is empty.
    pub fn pop(&mut self) -> T {
        match self.data.pop() {
            Some(value) => value,
            None => panic!("{}", RuntimeError::EmptyContainer),
        }
    }

    /// # Safety
    /// The array must not be empty.
    pub unsafe fn pop_unchecked(&mut self) -> T {
        unsafe { self.data.pop().unwrap_unchecked() }
    }

    pub fn try_pop(&mut self) -> Result<T> {
        self.data.pop().ok_or(RuntimeError::EmptyContainer)
    }

    /// Borrowed view of the backing storage. The borrow keeps the array
    /// from being mutated or dropped while the view is alive.
    pub fn raw_view(&self) -> RawView<'_, T> {
        RawView { elements: &self.data }
    }

    /// Mutable pointer to the first slot, for generated code that writes
    /// through raw array semantics. Invalidated by any push, pop or drop.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Clone> Array<T> {
    /// Element at `index`, by value.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> T {
        self.data[index].clone()
    }

    /// # Safety
    /// `index` must be less than `len()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> T {
        unsafe { self.data.get_unchecked(index).clone() }
    }

    pub fn try_get(&self, index: usize) -> Result<T> {
        self.data.get(index).cloned().ok_or(RuntimeError::OutOfRange {
            index,
            length: self.data.len(),
        })
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(elements: [T; N]) -> Self {
        Self { data: Vec::from(elements) }
    }
}

impl<T: Clone> From<&[T]> for Array<T> {
    fn from(elements: &[T]) -> Self {
        Self { data: elements.to_vec() }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

/// Renders as `[ 1, 2, 3 ]`; an empty array renders as `[ ]`
impl<T: fmt::Display> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let last = self.data.len().saturating_sub(1);
        for (i, element) in self.data.iter().enumerate() {
            write!(f, " {}", element)?;
            if i != last {
                write!(f, ",")?;
            }
        }
        write!(f, " ]")
    }
}

/// Non-owning view of an array's storage
#[derive(Debug, Clone, Copy)]
pub struct RawView<'a, T> {
    elements: &'a [T],
}

impl<'a, T> RawView<'a, T> {
    /// Pointer to the first element. Dangling (but non-null) when empty.
    pub fn as_ptr(&self) -> *const T {
        self.elements.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.elements
    }
}

//
// C ABI
//

/// Opaque array handle handed to generated code.
/// Slots are 64-bit: integers directly, everything else as pointers.
pub struct BiggieArray(Array<i64>);

fn into_handle(array: Array<i64>) -> *mut BiggieArray {
    Box::into_raw(Box::new(BiggieArray(array)))
}

/// Create a new empty array with given initial capacity
#[unsafe(no_mangle)]
pub extern "C" fn biggie_array_new(capacity: usize) -> *mut BiggieArray {
    into_handle(Array::with_capacity(capacity))
}

/// Create an array from a literal element list
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_from(values: *const i64, len: usize) -> *mut BiggieArray {
    if values.is_null() || len == 0 {
        return biggie_array_new(0);
    }
    let elements = unsafe { std::slice::from_raw_parts(values, len) };
    into_handle(Array::from(elements))
}

/// Deep copy; the two arrays are independent afterwards
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_copy(src: *const BiggieArray) -> *mut BiggieArray {
    if src.is_null() {
        return biggie_array_new(0);
    }
    unsafe { into_handle((*src).0.clone()) }
}

/// Move the contents of `src` into a new array. `src` stays valid and empty.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_transfer(src: *mut BiggieArray) -> *mut BiggieArray {
    if src.is_null() {
        return biggie_array_new(0);
    }
    unsafe { into_handle(Array::transfer(&mut (*src).0)) }
}

/// Release an array and its storage
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_free(arr: *mut BiggieArray) {
    if !arr.is_null() {
        drop(unsafe { Box::from_raw(arr) });
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_len(arr: *const BiggieArray) -> usize {
    if arr.is_null() {
        0
    } else {
        unsafe { (*arr).0.len() }
    }
}

/// Element at index, no bounds check
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_get(arr: *const BiggieArray, index: usize) -> i64 {
    unsafe { (*arr).0.get_unchecked(index) }
}

/// Bounds-checked element read into `out`; returns a status code
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_try_get(
    arr: *const BiggieArray,
    index: usize,
    out: *mut i64,
) -> i32 {
    let result = if arr.is_null() {
        Err(RuntimeError::OutOfRange { index, length: 0 })
    } else {
        unsafe { (*arr).0.try_get(index) }
    };
    match result {
        Ok(value) => {
            if !out.is_null() {
                unsafe { *out = value };
            }
            BIGGIE_OK
        }
        Err(e) => e.status_code(),
    }
}

/// Append an element, returning the new length (0 for a null handle)
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_push(arr: *mut BiggieArray, value: i64) -> usize {
    if arr.is_null() {
        return 0;
    }
    unsafe { (*arr).0.push(value) }
}

/// Remove the last element, no emptiness check
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_pop(arr: *mut BiggieArray) -> i64 {
    unsafe { (*arr).0.pop_unchecked() }
}

/// Checked removal of the last element into `out`; returns a status code
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_try_pop(arr: *mut BiggieArray, out: *mut i64) -> i32 {
    let result = if arr.is_null() {
        Err(RuntimeError::EmptyContainer)
    } else {
        unsafe { (*arr).0.try_pop() }
    };
    match result {
        Ok(value) => {
            if !out.is_null() {
                unsafe { *out = value };
            }
            BIGGIE_OK
        }
        Err(e) => e.status_code(),
    }
}

/// Raw storage pointer, invalidated by any push, pop or free
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_data(arr: *mut BiggieArray) -> *mut i64 {
    if arr.is_null() {
        return std::ptr::null_mut();
    }
    unsafe { (*arr).0.as_mut_ptr() }
}

/// Write `[ 1, 2, 3 ]` (no trailing newline) and flush
pub fn write_array_to<W: Write, T: fmt::Display>(out: &mut W, array: &Array<T>) -> io::Result<()> {
    write!(out, "{}", array)?;
    out.flush()
}

/// Print array contents as `[ 1, 2, 3 ]` (no trailing newline).
/// Returns `BIGGIE_OK`, or `BIGGIE_ERR_WRITE_FAILURE` if stdout rejected it.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_array_print(arr: *const BiggieArray) -> i32 {
    let empty = Array::new();
    let array = if arr.is_null() { &empty } else { unsafe { &(*arr).0 } };

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    match write_array_to(&mut lock, array) {
        Ok(()) => BIGGIE_OK,
        Err(e) => {
            tracing::debug!(error = %e, "array print failed");
            RuntimeError::WriteFailure(e).status_code()
        }
    }
}
