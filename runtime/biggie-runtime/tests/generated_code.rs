///
/// Runtime Surface Integration Tests
///
/// Drives the runtime through both of its surfaces: the re-exported Rust API
/// used by Rust callers and embedding hosts, and the `biggie_*` C ABI that
/// generated code calls from either dialect (C++ code pairs it with the
/// preamble's `defer` guard). Both must observe the same contracts.
///

use std::cell::RefCell;
use std::ffi::c_void;

use biggie_runtime::{
    array, defer, writeln_checked, Array, RuntimeError, Str,
    biggie_array_free, biggie_array_from, biggie_array_len, biggie_array_transfer,
    biggie_defer, biggie_scope_enter, biggie_scope_exit, write_unchecked,
};

#[test]
fn test_container_and_guards_together() {
    let log = RefCell::new(Vec::new());
    let mut numbers = array![1, 2, 3];
    {
        defer! { log.borrow_mut().push(String::from("outer")); }
        let snapshot = numbers.clone();
        defer! { log.borrow_mut().push(format!("snapshot {}", snapshot)); }
        numbers.push(4);
    }
    assert_eq!(
        *log.borrow(),
        vec!["snapshot [ 1, 2, 3 ]".to_string(), "outer".to_string()]
    );
    assert_eq!(numbers.to_string(), "[ 1, 2, 3, 4 ]");
}

#[test]
fn test_guard_releases_on_checked_error() {
    fn first_of(items: &Array<i32>, released: &RefCell<bool>) -> Result<i32, RuntimeError> {
        defer! { *released.borrow_mut() = true; }
        items.try_get(0)
    }

    let released = RefCell::new(false);
    let err = first_of(&Array::new(), &released).unwrap_err();
    assert!(matches!(err, RuntimeError::OutOfRange { index: 0, length: 0 }));
    assert!(*released.borrow());
}

#[test]
fn test_print_conventions_agree() {
    let name = Str::lit("world");
    let count: i32 = 3;
    let args = [
        &name as *const Str as *const c_void,
        &count as *const i32 as *const c_void,
    ];

    let mut unchecked = Vec::new();
    let a = unsafe { write_unchecked(&mut unchecked, b"hello %s x%d", args.as_ptr(), args.len()) }
        .unwrap();

    let mut checked = Vec::new();
    let b = writeln_checked!(&mut checked, "hello {0} x{1}", "world", 3).unwrap();

    assert_eq!(unchecked, checked);
    assert_eq!(a, b);
    assert_eq!(String::from_utf8(checked).unwrap(), "hello world x3\n");
}

extern "C" fn free_array(context: *mut c_void) {
    unsafe { biggie_array_free(context as *mut _) };
}

#[test]
fn test_c_backend_defers_array_release() {
    unsafe {
        biggie_scope_enter();
        let values = [5i64, 6, 7];
        let source = biggie_array_from(values.as_ptr(), values.len());
        biggie_defer(free_array, source as *mut c_void);

        let moved = biggie_array_transfer(source);
        biggie_defer(free_array, moved as *mut c_void);

        assert_eq!(biggie_array_len(source), 0);
        assert_eq!(biggie_array_len(moved), 3);
        biggie_scope_exit();
    }
}
