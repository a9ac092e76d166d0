///
/// Scope-exit actions (`defer`)
///
/// `ScopeGuard` owns a zero-argument action and runs it exactly once when
/// dropped, which covers every way out of a block: fall-through, `return`,
/// `break`/`continue`, `?`, and unwinding. Guards in one block fire in
/// reverse declaration order because that is Rust's drop order.
///
/// Guards cannot be cloned and cannot be dismissed. Moving a guard moves
/// its single pending firing.
///
/// Generated C code has no destructors, so it drives the same semantics
/// through an explicit thread-local stack of scope frames:
///
/// ```c
/// biggie_scope_enter();
/// biggie_defer(close_file, fp);
/// biggie_defer(free_buf, buf);
/// biggie_scope_exit();   // free_buf(buf), then close_file(fp)
/// ```
///

use std::cell::RefCell;
use std::ffi::c_void;

pub struct ScopeGuard<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    pub fn new(action: F) -> Self {
        Self { action: Some(action) }
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// Run the given statements when the enclosing block exits.
///
/// ```
/// use std::cell::Cell;
/// use biggie_std_core::defer;
///
/// let hits = Cell::new(0);
/// {
///     defer! { hits.set(hits.get() + 1); }
///     assert_eq!(hits.get(), 0);
/// }
/// assert_eq!(hits.get(), 1);
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::defer::ScopeGuard::new(|| { $($body)* });
    };
}

/// Deferred C callback: `action(context)`
#[derive(Clone, Copy)]
struct DeferredCall {
    action: extern "C" fn(*mut c_void),
    context: *mut c_void,
}

thread_local! {
    static SCOPE_FRAMES: RefCell<Vec<Vec<DeferredCall>>> = const { RefCell::new(Vec::new()) };
}

/// Open a new scope frame, returning the new depth
#[unsafe(no_mangle)]
pub extern "C" fn biggie_scope_enter() -> usize {
    SCOPE_FRAMES.with(|frames| {
        let mut frames = frames.borrow_mut();
        frames.push(Vec::new());
        tracing::trace!(depth = frames.len(), "scope enter");
        frames.len()
    })
}

/// Register `action(context)` on the innermost open frame.
/// With no frame open, an implicit frame is opened first.
#[unsafe(no_mangle)]
pub extern "C" fn biggie_defer(action: extern "C" fn(*mut c_void), context: *mut c_void) {
    SCOPE_FRAMES.with(|frames| {
        let mut frames = frames.borrow_mut();
        if frames.is_empty() {
            tracing::warn!("biggie_defer called with no open scope, opening an implicit one");
            frames.push(Vec::new());
        }
        if let Some(frame) = frames.last_mut() {
            frame.push(DeferredCall { action, context });
        }
    });
}

/// Close the innermost frame, firing its actions last-registered first.
/// Actions registered while firing land in the enclosing frame.
#[unsafe(no_mangle)]
pub extern "C" fn biggie_scope_exit() {
    let frame = SCOPE_FRAMES.with(|frames| frames.borrow_mut().pop());
    match frame {
        Some(calls) => {
            tracing::trace!(actions = calls.len(), "scope exit");
            for call in calls.into_iter().rev() {
                (call.action)(call.context);
            }
        }
        None => tracing::warn!("biggie_scope_exit called with no open scope"),
    }
}

/// Number of open scope frames on this thread
#[unsafe(no_mangle)]
pub extern "C" fn biggie_scope_depth() -> usize {
    SCOPE_FRAMES.with(|frames| frames.borrow().len())
}
