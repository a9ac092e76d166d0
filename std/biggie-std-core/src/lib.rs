//!
//! biggie-std-core - Core Runtime Types
//!
//! This crate provides the primitives generated biggie code cannot express
//! on its own:
//!
//! - The numeric alias table and the `Str` string handle
//! - `Array<T>`, a growable sequence with copy and transfer semantics
//! - `ScopeGuard` and `defer!` for scope-exit actions
//! - Formatted printing through a checked and an unchecked convention
//!
//! Every primitive is also exported over the C ABI (`biggie_*` symbols) for
//! generated C code. The runtime is single-threaded by contract: nothing
//! here adds locking beyond what stdout already does.
//!

pub mod types;
pub mod error;
pub mod array;
pub mod defer;
pub mod print;

pub use types::*;
pub use error::{
    RuntimeError, BIGGIE_OK, BIGGIE_ERR_OUT_OF_RANGE, BIGGIE_ERR_EMPTY_CONTAINER,
    BIGGIE_ERR_WRITE_FAILURE, BIGGIE_ERR_CONFIG,
};
pub use array::*;
pub use defer::*;
pub use print::*;
