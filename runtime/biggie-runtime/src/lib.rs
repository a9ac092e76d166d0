///
/// biggie Runtime Static Library
///
/// Provides all runtime functions needed by compiled biggie programs.
/// This crate produces a static library (libbiggie_runtime.a) that gets
/// linked with the object file emitted by the biggie compiler, whichever
/// dialect (C or C++) that compiler targeted.
///
/// Contains:
/// - Array operations (biggie_array_new, biggie_array_push, etc.)
/// - Scope frames for deferred actions (biggie_scope_enter, biggie_defer, ...)
/// - The println entry point (biggie_println)
/// - Dialect configuration and the preamble header the generated code includes
///

pub mod config;
pub mod preamble;

pub use biggie_std_core::*;

pub use config::{find_config_file, Dialect, IntWidth, RuntimeConfig, CONFIG_FILE_NAME};
pub use preamble::render_preamble;
