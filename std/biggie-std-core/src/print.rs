///
/// Print Runtime Functions
///
/// Two calling conventions, identical output:
///
/// - Checked: `println_checked!("{0} and {1}", "hi", 5)`. The format string
///   is validated against the arguments at compile time by `format_args!`.
///   This is the primary path.
/// - Unchecked: `biggie_println(format, args, count)` for generated C code.
///   `%s` reads a `Str` handle, `%d` an `i32`, `%%` a literal percent. The
///   argument array carries untyped pointers, so a directive/argument type
///   mismatch is undefined behavior.
///
/// Both append a newline and report the byte length of the formatted text,
/// not counting that newline.
///

use std::ffi::c_void;
use std::fmt;
use std::io::{self, Write};

use crate::error::{Result, RuntimeError};
use crate::types::Str;

/// Print with a compile-time checked format string, then a newline.
/// Evaluates to `Result<usize>`.
#[macro_export]
macro_rules! println_checked {
    ($($arg:tt)*) => {
        $crate::print::write_checked(::std::format_args!($($arg)*))
    };
}

/// Like `println_checked!`, writing to any `io::Write`
#[macro_export]
macro_rules! writeln_checked {
    ($out:expr, $($arg:tt)*) => {
        $crate::print::write_checked_to($out, ::std::format_args!($($arg)*))
    };
}

pub fn write_checked_to<W: Write>(out: &mut W, args: fmt::Arguments<'_>) -> Result<usize> {
    let mut text = fmt::format(args);
    let written = text.len();
    text.push('\n');
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(written)
}

pub fn write_checked(args: fmt::Arguments<'_>) -> Result<usize> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_checked_to(&mut lock, args).inspect_err(|e| {
        tracing::debug!(error = %e, "checked println failed");
    })
}

/// Expand a `%s`/`%d` format string, append a newline and write it out.
///
/// A directive with no argument left is emitted as written. Arguments past
/// the last directive are ignored. An unknown directive, or a lone `%` at
/// the end, prints nothing.
///
/// # Safety
/// `args` must point at `count` pointers. The pointer consumed by each `%s`
/// must reference a valid `Str`, and each `%d` a valid `i32`.
pub unsafe fn write_unchecked<W: Write>(
    out: &mut W,
    format: &[u8],
    args: *const *const c_void,
    count: usize,
) -> io::Result<usize> {
    let mut buf: Vec<u8> = Vec::with_capacity(format.len() + 1);
    let mut next = 0;
    let mut i = 0;

    while i < format.len() {
        let byte = format[i];
        if byte != b'%' {
            buf.push(byte);
            i += 1;
            continue;
        }

        let Some(&directive) = format.get(i + 1) else {
            tracing::warn!("dangling '%' at end of format string");
            break;
        };
        i += 2;

        match directive {
            b'%' => buf.push(b'%'),
            b's' | b'd' if next >= count || args.is_null() => {
                buf.push(b'%');
                buf.push(directive);
            }
            b's' => {
                let handle = unsafe { *args.add(next) } as *const Str<'_>;
                buf.extend_from_slice(unsafe { (*handle).as_bytes() });
                next += 1;
            }
            b'd' => {
                let value = unsafe { *(*args.add(next) as *const i32) };
                write!(buf, "{}", value)?;
                next += 1;
            }
            other => {
                tracing::warn!(directive = %(other as char), "unknown print directive");
            }
        }
    }

    let written = buf.len();
    buf.push(b'\n');
    out.write_all(&buf)?;
    out.flush()?;
    Ok(written)
}

/// `write_unchecked` to stdout
///
/// # Safety
/// Same contract as `write_unchecked`.
pub unsafe fn print_unchecked(
    format: &[u8],
    args: *const *const c_void,
    count: usize,
) -> Result<usize> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    unsafe { write_unchecked(&mut lock, format, args, count) }.map_err(|e| {
        tracing::debug!(error = %e, "println failed");
        RuntimeError::WriteFailure(e)
    })
}

/// `println` for generated code. Returns the number of bytes printed
/// before the newline, or -1 if the write failed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn biggie_println(
    format: Str<'_>,
    args: *const *const c_void,
    count: usize,
) -> i32 {
    let format = unsafe { format.as_bytes() };
    println_status(unsafe { print_unchecked(format, args, count) })
}

/// Map a print result onto the `printf`-style return value:
/// byte count (saturating at `i32::MAX`) or -1
pub fn println_status(result: Result<usize>) -> i32 {
    match result {
        Ok(written) => i32::try_from(written).unwrap_or(i32::MAX),
        Err(_) => -1,
    }
}
