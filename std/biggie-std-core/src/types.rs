//!
//! Numeric Alias Set and String Handle
//!
//! Generated code refers to fixed-width numeric types by short names
//! (`i32`, `u64`, `f32`, ...). The table here is the single source of those
//! names and their exact bit widths; the preamble renderer turns it into
//! typedefs for whichever dialect is selected.
//!
//! The C dialect historically spelled the names long-form (`int32`,
//! `float64`). Those survive as legacy aliases of the canonical names.
//!

use std::marker::PhantomData;

/// Kind of a numeric alias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Signed,
    Unsigned,
    Float,
}

/// One entry of the alias table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericAlias {
    pub name: &'static str,
    pub legacy_name: &'static str,
    pub c_type: &'static str,
    pub bits: u32,
    pub kind: NumericKind,
}

const fn alias(
    name: &'static str,
    legacy_name: &'static str,
    c_type: &'static str,
    bits: u32,
    kind: NumericKind,
) -> NumericAlias {
    NumericAlias { name, legacy_name, c_type, bits, kind }
}

/// Every fixed-width alias, in preamble order.
/// Floats map to `float`/`double`, never `float_t`/`double_t`.
pub const NUMERIC_ALIASES: [NumericAlias; 10] = [
    alias("i8", "int8", "int8_t", 8, NumericKind::Signed),
    alias("i16", "int16", "int16_t", 16, NumericKind::Signed),
    alias("i32", "int32", "int32_t", 32, NumericKind::Signed),
    alias("i64", "int64", "int64_t", 64, NumericKind::Signed),
    alias("u8", "uint8", "uint8_t", 8, NumericKind::Unsigned),
    alias("u16", "uint16", "uint16_t", 16, NumericKind::Unsigned),
    alias("u32", "uint32", "uint32_t", 32, NumericKind::Unsigned),
    alias("u64", "uint64", "uint64_t", 64, NumericKind::Unsigned),
    alias("f32", "float32", "float", 32, NumericKind::Float),
    alias("f64", "float64", "double", 64, NumericKind::Float),
];

/// Name generated code uses for the string handle
pub const STRING_ALIAS: &str = "string";

/// Resolve a canonical or legacy alias name
pub fn lookup(name: &str) -> Option<&'static NumericAlias> {
    NUMERIC_ALIASES
        .iter()
        .find(|a| a.name == name || a.legacy_name == name)
}

/// Resolve the alias of a given kind and width (used for `int`/`uint`)
pub fn by_width(kind: NumericKind, bits: u32) -> Option<&'static NumericAlias> {
    NUMERIC_ALIASES
        .iter()
        .find(|a| a.kind == kind && a.bits == bits)
}

/// String handle shared with generated code: pointer plus byte length.
/// The bytes are not owned and need not be NUL-terminated.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Str<'a> {
    pub data: *const u8,
    pub length: isize,
    _marker: PhantomData<&'a [u8]>,
}

impl Str<'static> {
    /// Handle over a string literal, the `STR("...")` form
    pub const fn lit(s: &'static str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl<'a> Str<'a> {
    pub const fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            data: bytes.as_ptr(),
            length: bytes.len() as isize,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        if self.length < 0 { 0 } else { self.length as usize }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the handle's bytes.
    ///
    /// # Safety
    /// `data` must point at `length` readable bytes for the lifetime `'a`.
    /// Handles built through `lit`/`from_bytes` always satisfy this.
    pub unsafe fn as_bytes(&self) -> &'a [u8] {
        if self.data.is_null() || self.length <= 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.data, self.length as usize) }
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(s: &'a str) -> Self {
        Str::from_bytes(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_widths_match_rust_primitives() {
        let width = |name: &str| lookup(name).unwrap().bits as usize;
        assert_eq!(width("i8"), 8 * std::mem::size_of::<i8>());
        assert_eq!(width("i16"), 8 * std::mem::size_of::<i16>());
        assert_eq!(width("i32"), 8 * std::mem::size_of::<i32>());
        assert_eq!(width("i64"), 8 * std::mem::size_of::<i64>());
        assert_eq!(width("u8"), 8 * std::mem::size_of::<u8>());
        assert_eq!(width("u16"), 8 * std::mem::size_of::<u16>());
        assert_eq!(width("u32"), 8 * std::mem::size_of::<u32>());
        assert_eq!(width("u64"), 8 * std::mem::size_of::<u64>());
        assert_eq!(width("f32"), 8 * std::mem::size_of::<f32>());
        assert_eq!(width("f64"), 8 * std::mem::size_of::<f64>());
    }

    #[test]
    fn test_lookup_legacy_names() {
        assert_eq!(lookup("float64").unwrap().name, "f64");
        assert_eq!(lookup("uint16").unwrap().name, "u16");
        assert!(lookup("int128").is_none());
    }

    #[test]
    fn test_by_width() {
        assert_eq!(by_width(NumericKind::Signed, 64).unwrap().name, "i64");
        assert_eq!(by_width(NumericKind::Unsigned, 32).unwrap().name, "u32");
        assert!(by_width(NumericKind::Signed, 128).is_none());
    }

    #[test]
    fn test_str_handle() {
        let s = Str::lit("hello");
        assert_eq!(s.len(), 5);
        assert_eq!(unsafe { s.as_bytes() }, b"hello");

        let empty = Str::from("");
        assert!(empty.is_empty());
        assert_eq!(unsafe { empty.as_bytes() }, b"");
    }
}
