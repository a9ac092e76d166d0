///
/// Preamble Header Rendering
///
/// Generated code is compiled against a header that names the numeric
/// aliases, the `string` handle and the runtime's C ABI. Both dialects get
/// the same names and the same prototypes; only the spelling differs
/// (`typedef` vs `using`, and an `extern "C"` block for C++).
///

use biggie_std_core::error::{
    BIGGIE_ERR_CONFIG, BIGGIE_ERR_EMPTY_CONTAINER, BIGGIE_ERR_OUT_OF_RANGE,
    BIGGIE_ERR_WRITE_FAILURE, BIGGIE_OK,
};
use biggie_std_core::types::{by_width, NumericKind, NUMERIC_ALIASES, STRING_ALIAS};

use crate::config::{Dialect, RuntimeConfig};

const HEADER_GUARD: &str = "BIGGIE_RUNTIME_H";

/// C ABI prototypes, in terms of the canonical aliases
const PROTOTYPES: &[&str] = &[
    "BiggieArray* biggie_array_new(size_t capacity);",
    "BiggieArray* biggie_array_from(const i64* values, size_t len);",
    "BiggieArray* biggie_array_copy(const BiggieArray* src);",
    "BiggieArray* biggie_array_transfer(BiggieArray* src);",
    "void biggie_array_free(BiggieArray* arr);",
    "size_t biggie_array_len(const BiggieArray* arr);",
    "i64 biggie_array_get(const BiggieArray* arr, size_t index);",
    "i32 biggie_array_try_get(const BiggieArray* arr, size_t index, i64* out);",
    "size_t biggie_array_push(BiggieArray* arr, i64 value);",
    "i64 biggie_array_pop(BiggieArray* arr);",
    "i32 biggie_array_try_pop(BiggieArray* arr, i64* out);",
    "i64* biggie_array_data(BiggieArray* arr);",
    "i32 biggie_array_print(const BiggieArray* arr);",
    "size_t biggie_scope_enter(void);",
    "void biggie_defer(void (*action)(void*), void* context);",
    "void biggie_scope_exit(void);",
    "size_t biggie_scope_depth(void);",
    "i32 biggie_println(string format, const void* const* args, size_t count);",
];

fn alias_line(dialect: Dialect, name: &str, target: &str) -> String {
    match dialect {
        Dialect::C => format!("typedef {} {};\n", target, name),
        Dialect::Cpp => format!("using {} = {};\n", name, target),
    }
}

/// The numeric alias block, including `int`/`uint` and legacy names
pub fn render_aliases(config: &RuntimeConfig) -> String {
    let mut out = String::new();

    for alias in NUMERIC_ALIASES.iter() {
        out.push_str(&alias_line(config.dialect, alias.name, alias.c_type));
    }

    if config.legacy_aliases {
        for alias in NUMERIC_ALIASES.iter() {
            out.push_str(&alias_line(config.dialect, alias.legacy_name, alias.name));
        }
    }

    let bits = config.int_width.bits();
    if let Some(uint) = by_width(NumericKind::Unsigned, bits) {
        out.push_str(&alias_line(config.dialect, "uint", uint.name));
    }

    out
}

/// The `String` handle, its `string` alias and the `STR` literal macro
pub fn render_string_handle(dialect: Dialect) -> String {
    let mut out = String::new();
    match dialect {
        Dialect::C => {
            out.push_str("typedef struct String {\n  const char* data;\n  ptrdiff_t length;\n} String;\n");
            out.push_str(&alias_line(dialect, STRING_ALIAS, "String"));
            out.push_str("#define STR(str) ((String){str, sizeof(str) - 1})\n");
        }
        Dialect::Cpp => {
            out.push_str("struct String {\n  const char* data;\n  ptrdiff_t length;\n};\n");
            out.push_str(&alias_line(dialect, STRING_ALIAS, "String"));
            out.push_str("#define STR(str) (String{str, sizeof(str) - 1})\n");
        }
    }
    out
}

/// C++ only: the `defer` statement and a `println` front end over
/// `biggie_println`. Both are templates, so they live outside `extern "C"`.
///
/// `defer { ... };` binds a guard named `__defer_<line>` that runs the block
/// once when the enclosing scope ends. The guard cannot be copied, and the
/// reference binding relies on C++17 guaranteed copy elision.
pub fn render_cpp_defer() -> String {
    let mut out = String::new();
    out.push_str("#define BIGGIE_CONCAT_(a, b) a##b\n");
    out.push_str("#define CONCAT(a, b) BIGGIE_CONCAT_(a, b)\n\n");
    out.push_str(
        "template <typename F>\n\
         struct BiggieDeferGuard {\n\
         \x20 F func;\n\
         \x20 explicit BiggieDeferGuard(F func) : func(func) {}\n\
         \x20 ~BiggieDeferGuard() { func(); }\n\
         \x20 BiggieDeferGuard(const BiggieDeferGuard&) = delete;\n\
         \x20 BiggieDeferGuard& operator=(const BiggieDeferGuard&) = delete;\n\
         };\n\n",
    );
    out.push_str(
        "struct BiggieDeferCapture {\n\
         \x20 template <typename F>\n\
         \x20 BiggieDeferGuard<F> operator+(F func) { return BiggieDeferGuard<F>(func); }\n\
         };\n\n",
    );
    out.push_str("#define defer const auto& CONCAT(__defer_, __LINE__) = BiggieDeferCapture() + [&]()\n");
    out
}

/// C++ only: `println(STR("..."), args...)` accepting `string` and `i32`
/// arguments, rejected at compile time otherwise
pub fn render_cpp_println() -> String {
    String::from(
        "template <typename... Args>\n\
         inline i32 println(string format, const Args&... args) {\n\
         \x20 static_assert(((std::is_same<Args, String>::value || std::is_same<Args, i32>::value) && ...),\n\
         \x20               \"println arguments must be string or i32\");\n\
         \x20 const void* argv[sizeof...(Args) + 1] = {static_cast<const void*>(&args)..., nullptr};\n\
         \x20 return biggie_println(format, argv, sizeof...(Args));\n\
         }\n",
    )
}

pub fn render_preamble(config: &RuntimeConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("#ifndef {0}\n#define {0}\n\n", HEADER_GUARD));
    match config.dialect {
        Dialect::C => out.push_str("#include <stddef.h>\n#include <stdint.h>\n\n"),
        Dialect::Cpp => {
            out.push_str("#include <cstddef>\n#include <cstdint>\n#include <type_traits>\n\n");
        }
    }

    out.push_str(&render_aliases(config));
    out.push('\n');
    out.push_str(&render_string_handle(config.dialect));
    out.push('\n');

    for (name, code) in [
        ("BIGGIE_OK", BIGGIE_OK),
        ("BIGGIE_ERR_OUT_OF_RANGE", BIGGIE_ERR_OUT_OF_RANGE),
        ("BIGGIE_ERR_EMPTY_CONTAINER", BIGGIE_ERR_EMPTY_CONTAINER),
        ("BIGGIE_ERR_WRITE_FAILURE", BIGGIE_ERR_WRITE_FAILURE),
        ("BIGGIE_ERR_CONFIG", BIGGIE_ERR_CONFIG),
    ] {
        out.push_str(&format!("#define {} {}\n", name, code));
    }
    out.push('\n');

    if config.dialect == Dialect::Cpp {
        out.push_str("extern \"C\" {\n");
    }
    out.push_str("typedef struct BiggieArray BiggieArray;\n");
    for prototype in PROTOTYPES {
        out.push_str(prototype);
        out.push('\n');
    }
    if config.dialect == Dialect::Cpp {
        out.push_str("}\n\n");
        out.push_str(&render_cpp_defer());
        out.push('\n');
        out.push_str(&render_cpp_println());
    }

    // `int` is redefined last so the prototypes above keep their meaning.
    // C++ keeps its native `int`.
    if config.dialect == Dialect::C {
        if let Some(int) = by_width(NumericKind::Signed, config.int_width.bits()) {
            out.push_str(&format!("\n#define int {}\n", int.name));
        }
    }

    out.push_str(&format!("\n#endif // {}\n", HEADER_GUARD));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntWidth;

    #[test]
    fn test_c_aliases_use_typedef() {
        let aliases = render_aliases(&RuntimeConfig::for_dialect(Dialect::C));
        assert!(aliases.starts_with("typedef int8_t i8;\n"));
        assert!(aliases.contains("typedef double f64;\n"));
        assert!(aliases.ends_with("typedef u64 uint;\n"));
        assert!(!aliases.contains("int32;"));
    }

    #[test]
    fn test_cpp_aliases_use_using() {
        let aliases = render_aliases(&RuntimeConfig::for_dialect(Dialect::Cpp));
        assert!(aliases.contains("using i32 = int32_t;\n"));
        assert!(aliases.contains("using f32 = float;\n"));
        assert!(!aliases.contains("typedef"));
    }

    #[test]
    fn test_legacy_aliases() {
        let config = RuntimeConfig {
            legacy_aliases: true,
            ..RuntimeConfig::for_dialect(Dialect::C)
        };
        let aliases = render_aliases(&config);
        assert!(aliases.contains("typedef i32 int32;\n"));
        assert!(aliases.contains("typedef f64 float64;\n"));
    }

    #[test]
    fn test_int_width() {
        let config = RuntimeConfig {
            int_width: IntWidth::W32,
            ..RuntimeConfig::default()
        };
        let preamble = render_preamble(&config);
        assert!(preamble.contains("typedef u32 uint;\n"));
        assert!(preamble.contains("#define int i32\n"));

        let preamble = render_preamble(&RuntimeConfig::default());
        assert!(preamble.contains("#define int i64\n"));
    }

    #[test]
    fn test_c_preamble_structure() {
        let preamble = render_preamble(&RuntimeConfig::for_dialect(Dialect::C));
        assert!(preamble.starts_with("#ifndef BIGGIE_RUNTIME_H\n#define BIGGIE_RUNTIME_H\n"));
        assert!(preamble.trim_end().ends_with("#endif // BIGGIE_RUNTIME_H"));
        assert!(preamble.contains("typedef String string;\n"));
        assert!(preamble.contains("#define STR(str) ((String){str, sizeof(str) - 1})\n"));
        assert!(!preamble.contains("extern \"C\""));

        let define_int = preamble.find("#define int").unwrap();
        let last_prototype = preamble.find("biggie_println").unwrap();
        assert!(define_int > last_prototype);
    }

    #[test]
    fn test_cpp_preamble_structure() {
        let preamble = render_preamble(&RuntimeConfig::for_dialect(Dialect::Cpp));
        assert!(preamble.contains("#include <cstdint>\n"));
        assert!(preamble.contains("using string = String;\n"));
        assert!(preamble.contains("extern \"C\" {\n"));
        assert!(!preamble.contains("#define int"));
    }

    #[test]
    fn test_cpp_preamble_has_defer_guard() {
        let preamble = render_preamble(&RuntimeConfig::for_dialect(Dialect::Cpp));
        assert!(preamble.contains("struct BiggieDeferGuard {\n"));
        assert!(preamble.contains("  ~BiggieDeferGuard() { func(); }\n"));
        assert!(preamble.contains("  BiggieDeferGuard(const BiggieDeferGuard&) = delete;\n"));
        assert!(preamble.contains(
            "#define defer const auto& CONCAT(__defer_, __LINE__) = BiggieDeferCapture() + [&]()\n"
        ));

        // templates cannot have C linkage
        let extern_close = preamble.find("}\n\n#define BIGGIE_CONCAT_").unwrap();
        let guard = preamble.find("struct BiggieDeferGuard").unwrap();
        assert!(guard > extern_close);
        assert!(preamble.find("extern \"C\" {").unwrap() < extern_close);
    }

    #[test]
    fn test_cpp_preamble_has_typed_println() {
        let preamble = render_preamble(&RuntimeConfig::for_dialect(Dialect::Cpp));
        assert!(preamble.contains("#include <type_traits>\n"));
        assert!(preamble.contains("inline i32 println(string format, const Args&... args) {\n"));
        assert!(preamble.contains("\"println arguments must be string or i32\""));
        assert!(preamble.contains("  return biggie_println(format, argv, sizeof...(Args));\n"));
    }

    #[test]
    fn test_c_preamble_has_no_cpp_helpers() {
        let preamble = render_preamble(&RuntimeConfig::for_dialect(Dialect::C));
        assert!(!preamble.contains("BiggieDeferGuard"));
        assert!(!preamble.contains("#define defer"));
        assert!(!preamble.contains("template"));
    }

    #[test]
    fn test_every_prototype_in_both_dialects() {
        for dialect in [Dialect::C, Dialect::Cpp] {
            let preamble = render_preamble(&RuntimeConfig::for_dialect(dialect));
            for prototype in PROTOTYPES {
                assert!(preamble.contains(prototype), "{:?} missing {}", dialect, prototype);
            }
            assert!(preamble.contains("#define BIGGIE_ERR_EMPTY_CONTAINER 2\n"));
        }
    }
}
