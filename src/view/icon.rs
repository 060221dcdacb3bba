//! File name to icon class lookup.

/// Class used when the extension is unknown or absent.
pub const DEFAULT_ICON_CLASS: &str = "noicon devicon-bash-plain";

/// Icon class list for a file name, keyed on everything after the first `.`.
///
/// # Example
///
/// ```
/// use editor_session::view::{icon_class_for_filename, DEFAULT_ICON_CLASS};
///
/// assert_eq!(icon_class_for_filename("main.rs"), "icon devicon-rust-original");
/// assert_eq!(icon_class_for_filename("Makefile"), DEFAULT_ICON_CLASS);
/// ```
pub fn icon_class_for_filename(name: &str) -> &'static str {
    let Some((_, ext)) = name.split_once('.') else {
        return DEFAULT_ICON_CLASS;
    };
    match ext {
        "sh" => "icon devicon-bash-plain",
        "c" | "h" => "icon devicon-c-plain colored",
        "cpp" | "cc" | "cxx" | "hh" | "hpp" | "hxx" => "icon devicon-cplusplus-plain colored",
        "rs" => "icon devicon-rust-original",
        "go" => "icon devicon-go-original-wordmark colored",
        "cs" | "csx" => "icon devicon-csharp-plain colored",
        "dart" => "icon devicon-dart-plain colored",
        "lua" => "icon devicon-lua-plain colored",
        "ts" | "tsx" => "icon devicon-typescript-plain colored",
        "js" | "mjs" | "cjs" => "icon devicon-javascript-plain colored",
        "wasm" | "wat" => "icon devicon-wasm-original colored",
        "zig" => "icon devicon-zig-original colored",
        "ex" | "exs" => "icon devicon-elixir-plain colored",
        "java" | "class" => "icon devicon-java-plain colored",
        "kt" | "kts" => "icon devicon-kotlin-plain colored",
        "php" => "icon devicon-php-plain colored",
        "py" | "pyw" => "icon devicon-python-plain colored",
        "rb" | "rake" | "gemspec" => "icon devicon-ruby-plain colored",
        "swift" => "icon devicon-swift-plain colored",
        "hs" => "icon devicon-haskell-plain colored",
        "ml" | "mli" => "icon devicon-ocaml-plain colored",
        _ => DEFAULT_ICON_CLASS,
    }
}
