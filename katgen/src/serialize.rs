//! C table rendering
//!
//! The table is a sequence of initializer rows meant to be `#include`d into
//! an array of `{ setting, expected, phrase }` structs. Each method's rows
//! are wrapped in a preprocessor guard so the consumer compiles only the
//! methods it was built with.

use crate::case::TestCase;
use crate::corpus::Corpus;
use std::fmt::Write;

/// Banner at the top of every generated table.
pub const TABLE_HEADER: &str = "/* Known-answer tests for passphrase hashes.  -*- mode: c -*-\n   \
Automatically generated by katgen.\n   \
Do not edit this file by hand.  */\n\n";

/// Escape `bytes` for the inside of a C string literal.
///
/// Printable ASCII passes through except for `\` and `"`; tab, newline and
/// carriage return get their short escapes; every other byte becomes
/// `\xNN`. C hex escapes are greedy, so when one is followed by a hex
/// digit the literal is split with `""`.
pub fn c_escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut after_hex_escape = false;
    for &b in bytes {
        let hex_follows = after_hex_escape && b.is_ascii_hexdigit();
        after_hex_escape = false;
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => {
                if hex_follows {
                    out.push_str("\"\"");
                }
                out.push(b as char);
            }
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
                after_hex_escape = true;
            }
        }
    }
    out
}

/// One initializer row, newline included. A case with no expected output
/// renders it as a null pointer.
pub fn render_case(case: &TestCase) -> String {
    let expected = match &case.expected {
        Some(hash) => format!("\"{}\"", c_escape(hash)),
        None => "0".to_string(),
    };
    format!(
        "  {{ \"{}\", {}, \"{}\" }},\n",
        c_escape(&case.setting),
        expected,
        c_escape(&case.phrase)
    )
}

/// The whole table: header, then one guarded block per method. Methods
/// with no cases get no block.
pub fn render_table(corpus: &Corpus) -> String {
    let mut out = String::from(TABLE_HEADER);
    let mut first = true;
    for group in corpus.groups().iter().filter(|g| !g.cases.is_empty()) {
        if !first {
            out.push('\n');
        }
        first = false;

        let _ = writeln!(
            out,
            "#if INCLUDE_{m} && defined TEST_{m}",
            m = group.method
        );
        for case in &group.cases {
            out.push_str(&render_case(case));
        }
        let _ = writeln!(out, "#endif // {}", group.method);
    }
    out
}
