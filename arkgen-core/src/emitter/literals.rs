use std::fmt::Write as _;
use std::io::Write;

use super::Emitter;

impl<W: Write> Emitter<W> {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_rune_literal(&mut self, value: char) {
        self.write("'");
        self.write(&escape(value.encode_utf8(&mut [0u8; 4])));
        self.write("'");
    }

    pub(super) fn emit_integer_literal(&mut self, value: u64) {
        self.write(&value.to_string());
    }

    pub(super) fn emit_floating_literal(&mut self, value: f64) {
        self.write(&format_floating(value));
    }

    pub(super) fn emit_string_literal(&mut self, value: &str) {
        self.write("\"");
        self.write(&escape(value));
        self.write("\"");
    }
}

/// Escape quotes, backslashes and control characters for use inside a
/// rune or string literal.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Fixed-point with the shortest digits that read back as the same value.
fn format_floating(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // `Display` for f64 never switches to exponent notation.
    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;
    use crate::ast::{Expr, Node};

    fn literal(expr: Expr) -> String {
        render(&Node::Expr(expr))
    }

    #[test]
    fn escapes_quotes_in_strings() {
        assert_eq!(
            literal(Expr::String("say \"hi\"\n".into())),
            r#""say \"hi\"\n""#
        );
    }

    #[test]
    fn escapes_rune_quote_and_backslash() {
        assert_eq!(literal(Expr::Rune('\'')), r"'\''");
        assert_eq!(literal(Expr::Rune('\\')), r"'\\'");
        assert_eq!(literal(Expr::Rune('a')), "'a'");
        assert_eq!(literal(Expr::Rune('\u{7}')), r"'\x07'");
    }

    #[test]
    fn leaves_printable_unicode_alone() {
        assert_eq!(escape("héllo ✓"), "héllo ✓");
        assert_eq!(escape("\u{85}"), r"\u{85}");
    }

    #[test]
    fn integers_render_without_grouping() {
        assert_eq!(literal(Expr::Integer(1_000_000)), "1000000");
        assert_eq!(literal(Expr::Integer(u64::MAX)), "18446744073709551615");
    }

    #[test]
    fn floats_render_fixed_point() {
        assert_eq!(literal(Expr::Floating(1.5)), "1.5");
        assert_eq!(literal(Expr::Floating(2.0)), "2.0");
        assert_eq!(literal(Expr::Floating(1e21)), "1000000000000000000000.0");
        assert_eq!(literal(Expr::Floating(0.000123)), "0.000123");
    }

    #[test]
    fn floats_read_back_to_the_same_value() {
        for value in [0.1, 3.141592653589793, 1e-7, 123456.789, f64::MAX] {
            let text = format_floating(value);
            assert!(!text.contains('e'), "{text}");
            assert_eq!(text.parse::<f64>().expect("parse"), value);
        }
    }

    #[test]
    fn non_finite_floats_have_names() {
        assert_eq!(format_floating(f64::NAN), "nan");
        assert_eq!(format_floating(f64::NEG_INFINITY), "-inf");
    }
}
