// SPDX-License-Identifier: Apache-2.0
//! Recursive text rendering of a [`Value`] tree.
//!
//! The encoder is total over the closed value model: every variant has a
//! rendering and there is no error channel. Feeding it a non-finite float is
//! a programming error upstream and fails fast.

use crate::Value;

/// Renders a [`Value`] tree into the RON-like text grammar.
///
/// The indent unit is configurable; the default is a single tab. An empty
/// indent unit collapses all layout whitespace, producing the compact
/// single-line form used by golden tests:
///
/// ```
/// use scn_value::{TextEncoder, Value};
///
/// let v = Value::tuple([Value::from("A"), Value::from(1_i64)]);
/// assert_eq!(TextEncoder::compact().render(&v), "(\"A\",1)");
/// ```
#[derive(Clone, Debug)]
pub struct TextEncoder {
    indent_unit: String,
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self {
            indent_unit: "\t".to_owned(),
        }
    }
}

impl TextEncoder {
    /// Encoder with the default single-tab indent unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder that emits no layout whitespace at all.
    pub fn compact() -> Self {
        Self {
            indent_unit: String::new(),
        }
    }

    /// Encoder with a custom indent unit (e.g. four spaces).
    pub fn with_indent_unit(unit: impl Into<String>) -> Self {
        Self {
            indent_unit: unit.into(),
        }
    }

    /// Render `value` at indent level 0.
    pub fn render(&self, value: &Value) -> String {
        self.render_at(value, 0)
    }

    /// Render `value` as if nested `level` aggregates deep.
    ///
    /// Dispatch is purely structural; no state is carried between calls.
    pub fn render_at(&self, value: &Value, level: usize) -> String {
        match value {
            Value::String(s) => quote(s),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Bool(true) => "true".to_owned(),
            Value::Bool(false) => "false".to_owned(),
            Value::Tuple(values) => self.render_seq(values, level, '(', ')'),
            Value::List(values) => self.render_seq(values, level, '[', ']'),
            Value::Struct(fields) => self.render_struct(fields, level),
            Value::Map(entries) => self.render_map(entries, level),
            Value::Enum { variant, payload } => match payload {
                None => variant.clone(),
                Some(inner) => format!("{variant}{}", self.render_at(inner, level)),
            },
        }
    }

    /// Newline plus `level` indent units, or nothing in compact mode.
    fn brk(&self, level: usize) -> String {
        if self.indent_unit.is_empty() {
            String::new()
        } else {
            let mut s = String::with_capacity(1 + self.indent_unit.len() * level);
            s.push('\n');
            for _ in 0..level {
                s.push_str(&self.indent_unit);
            }
            s
        }
    }

    fn render_seq(&self, values: &[Value], level: usize, open: char, close: char) -> String {
        if values.is_empty() {
            return format!("{open}{close}");
        }
        let inner = self.brk(level + 1);
        let body: Vec<String> = values.iter().map(|v| self.render_at(v, level + 1)).collect();
        format!(
            "{open}{inner}{}{}{close}",
            body.join(&format!(",{inner}")),
            self.brk(level)
        )
    }

    fn render_struct(&self, fields: &[(String, Value)], level: usize) -> String {
        if fields.is_empty() {
            return "()".to_owned();
        }
        let inner = self.brk(level + 1);
        let body: Vec<String> = fields
            .iter()
            .map(|(name, v)| format!("{name}:{}", self.render_at(v, level + 1)))
            .collect();
        format!(
            "({inner}{}{})",
            body.join(&format!(",{inner}")),
            self.brk(level)
        )
    }

    fn render_map(&self, entries: &[(Value, Value)], level: usize) -> String {
        if entries.is_empty() {
            return "{}".to_owned();
        }
        let inner = self.brk(level + 1);
        let body: Vec<String> = entries
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}:{}",
                    self.render_at(k, level + 1),
                    self.render_at(v, level + 1)
                )
            })
            .collect();
        format!(
            "{{{inner}{}{}}}",
            body.join(&format!(",{inner}")),
            self.brk(level)
        )
    }
}

/// Double-quote and escape a string losslessly.
///
/// Escapes `"` and `\`, the common control characters by mnemonic, and any
/// remaining control character as `\u{XXXX}`, so `decode(encode(s)) == s`
/// holds for every string.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str("\\u{");
                out.push_str(&format!("{:x}", u32::from(c)));
                out.push('}');
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Canonical decimal rendering of a float: shortest round-trip form, with
/// `.0` appended when the shortest form carries no decimal point or
/// exponent, so floats stay distinguishable from integers in the document.
fn format_float(f: f64) -> String {
    assert!(f.is_finite(), "non-finite float in scene document");
    let mut s = format!("{f}");
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    s
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Inverse of `quote`, enough to verify lossless round-trips.
    fn unquote(encoded: &str) -> String {
        let body = encoded
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap();
        let mut out = String::new();
        let mut chars = body.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next().unwrap() {
                '"' => out.push('"'),
                '\\' => out.push('\\'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => {
                    let hex: String = chars
                        .by_ref()
                        .skip(1) // opening brace
                        .take_while(|c| *c != '}')
                        .collect();
                    let code = u32::from_str_radix(&hex, 16).unwrap();
                    out.push(char::from_u32(code).unwrap());
                }
                other => unreachable!("unexpected escape {other}"),
            }
        }
        out
    }

    // ── 1. scalar goldens ───────────────────────────────────────────────

    #[test]
    fn scalars_render_as_known_literals() {
        let enc = TextEncoder::compact();
        assert_eq!(enc.render(&Value::from("asdf")), "\"asdf\"");
        assert_eq!(enc.render(&Value::from(1234_i64)), "1234");
        assert_eq!(enc.render(&Value::from(12.34)), "12.34");
        assert_eq!(enc.render(&Value::from(-0.5)), "-0.5");
        assert_eq!(enc.render(&Value::from(true)), "true");
        assert_eq!(enc.render(&Value::from(false)), "false");
    }

    #[test]
    fn whole_floats_keep_a_decimal_point() {
        let enc = TextEncoder::compact();
        assert_eq!(enc.render(&Value::Float(0.0)), "0.0");
        assert_eq!(enc.render(&Value::Float(1.0)), "1.0");
        assert_eq!(enc.render(&Value::Float(-3.0)), "-3.0");
    }

    // ── 2. string escaping round-trips ──────────────────────────────────

    #[test]
    fn string_escaping_round_trips() {
        for s in [
            "",
            "plain",
            "'single quoted'",
            "with \"quotes\"",
            "back\\slash",
            "line\nbreak\tand\ttabs",
            "bell\u{7}char",
            "unicode ✓ κόσμος",
        ] {
            let encoded = TextEncoder::compact().render(&Value::from(s));
            assert_eq!(unquote(&encoded), s, "round-trip failed for {s:?}");
        }
    }

    // ── 3. aggregate goldens (compact) ──────────────────────────────────

    #[test]
    fn empty_aggregates_collapse() {
        let enc = TextEncoder::new();
        assert_eq!(enc.render(&Value::list([])), "[]");
        assert_eq!(enc.render(&Value::tuple([])), "()");
        assert_eq!(enc.render(&Value::Struct(vec![])), "()");
        assert_eq!(enc.render(&Value::Map(vec![])), "{}");
        // Emptiness wins regardless of nesting depth.
        assert_eq!(enc.render_at(&Value::list([]), 3), "[]");
    }

    #[test]
    fn list_and_tuple_compact() {
        let enc = TextEncoder::compact();
        let list = Value::list([Value::from("A"), Value::from("B"), Value::from(2_i64)]);
        assert_eq!(enc.render(&list), "[\"A\",\"B\",2]");
        let tuple = Value::tuple([Value::from("A"), Value::from("B"), Value::from(1_i64)]);
        assert_eq!(enc.render(&tuple), "(\"A\",\"B\",1)");
    }

    #[test]
    fn struct_keys_bare_map_keys_quoted() {
        let enc = TextEncoder::compact();
        let st = Value::structure([("asdf", Value::from("qwer"))]);
        assert_eq!(enc.render(&st), "(asdf:\"qwer\")");
        let st = Value::structure([(
            "asdf",
            Value::tuple([Value::from(1_i64), Value::from(2_i64)]),
        )]);
        assert_eq!(enc.render(&st), "(asdf:(1,2))");
        let map = Value::map([(Value::from("asdf"), Value::from("qwer"))]);
        assert_eq!(enc.render(&map), "{\"asdf\":\"qwer\"}");
    }

    // ── 4. enum variants ────────────────────────────────────────────────

    #[test]
    fn enum_variants() {
        let enc = TextEncoder::compact();
        assert_eq!(enc.render(&Value::variant("Click")), "Click");
        assert_eq!(enc.render(&Value::variant("None")), "None");
        let click = Value::variant_with(
            "Click",
            Value::tuple([Value::from(1_i64), Value::from(2_i64)]),
        );
        assert_eq!(enc.render(&click), "Click(1,2)");
        let some = Value::variant_with("Some", Value::tuple([Value::from("Value")]));
        assert_eq!(enc.render(&some), "Some(\"Value\")");
    }

    // ── 5. indented layout ──────────────────────────────────────────────

    #[test]
    fn tab_indented_nested_layout() {
        let enc = TextEncoder::new();
        let v = Value::structure([(
            "translation",
            Value::tuple([Value::Float(0.0), Value::Float(1.5)]),
        )]);
        assert_eq!(
            enc.render(&v),
            "(\n\ttranslation:(\n\t\t0.0,\n\t\t1.5\n\t)\n)"
        );
    }

    #[test]
    fn custom_indent_unit() {
        let enc = TextEncoder::with_indent_unit("  ");
        let v = Value::list([Value::from(1_i64)]);
        assert_eq!(enc.render(&v), "[\n  1\n]");
    }

    #[test]
    fn render_at_offsets_nesting() {
        let enc = TextEncoder::new();
        let v = Value::list([Value::from(1_i64)]);
        assert_eq!(enc.render_at(&v, 2), "[\n\t\t\t1\n\t\t]");
    }

    // ── 6. reflected sugar renders like the explicit map ────────────────

    #[test]
    fn reflected_renders_as_type_value_map() {
        let enc = TextEncoder::compact();
        let v = Value::reflected("glam::vec3::Vec3", Value::tuple([Value::Float(1.0)]));
        assert_eq!(enc.render(&v), "{\"type\":\"glam::vec3::Vec3\",\"value\":(1.0)}");
    }

    // ── 7. non-finite floats fail fast ──────────────────────────────────

    #[test]
    #[should_panic(expected = "non-finite")]
    fn nan_is_a_programming_error() {
        let _ = TextEncoder::compact().render(&Value::Float(f64::NAN));
    }
}
