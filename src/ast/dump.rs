//! Debug serializer producing `Kind(field=value, ...)` text.
//!
//! Scalars are written the way Python's `repr` would write them, so dumps can be
//! compared against fixtures produced by other tools.

use std::fmt::Write;

use super::{
    expressions::{Number, Singleton},
    fields::{FieldValue, NodeRef},
};

pub fn dump<'a>(node: impl Into<NodeRef<'a>>) -> String {
    let mut out = String::new();
    write_node(node.into(), &mut out);
    out
}

fn write_node(node: NodeRef<'_>, out: &mut String) {
    out.push_str(node.kind());
    out.push('(');
    for (index, (name, value)) in node.fields().iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push('=');
        write_value(value, out);
    }
    out.push(')');
}

fn write_value(value: &FieldValue<'_>, out: &mut String) {
    match value {
        FieldValue::Node(node) => write_node(*node, out),
        FieldValue::List(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_value(item, out);
            }
            out.push(']');
        }
        FieldValue::Identifier(text) | FieldValue::Str(text) => out.push_str(&repr_str(text)),
        FieldValue::Bytes(bytes) => out.push_str(&repr_bytes(bytes)),
        FieldValue::Number(number) => out.push_str(&repr_number(number)),
        FieldValue::Singleton(singleton) => out.push_str(match singleton {
            Singleton::None => "None",
            Singleton::True => "True",
            Singleton::False => "False",
        }),
        FieldValue::Int(value) => {
            let _ = write!(out, "{}", value);
        }
        FieldValue::None => out.push_str("None"),
    }
}

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

pub fn repr_str(text: &str) -> String {
    let quote = pick_quote(text.contains('\''), text.contains('"'));
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);

    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                let code = c as u32;
                let _ = if code < 0x100 {
                    write!(out, "\\x{:02x}", code)
                } else if code < 0x10000 {
                    write!(out, "\\u{:04x}", code)
                } else {
                    write!(out, "\\U{:08x}", code)
                };
            }
            c => out.push(c),
        }
    }

    out.push(quote);
    out
}

/// Mirrors Python's `str.isprintable` for assigned code points: controls, format
/// characters, separators other than space and private-use characters are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xE000..=0xF8FF
            | 0xFDD0..=0xFDEF
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0xFFFE..=0xFFFF
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
            | 0xF0000..=0x10FFFF
    )
}

pub fn repr_bytes(bytes: &[u8]) -> String {
    let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);

    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            byte if byte as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            byte => {
                let _ = write!(out, "\\x{:02x}", byte);
            }
        }
    }

    out.push(quote);
    out
}

pub fn repr_number(number: &Number) -> String {
    match number {
        Number::Int(value) => value.to_string(),
        Number::BigInt(digits) => digits.clone(),
        Number::Float(value) => repr_float(*value),
        Number::Complex(imag) => {
            let text = repr_float(*imag);
            let text = text.strip_suffix(".0").unwrap_or(&text);
            format!("{}j", text)
        }
    }
}

/// Shortest round-trip float text, switching to exponent form outside `1e-4..1e16`.
pub fn repr_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }

    let exponent = if value == 0.0 {
        0
    } else {
        value.abs().log10().floor() as i32
    };

    if (-4..16).contains(&exponent) {
        let text = format!("{:?}", value);
        if text.contains(['.', 'e']) {
            text
        } else {
            format!("{}.0", text)
        }
    } else {
        let text = format!("{:e}", value);
        match text.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => text,
        }
    }
}
