//! Decoding of string, bytes and number literal tokens into values.

use crate::{ast::expressions::Number, errors::errors::ErrorImpl};

/// Decoded string literal.
#[derive(Debug, Clone, PartialEq)]
pub enum StrValue {
    Text(String),
    Bytes(Vec<u8>),
}

/// Output buffer for one literal, text or bytes depending on its prefix.
enum Sink {
    Text(String),
    Bytes(Vec<u8>),
}

impl Sink {
    fn push_char(&mut self, c: char) {
        match self {
            Sink::Text(text) => text.push(c),
            Sink::Bytes(bytes) => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    fn push_code(&mut self, code: u32, sequence: &str) -> Result<(), ErrorImpl> {
        let invalid = || ErrorImpl::InvalidEscape {
            sequence: sequence.to_string(),
        };

        match self {
            Sink::Text(text) => text.push(char::from_u32(code).ok_or_else(invalid)?),
            Sink::Bytes(bytes) => bytes.push(u8::try_from(code).map_err(|_| invalid())?),
        }
        Ok(())
    }

    fn finish(self) -> StrValue {
        match self {
            Sink::Text(text) => StrValue::Text(text),
            Sink::Bytes(bytes) => StrValue::Bytes(bytes),
        }
    }
}

/// Decodes a string token, prefix and quotes included.
pub fn decode_string(token: &str) -> Result<StrValue, ErrorImpl> {
    let unterminated = || ErrorImpl::UnterminatedString;

    let quote_at = token.find(['"', '\'']).ok_or_else(unterminated)?;
    let (prefix, quoted) = token.split_at(quote_at);

    let sep = if quoted.len() >= 6 && (quoted.starts_with("\"\"\"") || quoted.starts_with("'''"))
    {
        &quoted[..3]
    } else {
        &quoted[..1]
    };
    if quoted.len() < sep.len() * 2 || !quoted.ends_with(sep) {
        return Err(unterminated());
    }
    let body = &quoted[sep.len()..quoted.len() - sep.len()];

    let is_bytes = prefix.contains(['b', 'B']);
    let is_raw = prefix.contains(['r', 'R']);

    if is_raw {
        return Ok(if is_bytes {
            StrValue::Bytes(body.as_bytes().to_vec())
        } else {
            StrValue::Text(body.to_string())
        });
    }

    let mut sink = if is_bytes {
        Sink::Bytes(Vec::with_capacity(body.len()))
    } else {
        Sink::Text(String::with_capacity(body.len()))
    };

    let chars: Vec<char> = body.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            sink.push_char(c);
            i += 1;
            continue;
        }

        let Some(&escape) = chars.get(i + 1) else {
            sink.push_char('\\');
            break;
        };

        match escape {
            '0'..='7' => {
                let digits: String = chars[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|c| ('0'..='7').contains(*c))
                    .collect();
                let sequence = format!("\\{}", digits);
                let code = u32::from_str_radix(&digits, 8).map_err(|_| ErrorImpl::InvalidEscape {
                    sequence: sequence.clone(),
                })?;
                sink.push_code(code, &sequence)?;
                i += 1 + digits.len();
            }
            'x' => {
                i = decode_hex_escape(&chars, i, 2, &mut sink)?;
            }
            'u' if !is_bytes => {
                i = decode_hex_escape(&chars, i, 4, &mut sink)?;
            }
            'U' if !is_bytes => {
                i = decode_hex_escape(&chars, i, 8, &mut sink)?;
            }
            '\n' => i += 2,
            _ => {
                let simple = match escape {
                    'a' => Some('\x07'),
                    'b' => Some('\x08'),
                    'f' => Some('\x0c'),
                    'n' => Some('\n'),
                    'r' => Some('\r'),
                    't' => Some('\t'),
                    'v' => Some('\x0b'),
                    '\\' | '\'' | '"' => Some(escape),
                    _ => None,
                };
                match simple {
                    Some(c) => sink.push_char(c),
                    None => {
                        sink.push_char('\\');
                        sink.push_char(escape);
                    }
                }
                i += 2;
            }
        }
    }

    Ok(sink.finish())
}

/// Decodes `\x`, `\u` or `\U` at `chars[start]` with exactly `width` hex digits.
/// Returns the index just past the escape.
fn decode_hex_escape(
    chars: &[char],
    start: usize,
    width: usize,
    sink: &mut Sink,
) -> Result<usize, ErrorImpl> {
    let end = (start + 2 + width).min(chars.len());
    let sequence: String = chars[start..end].iter().collect();
    let digits = &sequence[2..];

    if digits.len() != width || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ErrorImpl::InvalidEscape { sequence });
    }

    let code = u32::from_str_radix(digits, 16).map_err(|_| ErrorImpl::InvalidEscape {
        sequence: sequence.clone(),
    })?;
    sink.push_code(code, &sequence)?;
    Ok(start + 2 + width)
}

/// Decodes a number token: integers with radix prefixes, floats and imaginary literals.
/// Integers too large for `i128` are kept as decimal digits.
pub fn decode_number(token: &str) -> Result<Number, ErrorImpl> {
    let invalid = || ErrorImpl::NumberParseError {
        token: token.to_string(),
    };
    let lower = token.to_ascii_lowercase();

    let radix = match lower.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => 10,
    };
    if !underscores_between_digits(&lower, radix) {
        return Err(invalid());
    }
    let cleaned: String = lower.chars().filter(|c| *c != '_').collect();

    if radix != 10 {
        let digits = &cleaned[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        return Ok(match i128::from_str_radix(digits, radix) {
            Ok(value) => Number::Int(value),
            Err(_) => Number::BigInt(to_decimal(digits, radix)),
        });
    }

    if let Some(imag) = cleaned.strip_suffix('j') {
        return imag
            .parse::<f64>()
            .map(Number::Complex)
            .map_err(|_| invalid());
    }

    if cleaned.contains(['.', 'e']) {
        return cleaned
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| invalid());
    }

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.chars().any(|c| c != '0') {
        return Err(invalid());
    }

    Ok(match cleaned.parse::<i128>() {
        Ok(value) => Number::Int(value),
        Err(_) => Number::BigInt(cleaned),
    })
}

/// Every `_` must sit between two digits of `radix`, or directly after a radix prefix.
fn underscores_between_digits(token: &str, radix: u32) -> bool {
    let chars: Vec<char> = token.chars().collect();

    chars.iter().enumerate().all(|(i, c)| {
        if *c != '_' {
            return true;
        }
        let after_prefix = radix != 10 && i == 2;
        let before_ok = i > 0 && (after_prefix || chars[i - 1].is_digit(radix));
        let after_ok = chars.get(i + 1).is_some_and(|next| next.is_digit(radix));
        before_ok && after_ok
    })
}

/// Converts validated `digits` in `radix` to decimal text.
fn to_decimal(digits: &str, radix: u32) -> String {
    const LIMB: u64 = 1_000_000_000;
    // little-endian base 10^9 limbs
    let mut limbs: Vec<u64> = vec![0];

    for digit in digits.chars().filter_map(|c| c.to_digit(radix)) {
        let mut carry = u64::from(digit);
        for limb in limbs.iter_mut() {
            let value = *limb * u64::from(radix) + carry;
            *limb = value % LIMB;
            carry = value / LIMB;
        }
        while carry > 0 {
            limbs.push(carry % LIMB);
            carry /= LIMB;
        }
    }

    let mut out = String::new();
    let mut iter = limbs.iter().rev();
    if let Some(top) = iter.next() {
        out.push_str(&top.to_string());
    }
    for limb in iter {
        out.push_str(&format!("{:09}", limb));
    }
    out
}
