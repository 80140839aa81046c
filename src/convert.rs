//! Query and body conversion shared by every rule.
//!
//! Query strings become `es.<Api>.With<Name>(<value>),` argument lines and
//! JSON bodies become `strings.NewReader(...)` literals indented to sit
//! inside a generated call.

use crate::error::{Result, TranslateError};
use crate::naming::name_to_go;
use percent_encoding::percent_decode_str;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;

/// Parsed query parameters, keyed by wire name.
///
/// A `BTreeMap` so that iteration is always in ascending key order.
pub type Params = BTreeMap<String, Vec<String>>;

/// Parameters whose API type is numeric; rendered without quotes.
const NUMERIC_PARAMS: &[&str] = &["from", "size", "terminate_after", "version"];

/// The query parameter rendered as a `time.Duration`.
pub(crate) const DURATION_PARAM: &str = "timeout";

/// Indentation of one argument inside a multi-line generated call.
pub(crate) const ARG_INDENT: &str = "\t\t";

/// Indentation prepended to every continuation line of a body literal.
const BODY_PREFIX: &str = ARG_INDENT;

/// One nesting level inside a body literal.
const BODY_INDENT: &str = "  ";

/// Parse a query string into parameters.
///
/// A leading `/` and `?` are ignored, so the raw `params` capture of a rule
/// can be passed directly.
pub fn query_to_params(input: &str) -> Result<Params> {
    let query = input.strip_prefix('/').unwrap_or(input);
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut params = Params::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        if pair.contains(';') {
            return Err(query_error(input, "invalid semicolon separator in query"));
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = unescape(input, key)?;
        let value = unescape(input, value)?;
        params.entry(key).or_default().push(value);
    }
    Ok(params)
}

/// Decode one query component: `+` is a space, `%XX` a byte.
fn unescape(query: &str, component: &str) -> Result<String> {
    let bytes = component.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(component.len());
                let escape = component.get(i..end).unwrap_or("%");
                return Err(query_error(query, &format!("invalid URL escape {escape:?}")));
            }
        }
    }
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| query_error(query, &e.to_string()))
}

fn query_error(query: &str, reason: &str) -> TranslateError {
    TranslateError::QueryParse {
        query: query.to_string(),
        reason: reason.to_string(),
    }
}

/// Render parameters as argument lines for `api` (e.g. `Search`, `Indices.Create`).
///
/// Output is one `\t\tes.<api>.With<Name>(<value>),\n` line per key, in key order.
pub fn params_to_arguments(api: &str, params: &Params) -> Result<String> {
    let mut out = String::new();

    for (key, values) in params {
        let joined = values.join(",");
        let name = match key.as_str() {
            "q" => "Query".to_string(),
            _ => name_to_go(key),
        };
        let value = if key == DURATION_PARAM {
            let first = values.first().map(String::as_str).unwrap_or_default();
            format!("time.Duration({})", parse_duration(first)?)
        } else if NUMERIC_PARAMS.contains(&key.as_str()) {
            joined
        } else {
            go_quote(&joined)
        };
        out.push_str(&format!("{ARG_INDENT}es.{api}.With{name}({value}),\n"));
    }

    Ok(out)
}

/// Re-indent a JSON body and wrap it in `strings.NewReader`.
///
/// The body is validated first; only whitespace outside string literals
/// changes, so keys, escapes and number text stay exactly as written.
pub fn body_to_reader(input: &str) -> Result<String> {
    serde_json::from_str::<IgnoredAny>(input)?;
    let indented = indent_json(input.trim());
    Ok(format!("strings.NewReader(`{indented}`)"))
}

/// Lay out valid JSON one member per line, `BODY_INDENT` per level.
///
/// Empty objects and arrays stay on one line as `{}` and `[]`.
fn indent_json(src: &str) -> String {
    let mut out = String::with_capacity(src.len() * 2);
    let mut depth = 0usize;
    let mut open = false;
    let mut in_string = false;
    let mut escaped = false;

    let newline = |out: &mut String, depth: usize| {
        out.push('\n');
        out.push_str(BODY_PREFIX);
        out.push_str(&BODY_INDENT.repeat(depth));
    };

    for ch in src.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if matches!(ch, ' ' | '\t' | '\n' | '\r') {
            continue;
        }

        // First member of a non-empty container goes on its own line
        if open && ch != '}' && ch != ']' {
            open = false;
            depth += 1;
            newline(&mut out, depth);
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '{' | '[' => {
                out.push(ch);
                open = true;
            }
            ',' => {
                out.push(ch);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            '}' | ']' => {
                if open {
                    open = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, depth);
                }
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Quote a string as a Go interpreted string literal.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Nanoseconds per duration unit.
fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

/// Parse a duration such as `5s`, `1m30s`, `1.5h` or `-250ms` into nanoseconds.
///
/// Accepts the same grammar as Go's `time.ParseDuration`.
pub fn parse_duration(input: &str) -> Result<i64> {
    let fail = |reason: &str| TranslateError::DurationParse {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(fail("invalid duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_frac) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(fail("invalid duration"));
        }

        let unit_len = after_frac
            .char_indices()
            .find(|&(_, c)| c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(after_frac.len());
        let (unit, tail) = after_frac.split_at(unit_len);
        if unit.is_empty() {
            return Err(fail("missing unit in duration"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| fail(&format!("unknown unit {unit:?} in duration")))?;

        let int_value: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| fail("invalid duration"))?
        };
        let mut amount = int_value.checked_mul(scale).ok_or_else(|| fail("invalid duration"))?;

        // Fractions beyond nanosecond precision are truncated.
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        if !frac_digits.is_empty() {
            let frac_value: u128 = frac_digits.parse().map_err(|_| fail("invalid duration"))?;
            amount += frac_value * scale / 10u128.pow(frac_digits.len() as u32);
        }

        total = total.checked_add(amount).ok_or_else(|| fail("invalid duration"))?;
        if total > i64::MAX as u128 {
            return Err(fail("invalid duration"));
        }
        rest = tail;
    }

    let total = total as i64;
    Ok(if negative { -total } else { total })
}
