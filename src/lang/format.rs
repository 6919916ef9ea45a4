//! Template formatting
//!
//! Two pure string transforms are applied to a definition before it is shown
//! to players:
//!
//! 1. **Substitution**: `{0}`, `{1}`, ... are replaced by the positional
//!    arguments in a single pass. Substituted text is never rescanned, and a
//!    placeholder without a matching argument is left as-is.
//! 2. **Colour translation**: `&` followed by a colour or format code is
//!    rewritten to the host's native `§` sequence. Any other `&` is kept.

use std::fmt::{Display, Write as _};

/// Native colour escape understood by the host chat renderer
pub const COLOUR_CHAR: char = '§';

/// Escape used in templates in place of [`COLOUR_CHAR`]
pub const ALT_COLOUR_CHAR: char = '&';

const COLOUR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Replace positional placeholders in `template` with `args`
///
/// Unlike chained `str::replace` calls, an argument that itself contains
/// `{1}` is inserted literally and is not substituted again, so the result
/// does not depend on argument order.
pub fn substitute(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match placeholder(after) {
            Some((index, len)) if index < args.len() => {
                // writing into a String cannot fail
                let _ = write!(result, "{}", args[index]);
                rest = &after[len + 1..];
            }
            _ => {
                result.push('{');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Parse `<digits>}` at the start of `s`, returning the index and digit count
fn placeholder(s: &str) -> Option<(usize, usize)> {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 || s.as_bytes().get(len) != Some(&b'}') {
        return None;
    }
    // `{01}` is not the same placeholder as `{1}`
    if len > 1 && s.starts_with('0') {
        return None;
    }
    s[..len].parse().ok().map(|index| (index, len))
}

/// Translate `&`-prefixed colour codes into native colour sequences
pub fn coloured(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ALT_COLOUR_CHAR {
            if let Some(&code) = chars.peek() {
                if is_colour_code(code) {
                    result.push(COLOUR_CHAR);
                    result.push(code.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// Remove native colour sequences, e.g. for console output
pub fn strip_colour(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == COLOUR_CHAR && chars.peek().copied().is_some_and(is_colour_code) {
            chars.next();
            continue;
        }
        result.push(c);
    }

    result
}

/// Whether `c` names a colour or format code
pub fn is_colour_code(c: char) -> bool {
    COLOUR_CODES.contains(c)
}

/// Adapt an optional argument so that `None` substitutes as an empty string
pub fn or_blank<T: Display>(value: &Option<T>) -> &dyn Display {
    match value {
        Some(v) => v,
        None => &"",
    }
}
