//! Token utilities for path segments and the refinements mini-grammar.
//!
//! Path segments are percent-encoded with spaces shown as `-`; literal hyphens
//! are escaped as `%2D` so they never collide with word separators. The dot
//! segments `.` and `..` carry a trailing `~` so URL normalisation leaves them
//! alone; a literal `~` is always written as `%7E`.
//!
//! Refinements that cannot live in the path are written to a single query
//! value as `field:value` or `field:low..high` entries joined by `,`. Literal
//! separators inside fields and values are escaped with a backslash, and a
//! literal backslash is doubled.

use crate::error::{BeautifierError, Result};

/// Separators of the refinements mini-grammar, longest first.
pub const SEPARATORS: [&str; 3] = ["..", ",", ":"];

/// Separator between array entries.
pub const ENTRY_SEPARATOR: &str = ",";
/// Separator between a field and its value.
pub const PAIR_SEPARATOR: &str = ":";
/// Separator between the bounds of a range.
pub const RANGE_SEPARATOR: &str = "..";

const ESCAPE: char = '\\';
const ESCAPED_ESCAPE: &str = "\\\\";
const HYPHEN_ESCAPE: &str = "%2D";
const DOT_SEGMENT_MARKER: char = '~';
const MARKER_ESCAPE: &str = "%7E";

/// The value half of a `field:value` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    /// A discrete value.
    Scalar(String),
    /// A numeric `low..high` range.
    Range(f64, f64),
}

/// Encode a path segment.
///
/// # Examples
///
/// ```
/// use url_beautifier::encode_chars;
///
/// assert_eq!(encode_chars("red shoes"), "red-shoes");
/// assert_eq!(encode_chars("t-shirt"), "t%2Dshirt");
/// assert_eq!(encode_chars("a/b"), "a%2Fb");
/// assert_eq!(encode_chars(".."), "..~");
/// ```
pub fn encode_chars(input: &str) -> String {
    if is_dot_segment(input) {
        return format!("{}{}", input, DOT_SEGMENT_MARKER);
    }

    urlencoding::encode(input)
        .replace('-', HYPHEN_ESCAPE)
        .replace(DOT_SEGMENT_MARKER, MARKER_ESCAPE)
        .replace("%20", "-")
}

/// Decode a path segment produced by [`encode_chars`].
///
/// # Examples
///
/// ```
/// use url_beautifier::decode_chars;
///
/// assert_eq!(decode_chars("red-shoes").unwrap(), "red shoes");
/// assert_eq!(decode_chars("t%2Dshirt").unwrap(), "t-shirt");
/// assert_eq!(decode_chars(".~").unwrap(), ".");
/// ```
pub fn decode_chars(input: &str) -> Result<String> {
    if let Some(dots) = input
        .strip_suffix(DOT_SEGMENT_MARKER)
        .filter(|dots| is_dot_segment(dots))
    {
        return Ok(dots.to_string());
    }

    let unescaped = input.replace('-', " ").replace(HYPHEN_ESCAPE, "-");
    Ok(urlencoding::decode(&unescaped)?.into_owned())
}

/// Segments that URL normalisation removes or resolves.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Split `input` on `separator`, except where the separator is preceded by a
/// backslash.
///
/// An escaped separator is kept literally (without its backslash) in the
/// current token. Any other escape, including a doubled backslash, is copied
/// through untouched together with the character it escapes, so it survives
/// for a later split.
///
/// ```
/// use url_beautifier::split_except_escaped;
///
/// assert_eq!(split_except_escaped(r"a,b\,c", ","), vec!["a", "b,c"]);
/// assert_eq!(split_except_escaped(r"1..2", ".."), vec!["1", "2"]);
/// assert_eq!(split_except_escaped(r"a\:b,c", ","), vec![r"a\:b", "c"]);
/// assert_eq!(split_except_escaped(r"a\\,b", ","), vec![r"a\\", "b"]);
/// ```
pub fn split_except_escaped(input: &str, separator: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if c == ESCAPE {
            let escaped = &rest[ESCAPE.len_utf8()..];
            if !separator.is_empty() && escaped.starts_with(separator) {
                current.push_str(separator);
                rest = &escaped[separator.len()..];
            } else {
                let width = ESCAPE.len_utf8() + escaped.chars().next().map_or(0, char::len_utf8);
                current.push_str(&rest[..width]);
                rest = &rest[width..];
            }
        } else if !separator.is_empty() && rest.starts_with(separator) {
            tokens.push(std::mem::take(&mut current));
            rest = &rest[separator.len()..];
        } else {
            current.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    tokens.push(current);

    tokens
}

/// Remove the escapes of a single separator.
pub fn unescape(input: &str, separator: &str) -> String {
    split_except_escaped(input, separator).join(separator)
}

/// Remove every separator escape, then undouble literal backslashes.
fn unescape_all(input: &str) -> String {
    SEPARATORS
        .iter()
        .fold(input.to_string(), |text, separator| unescape(&text, separator))
        .replace(ESCAPED_ESCAPE, &ESCAPE.to_string())
}

/// Backslash-escape every literal `..`, `,` and `:` in `input`, after
/// doubling any literal backslash.
///
/// ```
/// use url_beautifier::escape_separators;
///
/// assert_eq!(escape_separators("a:b,c..d"), r"a\:b\,c\..d");
/// assert_eq!(escape_separators(r"x\"), r"x\\");
/// ```
pub fn escape_separators(input: &str) -> String {
    let doubled = input.replace(ESCAPE, ESCAPED_ESCAPE);
    SEPARATORS.iter().fold(doubled, |escaped, separator| {
        escaped.replace(separator, &format!("{}{}", ESCAPE, separator))
    })
}

/// Render a single `field:value` pair.
pub fn encode_pair(field: &str, value: &str) -> String {
    format!(
        "{}{}{}",
        escape_separators(field),
        PAIR_SEPARATOR,
        escape_separators(value)
    )
}

/// Parse a single `field:value` pair.
pub fn decode_pair(input: &str) -> Result<(String, String)> {
    let parts = split_except_escaped(input, PAIR_SEPARATOR);
    match parts.as_slice() {
        [field, value] => Ok((unescape_all(field), unescape_all(value))),
        _ => Err(BeautifierError::MalformedRefinement(input.to_string())),
    }
}

/// Render refinement entries for the refinements query parameter.
///
/// ```
/// use url_beautifier::{encode_array, ArrayValue};
///
/// let encoded = encode_array(&[
///     ("brand".to_string(), ArrayValue::Scalar("Nike".to_string())),
///     ("price".to_string(), ArrayValue::Range(20.0, 40.0)),
/// ]);
/// assert_eq!(encoded, "brand:Nike,price:20..40");
/// ```
pub fn encode_array(entries: &[(String, ArrayValue)]) -> String {
    entries
        .iter()
        .map(|(field, value)| match value {
            ArrayValue::Scalar(value) => encode_pair(field, value),
            ArrayValue::Range(low, high) => format!(
                "{}{}{}{}{}",
                escape_separators(field),
                PAIR_SEPARATOR,
                low,
                RANGE_SEPARATOR,
                high
            ),
        })
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Parse the refinements query parameter back into entries.
pub fn decode_array(input: &str) -> Result<Vec<(String, ArrayValue)>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    split_except_escaped(input, ENTRY_SEPARATOR)
        .iter()
        .map(|entry| decode_entry(entry))
        .collect()
}

fn decode_entry(entry: &str) -> Result<(String, ArrayValue)> {
    let parts = split_except_escaped(entry, PAIR_SEPARATOR);
    let [field, rest] = parts.as_slice() else {
        return Err(BeautifierError::MalformedRefinement(entry.to_string()));
    };

    let bounds = split_except_escaped(rest, RANGE_SEPARATOR);
    let value = match bounds.as_slice() {
        [low, high] => ArrayValue::Range(parse_bound(low)?, parse_bound(high)?),
        _ => ArrayValue::Scalar(unescape_all(rest)),
    };

    Ok((unescape_all(field), value))
}

fn parse_bound(bound: &str) -> Result<f64> {
    bound
        .trim()
        .parse::<f64>()
        .map_err(|_| BeautifierError::InvalidRange(bound.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_chars_spaces_and_hyphens() {
        assert_eq!(encode_chars("shoe"), "shoe");
        assert_eq!(encode_chars("running shoes"), "running-shoes");
        assert_eq!(encode_chars("x-ray vision"), "x%2Dray-vision");
        assert_eq!(encode_chars("50%"), "50%25");
    }

    #[test]
    fn test_dot_segments_are_marked() {
        assert_eq!(encode_chars("."), ".~");
        assert_eq!(encode_chars(".."), "..~");
        assert_eq!(encode_chars("..."), "...");
        assert_eq!(encode_chars("a~b"), "a%7Eb");
        assert_eq!(encode_chars("..~"), "..%7E");

        for input in [".", "..", "...", "~", "..~", ".~."] {
            assert_eq!(decode_chars(&encode_chars(input)).unwrap(), input);
        }
        assert_eq!(decode_chars("a~").unwrap(), "a~");
    }

    #[test]
    fn test_decode_chars_inverts_encode() {
        for input in ["running shoes", "x-ray vision", "a - b", "100% cotton", "café", "%2D"] {
            assert_eq!(decode_chars(&encode_chars(input)).unwrap(), input);
        }
    }

    #[test]
    fn test_decode_chars_invalid_utf8() {
        assert!(matches!(
            decode_chars("%FF%FE"),
            Err(BeautifierError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_split_multi_char_separator() {
        assert_eq!(split_except_escaped("a..b..c", ".."), vec!["a", "b", "c"]);
        assert_eq!(split_except_escaped(r"a\..b..c", ".."), vec!["a..b", "c"]);
        assert_eq!(split_except_escaped("...", ".."), vec!["", "."]);
    }

    #[test]
    fn test_split_keeps_other_escapes() {
        assert_eq!(split_except_escaped(r"a\b", ","), vec![r"a\b"]);
        assert_eq!(split_except_escaped(r"a\\,b", ","), vec![r"a\\", "b"]);
        assert_eq!(split_except_escaped(r"a\\\,b", ","), vec![r"a\\,b"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_except_escaped("", ","), vec![""]);
        assert_eq!(split_except_escaped(",", ","), vec!["", ""]);
    }

    #[test]
    fn test_escape_longest_separator_first() {
        assert_eq!(escape_separators("..."), r"\...");
        assert_eq!(escape_separators("1..2"), r"1\..2");
        assert_eq!(escape_separators("plain"), "plain");
        assert_eq!(escape_separators(r"a\,"), r"a\\\,");
    }

    #[test]
    fn test_trailing_backslash_round_trip() {
        let entries = vec![
            ("a".to_string(), ArrayValue::Scalar(r"x\".to_string())),
            ("b".to_string(), ArrayValue::Scalar("y".to_string())),
            (r"c\".to_string(), ArrayValue::Range(1.0, 2.0)),
        ];
        let encoded = encode_array(&entries);
        assert_eq!(encoded, r"a:x\\,b:y,c\\:1..2");
        assert_eq!(decode_array(&encoded).unwrap(), entries);
    }

    #[test]
    fn test_decode_array_ranges_and_scalars() {
        let decoded = decode_array("brand:Nike,price:20..40.5").unwrap();
        assert_eq!(
            decoded,
            vec![
                ("brand".to_string(), ArrayValue::Scalar("Nike".to_string())),
                ("price".to_string(), ArrayValue::Range(20.0, 40.5)),
            ]
        );
        assert!(decode_array("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_array_escaped_separators() {
        let entries = vec![
            ("size..range".to_string(), ArrayValue::Scalar("a:b,c..d".to_string())),
            ("ratio".to_string(), ArrayValue::Scalar("1..2".to_string())),
        ];
        assert_eq!(decode_array(&encode_array(&entries)).unwrap(), entries);
    }

    #[test]
    fn test_decode_array_errors() {
        assert!(matches!(
            decode_array("brand"),
            Err(BeautifierError::MalformedRefinement(_))
        ));
        assert!(matches!(
            decode_array("price:cheap..dear"),
            Err(BeautifierError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_pair_round_trip() {
        assert_eq!(encode_pair("price", "true"), "price:true");
        assert_eq!(
            decode_pair(&encode_pair("a:b", "x..y")).unwrap(),
            ("a:b".to_string(), "x..y".to_string())
        );
        assert_eq!(
            decode_pair(&encode_pair("price,asc", r"a\b")).unwrap(),
            ("price,asc".to_string(), r"a\b".to_string())
        );
        assert!(decode_pair("price").is_err());
    }
}
