//! Turning raw user input into tokens the editor understands.

use std::io::{self, BufRead};

use crate::error::{LinedError, Result};

/// Longest digit string accepted as a line number
pub const MAX_NUMBER_WIDTH: usize = 9;

/// Parse a line-number token.
///
/// Surrounding whitespace is ignored. Anything else that is not a
/// plain run of digits (signs, trailing junk, a second word) is
/// rejected, as are zero and numbers wider than [`MAX_NUMBER_WIDTH`].
pub fn parse_number(token: &str) -> Result<usize> {
    let digits = token.trim();
    let valid = !digits.is_empty()
        && digits.len() <= MAX_NUMBER_WIDTH
        && digits.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(LinedError::InvalidNumber(token.to_string()));
    }
    match digits.parse::<usize>() {
        Ok(0) | Err(_) => Err(LinedError::InvalidNumber(token.to_string())),
        Ok(n) => Ok(n),
    }
}

/// Read one line of free text.
///
/// Returns `Ok(None)` at end of input. The line terminator (`\n`, or
/// `\r\n` from a terminal) is not part of the returned text. Bytes that
/// are not valid UTF-8 become U+FFFD instead of failing the read.
pub fn read_text_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(parse_number("1").unwrap(), 1);
        assert_eq!(parse_number("42").unwrap(), 42);
        assert_eq!(parse_number("  7 ").unwrap(), 7);
        assert_eq!(parse_number("007").unwrap(), 7);
    }

    #[test]
    fn parse_rejects_junk() {
        for token in ["", "   ", "abc", "3x", "x3", "-1", "+1", "1 2", "1.5", "0", "000"] {
            assert!(
                matches!(parse_number(token), Err(LinedError::InvalidNumber(_))),
                "accepted {:?}",
                token
            );
        }
    }

    #[test]
    fn parse_rejects_overlong() {
        assert!(parse_number("999999999").is_ok());
        assert!(parse_number("1234567890").is_err());
    }

    #[test]
    fn read_lines_until_eof() {
        let mut input = Cursor::new("first\r\nsecond\n\nlast");
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("first"));
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("second"));
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some(""));
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_text_line(&mut input).unwrap(), None);
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let mut input = Cursor::new(b"x\xff\ny\n".to_vec());
        assert_eq!(
            read_text_line(&mut input).unwrap().as_deref(),
            Some("x\u{fffd}")
        );
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("y"));
        assert_eq!(read_text_line(&mut input).unwrap(), None);
    }
}
