//! # Tokenizer
//!
//! Character-level field parsers built on a [`CharCursor`]. Nothing is buffered
//! beyond the token being produced, and no operation allocates.
//!
//! Every parser skips leading spaces and control characters (code ≤ 32) first.

use core::fmt;

use crate::{CharCursor, error::TokenError};

/// Floating point type used for all decoded decimals.
pub type GpsFloat = f64;

/// Maximum number of characters kept by [`Tokenizer::parse_tag`].
pub const TAG_MAX: usize = 7;

/// A short sentence tag such as `$GPRMC`, stored inline.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Tag(heapless::Vec<u8, TAG_MAX>);

impl Tag {
    /// The raw tag characters.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of characters in the tag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no tag characters were read.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.as_bytes().escape_ascii())
    }
}

/// Which of the two alternatives of [`Tokenizer::match_either`] matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// The first character matched
    First,
    /// The second character matched
    Second,
}

/// Field parsers over the sentence under a [`CharCursor`].
///
/// The tokenizer holds no state of its own; every position lives in the cursor.
///
/// # Examples
///
/// ```rust
/// use nmea0183_position_queue::{SentenceBuffer, Tokenizer};
///
/// let mut buffer = SentenceBuffer::<32>::new();
/// buffer.add_str("$GPRMC, 123.45\n");
///
/// let mut tokenizer = Tokenizer::new(&mut buffer);
/// assert_eq!(tokenizer.parse_tag().unwrap(), "$GPRMC");
/// assert!(tokenizer.match_comma().is_ok());
/// assert!((tokenizer.parse_decimal().unwrap() - 123.45).abs() < 1e-9);
/// ```
pub struct Tokenizer<'a, C: CharCursor> {
    cursor: &'a mut C,
}

impl<'a, C: CharCursor> Tokenizer<'a, C> {
    /// Creates a tokenizer reading from the current position of `cursor`.
    pub fn new(cursor: &'a mut C) -> Self {
        Self { cursor }
    }

    /// The character under the cursor.
    pub fn peek(&self) -> Option<u8> {
        self.cursor.current()
    }

    /// Skips spaces and control characters.
    ///
    /// Fails only if the cursor is already at the end of the sentence; skipping
    /// zero characters is a success.
    pub fn skip_space(&mut self) -> Result<(), TokenError> {
        let mut c = self.cursor.current().ok_or(TokenError::EndOfSentence)?;
        while c <= b' ' {
            match self.cursor.advance() {
                Some(next) => c = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Parses a run of decimal digits, returning the value and the digit count.
    ///
    /// A non-digit at the cursor is not an error: the result is `(0, 0)` and
    /// nothing is consumed. The accumulator wraps on overflow.
    pub fn parse_uint(&mut self) -> Result<(u32, u8), TokenError> {
        self.skip_space()?;
        let mut c = self.cursor.current().ok_or(TokenError::EndOfSentence)?;

        let mut value = 0u32;
        let mut digits = 0u8;
        while c.is_ascii_digit() {
            value = value.wrapping_mul(10).wrapping_add(u32::from(c - b'0'));
            digits = digits.wrapping_add(1);
            match self.cursor.advance() {
                Some(next) => c = next,
                None => break,
            }
        }
        Ok((value, digits))
    }

    /// Parses a fixed-point decimal such as `123.45`.
    ///
    /// A trailing `.` without digits yields the integer part, unless the
    /// sentence ends right after it.
    pub fn parse_decimal(&mut self) -> Result<GpsFloat, TokenError> {
        let (whole, _) = self.parse_uint()?;
        let mut value = whole as GpsFloat;

        if self.cursor.current() == Some(b'.') {
            self.cursor.advance();
            let (fraction, digits) = self.parse_uint()?;
            let mut fraction = fraction as GpsFloat;
            for _ in 0..digits {
                fraction /= 10.0;
            }
            value += fraction;
        }
        Ok(value)
    }

    /// Reads a sentence tag: characters that are `$` or have a code ≥ 64.
    ///
    /// At most [`TAG_MAX`] characters are read; any further tag characters are
    /// left in the cursor.
    pub fn parse_tag(&mut self) -> Result<Tag, TokenError> {
        self.skip_space()?;

        let mut tag = Tag::default();
        let mut c = self.cursor.current();
        while let Some(byte) = c.filter(|&b| b >= 64 || b == b'$') {
            if tag.0.push(byte).is_err() {
                break;
            }
            c = self.cursor.advance();
        }
        Ok(tag)
    }

    /// Consumes `expected` if it is the next non-space character.
    ///
    /// On a mismatch the offending character is not consumed.
    pub fn match_char(&mut self, expected: u8) -> Result<(), TokenError> {
        self.skip_space()?;
        match self.cursor.current() {
            Some(c) if c == expected => {
                self.cursor.advance();
                Ok(())
            }
            found => Err(TokenError::Mismatch { expected, found }),
        }
    }

    /// Consumes a field separator.
    pub fn match_comma(&mut self) -> Result<(), TokenError> {
        self.match_char(b',')
    }

    /// Consumes `first` or, failing that, `second`.
    pub fn match_either(&mut self, first: u8, second: u8) -> Result<Choice, TokenError> {
        if self.match_char(first).is_ok() {
            return Ok(Choice::First);
        }
        match self.match_char(second) {
            Ok(()) => Ok(Choice::Second),
            Err(TokenError::EndOfSentence) => Err(TokenError::EndOfSentence),
            Err(_) => Err(TokenError::NeitherMatched {
                first,
                second,
                found: self.cursor.current(),
            }),
        }
    }
}
