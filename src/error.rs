//! # Error Types
//!
//! This module defines the error types used by the tokenizer, the GPRMC decoder
//! and the sentence dispatcher.
//!
//! None of these errors is fatal: every failure is local to the sentence being
//! processed, and the sentence is discarded regardless of the outcome.

use core::fmt;

use crate::tokenizer::Tag;

/// Failure of a single tokenizer operation.
///
/// The tokenizer never consumes the character that caused a mismatch, so the
/// cursor is left on the offending character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The cursor reached the end of the current sentence before the token.
    EndOfSentence,

    /// A specific character was expected.
    Mismatch {
        /// The character that was expected
        expected: u8,
        /// The character found instead, [`None`] at the end of the sentence
        found: Option<u8>,
    },

    /// Neither of two alternative characters was found.
    NeitherMatched {
        /// The first accepted character
        first: u8,
        /// The second accepted character
        second: u8,
        /// The character found instead, [`None`] at the end of the sentence
        found: Option<u8>,
    },
}

/// The fields of a GPRMC sentence, in the order they are decoded.
///
/// ```text
/// $GPRMC,220516,A,5133.82,N,00042.24,W,173.8,231.8,130694,004.2,W*70
///        1      2 3       4 5        6 7     8     9      10    11
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmcField {
    /// 1 - UTC time of day, `hhmmss.ss`
    TimeOfDay,
    /// 2 - Validity, `A` ok or `V` invalid
    Validity,
    /// 3 - Latitude, `ddmm.mm`
    Latitude,
    /// 4 - North/South
    LatitudeHemisphere,
    /// 5 - Longitude, `dddmm.mm`
    Longitude,
    /// 6 - East/West
    LongitudeHemisphere,
    /// 7 - Speed over ground in knots
    SpeedInKnots,
    /// 8 - True course
    TrueCourse,
    /// 9 - Date stamp, `ddmmyy`
    Date,
    /// 10 - Magnetic variation
    MagneticVariation,
    /// 11 - Magnetic variation East/West
    VariationHemisphere,
}

impl RmcField {
    /// One-based position of the field after the sentence tag.
    pub const fn position(self) -> u8 {
        self as u8 + 1
    }
}

/// Represents all possible errors that can occur while processing a sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A field of a GPRMC sentence was missing or malformed.
    ///
    /// Decoding stopped at this field; every field before it has already been
    /// written to the current fix.
    InvalidField {
        /// The field that failed to decode
        field: RmcField,
        /// The underlying tokenizer failure
        error: TokenError,
    },

    /// The sentence did not start with a readable tag.
    MissingTag,

    /// The sentence type is not handled by the dispatcher.
    ///
    /// The tag that was read is provided for reference.
    UnrecognizedSentence(Tag),
}

impl Error {
    /// Attributes a tokenizer failure to a GPRMC field.
    pub const fn field(field: RmcField, error: TokenError) -> Self {
        Error::InvalidField { field, error }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::EndOfSentence => f.write_str("unexpected end of sentence"),
            TokenError::Mismatch { expected, found } => {
                write!(f, "expected '{}', found ", *expected as char)?;
                write_found(f, *found)
            }
            TokenError::NeitherMatched {
                first,
                second,
                found,
            } => {
                write!(
                    f,
                    "expected '{}' or '{}', found ",
                    *first as char, *second as char
                )?;
                write_found(f, *found)
            }
        }
    }
}

fn write_found(f: &mut fmt::Formatter<'_>, found: Option<u8>) -> fmt::Result {
    match found {
        Some(c) => write!(f, "'{}'", c.escape_ascii()),
        None => f.write_str("end of sentence"),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidField { field, error } => {
                write!(
                    f,
                    "GPRMC field {} ({:?}): {}",
                    field.position(),
                    field,
                    error
                )
            }
            Error::MissingTag => f.write_str("sentence has no tag"),
            Error::UnrecognizedSentence(tag) => {
                write!(
                    f,
                    "unrecognized sentence '{}'",
                    tag.as_bytes().escape_ascii()
                )
            }
        }
    }
}

impl core::error::Error for TokenError {}

impl core::error::Error for Error {}
