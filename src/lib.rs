//! # NMEA 0183 Position Queue
//!
//! This library decodes `$GPRMC` sentences from a raw NMEA 0183 character
//! stream and keeps a bounded, time-ordered history of valid fix positions.
//! It is `no_std` and never allocates.
//!
//! The crate is split into small pieces:
//! - [`CharCursor`]: character access to the oldest sentence of a framing
//!   buffer, with [`SentenceBuffer`] as the reference implementation
//! - [`Tokenizer`]: character-level field parsers over a cursor
//! - [`decode`](rmc::decode): the GPRMC field decoder
//! - [`PositionQueue`]: the fixed-capacity FIFO of positions
//! - [`PositionTracker`]: the sentence dispatcher tying everything together
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_position_queue::{DefaultTracker, Outcome};
//!
//! let mut tracker = DefaultTracker::default();
//!
//! // Bytes usually arrive from a UART, a few at a time.
//! tracker.add_str("$GPRMC,220516,A,5133.82,N,00042.24,W,");
//! assert_eq!(tracker.parse_sentence(), Ok(Outcome::Idle));
//!
//! tracker.add_str("173.8,231.8,130694,004.2,E*70\r\n");
//! assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
//!
//! let position = tracker.latest().unwrap().position();
//! assert!((position.latitude - 51.3382).abs() < 1e-9);
//! assert!((position.longitude + 0.4224).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `datetime` (default): UTC date and time of the current fix via the `time` crate
//! - `serde`: `Serialize` / `Deserialize` for the decoded records

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(test)]
extern crate std;

pub mod cursor;
pub mod error;
pub mod queue;
pub mod rmc;
pub mod tokenizer;
pub mod tracker;

pub use cursor::{CharCursor, SentenceBuffer};
pub use error::{Error, RmcField, TokenError};
pub use queue::{PositionQueue, QueueEntry};
pub use rmc::{CurrentFix, Position, Validity};
pub use tokenizer::{Choice, GpsFloat, TAG_MAX, Tag, Tokenizer};
pub use tracker::{
    Counters, DEFAULT_BUFFER_SIZE, DEFAULT_QUEUE_CAPACITY, DefaultTracker, Outcome,
    PositionTracker,
};

#[cfg(test)]
mod tests {
    mod end_to_end;
    mod hemispheres;
}
