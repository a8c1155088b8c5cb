//! # Sentence Dispatcher
//!
//! [`PositionTracker`] owns the framing cursor, the current-fix scratch record,
//! the position queue and the sentence counters. Each call to
//! [`parse_sentence`](PositionTracker::parse_sentence) processes at most one
//! pending sentence, so it can run from a bare-metal polling loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    CharCursor, CurrentFix, Error, PositionQueue, QueueEntry, SentenceBuffer, Tokenizer,
    rmc::{self, Validity},
};

/// Default capacity of the position queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Default size in bytes of the framing buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// A tracker over a [`SentenceBuffer`] with the default sizes.
pub type DefaultTracker =
    PositionTracker<SentenceBuffer<DEFAULT_BUFFER_SIZE>, DEFAULT_QUEUE_CAPACITY>;

/// Sentence statistics. All counters wrap on overflow.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// Sentences taken from the cursor, whatever their outcome
    pub processed_sentences: u32,
    /// GPRMC sentences with an `A` status
    pub valid_gprmc: u32,
    /// GPRMC sentences with a `V` status
    pub invalid_gprmc: u32,
}

impl Counters {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            processed_sentences: 0,
            valid_gprmc: 0,
            invalid_gprmc: 0,
        }
    }
}

/// Successful outcome of [`PositionTracker::parse_sentence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No sentence was pending; nothing changed.
    Idle,
    /// A GPRMC sentence with an `A` status was decoded and its position queued.
    ValidFix,
    /// A GPRMC sentence with a `V` status was decoded; nothing was queued.
    InvalidFix,
}

/// Decodes pending sentences and records valid fixes.
///
/// # Examples
///
/// ```rust
/// use nmea0183_position_queue::{DefaultTracker, Error, Outcome};
///
/// let mut tracker = DefaultTracker::default();
/// assert_eq!(tracker.parse_sentence(), Ok(Outcome::Idle));
///
/// tracker.add_str("$GPRMC,220516,A,5133.82,N,00042.24,W,173.8,231.8,130694,004.2,E*70\r\n");
/// tracker.add_str("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n");
///
/// assert_eq!(tracker.parse_sentence(), Ok(Outcome::ValidFix));
/// assert!(matches!(tracker.parse_sentence(), Err(Error::UnrecognizedSentence(_))));
///
/// let latest = tracker.latest().unwrap().position();
/// assert!((latest.latitude - 51.3382).abs() < 1e-9);
/// assert_eq!(tracker.processed_sentences(), 2);
/// ```
#[derive(Debug)]
pub struct PositionTracker<C, const CAP: usize> {
    cursor: C,
    fix: CurrentFix,
    queue: PositionQueue<CAP>,
    counters: Counters,
}

impl<C: Default, const CAP: usize> Default for PositionTracker<C, CAP> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C, const CAP: usize> PositionTracker<C, CAP> {
    /// Creates a tracker reading sentences from `cursor`, with an empty queue
    /// and zeroed counters.
    pub const fn new(cursor: C) -> Self {
        Self {
            cursor,
            fix: CurrentFix::new(),
            queue: PositionQueue::new(),
            counters: Counters::new(),
        }
    }

    /// The sentence cursor.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Mutable access to the sentence cursor, e.g. to append received bytes.
    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    /// The fields of the last GPRMC decode attempt.
    ///
    /// After a failed decode this may mix fields of the failed sentence with
    /// fields of an earlier one.
    pub fn current_fix(&self) -> &CurrentFix {
        &self.fix
    }

    /// The history of valid fixes.
    pub fn queue(&self) -> &PositionQueue<CAP> {
        &self.queue
    }

    /// The most recent valid fix.
    pub fn latest(&self) -> Option<&QueueEntry> {
        self.queue.latest()
    }

    /// All sentence counters.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Number of sentences taken from the cursor.
    pub fn processed_sentences(&self) -> u32 {
        self.counters.processed_sentences
    }

    /// Number of GPRMC sentences with a valid fix.
    pub fn valid_gprmc(&self) -> u32 {
        self.counters.valid_gprmc
    }

    /// Number of GPRMC sentences with an invalid fix.
    pub fn invalid_gprmc(&self) -> u32 {
        self.counters.invalid_gprmc
    }
}

impl<C: CharCursor, const CAP: usize> PositionTracker<C, CAP> {
    /// Processes the oldest pending sentence, if any.
    ///
    /// Returns [`Outcome::Idle`] without side effects when no sentence is
    /// pending. Otherwise the sentence is always discarded and counted, and the
    /// result only reports how that sentence went. Errors are never fatal.
    pub fn parse_sentence(&mut self) -> Result<Outcome, Error> {
        if !self.cursor.is_sentence_available() {
            return Ok(Outcome::Idle);
        }

        self.cursor.reset();
        let result = self.dispatch();
        self.cursor.discard_sentence();
        self.counters.processed_sentences = self.counters.processed_sentences.wrapping_add(1);

        match &result {
            Ok(outcome) => log::debug!("sentence processed: {:?}", outcome),
            Err(e) => log::debug!("sentence dropped: {}", e),
        }
        result
    }

    /// Processes every pending sentence and returns how many were processed.
    ///
    /// Failed sentences are logged and skipped.
    pub fn parse_pending(&mut self) -> usize {
        let mut processed = 0;
        while self.cursor.is_sentence_available() {
            if let Err(e) = self.parse_sentence() {
                log::warn!("sentence {} failed: {e}", self.counters.processed_sentences);
            }
            processed += 1;
        }
        processed
    }

    fn dispatch(&mut self) -> Result<Outcome, Error> {
        let mut tokenizer = Tokenizer::new(&mut self.cursor);
        let tag = tokenizer.parse_tag().map_err(|_| Error::MissingTag)?;
        if tag.is_empty() {
            return Err(Error::MissingTag);
        }
        if tag != "$GPRMC" {
            return Err(Error::UnrecognizedSentence(tag));
        }

        match rmc::decode(&mut tokenizer, &mut self.fix)? {
            Validity::Valid => {
                self.queue.push(self.fix.position);
                self.counters.valid_gprmc = self.counters.valid_gprmc.wrapping_add(1);
                Ok(Outcome::ValidFix)
            }
            Validity::Invalid => {
                self.counters.invalid_gprmc = self.counters.invalid_gprmc.wrapping_add(1);
                Ok(Outcome::InvalidFix)
            }
        }
    }
}

impl<const N: usize, const CAP: usize> PositionTracker<SentenceBuffer<N>, CAP> {
    /// Appends raw bytes to the framing buffer.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.cursor.extend_from_slice(bytes);
    }

    /// Appends the bytes of a string to the framing buffer.
    pub fn add_str(&mut self, s: &str) {
        self.cursor.add_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RmcField, TokenError};

    type Tracker = PositionTracker<SentenceBuffer<128>, 4>;

    #[test]
    fn test_idle_leaves_counters() {
        let mut tracker = Tracker::default();
        tracker.add_str("$GPRMC,220516,A");
        assert_eq!(tracker.parse_sentence(), Ok(Outcome::Idle));
        assert_eq!(tracker.counters(), Counters::new());
        assert_eq!(tracker.cursor().len(), 15);
    }

    #[test]
    fn test_missing_tag() {
        let mut tracker = Tracker::default();
        tracker.add_str("   \n");
        assert_eq!(tracker.parse_sentence(), Err(Error::MissingTag));
        assert_eq!(tracker.processed_sentences(), 1);
        assert!(tracker.cursor().is_empty());
    }

    #[test]
    fn test_unrecognized_is_consumed() {
        let mut tracker = Tracker::default();
        tracker.add_str("$GPGGA,123519,4807.038,N\n");
        let result = tracker.parse_sentence();
        match result {
            Err(Error::UnrecognizedSentence(tag)) => assert_eq!(tag, "$GPGGA"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(tracker.processed_sentences(), 1);
        assert_eq!(tracker.valid_gprmc(), 0);
        assert_eq!(tracker.invalid_gprmc(), 0);
        assert!(!tracker.cursor().is_sentence_available());
        assert_eq!(tracker.parse_sentence(), Ok(Outcome::Idle));
    }

    #[test]
    fn test_malformed_gprmc() {
        let mut tracker = Tracker::default();
        tracker.add_str("$GPRMC,220516,X,5133.82\n");
        assert_eq!(
            tracker.parse_sentence(),
            Err(Error::field(
                RmcField::Validity,
                TokenError::NeitherMatched {
                    first: b'V',
                    second: b'A',
                    found: Some(b'X'),
                },
            ))
        );
        assert_eq!(tracker.processed_sentences(), 1);
        assert_eq!(tracker.valid_gprmc(), 0);
        assert_eq!(tracker.invalid_gprmc(), 0);
        assert!(tracker.queue().is_empty());
    }

    #[test]
    fn test_parse_pending() {
        let mut tracker = Tracker::default();
        tracker.add_str("$GPRMC,1,A,1,N,1,E,0,0,1,0,E\r\n");
        tracker.add_str("$GPXXX\r\n");
        tracker.add_str("$GPRMC,1,V,1,N,1,E,0,0,1,0,E\r\n");
        assert_eq!(tracker.parse_pending(), 3);
        assert_eq!(
            tracker.counters(),
            Counters {
                processed_sentences: 3,
                valid_gprmc: 1,
                invalid_gprmc: 1,
            }
        );
        assert_eq!(tracker.queue().len(), 1);
        assert_eq!(tracker.parse_pending(), 0);
    }

    #[test]
    fn test_borrowed_cursor() {
        let mut buffer = SentenceBuffer::<64>::new();
        buffer.add_str("$GPRMC,1,V,1,N,1,E,0,0,1,0,E\n");

        let mut tracker = PositionTracker::<_, 2>::new(&mut buffer);
        assert_eq!(tracker.parse_sentence(), Ok(Outcome::InvalidFix));
        assert_eq!(tracker.invalid_gprmc(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_counters_wrap() {
        let mut tracker = Tracker::default();
        tracker.counters.processed_sentences = u32::MAX;
        tracker.add_str("$GPXXX\n");
        let _ = tracker.parse_sentence();
        assert_eq!(tracker.processed_sentences(), 0);
    }
}
