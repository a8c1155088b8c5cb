//! # Character Cursor
//!
//! The decoder never sees a contiguous sentence. It walks the oldest pending
//! sentence of a framing buffer one character at a time through the
//! [`CharCursor`] trait, so any framing implementation can feed it.
//!
//! [`SentenceBuffer`] is the reference framing buffer: a fixed-size byte ring
//! that splits the incoming stream into sentences at `\r` / `\n`.

use heapless::Deque;

/// Access to the sentences held by a framing buffer.
///
/// A cursor only ever reads the *oldest* complete sentence. End of sentence is
/// reported as [`None`].
pub trait CharCursor {
    /// Returns `true` if at least one complete sentence is pending.
    fn is_sentence_available(&self) -> bool;

    /// Moves the read position to the first character of the oldest pending sentence.
    fn reset(&mut self);

    /// Returns the character under the read position.
    fn current(&self) -> Option<u8>;

    /// Moves to the next character and returns it.
    ///
    /// At the end of the sentence the read position does not move and [`None`]
    /// is returned again.
    fn advance(&mut self) -> Option<u8>;

    /// Drops the oldest pending sentence and resets the read position.
    fn discard_sentence(&mut self);
}

impl<C: CharCursor + ?Sized> CharCursor for &mut C {
    fn is_sentence_available(&self) -> bool {
        (**self).is_sentence_available()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn current(&self) -> Option<u8> {
        (**self).current()
    }

    fn advance(&mut self) -> Option<u8> {
        (**self).advance()
    }

    fn discard_sentence(&mut self) {
        (**self).discard_sentence()
    }
}

// Stored in place of every `\r` / `\n` run that closes a sentence.
const TERMINATOR: u8 = b'\n';

/// A fixed-capacity framing buffer for a raw NMEA byte stream.
///
/// Bytes are appended with [`push`](Self::push), [`extend_from_slice`](Self::extend_from_slice)
/// or [`add_str`](Self::add_str). A sentence is complete once a `\r` or `\n`
/// follows it; consecutive line terminators collapse into one, so both `\n` and
/// `\r\n` framing work.
///
/// One slot is always kept free for a terminator. When the buffer is full, data
/// bytes are dropped and counted in [`dropped`](Self::dropped); the truncated
/// sentence still completes and simply fails to decode.
///
/// The buffer performs no synchronization. If bytes arrive from an interrupt
/// handler, the application must guard the buffer itself.
///
/// # Examples
///
/// ```rust
/// use nmea0183_position_queue::{CharCursor, SentenceBuffer};
///
/// let mut buffer = SentenceBuffer::<64>::new();
/// buffer.add_str("$GP");
/// assert!(!buffer.is_sentence_available());
///
/// buffer.add_str("RMC\r\n");
/// assert_eq!(buffer.pending(), 1);
/// assert_eq!(buffer.current(), Some(b'$'));
/// ```
#[derive(Debug)]
pub struct SentenceBuffer<const N: usize> {
    bytes: Deque<u8, N>,
    pending: usize,
    partial: bool,
    read: usize,
    dropped: u32,
}

impl<const N: usize> Default for SentenceBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SentenceBuffer<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: Deque::new(),
            pending: 0,
            partial: false,
            read: 0,
            dropped: 0,
        }
    }

    /// Discards every stored byte, including incomplete sentences.
    ///
    /// The dropped-byte counter is kept.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.pending = 0;
        self.partial = false;
        self.read = 0;
    }

    /// Appends one raw byte from the stream.
    pub fn push(&mut self, byte: u8) {
        match byte {
            b'\r' | b'\n' => {
                if !self.partial {
                    return;
                }
                // The reserved slot guarantees room for the terminator.
                if self.bytes.push_back(TERMINATOR).is_ok() {
                    self.pending += 1;
                    self.partial = false;
                }
            }
            _ => {
                if self.bytes.len() + 1 < N {
                    // Cannot fail, the length was checked above.
                    let _ = self.bytes.push_back(byte);
                    self.partial = true;
                } else {
                    self.dropped = self.dropped.wrapping_add(1);
                    log::warn!("sentence buffer full, dropped byte {:#04x}", byte);
                }
            }
        }
    }

    /// Appends a slice of raw bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Appends the bytes of a string.
    pub fn add_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }

    /// Number of complete sentences waiting to be processed.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Number of data bytes dropped because the buffer was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Number of bytes currently stored, terminators included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if no bytes are stored.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        let (front, back) = self.bytes.as_slices();
        match index.checked_sub(front.len()) {
            None => front.get(index).copied(),
            Some(index) => back.get(index).copied(),
        }
    }
}

impl<const N: usize> CharCursor for SentenceBuffer<N> {
    fn is_sentence_available(&self) -> bool {
        self.pending > 0
    }

    fn reset(&mut self) {
        self.read = 0;
    }

    fn current(&self) -> Option<u8> {
        if self.pending == 0 {
            return None;
        }
        self.byte_at(self.read).filter(|&c| c != TERMINATOR)
    }

    fn advance(&mut self) -> Option<u8> {
        if self.current().is_some() {
            self.read += 1;
        }
        self.current()
    }

    fn discard_sentence(&mut self) {
        if self.pending == 0 {
            return;
        }
        while let Some(byte) = self.bytes.pop_front() {
            if byte == TERMINATOR {
                break;
            }
        }
        self.pending -= 1;
        self.read = 0;
    }
}
