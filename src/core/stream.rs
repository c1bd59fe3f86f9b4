//! Character Streaming
//!
//! A finished whisper is played back one character at a time. Computing the
//! text and pacing its emission are separate concerns:
//!
//! - `WhisperStream` is a lazy, finite, non-restartable iterator over the
//!   characters of an already generated whisper. Stopping iteration (or
//!   dropping the stream) is the whole cancellation story.
//! - `CharacterSink` is whatever consumes the characters.
//! - `Pacer` adds the presentation delay between characters, blocking or,
//!   with the `async` feature, on a tokio timer.

use std::iter::FusedIterator;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use rand::Rng;

use super::config::DriftConfig;
use super::models::WhisperResult;

/// Receives streamed characters.
///
/// `so_far` is everything emitted up to and including `ch`. The sink is
/// borrowed mutably for the whole emission, so two streams can never write
/// into the same sink at once.
#[cfg_attr(test, automock)]
pub trait CharacterSink {
    /// Accept one character
    fn emit(&mut self, ch: char, so_far: &str);
}

impl<F> CharacterSink for F
where
    F: FnMut(char, &str),
{
    fn emit(&mut self, ch: char, so_far: &str) {
        self(ch, so_far)
    }
}

/// Lazy character-by-character view of a whisper.
#[derive(Debug, Clone)]
pub struct WhisperStream {
    result: WhisperResult,
    /// Byte offset of the next character to emit
    offset: usize,
}

impl WhisperStream {
    /// Wrap a finished result
    pub fn new(result: WhisperResult) -> Self {
        Self { result, offset: 0 }
    }

    /// Text emitted so far
    pub fn emitted(&self) -> &str {
        &self.result.text[..self.offset]
    }

    /// Whether every character has been emitted
    pub fn is_finished(&self) -> bool {
        self.offset >= self.result.text.len()
    }

    /// The full result, whether or not emission has finished
    pub fn result(&self) -> &WhisperResult {
        &self.result
    }

    /// Consume the stream and return the full result
    pub fn into_result(self) -> WhisperResult {
        self.result
    }

    /// Emit every remaining character into `sink` and return the full result.
    pub fn drain_into<S: CharacterSink + ?Sized>(mut self, sink: &mut S) -> WhisperResult {
        while let Some(ch) = self.next() {
            sink.emit(ch, self.emitted());
        }
        self.result
    }
}

impl Iterator for WhisperStream {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = self.result.text[self.offset..].chars().next()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.result.text[self.offset..].chars().count();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WhisperStream {}

impl FusedIterator for WhisperStream {}

/// Presentation pacing for streamed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(20), Duration::from_millis(70))
    }
}

impl Pacer {
    /// Pace with a random delay in `[min_delay, max_delay]`
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        let (min_delay, max_delay) = if min_delay <= max_delay {
            (min_delay, max_delay)
        } else {
            (max_delay, min_delay)
        };
        Self {
            min_delay,
            max_delay,
        }
    }

    /// No delay at all
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delays from configuration
    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(
            Duration::from_millis(config.emit_delay_min_ms),
            Duration::from_millis(config.emit_delay_max_ms),
        )
    }

    /// Draw the delay before the next character.
    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rng.gen_range(min..=max))
    }

    /// Drive `stream` into `sink`, sleeping the thread between characters.
    pub fn drive<S: CharacterSink + ?Sized, R: Rng + ?Sized>(
        &self,
        mut stream: WhisperStream,
        sink: &mut S,
        rng: &mut R,
    ) -> WhisperResult {
        while let Some(ch) = stream.next() {
            sink.emit(ch, stream.emitted());
            if !stream.is_finished() {
                let delay = self.next_delay(rng);
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
        }
        stream.into_result()
    }

    /// Drive `stream` into `sink` on the tokio timer.
    ///
    /// Dropping the returned future cancels emission at the current
    /// character; nothing past that point reaches the sink.
    #[cfg(feature = "async")]
    pub async fn drive_async<S: CharacterSink + ?Sized, R: Rng + ?Sized>(
        &self,
        mut stream: WhisperStream,
        sink: &mut S,
        rng: &mut R,
    ) -> WhisperResult {
        while let Some(ch) = stream.next() {
            sink.emit(ch, stream.emitted());
            if !stream.is_finished() {
                let delay = self.next_delay(rng);
                tokio::time::sleep(delay).await;
            }
        }
        stream.into_result()
    }
}
