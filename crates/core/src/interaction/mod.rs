//! Learner-side interaction state for each content shape.
//!
//! A session owns its content plus the transient progress a learner makes
//! while playing it. All state is derived from the content: loading new
//! content discards previous progress, and [`Interaction::reset`] starts over
//! with the content already loaded.
//!
//! Sessions never touch audio hardware themselves. Calls that trigger
//! playback take a [`MediaPlayer`]; failures are logged and remembered for
//! diagnostics but never returned to the caller.

pub mod audio_sync;
pub mod fill_blank;
pub mod find_items;
pub mod flashcard;
pub mod letter_tracing;
pub mod matching;
pub mod mcq;
pub mod memory;
pub mod sentence;
pub mod sequencing;
pub mod session;
pub mod true_false;

use serde::Serialize;

pub use audio_sync::AudioSyncSession;
pub use fill_blank::FillBlankSession;
pub use find_items::{FindItemsSession, TapResult};
pub use flashcard::FlashcardSession;
pub use letter_tracing::{LetterTracingSession, TraceResult};
pub use matching::{DropResult, MatchingSession};
pub use mcq::McqSession;
pub use memory::{FlipResult, MemoryPairsSession};
pub use sentence::{ChipResult, SentenceBuilderSession};
pub use sequencing::SequencingSession;
pub use session::ActivitySession;
pub use true_false::TrueFalseSession;

/// Progress summary of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Items the learner got right.
    pub correct: usize,
    /// Answers, drops, taps or moves made so far, right or wrong.
    pub attempted: usize,
    /// Items that must be completed to finish.
    pub total: usize,
}

/// Behaviour shared by every interaction session.
pub trait Interaction {
    type Content;

    /// Replace the content and derive fresh state from it.
    fn load(&mut self, content: Self::Content);

    /// Discard progress, keeping the current content.
    fn reset(&mut self);

    fn is_complete(&self) -> bool;

    fn score(&self) -> Score;
}

/// Error reported by a [`MediaPlayer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlaybackError(pub String);

/// Audio output used by sessions that play sounds.
pub trait MediaPlayer {
    fn play(&mut self, url: &str) -> Result<(), PlaybackError>;

    fn stop(&mut self);
}

/// Play `url`, logging a failure instead of returning it.
///
/// Returns the failure message so the session can keep it for diagnostics.
pub(crate) fn play_or_warn(player: &mut dyn MediaPlayer, url: &str) -> Option<String> {
    match player.play(url) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(url, error = %err, "Audio playback failed");
            Some(err.0)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{MediaPlayer, PlaybackError};

    /// Player that records what it was asked to play.
    #[derive(Debug, Default)]
    pub struct RecordingPlayer {
        pub played: Vec<String>,
        pub stops: usize,
        pub fail: bool,
    }

    impl RecordingPlayer {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl MediaPlayer for RecordingPlayer {
        fn play(&mut self, url: &str) -> Result<(), PlaybackError> {
            if self.fail {
                return Err(PlaybackError(format!("cannot decode {url}")));
            }
            self.played.push(url.to_string());
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }
}
