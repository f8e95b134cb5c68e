use std::sync::{Arc, Mutex, PoisonError};

use super::speech::{SpeechEngine, Utterance, UtteranceId};
use crate::error::SpeechError;

/// A call observed by [`RecordingSpeech`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechCall {
    Speak(UtteranceId),
    Cancel,
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<SpeechCall>,
    spoken: Vec<Utterance>,
}

/// Speech engine that speaks nothing and remembers every request.
///
/// Clones share the same log, so a test can hand one clone to the session and
/// inspect the other. Completion is never signalled on its own; tests deliver
/// `SpeechEvent`s explicitly.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeech {
    recorded: Arc<Mutex<Recorded>>,
    unavailable: bool,
}

impl RecordingSpeech {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose `speak` always fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<SpeechCall> {
        self.with_recorded(|recorded| recorded.calls.clone())
    }

    #[must_use]
    pub fn spoken(&self) -> Vec<Utterance> {
        self.with_recorded(|recorded| recorded.spoken.clone())
    }

    /// The most recent utterance handed to `speak`.
    #[must_use]
    pub fn last_spoken(&self) -> Option<Utterance> {
        self.with_recorded(|recorded| recorded.spoken.last().cloned())
    }

    fn with_recorded<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        let mut guard = self.recorded.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl SpeechEngine for RecordingSpeech {
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        if self.unavailable {
            return Err(SpeechError::Unavailable("recording engine disabled".into()));
        }
        self.with_recorded(|recorded| {
            recorded.calls.push(SpeechCall::Speak(utterance.id));
            recorded.spoken.push(utterance);
        });
        Ok(())
    }

    fn cancel(&mut self) {
        self.with_recorded(|recorded| recorded.calls.push(SpeechCall::Cancel));
    }
}
