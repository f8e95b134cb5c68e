use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lingua_core::model::{AudioCueId, LanguageId};

use super::speech::{SpeechEngine, SpeechEvent, SpeechRate, Utterance, UtteranceId};

//
// ─── POINTER ───────────────────────────────────────────────────────────────────
//

/// The utterance currently being spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlayback {
    pub language: LanguageId,
    pub cue: AudioCueId,
    pub utterance: UtteranceId,
}

/// "Currently speaking" state: at most one active cue, never a queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackPointer {
    active: Option<ActivePlayback>,
    issued: u64,
}

impl PlaybackPointer {
    #[must_use]
    pub fn current(&self) -> Option<&ActivePlayback> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    #[must_use]
    pub fn is_playing(&self, cue: &AudioCueId) -> bool {
        self.active.as_ref().is_some_and(|active| &active.cue == cue)
    }

    /// Like [`is_playing`](Self::is_playing), scoped to the language the cue was started from.
    #[must_use]
    pub fn is_playing_in(&self, language: &LanguageId, cue: &AudioCueId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| &active.language == language && &active.cue == cue)
    }

    fn issue(&mut self) -> UtteranceId {
        self.issued += 1;
        UtteranceId::new(self.issued)
    }

    fn finish(&mut self, utterance: UtteranceId) -> bool {
        match &self.active {
            Some(active) if active.utterance == utterance => {
                self.active = None;
                true
            }
            _ => false,
        }
    }
}

//
// ─── COORDINATOR ───────────────────────────────────────────────────────────────
//

/// Drives the speech engine and keeps a [`PlaybackPointer`] in step with it.
///
/// The pointer lives in the session state and is passed in by reference, so
/// the coordinator itself only owns the engine and the speaking rate.
pub struct PlaybackCoordinator {
    engine: Box<dyn SpeechEngine>,
    rate: SpeechRate,
}

impl PlaybackCoordinator {
    #[must_use]
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            rate: SpeechRate::default(),
        }
    }

    #[must_use]
    pub fn with_rate(mut self, rate: SpeechRate) -> Self {
        self.rate = rate;
        self
    }

    /// Start speaking `text`, superseding whatever was playing.
    ///
    /// Returns the new utterance id, or `None` if the engine refused to start;
    /// in that case the pointer is left idle. Callers gate on the access
    /// policy before calling this.
    pub fn play(
        &mut self,
        pointer: &mut PlaybackPointer,
        language: &LanguageId,
        cue: &AudioCueId,
        text: &str,
        language_code: &str,
    ) -> Option<UtteranceId> {
        if let Some(previous) = pointer.active.take() {
            debug!(cue = %previous.cue, utterance = %previous.utterance, "superseding playback");
            self.engine.cancel();
        }

        let utterance = pointer.issue();
        pointer.active = Some(ActivePlayback {
            language: language.clone(),
            cue: cue.clone(),
            utterance,
        });

        let request = Utterance {
            id: utterance,
            text: text.to_owned(),
            language_code: language_code.to_owned(),
            rate: self.rate,
        };

        match self.engine.speak(request) {
            Ok(()) => {
                info!(%cue, %utterance, language_code, "playback started");
                Some(utterance)
            }
            Err(err) => {
                warn!(%cue, %utterance, error = %err, "speech engine refused utterance");
                pointer.active = None;
                None
            }
        }
    }

    /// Completion callback from the engine.
    ///
    /// Clears the pointer only if it still names `utterance`; notifications
    /// for superseded utterances are ignored. Returns whether the pointer changed.
    pub fn on_playback_finished(
        &self,
        pointer: &mut PlaybackPointer,
        utterance: UtteranceId,
    ) -> bool {
        let cleared = pointer.finish(utterance);
        if cleared {
            debug!(%utterance, "playback finished");
        } else {
            debug!(%utterance, "ignoring finish for superseded utterance");
        }
        cleared
    }

    pub fn handle_event(&self, pointer: &mut PlaybackPointer, event: &SpeechEvent) -> bool {
        if let SpeechEvent::Failed { utterance, reason } = event {
            warn!(%utterance, reason = %reason, "speech engine reported failure");
        }
        self.on_playback_finished(pointer, event.utterance())
    }

    /// Cancel the current utterance. No-op (and no engine call) when idle.
    pub fn stop(&mut self, pointer: &mut PlaybackPointer) -> bool {
        match pointer.active.take() {
            Some(active) => {
                self.engine.cancel();
                info!(cue = %active.cue, utterance = %active.utterance, "playback stopped");
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("rate", &self.rate)
            .finish_non_exhaustive()
    }
}
