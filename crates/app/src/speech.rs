use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use services::{SpeechEngine, SpeechError, SpeechEvent, Utterance};

/// How long one character takes to "speak" at rate 1.0.
const MILLIS_PER_CHAR: f32 = 60.0;
const MIN_UTTERANCE: Duration = Duration::from_millis(300);

/// Stand-in for a platform TTS engine.
///
/// Each utterance is a tokio task that waits for a duration proportional to
/// the text length and then reports `Finished` on the event channel. Cancelled
/// utterances report `Finished` right away, so every accepted utterance is
/// reported exactly once.
pub struct SimulatedSpeech {
    runtime: Handle,
    events: mpsc::UnboundedSender<SpeechEvent>,
    cancel: Option<oneshot::Sender<()>>,
    millis_per_char: f32,
}

impl SimulatedSpeech {
    /// Must be called from inside a tokio runtime.
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<SpeechEvent>) -> Self {
        Self {
            runtime: Handle::current(),
            events,
            cancel: None,
            millis_per_char: MILLIS_PER_CHAR,
        }
    }

    fn duration_for(&self, utterance: &Utterance) -> Duration {
        #[allow(clippy::cast_precision_loss)]
        let chars = utterance.text.chars().count() as f32;
        let millis = chars * self.millis_per_char / utterance.rate.value();
        Duration::from_secs_f32(millis / 1000.0).max(MIN_UTTERANCE)
    }
}

impl SpeechEngine for SimulatedSpeech {
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        if self.events.is_closed() {
            return Err(SpeechError::Unavailable("event channel closed".into()));
        }
        self.cancel();

        let duration = self.duration_for(&utterance);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let events = self.events.clone();
        let id = utterance.id;

        info!(
            utterance = %id,
            lang = %utterance.language_code,
            rate = utterance.rate.value(),
            text = %utterance.text,
            "speaking"
        );

        self.runtime.spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(duration) => debug!(utterance = %id, "utterance ended"),
                _ = cancel_rx => debug!(utterance = %id, "utterance cancelled"),
            }
            // The receiver is gone only when the driver has shut down.
            let _ = events.send(SpeechEvent::Finished(id));
        });

        self.cancel = Some(cancel_tx);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // Fails only if the utterance already ended on its own.
            let _ = cancel.send(());
        }
    }
}
