#![forbid(unsafe_code)]

pub mod error;
pub mod playback;
pub mod session;

pub use lingua_core::Clock;

pub use error::{SessionError, SpeechError};
pub use playback::{
    PlaybackCoordinator, PlaybackPointer, RecordingSpeech, SpeechEngine, SpeechEvent, SpeechRate,
    Utterance, UtteranceId,
};
pub use session::{
    ActionOutcome, DeclineReason, LessonView, PlanView, SessionController, SessionState,
    SessionView,
};
