mod coordinator;
mod recording;
mod speech;

pub use coordinator::{ActivePlayback, PlaybackCoordinator, PlaybackPointer};
pub use recording::{RecordingSpeech, SpeechCall};
pub use speech::{
    DEFAULT_LANGUAGE_CODE, SpeechEngine, SpeechEvent, SpeechRate, Utterance, UtteranceId,
    speech_language_code,
};
