//! Port to the external text-to-speech engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use lingua_core::model::LanguageId;

use crate::error::SpeechError;

/// Fallback spoken-language code for languages without a mapping.
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Spoken-language code handed to the speech engine for a catalog language.
#[must_use]
pub fn speech_language_code(language: &LanguageId) -> &'static str {
    match language.as_str() {
        "english" => "en-US",
        "japanese" => "ja-JP",
        "russian" => "ru-RU",
        "arabic" => "ar-SA",
        "korean" => "ko-KR",
        _ => DEFAULT_LANGUAGE_CODE,
    }
}

/// Identifies one play request. Issued in increasing order per session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtteranceId(u64);

impl UtteranceId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UtteranceId({})", self.0)
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Speaking rate, where `1.0` is the engine's normal speed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SpeechRate(f32);

impl SpeechRate {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 10.0;

    /// # Errors
    ///
    /// Returns `SpeechError::InvalidRate` outside `0.1..=10.0` or for NaN.
    pub fn new(rate: f32) -> Result<Self, SpeechError> {
        if (Self::MIN..=Self::MAX).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(SpeechError::InvalidRate(rate))
        }
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for SpeechRate {
    // Slightly slower than normal so learners can follow along.
    fn default() -> Self {
        Self(0.8)
    }
}

/// One request to speak, as handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub language_code: String,
    pub rate: SpeechRate,
}

/// Out-of-band notifications from the engine back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The utterance stopped speaking, either naturally or because it was cancelled.
    Finished(UtteranceId),
    /// The engine gave up on the utterance.
    Failed { utterance: UtteranceId, reason: String },
}

impl SpeechEvent {
    #[must_use]
    pub fn utterance(&self) -> UtteranceId {
        match self {
            Self::Finished(id) | Self::Failed { utterance: id, .. } => *id,
        }
    }
}

/// Text-to-speech collaborator.
///
/// `speak` must return without waiting for the utterance to end. The engine
/// reports the end of every accepted utterance exactly once through a
/// [`SpeechEvent`], including utterances ended by `cancel`.
pub trait SpeechEngine: Send {
    /// Begin speaking.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the engine cannot start the utterance; no
    /// completion event is sent in that case.
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Halt whatever is being spoken, immediately.
    fn cancel(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_for_builtin_languages() {
        let cases = [
            ("english", "en-US"),
            ("japanese", "ja-JP"),
            ("russian", "ru-RU"),
            ("arabic", "ar-SA"),
            ("korean", "ko-KR"),
        ];
        for (language, code) in cases {
            assert_eq!(speech_language_code(&LanguageId::new(language)), code);
        }
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(speech_language_code(&LanguageId::new("klingon")), "en-US");
    }

    #[test]
    fn speech_rate_bounds() {
        assert_eq!(SpeechRate::default().value(), 0.8);
        assert!(SpeechRate::new(1.0).is_ok());
        assert_eq!(SpeechRate::new(0.0), Err(SpeechError::InvalidRate(0.0)));
        assert!(SpeechRate::new(f32::NAN).is_err());
        assert!(SpeechRate::new(11.0).is_err());
    }

    #[test]
    fn event_exposes_its_utterance() {
        let failed = SpeechEvent::Failed {
            utterance: UtteranceId::new(4),
            reason: "device lost".into(),
        };
        assert_eq!(failed.utterance(), UtteranceId::new(4));
        assert_eq!(SpeechEvent::Finished(UtteranceId::new(2)).utterance(), UtteranceId::new(2));
    }
}
