use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{AudioCueId, LessonId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson content cannot be empty")]
    EmptyContent,

    #[error("lesson audio cue cannot be empty")]
    EmptyAudioCue,
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// One unit of content: a phrase in the target language, its translation,
/// and the cue used to speak it aloud.
///
/// Lessons are immutable once built. `free` decides whether the lesson is
/// reachable without a premium subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    content: String,
    translation: String,
    audio: AudioCueId,
    free: bool,
}

impl Lesson {
    /// Build a lesson, trimming the title.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` when the title, content, or audio cue is blank.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        content: impl Into<String>,
        translation: impl Into<String>,
        audio: AudioCueId,
        free: bool,
    ) -> Result<Self, LessonError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }

        let content = content.into();
        if content.trim().is_empty() {
            return Err(LessonError::EmptyContent);
        }

        if audio.as_str().trim().is_empty() {
            return Err(LessonError::EmptyAudioCue);
        }

        Ok(Self {
            id,
            title,
            content,
            translation: translation.into(),
            audio,
            free,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The target-language phrase; this is the text handed to speech.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn audio(&self) -> &AudioCueId {
        &self.audio
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.free
    }
}
