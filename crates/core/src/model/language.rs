use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{AudioCueId, LanguageId, LessonId};
use crate::model::lesson::Lesson;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LanguageError {
    #[error("language name cannot be empty")]
    EmptyName,

    #[error("duplicate lesson id {0}")]
    DuplicateLesson(LessonId),

    #[error("duplicate audio cue {0}")]
    DuplicateAudioCue(AudioCueId),
}

//
// ─── DISPLAY METADATA ──────────────────────────────────────────────────────────
//

/// Presentation hints carried alongside a language.
///
/// The core never interprets these values; they are handed to the
/// presentation layer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMeta {
    pub flag: String,
    pub accent_color: String,
}

impl DisplayMeta {
    #[must_use]
    pub fn new(flag: impl Into<String>, accent_color: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            accent_color: accent_color.into(),
        }
    }
}

//
// ─── LANGUAGE ──────────────────────────────────────────────────────────────────
//

/// A language offered by the catalog, with its ordered lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    id: LanguageId,
    name: String,
    display: DisplayMeta,
    lessons: Vec<Lesson>,
}

impl Language {
    /// Build a language from its lessons, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `LanguageError` when the name is blank or when two lessons
    /// share an id or an audio cue.
    pub fn new(
        id: LanguageId,
        name: impl Into<String>,
        display: DisplayMeta,
        lessons: Vec<Lesson>,
    ) -> Result<Self, LanguageError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(LanguageError::EmptyName);
        }

        let mut ids = HashSet::with_capacity(lessons.len());
        let mut cues = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !ids.insert(lesson.id()) {
                return Err(LanguageError::DuplicateLesson(lesson.id()));
            }
            if !cues.insert(lesson.audio()) {
                return Err(LanguageError::DuplicateAudioCue(lesson.audio().clone()));
            }
        }

        Ok(Self {
            id,
            name,
            display,
            lessons,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LanguageId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display(&self) -> &DisplayMeta {
        &self.display
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    #[must_use]
    pub fn lesson_by_cue(&self, cue: &AudioCueId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.audio() == cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: u32, audio: &str) -> Lesson {
        Lesson::new(
            LessonId::new(id),
            "Title",
            "Content",
            "Terjemahan",
            AudioCueId::new(audio),
            true,
        )
        .unwrap()
    }

    fn meta() -> DisplayMeta {
        DisplayMeta::new("🇬🇧", "#e74c3c")
    }

    #[test]
    fn language_keeps_lesson_order() {
        let language = Language::new(
            LanguageId::new("english"),
            " English ",
            meta(),
            vec![lesson(2, "b"), lesson(1, "a")],
        )
        .unwrap();

        assert_eq!(language.name(), "English");
        let ids: Vec<_> = language.lessons().iter().map(Lesson::id).collect();
        assert_eq!(ids, vec![LessonId::new(2), LessonId::new(1)]);
        assert_eq!(language.lesson(LessonId::new(1)).unwrap().audio().as_str(), "a");
        assert_eq!(
            language.lesson_by_cue(&AudioCueId::new("b")).unwrap().id(),
            LessonId::new(2)
        );
        assert!(language.lesson(LessonId::new(9)).is_none());
    }

    #[test]
    fn language_rejects_duplicates() {
        let err = Language::new(
            LanguageId::new("english"),
            "English",
            meta(),
            vec![lesson(1, "a"), lesson(1, "b")],
        )
        .unwrap_err();
        assert_eq!(err, LanguageError::DuplicateLesson(LessonId::new(1)));

        let err = Language::new(
            LanguageId::new("english"),
            "English",
            meta(),
            vec![lesson(1, "a"), lesson(2, "a")],
        )
        .unwrap_err();
        assert_eq!(err, LanguageError::DuplicateAudioCue(AudioCueId::new("a")));
    }

    #[test]
    fn language_rejects_blank_name() {
        let err = Language::new(LanguageId::new("x"), "  ", meta(), vec![]).unwrap_err();
        assert_eq!(err, LanguageError::EmptyName);
    }
}
