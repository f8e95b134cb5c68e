//! Static content catalog: the languages on offer and their ordered lessons.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::{
    AudioCueId, DisplayMeta, Language, LanguageError, LanguageId, Lesson, LessonError, LessonId,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("language not found: {0}")]
    LanguageNotFound(LanguageId),

    #[error("lesson {lesson} not found in {language}")]
    LessonNotFound {
        language: LanguageId,
        lesson: LessonId,
    },

    #[error("catalog must contain at least one language")]
    Empty,

    #[error("duplicate language id {0}")]
    DuplicateLanguage(LanguageId),

    #[error(transparent)]
    Language(#[from] LanguageError),

    #[error(transparent)]
    Lesson(#[from] LessonError),
}

impl CatalogError {
    /// True for lookups of ids the catalog does not know about.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LanguageNotFound(_) | Self::LessonNotFound { .. })
    }
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

/// Catalog-wide counts shown alongside the lesson list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub languages: usize,
    pub lessons: usize,
    pub free_lessons: usize,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only table of languages, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    languages: Vec<Language>,
}

impl Catalog {
    /// Build a catalog, keeping the given language order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list and
    /// `CatalogError::DuplicateLanguage` when two languages share an id.
    pub fn new(languages: Vec<Language>) -> Result<Self, CatalogError> {
        if languages.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(languages.len());
        for language in &languages {
            if !seen.insert(language.id()) {
                return Err(CatalogError::DuplicateLanguage(language.id().clone()));
            }
        }

        Ok(Self { languages })
    }

    /// The content shipped with the app: five languages, four lessons each.
    ///
    /// # Errors
    ///
    /// Only fails if the baked-in table is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        let languages = BUILTIN
            .iter()
            .map(BuiltinLanguage::build)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(languages)
    }

    /// Language ids in catalog order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.languages.iter().map(Language::id)
    }

    /// Full language records in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Language] {
        &self.languages
    }

    /// The default selection. A catalog always has at least one language.
    #[must_use]
    pub fn first_language(&self) -> &Language {
        &self.languages[0]
    }

    /// # Errors
    ///
    /// Returns `CatalogError::LanguageNotFound` for unknown ids.
    pub fn language(&self, id: &LanguageId) -> Result<&Language, CatalogError> {
        self.languages
            .iter()
            .find(|language| language.id() == id)
            .ok_or_else(|| CatalogError::LanguageNotFound(id.clone()))
    }

    /// # Errors
    ///
    /// Returns `CatalogError::LanguageNotFound` for unknown ids.
    pub fn lessons_of(&self, id: &LanguageId) -> Result<&[Lesson], CatalogError> {
        self.language(id).map(Language::lessons)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::LanguageNotFound` or `CatalogError::LessonNotFound`.
    pub fn lesson(&self, language: &LanguageId, lesson: LessonId) -> Result<&Lesson, CatalogError> {
        self.language(language)?
            .lesson(lesson)
            .ok_or_else(|| CatalogError::LessonNotFound {
                language: language.clone(),
                lesson,
            })
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let lessons = self.languages.iter().flat_map(Language::lessons);
        let (total, free) = lessons.fold((0, 0), |(total, free), lesson| {
            (total + 1, free + usize::from(lesson.is_free()))
        });

        CatalogStats {
            languages: self.languages.len(),
            lessons: total,
            free_lessons: free,
        }
    }
}

//
// ─── BUILT-IN CONTENT ──────────────────────────────────────────────────────────
//

struct BuiltinLesson {
    title: &'static str,
    content: &'static str,
    translation: &'static str,
    audio: &'static str,
}

struct BuiltinLanguage {
    id: &'static str,
    name: &'static str,
    flag: &'static str,
    color: &'static str,
    lessons: [BuiltinLesson; 4],
}

/// Lessons at or below this position are free.
const FREE_LESSONS: u32 = 2;

impl BuiltinLanguage {
    fn build(&self) -> Result<Language, CatalogError> {
        let lessons = (1u32..)
            .zip(&self.lessons)
            .map(|(id, lesson)| {
                Lesson::new(
                    LessonId::new(id),
                    lesson.title,
                    lesson.content,
                    lesson.translation,
                    AudioCueId::new(lesson.audio),
                    id <= FREE_LESSONS,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Language::new(
            LanguageId::new(self.id),
            self.name,
            DisplayMeta::new(self.flag, self.color),
            lessons,
        )?)
    }
}

const fn lesson(
    title: &'static str,
    content: &'static str,
    translation: &'static str,
    audio: &'static str,
) -> BuiltinLesson {
    BuiltinLesson {
        title,
        content,
        translation,
        audio,
    }
}

const BUILTIN: [BuiltinLanguage; 5] = [
    BuiltinLanguage {
        id: "english",
        name: "English",
        flag: "🇬🇧",
        color: "#e74c3c",
        lessons: [
            lesson("Greetings", "Hello", "Halo", "hello"),
            lesson("Basic Words", "Thank you", "Terima kasih", "thankyou"),
            lesson("Numbers", "One, Two, Three", "Satu, Dua, Tiga", "numbers"),
            lesson("Colors", "Red, Blue, Green", "Merah, Biru, Hijau", "colors"),
        ],
    },
    BuiltinLanguage {
        id: "japanese",
        name: "Japanese",
        flag: "🇯🇵",
        color: "#e84393",
        lessons: [
            lesson("Greetings", "こんにちは (Konnichiwa)", "Halo", "konnichiwa"),
            lesson("Basic Words", "ありがとう (Arigatou)", "Terima kasih", "arigatou"),
            lesson("Numbers", "一 (ichi), 二 (ni), 三 (san)", "Satu, Dua, Tiga", "jpnumbers"),
            lesson("Colors", "赤 (aka), 青 (ao), 緑 (midori)", "Merah, Biru, Hijau", "jpcolors"),
        ],
    },
    BuiltinLanguage {
        id: "russian",
        name: "Russian",
        flag: "🇷🇺",
        color: "#0984e3",
        lessons: [
            lesson("Greetings", "Привет (Privet)", "Halo", "privet"),
            lesson("Basic Words", "Спасибо (Spasibo)", "Terima kasih", "spasibo"),
            lesson("Numbers", "Один, Два, Три", "Satu, Dua, Tiga", "runumbers"),
            lesson("Colors", "Красный, Синий, Зелёный", "Merah, Biru, Hijau", "rucolors"),
        ],
    },
    BuiltinLanguage {
        id: "arabic",
        name: "Arabic",
        flag: "🇸🇦",
        color: "#00b894",
        lessons: [
            lesson("Greetings", "مرحبا (Marhaba)", "Halo", "marhaba"),
            lesson("Basic Words", "شكرا (Shukran)", "Terima kasih", "shukran"),
            lesson("Numbers", "واحد، اثنان، ثلاثة", "Satu, Dua, Tiga", "arnumbers"),
            lesson("Colors", "أحمر، أزرق، أخضر", "Merah, Biru, Hijau", "arcolors"),
        ],
    },
    BuiltinLanguage {
        id: "korean",
        name: "Korean",
        flag: "🇰🇷",
        color: "#6c5ce7",
        lessons: [
            lesson("Greetings", "안녕하세요 (Annyeonghaseyo)", "Halo", "annyeong"),
            lesson("Basic Words", "감사합니다 (Gamsahamnida)", "Terima kasih", "gamsa"),
            lesson("Numbers", "하나 (hana), 둘 (dul), 셋 (set)", "Satu, Dua, Tiga", "krnumbers"),
            lesson(
                "Colors",
                "빨강 (ppalgang), 파랑 (parang), 초록 (chorok)",
                "Merah, Biru, Hijau",
                "krcolors",
            ),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> LanguageId {
        LanguageId::new("english")
    }

    #[test]
    fn builtin_catalog_has_five_languages_in_order() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.languages().map(LanguageId::as_str).collect();

        assert_eq!(ids, ["english", "japanese", "russian", "arabic", "korean"]);
        assert_eq!(catalog.first_language().id(), &english());
    }

    #[test]
    fn builtin_lessons_gate_the_second_half() {
        let catalog = Catalog::builtin().unwrap();
        for language in catalog.all() {
            let free: Vec<bool> = language.lessons().iter().map(Lesson::is_free).collect();
            assert_eq!(free, [true, true, false, false], "{}", language.id());
        }

        let korean = catalog.language(&LanguageId::new("korean")).unwrap();
        assert_eq!(korean.display().flag, "🇰🇷");
        assert_eq!(korean.display().accent_color, "#6c5ce7");
    }

    #[test]
    fn lessons_of_unknown_language_is_not_found() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.lessons_of(&LanguageId::new("klingon")).unwrap_err();

        assert_eq!(err, CatalogError::LanguageNotFound(LanguageId::new("klingon")));
        assert!(err.is_not_found());
    }

    #[test]
    fn lesson_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let lesson = catalog.lesson(&english(), LessonId::new(3)).unwrap();
        assert_eq!(lesson.content(), "One, Two, Three");
        assert_eq!(lesson.audio().as_str(), "numbers");

        let err = catalog.lesson(&english(), LessonId::new(9)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::LessonNotFound {
                language: english(),
                lesson: LessonId::new(9),
            }
        );
    }

    #[test]
    fn catalog_rejects_empty_and_duplicates() {
        assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);

        let language =
            Language::new(english(), "English", DisplayMeta::new("", ""), vec![]).unwrap();
        let err = Catalog::new(vec![language.clone(), language]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLanguage(english()));
    }

    #[test]
    fn stats_count_every_language() {
        let stats = Catalog::builtin().unwrap().stats();
        assert_eq!(
            stats,
            CatalogStats {
                languages: 5,
                lessons: 20,
                free_lessons: 10,
            }
        );
    }
}
