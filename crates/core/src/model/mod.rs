mod ids;
mod language;
mod lesson;
pub mod progress;
mod subscription;

pub use ids::{AudioCueId, LanguageId, LessonId, ParseIdError};

pub use language::{DisplayMeta, Language, LanguageError};
pub use lesson::{Lesson, LessonError};
pub use progress::{LanguageProgress, ProgressSet};
pub use subscription::{BillingPeriod, PlanOffer, SubscriptionPlan, SubscriptionState, plan_offers};
