mod controller;
mod state;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{ActionOutcome, DeclineReason, SessionController};
pub use state::SessionState;
pub use view::{LanguageTab, LessonView, PlanView, SessionView};
