use std::fmt::{self, Write as _};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use lingua_core::model::{LanguageId, LessonId, SubscriptionPlan};
use services::{ActionOutcome, DeclineReason, SessionController, SessionView, SpeechEvent};

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Languages,
    Select(LanguageId),
    Plans,
    Upgrade(Option<SubscriptionPlan>),
    Play(LessonId),
    Complete(LessonId),
    Stop,
    View { json: bool },
    Stats,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument { command: &'static str },
    InvalidLesson(String),
    InvalidPlan(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try `help`)"),
            CommandError::MissingArgument { command } => {
                write!(f, "{command} requires an argument")
            }
            CommandError::InvalidLesson(raw) => write!(f, "invalid lesson id: {raw}"),
            CommandError::InvalidPlan(raw) => {
                write!(f, "unknown plan: {raw} (monthly, yearly, lifetime)")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();

        let lesson = |command: &'static str| -> Result<LessonId, CommandError> {
            let raw = arg.ok_or(CommandError::MissingArgument { command })?;
            raw.parse()
                .map_err(|_| CommandError::InvalidLesson(raw.to_owned()))
        };

        match head.to_ascii_lowercase().as_str() {
            "languages" | "ls" => Ok(Self::Languages),
            "select" | "lang" => {
                let raw = arg.ok_or(CommandError::MissingArgument { command: "select" })?;
                Ok(Self::Select(LanguageId::new(raw.to_ascii_lowercase())))
            }
            "plans" => Ok(Self::Plans),
            "upgrade" => match arg {
                None => Ok(Self::Upgrade(None)),
                Some(raw) => SubscriptionPlan::parse(raw)
                    .map(|plan| Self::Upgrade(Some(plan)))
                    .ok_or_else(|| CommandError::InvalidPlan(raw.to_owned())),
            },
            "play" => lesson("play").map(Self::Play),
            "complete" | "done" => lesson("complete").map(Self::Complete),
            "stop" => Ok(Self::Stop),
            "view" => Ok(Self::View {
                json: arg.is_some_and(|a| a.eq_ignore_ascii_case("json")),
            }),
            "stats" => Ok(Self::Stats),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

//
// ─── EXECUTION ─────────────────────────────────────────────────────────────────
//

pub enum Flow {
    Continue(String),
    Quit,
}

const HELP: &str = "\
commands:
  languages               list languages
  select <language>       switch language
  plans                   show subscription plans
  upgrade [plan]          unlock premium lessons
  play <lesson>           speak a lesson
  complete <lesson>       mark a lesson as done
  stop                    stop speaking
  view [json]             show lessons and progress
  stats                   catalog totals
  quit";

fn describe(outcome: ActionOutcome, performed: &str) -> String {
    match outcome {
        ActionOutcome::Performed => performed.to_owned(),
        ActionOutcome::Declined(DeclineReason::Locked) => {
            "locked: upgrade to premium to unlock".to_owned()
        }
        ActionOutcome::Declined(DeclineReason::AlreadyCompleted) => "already completed".to_owned(),
        ActionOutcome::Declined(DeclineReason::AlreadyPremium) => "already premium".to_owned(),
        ActionOutcome::Declined(DeclineReason::NothingPlaying) => "nothing playing".to_owned(),
        ActionOutcome::Declined(DeclineReason::SpeechUnavailable) => {
            "speech is unavailable".to_owned()
        }
    }
}

/// Apply one command to the session and produce the text to print.
pub fn execute(session: &mut SessionController, command: Command) -> Flow {
    let output = match command {
        Command::Quit => return Flow::Quit,
        Command::Help => HELP.to_owned(),
        Command::Languages => {
            let view = session.current_view();
            let mut out = String::new();
            for tab in &view.languages {
                let marker = if tab.selected { '*' } else { ' ' };
                let _ = writeln!(out, "{marker} {} {} ({})", tab.display.flag, tab.name, tab.id);
            }
            out.trim_end().to_owned()
        }
        Command::Select(id) => match session.select_language(&id) {
            Ok(()) => render_view(&session.current_view()),
            Err(err) => err.to_string(),
        },
        Command::Plans => {
            let mut out = String::new();
            for plan in session.plans() {
                let _ = write!(
                    out,
                    "{:<9} {:<13} Rp {}",
                    plan.offer.plan.as_str(),
                    plan.offer.name,
                    plan.offer.price_idr
                );
                if plan.offer.popular {
                    out.push_str("  [popular]");
                }
                if let Some(saved) = plan.savings_percent {
                    let _ = write!(out, "  save {saved}%");
                }
                if plan.active {
                    out.push_str("  (active)");
                }
                out.push('\n');
            }
            out.trim_end().to_owned()
        }
        Command::Upgrade(plan) => {
            let outcome = match plan {
                Some(plan) => session.upgrade_with_plan(plan),
                None => session.upgrade_to_premium(),
            };
            describe(outcome, "premium active: all lessons unlocked")
        }
        Command::Play(lesson) => match session.request_play(lesson) {
            Ok(outcome) => describe(outcome, "playing..."),
            Err(err) => err.to_string(),
        },
        Command::Complete(lesson) => match session.request_complete(lesson) {
            Ok(outcome) => {
                let progress = session.current_view().progress;
                let done = format!(
                    "completed ({}/{}, {}%)",
                    progress.completed,
                    progress.total,
                    progress.whole_percent()
                );
                describe(outcome, &done)
            }
            Err(err) => err.to_string(),
        },
        Command::Stop => describe(session.stop_playback(), "stopped"),
        Command::View { json: false } => render_view(&session.current_view()),
        Command::View { json: true } => serde_json::to_string_pretty(&session.current_view())
            .unwrap_or_else(|err| format!("failed to encode view: {err}")),
        Command::Stats => {
            let stats = session.catalog().stats();
            format!(
                "{} languages, {} lessons ({} free)",
                stats.languages, stats.lessons, stats.free_lessons
            )
        }
    };
    Flow::Continue(output)
}

pub fn render_view(view: &SessionView) -> String {
    let mut out = String::new();
    let tier = if view.is_premium { "premium" } else { "free" };
    let _ = writeln!(
        out,
        "{} [{tier}] progress {}/{} ({}%)",
        view.selected,
        view.progress.completed,
        view.progress.total,
        view.progress.whole_percent()
    );
    for item in &view.lessons {
        let status = match (item.locked, item.completed) {
            (true, _) => "locked",
            (false, true) => "done",
            (false, false) => "open",
        };
        let playing = if item.playing { "  ♪" } else { "" };
        let _ = writeln!(
            out,
            "  {}. {:<12} {:<6} {} = {}{playing}",
            item.lesson.id(),
            item.lesson.title(),
            status,
            item.lesson.content(),
            item.lesson.translation()
        );
    }
    out.trim_end().to_owned()
}

//
// ─── LOOP ──────────────────────────────────────────────────────────────────────
//

/// Read commands from stdin until `quit` or EOF, applying speech events as
/// they arrive in between.
pub async fn run(
    mut session: SessionController,
    mut events: mpsc::UnboundedReceiver<SpeechEvent>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render_view(&session.current_view()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                match Command::parse(&line) {
                    Ok(command) => match execute(&mut session, command) {
                        Flow::Continue(output) => println!("{output}"),
                        Flow::Quit => break,
                    },
                    Err(CommandError::Empty) => {}
                    Err(err) => println!("{err}"),
                }
            }
            Some(event) = events.recv() => {
                if session.on_speech_event(&event) {
                    println!("(finished speaking)");
                }
            }
        }
    }

    if session.stop_playback().is_performed() {
        debug!("stopped playback on exit");
    }
    Ok(())
}
