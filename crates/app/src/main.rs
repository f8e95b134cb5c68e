mod config;
mod driver;
mod logging;
mod speech;

use std::error::Error;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use lingua_core::Catalog;
use services::{Clock, PlaybackCoordinator, SessionController};

use config::{ArgsError, Resolved, Settings, usage};
use speech::SimulatedSpeech;

async fn run() -> Result<(), Box<dyn Error>> {
    let resolved = Settings::resolve(|key| std::env::var(key).ok(), std::env::args().skip(1))?;
    let settings = match resolved {
        Resolved::Help => {
            eprintln!("{}", usage());
            return Ok(());
        }
        Resolved::Run(settings) => settings,
    };

    logging::init_tracing(&settings.log_filter);

    let catalog = Arc::new(Catalog::builtin()?);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let playback = PlaybackCoordinator::new(Box::new(SimulatedSpeech::new(events_tx)))
        .with_rate(settings.speech_rate);

    let mut session = SessionController::new(catalog, playback, Clock::system());
    session.select_language(&settings.language)?;
    if settings.premium {
        session.upgrade_to_premium();
    }
    info!(
        language = %settings.language,
        premium = settings.premium,
        rate = settings.speech_rate.value(),
        "session ready"
    );

    driver::run(session, events_rx).await?;
    Ok(())
}

/// What `main` prints for a failed run: the error, followed by usage when the
/// command line was at fault.
fn failure_report(err: &(dyn Error + 'static)) -> String {
    if err.is::<ArgsError>() {
        format!("{err}\n\n{}", usage())
    } else {
        err.to_string()
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{}", failure_report(err.as_ref()));
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::CatalogError;
    use lingua_core::model::LanguageId;
    use services::SessionError;

    #[test]
    fn argument_error_is_reported_once_with_usage() {
        let err: Box<dyn Error> = Box::new(ArgsError::InvalidSpeechRate { raw: "fast".into() });

        let report = failure_report(err.as_ref());

        assert_eq!(report.matches("invalid speech rate: fast").count(), 1);
        assert!(report.starts_with("invalid speech rate: fast"));
        assert_eq!(report.matches("Usage:").count(), 1);
    }

    #[test]
    fn session_error_is_reported_without_usage() {
        let err: Box<dyn Error> = Box::new(SessionError::NotFound(
            CatalogError::LanguageNotFound(LanguageId::new("klingon")),
        ));

        assert_eq!(failure_report(err.as_ref()), "language not found: klingon");
    }
}
