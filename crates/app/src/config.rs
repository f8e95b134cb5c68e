use std::fmt;

use lingua_core::model::LanguageId;
use services::SpeechRate;

use crate::logging::DEFAULT_LOG_FILTER;

#[derive(Debug, PartialEq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLanguage { raw: String },
    InvalidSpeechRate { raw: String },
    InvalidPremium { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLanguage { raw } => write!(f, "invalid language: {raw}"),
            ArgsError::InvalidSpeechRate { raw } => {
                write!(
                    f,
                    "invalid speech rate: {raw} (expected {}..={})",
                    SpeechRate::MIN,
                    SpeechRate::MAX
                )
            }
            ArgsError::InvalidPremium { raw } => write!(f, "invalid LINGUA_PREMIUM value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

pub fn usage() -> String {
    format!(
        "\
Usage:
  cargo run -p app -- [--language <id>] [--speech-rate <rate>] [--premium] [--log <filter>]

Defaults:
  --language english
  --speech-rate 0.8
  --log {DEFAULT_LOG_FILTER}

Environment:
  LINGUA_LANGUAGE, LINGUA_SPEECH_RATE, LINGUA_PREMIUM, LINGUA_LOG"
    )
}

/// Startup settings for the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub language: LanguageId,
    pub speech_rate: SpeechRate,
    pub premium: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: LanguageId::new("english"),
            speech_rate: SpeechRate::default(),
            premium: false,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Resolved {
    Run(Settings),
    Help,
}

impl Settings {
    /// Layer defaults, then environment, then command-line flags.
    ///
    /// `env` is a lookup so callers decide where variables come from.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> Result<Resolved, ArgsError> {
        let mut settings = Settings::default();

        if let Some(raw) = env("LINGUA_LANGUAGE") {
            settings.language = parse_language(raw)?;
        }
        if let Some(raw) = env("LINGUA_SPEECH_RATE") {
            settings.speech_rate = parse_rate(raw)?;
        }
        if let Some(raw) = env("LINGUA_PREMIUM") {
            settings.premium = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(ArgsError::InvalidPremium { raw }),
            };
        }
        if let Some(raw) = env("LINGUA_LOG") {
            settings.log_filter = raw;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--language" | "-l" => {
                    settings.language = parse_language(require_value(&mut args, "--language")?)?;
                }
                "--speech-rate" => {
                    settings.speech_rate = parse_rate(require_value(&mut args, "--speech-rate")?)?;
                }
                "--premium" => settings.premium = true,
                "--log" => settings.log_filter = require_value(&mut args, "--log")?,
                "--help" | "-h" => return Ok(Resolved::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Resolved::Run(settings))
    }
}

fn parse_language(raw: String) -> Result<LanguageId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidLanguage { raw })
}

fn parse_rate(raw: String) -> Result<SpeechRate, ArgsError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .and_then(|rate| SpeechRate::new(rate).ok())
        .ok_or(ArgsError::InvalidSpeechRate { raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(env: &[(&str, &str)], args: &[&str]) -> Result<Resolved, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Settings::resolve(
            |key| env.get(key).cloned(),
            args.iter().map(|arg| (*arg).to_owned()),
        )
    }

    fn run(env: &[(&str, &str)], args: &[&str]) -> Settings {
        match resolve(env, args).unwrap() {
            Resolved::Run(settings) => settings,
            Resolved::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults_without_env_or_args() {
        assert_eq!(run(&[], &[]), Settings::default());
    }

    #[test]
    fn flags_override_environment() {
        let settings = run(
            &[("LINGUA_LANGUAGE", "korean"), ("LINGUA_SPEECH_RATE", "1.2")],
            &["--language", "Japanese", "--premium"],
        );

        assert_eq!(settings.language, LanguageId::new("japanese"));
        assert_eq!(settings.speech_rate, SpeechRate::new(1.2).unwrap());
        assert!(settings.premium);
    }

    #[test]
    fn environment_sets_premium_and_log() {
        let settings = run(&[("LINGUA_PREMIUM", "yes"), ("LINGUA_LOG", "debug")], &[]);
        assert!(settings.premium);
        assert_eq!(settings.log_filter, "debug");

        let err = resolve(&[("LINGUA_PREMIUM", "maybe")], &[]).unwrap_err();
        assert_eq!(err, ArgsError::InvalidPremium { raw: "maybe".into() });
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            resolve(&[], &["--speech-rate", "fast"]).unwrap_err(),
            ArgsError::InvalidSpeechRate { raw: "fast".into() }
        );
        assert_eq!(
            resolve(&[], &["--speech-rate", "0"]).unwrap_err(),
            ArgsError::InvalidSpeechRate { raw: "0".into() }
        );
        assert_eq!(
            resolve(&[], &["--language"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--language" }
        );
        assert_eq!(
            resolve(&[], &["--verbose"]).unwrap_err(),
            ArgsError::UnknownArg("--verbose".into())
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(resolve(&[], &["--premium", "-h"]).unwrap(), Resolved::Help);
    }
}
