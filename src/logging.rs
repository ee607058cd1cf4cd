//! Structured logging setup
//!
//! Installs a global `tracing` subscriber. Library code only emits events;
//! the host application decides whether and how they are printed.

use std::env;
use std::fmt;
use std::io;
use std::str::FromStr;

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CoachError;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  /// Multi-line, human readable
  #[default]
  Pretty,
  /// One line per event
  Compact,
  /// Machine readable
  Json,
}

impl fmt::Display for LogFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      LogFormat::Pretty => "pretty",
      LogFormat::Compact => "compact",
      LogFormat::Json => "json",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for LogFormat {
  type Err = CoachError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pretty" => Ok(LogFormat::Pretty),
      "compact" => Ok(LogFormat::Compact),
      "json" => Ok(LogFormat::Json),
      _ => Err(CoachError::InvalidConfig(format!("Unknown log format: {}", s))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
  /// Level for this crate's events (trace, debug, info, warn, error)
  pub level: String,
  pub format: LogFormat,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      format: LogFormat::Pretty,
    }
  }
}

impl LoggingConfig {
  /// Read `RUST_LOG` and `LOG_FORMAT`, falling back to defaults
  pub fn from_env() -> Result<Self, CoachError> {
    let defaults = Self::default();

    let level = env::var("RUST_LOG")
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or(defaults.level);

    let format = match env::var("LOG_FORMAT") {
      Ok(v) if !v.trim().is_empty() => v.trim().parse()?,
      _ => defaults.format,
    };

    Ok(Self { level, format })
  }

  fn env_filter(&self) -> EnvFilter {
    EnvFilter::new(format!("warn,lift_coach={}", self.level)).add_directive(
      "sqlx=warn"
        .parse()
        .unwrap_or_else(|_| tracing::Level::WARN.into()),
    )
  }

  /// Install the global subscriber.
  ///
  /// A subscriber that is already installed is left in place.
  pub fn init(&self) -> Result<(), CoachError> {
    let registry = tracing_subscriber::registry().with(self.env_filter());

    let installed = match self.format {
      LogFormat::Json => registry
        .with(
          tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stdout),
        )
        .try_init(),
      LogFormat::Pretty => registry
        .with(
          tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(io::stdout),
        )
        .try_init(),
      LogFormat::Compact => registry
        .with(
          tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(io::stdout),
        )
        .try_init(),
    };

    match installed {
      Ok(()) => {
        info!(level = %self.level, format = %self.format, "Logging initialized");
      }
      Err(e) => {
        debug!(error = %e, "Global subscriber already installed");
      }
    }

    Ok(())
  }
}
