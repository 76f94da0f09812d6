//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the scheduling
//! service. Nothing in the core reads environment variables or locale state while answering
//! a request; callers resolve those values up front with the helpers in this module.

use crate::constants::DEFAULT_FIRST_DAY_OF_WEEK;
use crate::transition::{TerminalSelfTransition, TransitionPolicy};
use crate::{CoreError, CoreResult};
use chrono::Weekday;
use serde::Deserialize;
use std::path::Path;

/// Core configuration resolved at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    first_day_of_week: Weekday,
    terminal_self_transition: TerminalSelfTransition,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_DAY_OF_WEEK, TerminalSelfTransition::default())
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(first_day_of_week: Weekday, terminal_self_transition: TerminalSelfTransition) -> Self {
        Self {
            first_day_of_week,
            terminal_self_transition,
        }
    }

    /// Parse a configuration from YAML text.
    ///
    /// Both keys are optional; missing keys keep their defaults. Unknown keys are rejected.
    ///
    /// ```yaml
    /// first_day_of_week: monday   # a weekday name, or 0-6 with Sunday = 0
    /// terminal_self_transition: blocked
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] naming the offending field if the YAML does not match
    /// the schema or a value cannot be interpreted.
    pub fn parse(yaml_text: &str) -> CoreResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, ConfigWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CoreError::Config(format!(
                    "configuration schema mismatch at {path}: {source}"
                )));
            }
        };

        let first_day_of_week = match wire.first_day_of_week {
            Some(WeekdayWire::Number(n)) => weekday_from_number(n)?,
            Some(WeekdayWire::Name(name)) => parse_weekday(&name)?,
            None => DEFAULT_FIRST_DAY_OF_WEEK,
        };

        Ok(Self::new(
            first_day_of_week,
            wire.terminal_self_transition.unwrap_or_default(),
        ))
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration file");
        Ok(config)
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub fn terminal_self_transition(&self) -> TerminalSelfTransition {
        self.terminal_self_transition
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        TransitionPolicy::new(self.terminal_self_transition)
    }

    pub fn with_first_day_of_week(mut self, first_day_of_week: Weekday) -> Self {
        self.first_day_of_week = first_day_of_week;
        self
    }

    pub fn with_terminal_self_transition(mut self, policy: TerminalSelfTransition) -> Self {
        self.terminal_self_transition = policy;
        self
    }
}

/// Parse a weekday given either by name (`sun`, `Monday`, ...) or by number with Sunday = 0.
pub fn parse_weekday(value: &str) -> CoreResult<Weekday> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u8>() {
        return weekday_from_number(n);
    }
    value
        .parse::<Weekday>()
        .map_err(|_| CoreError::Config(format!("unrecognised weekday: {value:?}")))
}

/// Parse the first day of week from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default (Sunday).
pub fn first_day_of_week_from_env_value(value: Option<String>) -> CoreResult<Weekday> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| parse_weekday(&v)).transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_FIRST_DAY_OF_WEEK))
}

/// Parse the terminal self-transition policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`TerminalSelfTransition::Blocked`].
pub fn terminal_self_transition_from_env_value(
    value: Option<String>,
) -> CoreResult<TerminalSelfTransition> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| v.parse::<TerminalSelfTransition>())
        .transpose()?;

    Ok(parsed.unwrap_or_default())
}

fn weekday_from_number(n: u8) -> CoreResult<Weekday> {
    if n > 6 {
        return Err(CoreError::Config(format!(
            "weekday number must be 0-6 (Sunday = 0), got {n}"
        )));
    }
    Ok((0..n).fold(Weekday::Sun, |day, _| day.succ()))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigWire {
    #[serde(default)]
    first_day_of_week: Option<WeekdayWire>,
    #[serde(default)]
    terminal_self_transition: Option<TerminalSelfTransition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeekdayWire {
    Number(u8),
    Name(String),
}
