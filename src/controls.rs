//! Interactive control declarations and value validation.
//!
//! A control is declared once in the catalog and read by the observation
//! resolver. Values arrive from the presentation layer already typed; this
//! module only checks that they sit inside the declared domain and never
//! clamps or guesses a nearby value.

use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Current control values for one experiment, keyed by control key
pub type ControlValues = BTreeMap<String, ControlValue>;

/// Domain of a single control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    /// Dropdown with exactly one selected option
    Choice { options: Vec<String> },
    /// Slider over `[min, max]` moving in `step` increments
    Integer {
        min: i64,
        max: i64,
        step: i64,
        default: i64,
    },
    /// Ordered multi-select limited to `max_selections` entries
    MultiChoice {
        options: Vec<String>,
        max_selections: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlSpec {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: ControlKind,
}

/// A control value as delivered by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Integer(i64),
    Choice(String),
    Selection(Vec<String>),
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Integer(n) => write!(f, "{n}"),
            ControlValue::Choice(s) => write!(f, "{s}"),
            ControlValue::Selection(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<i64> for ControlValue {
    fn from(n: i64) -> Self {
        ControlValue::Integer(n)
    }
}

impl From<&str> for ControlValue {
    fn from(s: &str) -> Self {
        ControlValue::Choice(s.to_string())
    }
}

impl From<Vec<&str>> for ControlValue {
    fn from(items: Vec<&str>) -> Self {
        ControlValue::Selection(items.into_iter().map(str::to_string).collect())
    }
}

impl ControlSpec {
    pub fn choice(key: &str, label: &str, options: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ControlKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    pub fn integer(key: &str, label: &str, min: i64, max: i64, step: i64, default: i64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ControlKind::Integer {
                min,
                max,
                step,
                default,
            },
        }
    }

    pub fn multi_choice(key: &str, label: &str, options: &[&str], max_selections: usize) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ControlKind::MultiChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                max_selections,
            },
        }
    }

    /// Declared options for choice-like controls
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            ControlKind::Choice { options } | ControlKind::MultiChoice { options, .. } => {
                Some(options)
            }
            ControlKind::Integer { .. } => None,
        }
    }

    /// Value a fresh session starts from
    pub fn default_value(&self) -> ControlValue {
        match &self.kind {
            ControlKind::Choice { options } => {
                ControlValue::Choice(options.first().cloned().unwrap_or_default())
            }
            ControlKind::Integer { default, .. } => ControlValue::Integer(*default),
            ControlKind::MultiChoice { .. } => ControlValue::Selection(Vec::new()),
        }
    }

    /// Check the declaration itself (used while building the catalog)
    pub fn check_declaration(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(LabError::integrity("control key must not be empty"));
        }
        match &self.kind {
            ControlKind::Choice { options } => check_options(&self.key, options),
            ControlKind::MultiChoice {
                options,
                max_selections,
            } => {
                check_options(&self.key, options)?;
                if *max_selections == 0 || *max_selections > options.len() {
                    return Err(LabError::integrity(format!(
                        "control '{}': max_selections {} outside 1..={}",
                        self.key,
                        max_selections,
                        options.len()
                    )));
                }
                Ok(())
            }
            ControlKind::Integer {
                min,
                max,
                step,
                default,
            } => {
                if *step <= 0 {
                    return Err(LabError::integrity(format!(
                        "control '{}': step must be positive, got {}",
                        self.key, step
                    )));
                }
                if min > max || default < min || default > max {
                    return Err(LabError::integrity(format!(
                        "control '{}': expected min <= default <= max, got {min} <= {default} <= {max}",
                        self.key
                    )));
                }
                if (max - min) % step != 0 || (default - min) % step != 0 {
                    return Err(LabError::integrity(format!(
                        "control '{}': range {min}..={max} and default {default} must align with step {step}",
                        self.key
                    )));
                }
                Ok(())
            }
        }
    }

    /// Validate a value against this control's domain
    pub fn validate(&self, value: &ControlValue) -> Result<()> {
        match (&self.kind, value) {
            (ControlKind::Choice { options }, ControlValue::Choice(choice)) => {
                if options.iter().any(|o| o == choice) {
                    Ok(())
                } else {
                    Err(self.unknown_option(choice, options))
                }
            }
            (
                ControlKind::Integer {
                    min, max, step, ..
                },
                ControlValue::Integer(n),
            ) => {
                if n < min || n > max {
                    return Err(LabError::invalid_value(
                        &self.key,
                        n.to_string(),
                        format!("outside range {min}..={max}"),
                    ));
                }
                if (n - min) % step != 0 {
                    return Err(LabError::invalid_value(
                        &self.key,
                        n.to_string(),
                        format!("not reachable from {min} in steps of {step}"),
                    ));
                }
                Ok(())
            }
            (
                ControlKind::MultiChoice {
                    options,
                    max_selections,
                },
                ControlValue::Selection(items),
            ) => {
                if items.len() > *max_selections {
                    return Err(LabError::invalid_value(
                        &self.key,
                        value.to_string(),
                        format!("at most {max_selections} selections allowed"),
                    ));
                }
                match items.iter().find(|item| !options.contains(*item)) {
                    Some(unknown) => Err(self.unknown_option(unknown, options)),
                    None => Ok(()),
                }
            }
            (kind, other) => Err(LabError::invalid_value(
                &self.key,
                other.to_string(),
                format!("expected {}", kind_name(kind)),
            )),
        }
    }

    /// Parse a raw textual value (CLI `key=value`) into this control's value type
    pub fn parse_value(&self, raw: &str) -> Result<ControlValue> {
        let raw = raw.trim();
        match &self.kind {
            ControlKind::Integer { .. } => raw
                .parse::<i64>()
                .map(ControlValue::Integer)
                .map_err(|_| LabError::invalid_value(&self.key, raw, "expected an integer")),
            ControlKind::Choice { .. } => Ok(ControlValue::Choice(raw.to_string())),
            ControlKind::MultiChoice { .. } => Ok(ControlValue::Selection(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
        }
    }

    /// Next value when the control is nudged forward or backward.
    ///
    /// Choices wrap around, integers stop at the range ends. Multi-choice
    /// controls are changed through [`ControlSpec::toggle`] instead.
    pub fn nudge(&self, current: &ControlValue, forward: bool) -> ControlValue {
        match (&self.kind, current) {
            (ControlKind::Choice { options }, ControlValue::Choice(choice)) => {
                let len = options.len();
                if len == 0 {
                    return current.clone();
                }
                let idx = options.iter().position(|o| o == choice).unwrap_or(0);
                let next = if forward {
                    (idx + 1) % len
                } else {
                    (idx + len - 1) % len
                };
                ControlValue::Choice(options[next].clone())
            }
            (
                ControlKind::Integer {
                    min, max, step, ..
                },
                ControlValue::Integer(n),
            ) => {
                let next = if forward { n + step } else { n - step };
                ControlValue::Integer(next.clamp(*min, *max))
            }
            _ => current.clone(),
        }
    }

    /// Add or remove one option from a multi-choice selection, keeping order.
    /// Adding beyond `max_selections` drops the oldest entry.
    pub fn toggle(&self, current: &ControlValue, option: &str) -> ControlValue {
        let ControlKind::MultiChoice {
            options,
            max_selections,
        } = &self.kind
        else {
            return current.clone();
        };
        if !options.iter().any(|o| o == option) {
            return current.clone();
        }
        let mut items = match current {
            ControlValue::Selection(items) => items.clone(),
            _ => Vec::new(),
        };
        if let Some(pos) = items.iter().position(|i| i == option) {
            items.remove(pos);
        } else {
            items.push(option.to_string());
            while items.len() > *max_selections {
                items.remove(0);
            }
        }
        ControlValue::Selection(items)
    }

    fn unknown_option(&self, given: &str, options: &[String]) -> LabError {
        let mut reason = format!("expected one of: {}", options.join(", "));
        if let Some(closest) = closest_option(given, options) {
            reason.push_str(&format!(". Did you mean '{closest}'?"));
        }
        LabError::invalid_value(&self.key, given, reason)
    }
}

fn kind_name(kind: &ControlKind) -> &'static str {
    match kind {
        ControlKind::Choice { .. } => "a single option",
        ControlKind::Integer { .. } => "an integer",
        ControlKind::MultiChoice { .. } => "a list of options",
    }
}

fn check_options(key: &str, options: &[String]) -> Result<()> {
    if options.is_empty() {
        return Err(LabError::integrity(format!(
            "control '{key}' declares no options"
        )));
    }
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(LabError::integrity(format!(
                "control '{key}' declares option '{option}' twice"
            )));
        }
    }
    Ok(())
}

/// Closest declared option by edit distance, only when reasonably close
fn closest_option<'a>(input: &str, options: &'a [String]) -> Option<&'a str> {
    let input = input.to_lowercase();
    options
        .iter()
        .map(|o| (o.as_str(), strsim::levenshtein(&input, &o.to_lowercase())))
        .min_by_key(|(_, dist)| *dist)
        .and_then(|(o, dist)| if dist < 4 { Some(o) } else { None })
}
