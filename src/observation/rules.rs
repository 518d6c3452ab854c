//! Observation decision tables.
//!
//! Each experiment groups its rules into panels. A panel owns one primary
//! rule plus optional caveats, and consumes a fixed set of control keys.

use super::{Emphasis, Observation};
use crate::controls::{ControlKind, ControlSpec, ControlValue, ControlValues};
use crate::error::{LabError, Result};
use std::collections::{HashMap, HashSet};

/// One row of a choice table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub option: &'static str,
    pub text: &'static str,
}

/// Inclusive integer range `lo..=hi` mapped to one branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    pub lo: i64,
    pub hi: i64,
    pub text: &'static str,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Fixed sentence per declared option
    Choice {
        key: &'static str,
        entries: Vec<ChoiceEntry>,
        emphasis: Emphasis,
    },
    /// Integer bins partitioning the control range
    Bins { key: &'static str, bins: Vec<Bin> },
    /// Sentence naming the chosen option in lower case (`{option}`)
    Template {
        key: &'static str,
        template: &'static str,
        emphasis: Emphasis,
    },
    /// Two distinct selections named in order (`{first}`, `{second}`),
    /// otherwise the prompt
    Pair {
        key: &'static str,
        template: &'static str,
        prompt: &'static str,
        emphasis: Emphasis,
    },
}

/// Sentence appended to the primary text with an integer interpolated (`{value}`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caveat {
    pub key: &'static str,
    pub template: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: &'static str,
    pub rule: Rule,
    pub caveats: Vec<Caveat>,
}

impl Rule {
    pub fn key(&self) -> &'static str {
        match self {
            Rule::Choice { key, .. }
            | Rule::Bins { key, .. }
            | Rule::Template { key, .. }
            | Rule::Pair { key, .. } => *key,
        }
    }

    fn apply(&self, value: &ControlValue) -> Result<(String, Emphasis)> {
        match (self, value) {
            (
                Rule::Choice {
                    key,
                    entries,
                    emphasis,
                },
                ControlValue::Choice(choice),
            ) => entries
                .iter()
                .find(|e| e.option == choice.as_str())
                .map(|e| (e.text.to_string(), *emphasis))
                .ok_or_else(|| uncovered(key, value)),
            (Rule::Bins { key, bins }, ControlValue::Integer(n)) => bins
                .iter()
                .find(|b| b.lo <= *n && *n <= b.hi)
                .map(|b| (b.text.to_string(), b.emphasis))
                .ok_or_else(|| uncovered(key, value)),
            (
                Rule::Template {
                    template, emphasis, ..
                },
                ControlValue::Choice(choice),
            ) => Ok((
                template.replace("{option}", &choice.to_lowercase()),
                *emphasis,
            )),
            (
                Rule::Pair {
                    template,
                    prompt,
                    emphasis,
                    ..
                },
                ControlValue::Selection(items),
            ) => {
                let text = match items.as_slice() {
                    [first, second] if first != second => template
                        .replace("{first}", &first.to_lowercase())
                        .replace("{second}", &second.to_lowercase()),
                    _ => prompt.to_string(),
                };
                Ok((text, *emphasis))
            }
            (rule, other) => Err(LabError::invalid_value(
                rule.key(),
                other.to_string(),
                "value type does not match the observation rule",
            )),
        }
    }
}

impl Panel {
    /// Control keys consumed by this panel, primary rule first
    pub fn keys(&self) -> Vec<&'static str> {
        std::iter::once(self.rule.key())
            .chain(self.caveats.iter().map(|c| c.key))
            .collect()
    }

    /// Evaluate against already validated values
    pub fn evaluate(&self, values: &ControlValues) -> Result<Observation> {
        let primary = lookup(values, self.rule.key())?;
        let (mut text, emphasis) = self.rule.apply(primary)?;
        for caveat in &self.caveats {
            match lookup(values, caveat.key)? {
                ControlValue::Integer(n) => {
                    text.push(' ');
                    text.push_str(&caveat.template.replace("{value}", &n.to_string()));
                }
                other => {
                    return Err(LabError::invalid_value(
                        caveat.key,
                        other.to_string(),
                        "expected an integer",
                    ));
                }
            }
        }
        Ok(Observation {
            panel: self.id.to_string(),
            text,
            emphasis,
        })
    }
}

fn lookup<'v>(values: &'v ControlValues, key: &str) -> Result<&'v ControlValue> {
    values
        .get(key)
        .ok_or_else(|| LabError::invalid_value(key, "(missing)", "no value supplied"))
}

fn uncovered(key: &str, value: &ControlValue) -> LabError {
    LabError::invalid_value(key, value.to_string(), "no observation branch covers this value")
}

/// Check that the panels cover the declared controls exactly.
///
/// Every control is consumed by exactly one panel, rule kinds match control
/// kinds, choice tables list every option once with distinct texts, and bins
/// partition `[min, max]` with no gap or overlap.
pub fn check_coverage(controls: &[ControlSpec], panels: &[Panel]) -> Result<()> {
    let by_key: HashMap<&str, &ControlSpec> =
        controls.iter().map(|c| (c.key.as_str(), c)).collect();

    let mut panel_ids = HashSet::new();
    let mut consumed: HashSet<&str> = HashSet::new();
    for panel in panels {
        if panel.id.is_empty() || !panel_ids.insert(panel.id) {
            return Err(LabError::integrity(format!(
                "panel id '{}' is empty or duplicated",
                panel.id
            )));
        }
        for key in panel.keys() {
            if !by_key.contains_key(key) {
                return Err(LabError::integrity(format!(
                    "panel '{}' reads undeclared control '{key}'",
                    panel.id
                )));
            }
            if !consumed.insert(key) {
                return Err(LabError::integrity(format!(
                    "control '{key}' is read by more than one rule"
                )));
            }
        }
        check_rule(&panel.rule, by_key[panel.rule.key()])?;
        for caveat in &panel.caveats {
            let spec = by_key[caveat.key];
            if !matches!(spec.kind, ControlKind::Integer { .. }) {
                return Err(LabError::integrity(format!(
                    "caveat on '{}' needs an integer control",
                    caveat.key
                )));
            }
            if !caveat.template.contains("{value}") {
                return Err(LabError::integrity(format!(
                    "caveat on '{}' never mentions {{value}}",
                    caveat.key
                )));
            }
        }
    }

    if let Some(unused) = controls.iter().find(|c| !consumed.contains(c.key.as_str())) {
        return Err(LabError::integrity(format!(
            "control '{}' has no observation rule",
            unused.key
        )));
    }
    Ok(())
}

fn check_rule(rule: &Rule, spec: &ControlSpec) -> Result<()> {
    match (rule, &spec.kind) {
        (Rule::Choice { key, entries, .. }, ControlKind::Choice { options }) => {
            let listed: Vec<&str> = entries.iter().map(|e| e.option).collect();
            let declared: Vec<&str> = options.iter().map(String::as_str).collect();
            let listed_set: HashSet<&str> = listed.iter().copied().collect();
            let declared_set: HashSet<&str> = declared.iter().copied().collect();
            if listed.len() != listed_set.len() || listed_set != declared_set {
                return Err(LabError::integrity(format!(
                    "choice table for '{key}' lists {listed:?}, control declares {declared:?}"
                )));
            }
            let texts: HashSet<&str> = entries.iter().map(|e| e.text).collect();
            if texts.len() != entries.len() || texts.iter().any(|t| t.trim().is_empty()) {
                return Err(LabError::integrity(format!(
                    "choice table for '{key}' has empty or shared texts"
                )));
            }
            Ok(())
        }
        (Rule::Bins { key, bins }, ControlKind::Integer { min, max, .. }) => {
            check_bins(key, bins, *min, *max)
        }
        (Rule::Template { key, template, .. }, ControlKind::Choice { .. }) => {
            if template.contains("{option}") {
                Ok(())
            } else {
                Err(LabError::integrity(format!(
                    "template for '{key}' never mentions {{option}}"
                )))
            }
        }
        (
            Rule::Pair { key, template, .. },
            ControlKind::MultiChoice { max_selections, .. },
        ) => {
            if *max_selections < 2 {
                return Err(LabError::integrity(format!(
                    "pair rule on '{key}' needs room for two selections"
                )));
            }
            if template.contains("{first}") && template.contains("{second}") {
                Ok(())
            } else {
                Err(LabError::integrity(format!(
                    "pair template for '{key}' must mention {{first}} and {{second}}"
                )))
            }
        }
        (rule, _) => Err(LabError::integrity(format!(
            "rule on '{}' does not match the control kind",
            rule.key()
        ))),
    }
}

fn check_bins(key: &str, bins: &[Bin], min: i64, max: i64) -> Result<()> {
    let mut expected_lo = min;
    for bin in bins {
        if bin.lo != expected_lo || bin.hi < bin.lo {
            return Err(LabError::integrity(format!(
                "bins for '{key}' leave a gap or overlap at {}..={} (expected start {expected_lo})",
                bin.lo, bin.hi
            )));
        }
        expected_lo = bin.hi + 1;
    }
    match bins.last() {
        Some(last) if last.hi == max => Ok(()),
        _ => Err(LabError::integrity(format!(
            "bins for '{key}' do not reach the range end {max}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_panel() -> Panel {
        Panel {
            id: "lens",
            rule: Rule::Bins {
                key: "distance",
                bins: vec![
                    Bin {
                        lo: 1,
                        hi: 3,
                        text: "near",
                        emphasis: Emphasis::Info,
                    },
                    Bin {
                        lo: 4,
                        hi: 10,
                        text: "far",
                        emphasis: Emphasis::Success,
                    },
                ],
            },
            caveats: vec![],
        }
    }

    fn distance() -> ControlSpec {
        ControlSpec::integer("distance", "Distance", 1, 10, 1, 5)
    }

    #[test]
    fn test_bins_pick_inclusive_range() {
        let panel = distance_panel();
        let mut values = ControlValues::new();
        values.insert("distance".into(), ControlValue::Integer(3));
        assert_eq!(panel.evaluate(&values).unwrap().text, "near");
        values.insert("distance".into(), ControlValue::Integer(4));
        let obs = panel.evaluate(&values).unwrap();
        assert_eq!(obs.text, "far");
        assert_eq!(obs.emphasis, Emphasis::Success);
    }

    #[test]
    fn test_coverage_accepts_partition() {
        assert!(check_coverage(&[distance()], &[distance_panel()]).is_ok());
    }

    #[test]
    fn test_coverage_rejects_gap() {
        let mut panel = distance_panel();
        if let Rule::Bins { bins, .. } = &mut panel.rule {
            bins[1].lo = 5;
        }
        let err = check_coverage(&[distance()], &[panel]).unwrap_err();
        assert_eq!(err.kind(), "catalog_integrity");
    }

    #[test]
    fn test_coverage_rejects_short_range() {
        let mut panel = distance_panel();
        if let Rule::Bins { bins, .. } = &mut panel.rule {
            bins[1].hi = 9;
        }
        assert!(check_coverage(&[distance()], &[panel]).is_err());
    }

    #[test]
    fn test_coverage_rejects_unread_control() {
        let extra = ControlSpec::choice("clarity", "Clarity", &["Clear"]);
        assert!(check_coverage(&[distance(), extra], &[distance_panel()]).is_err());
    }

    #[test]
    fn test_coverage_rejects_missing_option() {
        let spec = ControlSpec::choice("colour", "Colour", &["Red", "Blue"]);
        let panel = Panel {
            id: "beam",
            rule: Rule::Choice {
                key: "colour",
                entries: vec![ChoiceEntry {
                    option: "Red",
                    text: "red",
                }],
                emphasis: Emphasis::Success,
            },
            caveats: vec![],
        };
        assert!(check_coverage(&[spec], &[panel]).is_err());
    }

    #[test]
    fn test_coverage_rejects_shared_text() {
        let spec = ControlSpec::choice("colour", "Colour", &["Red", "Blue"]);
        let panel = Panel {
            id: "beam",
            rule: Rule::Choice {
                key: "colour",
                entries: vec![
                    ChoiceEntry {
                        option: "Red",
                        text: "same",
                    },
                    ChoiceEntry {
                        option: "Blue",
                        text: "same",
                    },
                ],
                emphasis: Emphasis::Success,
            },
            caveats: vec![],
        };
        assert!(check_coverage(&[spec], &[panel]).is_err());
    }

    #[test]
    fn test_pair_prompt_for_duplicates() {
        let panel = Panel {
            id: "mix",
            rule: Rule::Pair {
                key: "mix",
                template: "{first} + {second}",
                prompt: "pick two",
                emphasis: Emphasis::Info,
            },
            caveats: vec![],
        };
        let mut values = ControlValues::new();
        values.insert("mix".into(), vec!["Red", "Red"].into());
        assert_eq!(panel.evaluate(&values).unwrap().text, "pick two");
        values.insert("mix".into(), vec!["Green", "Red"].into());
        assert_eq!(panel.evaluate(&values).unwrap().text, "green + red");
    }

    #[test]
    fn test_caveat_appends_value() {
        let mut panel = distance_panel();
        panel.caveats.push(Caveat {
            key: "time",
            template: "after {value} min",
        });
        let mut values = ControlValues::new();
        values.insert("distance".into(), ControlValue::Integer(2));
        values.insert("time".into(), ControlValue::Integer(4));
        assert_eq!(panel.evaluate(&values).unwrap().text, "near after 4 min");
    }
}
