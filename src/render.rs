//! Plain-text page rendering shared by the CLI and the TUI.

use crate::catalog::Experiment;
use crate::config::{DisplayConfig, LabConfig};
use crate::controls::{ControlKind, ControlValue};
use crate::observation::Observation;
use std::fmt::Write;

/// Lab title and intro paragraph shown above every page
pub fn lab_header(lab: &LabConfig) -> String {
    let mut out = format!("## {}\n", lab.title);
    if !lab.intro.trim().is_empty() {
        let _ = writeln!(out, "\n{}", lab.intro.trim());
    }
    out
}

/// Markdown page for one experiment
pub fn experiment_markdown(experiment: &Experiment, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {}", experiment.title);
    let _ = writeln!(out, "_{}_", experiment.subtitle);
    let _ = writeln!(out, "Experiment {}", experiment.number);
    out.push('\n');

    out.push_str("#### You will need\n");
    for item in &experiment.materials {
        let _ = writeln!(out, "- {item}");
    }
    out.push('\n');

    if display.show_quick_setup && !experiment.quick_setup.is_empty() {
        out.push_str("#### Quick setup\n");
        for (i, item) in experiment.quick_setup.iter().enumerate() {
            let _ = writeln!(out, "{}. {item}", i + 1);
        }
        out.push('\n');
    }

    out.push_str("#### Procedure\n");
    for (i, step) in experiment.steps.iter().enumerate() {
        let _ = writeln!(out, "**Step {}.** {step}", i + 1);
    }
    out.push('\n');

    out.push_str("#### What is happening\n");
    let _ = writeln!(out, "{}", experiment.explanation);
    out.push('\n');

    out.push_str("#### Think and discuss\n");
    for q in &experiment.reflection_questions {
        let _ = writeln!(out, "- {q}");
    }
    if display.show_reflection_checks {
        out.push_str("\nDid the activity work as expected?\n");
        out.push_str("- [ ] Yes, it was successful\n");
        out.push_str("- [ ] No, it did not work well\n");
    }
    out
}

/// One-line observation with its emphasis tag
pub fn observation_line(observation: &Observation) -> String {
    format!("[{}] {}", observation.emphasis.as_str(), observation.text)
}

/// Short description of a control's domain, e.g. `0..=100 step 10`
pub fn control_domain(kind: &ControlKind) -> String {
    match kind {
        ControlKind::Choice { options } => options.join(" | "),
        ControlKind::Integer { min, max, step, .. } => format!("{min}..={max} step {step}"),
        ControlKind::MultiChoice {
            options,
            max_selections,
        } => format!("up to {max_selections} of {}", options.join(", ")),
    }
}

/// Compact value display for the TUI control list
pub fn value_label(value: Option<&ControlValue>) -> String {
    match value {
        Some(ControlValue::Selection(items)) if items.is_empty() => "(none)".to_string(),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ExperimentId};
    use crate::observation::Emphasis;

    #[test]
    fn test_page_sections_in_order() {
        let catalog = Catalog::load().unwrap();
        let page = experiment_markdown(
            catalog.get(ExperimentId(4)).unwrap(),
            &DisplayConfig::default(),
        );
        let order = [
            "### Refraction with Water and Pencil",
            "Experiment 04",
            "#### You will need",
            "#### Quick setup",
            "**Step 1.**",
            "**Step 4.**",
            "#### What is happening",
            "#### Think and discuss",
            "Did the activity work as expected?",
        ];
        let mut last = 0;
        for marker in order {
            let pos = page[last..]
                .find(marker)
                .unwrap_or_else(|| panic!("missing or out of order: {marker}"));
            last += pos;
        }
    }

    #[test]
    fn test_quick_setup_can_be_hidden() {
        let catalog = Catalog::load().unwrap();
        let display = DisplayConfig {
            show_quick_setup: false,
            show_reflection_checks: false,
        };
        let page = experiment_markdown(catalog.get(ExperimentId(6)).unwrap(), &display);
        assert!(!page.contains("Quick setup"));
        assert!(!page.contains("Did the activity"));
    }

    #[test]
    fn test_header_carries_intro() {
        let lab = LabConfig {
            title: "Light lab".into(),
            intro: "Explore light at home.".into(),
            default_experiment: 3,
        };
        assert_eq!(lab_header(&lab), "## Light lab\n\nExplore light at home.\n");

        let bare = LabConfig {
            intro: "  ".into(),
            ..lab
        };
        assert_eq!(lab_header(&bare), "## Light lab\n");
    }

    #[test]
    fn test_observation_line_prefix() {
        let obs = Observation {
            panel: "bend".into(),
            text: "Bent.".into(),
            emphasis: Emphasis::Success,
        };
        assert_eq!(observation_line(&obs), "[success] Bent.");
    }

    #[test]
    fn test_value_label_for_empty_selection() {
        assert_eq!(
            value_label(Some(&ControlValue::Selection(Vec::new()))),
            "(none)"
        );
        assert_eq!(value_label(Some(&ControlValue::Integer(5))), "5");
    }
}
