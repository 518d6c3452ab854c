//! Observation resolver: control values in, observation text out.
//!
//! Resolution is a pure lookup over the decision tables attached to each
//! experiment. Nothing is stored between calls.

pub mod rules;
pub mod table;

use crate::catalog::{Catalog, ExperimentId};
use crate::controls::ControlValues;
use crate::error::{LabError, Result};
use serde::Serialize;

/// Visual emphasis hint for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Info,
    Success,
}

impl Emphasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emphasis::Info => "info",
            Emphasis::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Panel that produced this observation (e.g. `beam`, `mix`)
    pub panel: String,
    pub text: String,
    pub emphasis: Emphasis,
}

/// Resolves control values against a built catalog
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Observation of the first panel covered by `values`
    pub fn resolve(&self, id: ExperimentId, values: &ControlValues) -> Result<Observation> {
        self.resolve_panels(id, values)?
            .into_iter()
            .next()
            .ok_or_else(|| LabError::invalid_value("(none)", "{}", "no control values supplied"))
    }

    /// Observations for every panel covered by `values`, in panel order.
    ///
    /// Every supplied key must be declared by the experiment, and panels are
    /// all-or-nothing: supplying only part of a panel's keys is an error.
    pub fn resolve_panels(
        &self,
        id: ExperimentId,
        values: &ControlValues,
    ) -> Result<Vec<Observation>> {
        let experiment = self.catalog.get(id)?;

        for (key, value) in values {
            let spec = experiment.control(key).ok_or_else(|| {
                LabError::invalid_value(
                    key,
                    value.to_string(),
                    format!("experiment {} has no such control", experiment.number),
                )
            })?;
            spec.validate(value)?;
        }

        let mut out = Vec::new();
        for panel in &experiment.panels {
            let keys = panel.keys();
            let supplied = keys.iter().filter(|k| values.contains_key(**k)).count();
            if supplied == 0 {
                continue;
            }
            if let Some(missing) = keys.iter().find(|k| !values.contains_key(**k)) {
                return Err(LabError::invalid_value(
                    *missing,
                    "(missing)",
                    format!("required together with {}", keys.join(", ")),
                ));
            }
            out.push(panel.evaluate(values)?);
        }

        if out.is_empty() {
            let first = experiment
                .panels
                .first()
                .map(|p| p.rule.key())
                .unwrap_or("(none)");
            return Err(LabError::invalid_value(
                first,
                "(missing)",
                "no control values supplied",
            ));
        }

        tracing::debug!(
            experiment = %id,
            panels = out.len(),
            "resolved observations"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlValue;

    fn values(pairs: &[(&str, ControlValue)]) -> ControlValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_beam_text_names_each_colour() {
        let catalog = Catalog::load().unwrap();
        let resolver = Resolver::new(catalog);
        for colour in ["Red", "Blue", "Green", "Yellow"] {
            let obs = resolver
                .resolve(
                    ExperimentId(3),
                    &values(&[
                        ("colour", colour.into()),
                        ("intensity", ControlValue::Integer(5)),
                    ]),
                )
                .unwrap();
            assert!(
                obs.text.to_lowercase().contains(&colour.to_lowercase()),
                "{colour}: {}",
                obs.text
            );
        }
    }

    #[test]
    fn test_partial_panel_is_rejected() {
        let catalog = Catalog::load().unwrap();
        let resolver = Resolver::new(catalog);
        let err = resolver
            .resolve(ExperimentId(3), &values(&[("colour", "Red".into())]))
            .unwrap_err();
        match err {
            LabError::InvalidControlValue { key, value, .. } => {
                assert_eq!(key, "intensity");
                assert_eq!(value, "(missing)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_values_are_rejected() {
        let catalog = Catalog::load().unwrap();
        let err = Resolver::new(catalog)
            .resolve(ExperimentId(4), &ControlValues::new())
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_control_value");
    }

    #[test]
    fn test_undeclared_key_is_rejected() {
        let catalog = Catalog::load().unwrap();
        let err = Resolver::new(catalog)
            .resolve(
                ExperimentId(6),
                &values(&[
                    ("distance", ControlValue::Integer(5)),
                    ("colour", "Red".into()),
                ]),
            )
            .unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_all_panels_in_order() {
        let catalog = Catalog::load().unwrap();
        let observations = Resolver::new(catalog)
            .resolve_panels(
                ExperimentId(6),
                &values(&[
                    ("melt", ControlValue::Integer(80)),
                    ("distance", ControlValue::Integer(5)),
                ]),
            )
            .unwrap();
        let panels: Vec<&str> = observations.iter().map(|o| o.panel.as_str()).collect();
        assert_eq!(panels, vec!["lens", "melt"]);
    }
}
