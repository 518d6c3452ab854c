//! Per-session lab state.
//!
//! A `LabSession` belongs to one learner. It is passed explicitly to
//! whatever drives the UI; the catalog and resolver stay shared and
//! read-only.

use crate::catalog::{Catalog, Experiment, ExperimentId};
use crate::controls::{ControlValue, ControlValues};
use crate::error::{LabError, Result};
use crate::observation::{Observation, Resolver};
use serde::Serialize;
use std::collections::BTreeMap;

/// Answer to "Did the activity work as expected?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Worked,
    DidNotWork,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Reflection {
    pub outcome: Option<Outcome>,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct LabSession<'a> {
    catalog: &'a Catalog,
    current: ExperimentId,
    values: BTreeMap<ExperimentId, ControlValues>,
    reflections: BTreeMap<ExperimentId, Reflection>,
}

impl<'a> LabSession<'a> {
    /// Fresh session starting on `start` (or the first experiment if unknown)
    pub fn new(catalog: &'a Catalog, start: ExperimentId) -> Self {
        let values = catalog
            .iter()
            .map(|e| (e.id, e.default_values()))
            .collect();
        let mut session = Self {
            catalog,
            current: catalog.first_id(),
            values,
            reflections: BTreeMap::new(),
        };
        session.select(start);
        session
    }

    pub fn current_id(&self) -> ExperimentId {
        self.current
    }

    pub fn current(&self) -> Result<&'a Experiment> {
        self.catalog.get(self.current)
    }

    /// Switch experiment. An unknown id falls back to the first experiment
    /// and is reported back to the caller.
    pub fn select(&mut self, id: ExperimentId) -> ExperimentId {
        if self.catalog.contains(id) {
            self.current = id;
        } else {
            let fallback = self.catalog.first_id();
            tracing::warn!(requested = %id, fallback = %fallback, "unknown experiment, showing default");
            self.current = fallback;
        }
        self.current
    }

    /// Step to the next or previous experiment in catalog order, wrapping
    pub fn cycle(&mut self, forward: bool) -> ExperimentId {
        let ids: Vec<ExperimentId> = self.catalog.list().iter().map(|s| s.id).collect();
        let idx = ids.iter().position(|id| *id == self.current).unwrap_or(0);
        let len = ids.len().max(1);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.select(ids.get(next).copied().unwrap_or(self.current))
    }

    /// Current values for the selected experiment
    pub fn values(&self) -> ControlValues {
        self.values.get(&self.current).cloned().unwrap_or_default()
    }

    pub fn value(&self, key: &str) -> Option<&ControlValue> {
        self.values.get(&self.current).and_then(|v| v.get(key))
    }

    /// Set one control value on the selected experiment after validating it
    pub fn set_value(&mut self, key: &str, value: ControlValue) -> Result<()> {
        let experiment = self.current()?;
        let spec = experiment.control(key).ok_or_else(|| {
            LabError::invalid_value(
                key,
                value.to_string(),
                format!("experiment {} has no such control", experiment.number),
            )
        })?;
        spec.validate(&value)?;
        self.values
            .entry(self.current)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    /// Move a choice or slider control one notch
    pub fn nudge(&mut self, key: &str, forward: bool) -> Result<()> {
        let experiment = self.current()?;
        let spec = experiment
            .control(key)
            .ok_or_else(|| LabError::invalid_value(key, "", "no such control"))?;
        let current = self.value(key).cloned().unwrap_or_else(|| spec.default_value());
        let next = spec.nudge(&current, forward);
        self.set_value(key, next)
    }

    /// Toggle one option of a multi-choice control
    pub fn toggle(&mut self, key: &str, option: &str) -> Result<()> {
        let experiment = self.current()?;
        let spec = experiment
            .control(key)
            .ok_or_else(|| LabError::invalid_value(key, option, "no such control"))?;
        let current = self.value(key).cloned().unwrap_or_else(|| spec.default_value());
        let next = spec.toggle(&current, option);
        self.set_value(key, next)
    }

    /// Observations for every panel of the selected experiment
    pub fn observe(&self) -> Result<Vec<Observation>> {
        Resolver::new(self.catalog).resolve_panels(self.current, &self.values())
    }

    pub fn reflection(&self) -> Reflection {
        self.reflections
            .get(&self.current)
            .cloned()
            .unwrap_or_default()
    }

    /// Record the yes/no answer; `None` clears it
    pub fn set_outcome(&mut self, outcome: Option<Outcome>) {
        self.reflections.entry(self.current).or_default().outcome = outcome;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.reflections.entry(self.current).or_default().notes = notes.into();
    }
}
