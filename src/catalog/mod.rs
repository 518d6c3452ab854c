//! Content catalog: the static registry of experiments.
//!
//! The catalog is built once per process from literal content and checked
//! for integrity on the way in. A failed check is a programming error in the
//! content, so callers treat it as fatal.

mod content;

use crate::controls::{ControlSpec, ControlValues};
use crate::error::{LabError, Result};
use crate::observation::rules::{Panel, check_coverage};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Experiment key (3, 4, 5, 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperimentId(pub u8);

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ExperimentId {
    fn from(id: u8) -> Self {
        ExperimentId(id)
    }
}

impl FromStr for ExperimentId {
    type Err = LabError;

    /// Accepts `4` as well as the padded display form `04`
    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u8>()
            .map(ExperimentId)
            .map_err(|_| LabError::not_found(s.trim()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Experiment {
    pub id: ExperimentId,
    /// Two-digit display number ("03")
    pub number: String,
    pub title: String,
    pub subtitle: String,
    pub materials: Vec<String>,
    pub quick_setup: Vec<String>,
    pub steps: Vec<String>,
    pub explanation: String,
    pub reflection_questions: Vec<String>,
    pub controls: Vec<ControlSpec>,
    /// Observation decision tables, consumed by the resolver
    #[serde(skip)]
    pub panels: Vec<Panel>,
}

impl Experiment {
    pub fn control(&self, key: &str) -> Option<&ControlSpec> {
        self.controls.iter().find(|c| c.key == key)
    }

    /// Starting values for every control
    pub fn default_values(&self) -> ControlValues {
        self.controls
            .iter()
            .map(|c| (c.key.clone(), c.default_value()))
            .collect()
    }

    fn check_integrity(&self) -> Result<()> {
        let fail = |what: &str| {
            Err(LabError::integrity(format!(
                "experiment {}: {what}",
                self.id
            )))
        };
        if self.title.trim().is_empty() {
            return fail("title is empty");
        }
        if self.materials.is_empty() {
            return fail("needs at least one material");
        }
        if self.steps.is_empty() {
            return fail("needs at least one procedure step");
        }
        if self.explanation.trim().is_empty() {
            return fail("explanation is empty");
        }
        if self.reflection_questions.is_empty() {
            return fail("needs at least one reflection question");
        }

        let mut keys = HashSet::new();
        for control in &self.controls {
            if !keys.insert(control.key.as_str()) {
                return fail(&format!("control key '{}' is duplicated", control.key));
            }
            control
                .check_declaration()
                .map_err(|e| LabError::integrity(format!("experiment {}: {e}", self.id)))?;
        }
        check_coverage(&self.controls, &self.panels)
            .map_err(|e| LabError::integrity(format!("experiment {}: {e}", self.id)))
    }
}

/// Navigation entry for the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentSummary {
    pub id: ExperimentId,
    pub number: String,
    pub title: String,
}

#[derive(Debug)]
pub struct Catalog {
    experiments: BTreeMap<ExperimentId, Experiment>,
}

static CATALOG: OnceCell<Catalog> = OnceCell::new();

impl Catalog {
    /// Build and validate a catalog from experiment definitions
    pub fn build(experiments: Vec<Experiment>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for experiment in experiments {
            experiment.check_integrity()?;
            let id = experiment.id;
            if map.insert(id, experiment).is_some() {
                return Err(LabError::integrity(format!(
                    "experiment id {id} is defined twice"
                )));
            }
        }
        if map.is_empty() {
            return Err(LabError::integrity("catalog has no experiments"));
        }
        Ok(Self { experiments: map })
    }

    /// Process-wide catalog of the built-in experiments, built on first use
    pub fn load() -> Result<&'static Catalog> {
        CATALOG.get_or_try_init(|| {
            let catalog = Catalog::build(content::experiments())?;
            tracing::info!(
                experiments = catalog.experiments.len(),
                "experiment catalog ready"
            );
            Ok(catalog)
        })
    }

    pub fn get(&self, id: ExperimentId) -> Result<&Experiment> {
        self.experiments
            .get(&id)
            .ok_or_else(|| LabError::not_found(id))
    }

    /// `(id, title)` entries ordered by id
    pub fn list(&self) -> Vec<ExperimentSummary> {
        self.experiments
            .values()
            .map(|e| ExperimentSummary {
                id: e.id,
                number: e.number.clone(),
                title: e.title.clone(),
            })
            .collect()
    }

    pub fn contains(&self, id: ExperimentId) -> bool {
        self.experiments.contains_key(&id)
    }

    pub fn first_id(&self) -> ExperimentId {
        // build() rejects an empty catalog
        self.experiments
            .keys()
            .next()
            .copied()
            .unwrap_or(ExperimentId(0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.values()
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
