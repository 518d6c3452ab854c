//! Light & Color virtual experiment lab.
//!
//! The core is a static catalog of experiments plus a pure resolver that
//! turns the current control values of an experiment into observation text.
//! Rendering and terminal front-ends sit on top of these two pieces.

pub mod catalog;
pub mod config;
pub mod controls;
pub mod error;
pub mod observation;
pub mod render;
pub mod session;

pub use catalog::{Catalog, Experiment, ExperimentId, ExperimentSummary};
pub use config::Config;
pub use controls::{ControlKind, ControlSpec, ControlValue, ControlValues};
pub use error::{LabError, Result};
pub use observation::{Emphasis, Observation, Resolver};
pub use session::{LabSession, Outcome};

use tracing_subscriber::EnvFilter;

/// Navigation menu entries, ordered by id
pub fn list_experiments() -> Result<Vec<ExperimentSummary>> {
    Ok(Catalog::load()?.list())
}

pub fn get_experiment(id: impl Into<ExperimentId>) -> Result<&'static Experiment> {
    Catalog::load()?.get(id.into())
}

/// Observation text and emphasis for the supplied control values
pub fn resolve(id: impl Into<ExperimentId>, values: &ControlValues) -> Result<Observation> {
    Resolver::new(Catalog::load()?).resolve(id.into(), values)
}

/// Observations for every panel covered by the supplied control values
pub fn resolve_panels(
    id: impl Into<ExperimentId>,
    values: &ControlValues,
) -> Result<Vec<Observation>> {
    Resolver::new(Catalog::load()?).resolve_panels(id.into(), values)
}

/// Install the stderr log subscriber unless logging is switched off, then
/// replay the warnings gathered while the config was loading.
/// Safe to call more than once.
pub fn init_tracing(config: &Config) {
    if config.runtime.no_log {
        return;
    }
    let filter = EnvFilter::try_new(&config.runtime.log_level)
        .unwrap_or_else(|_| EnvFilter::new("light_lab=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    config.log_load_warnings();
}
