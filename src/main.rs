//! light-lab command line.
//!
//! Usage:
//!   light-lab list
//!   light-lab show 4
//!   light-lab resolve 4 --set angle=25 --set clarity="Very clear"
//!   light-lab resolve 3 --set mix=Red,Blue
//!   light-lab check

use anyhow::Result;
use clap::{Parser, Subcommand};
use light_lab::render::{control_domain, experiment_markdown, lab_header, observation_line};
use light_lab::{Catalog, Config, ControlValue, ControlValues, ExperimentId, LabError, Resolver};
use serde_json::json;

#[derive(Parser)]
#[command(name = "light-lab")]
#[command(about = "Light & Color virtual experiment lab", long_about = None)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List experiments in menu order
    List,
    /// Show one experiment page and its controls
    Show {
        /// Experiment id (3-6, "04" also accepted)
        id: String,
    },
    /// Resolve observations for control values
    Resolve {
        id: String,
        /// Control value as key=value; lists are comma separated
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Return every covered panel instead of the first
        #[arg(long)]
        all: bool,
    },
    /// Build the catalog and validate configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    light_lab::init_tracing(&config);

    if let Err(err) = run(&cli, &config) {
        if cli.json || matches!(cli.command, Commands::Resolve { .. }) {
            println!("{}", serde_json::to_string_pretty(&err.to_json())?);
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli, config: &Config) -> light_lab::Result<()> {
    let catalog = Catalog::load()?;
    match &cli.command {
        Commands::List => list(catalog, cli.json),
        Commands::Show { id } => show(catalog, config, id.parse()?, cli.json),
        Commands::Resolve { id, set, all } => resolve(catalog, id.parse()?, set, *all),
        Commands::Check => check(catalog, config, cli.json),
    }
}

fn list(catalog: &Catalog, as_json: bool) -> light_lab::Result<()> {
    let entries = catalog.list();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for entry in entries {
        println!("{}  {}", entry.number, entry.title);
    }
    Ok(())
}

fn show(catalog: &Catalog, config: &Config, id: ExperimentId, as_json: bool) -> light_lab::Result<()> {
    let experiment = catalog.get(id)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(experiment)?);
        return Ok(());
    }
    println!("{}", lab_header(&config.lab));
    print!("{}", experiment_markdown(experiment, &config.display));
    println!("\n#### Try it on the screen");
    for control in &experiment.controls {
        println!(
            "- `{}`: {} ({})",
            control.key,
            control.label,
            control_domain(&control.kind)
        );
    }
    println!();
    let defaults = experiment.default_values();
    for observation in Resolver::new(catalog).resolve_panels(id, &defaults)? {
        println!("{}", observation_line(&observation));
    }
    Ok(())
}

fn resolve(catalog: &Catalog, id: ExperimentId, set: &[String], all: bool) -> light_lab::Result<()> {
    let experiment = catalog.get(id)?;
    let mut values = ControlValues::new();
    for pair in set {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            LabError::invalid_value(pair.as_str(), "", "expected KEY=VALUE")
        })?;
        let key = key.trim();
        let value = match experiment.control(key) {
            Some(spec) => spec.parse_value(raw)?,
            // Left for the resolver to reject with the experiment context
            None => ControlValue::Choice(raw.trim().to_string()),
        };
        values.insert(key.to_string(), value);
    }

    let resolver = Resolver::new(catalog);
    let body = if all {
        json!({
            "experiment": id,
            "observations": resolver.resolve_panels(id, &values)?,
        })
    } else {
        serde_json::to_value(resolver.resolve(id, &values)?)?
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn check(catalog: &Catalog, config: &Config, as_json: bool) -> light_lab::Result<()> {
    config.validate(catalog)?;
    let controls: usize = catalog.iter().map(|e| e.controls.len()).sum();
    let panels: usize = catalog.iter().map(|e| e.panels.len()).sum();
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "experiments": catalog.len(),
                "controls": controls,
                "panels": panels,
                "default_experiment": config.default_experiment(),
            }))?
        );
    } else {
        println!(
            "catalog ok: {} experiments, {} controls, {} observation panels",
            catalog.len(),
            controls,
            panels
        );
        println!("default experiment: {}", config.default_experiment());
    }
    Ok(())
}
