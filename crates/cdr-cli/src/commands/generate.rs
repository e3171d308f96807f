//! Generate command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use cdr_train::{SigmaOptions, TrainingConfig, UnsupportedGatePolicy};

use super::common::{load_circuit, parse_option};

/// Arguments of `cdr generate`. Flags override the loaded configuration.
pub struct GenerateArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub num: Option<usize>,
    pub fraction: Option<f64>,
    pub select: Option<String>,
    pub replace: Option<String>,
    pub options: Vec<String>,
    pub seed: Option<u64>,
    pub strict: bool,
}

/// Merge command-line flags into `config`, then validate the result.
fn apply_overrides(mut config: TrainingConfig, args: &GenerateArgs) -> Result<TrainingConfig> {
    if let Some(n) = args.num {
        config.num_training_circuits = n;
    }
    if let Some(f) = args.fraction {
        config.fraction_non_clifford = f;
    }
    if let Some(m) = &args.select {
        config.method_select = m.parse()?;
    }
    if let Some(m) = &args.replace {
        config.method_replace = m.parse()?;
    }
    if !args.options.is_empty() {
        let pairs = args
            .options
            .iter()
            .map(|raw| parse_option(raw))
            .collect::<Result<Vec<_>>>()?;
        let options = SigmaOptions::from_pairs(pairs)?;
        config.sigma_select = options.sigma_select.or(config.sigma_select);
        config.sigma_replace = options.sigma_replace.or(config.sigma_replace);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.strict {
        config.unsupported_gates = UnsupportedGatePolicy::Error;
    }
    config.validate()?;
    Ok(config)
}

/// Execute the generate command.
pub fn execute(args: &GenerateArgs) -> Result<()> {
    let config = TrainingConfig::load_unvalidated(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = apply_overrides(config, args)?;
    info!(?config, "resolved configuration");

    let circuit = load_circuit(&args.input)?;
    eprintln!(
        "{} Generating {} training circuits from {} ({} qubits, {} ops)",
        style("→").cyan().bold(),
        config.num_training_circuits,
        style(args.input.display()).green(),
        circuit.num_qubits(),
        circuit.num_ops()
    );

    let set = config.generator().generate_with_rng(&circuit, config.rng())?;

    if !set.dropped.is_empty() {
        eprintln!(
            "  {} dropped {} instruction(s) outside the training basis",
            style("!").yellow().bold(),
            set.dropped.len()
        );
    }
    let replaced = set.replaced_angles.first().map_or(0, Vec::len);
    eprintln!(
        "{} Replaced {} rotation(s) per circuit ({} select, {} replace)",
        style("✓").green().bold(),
        replaced,
        config.method_select,
        config.method_replace
    );

    let json = serde_json::to_string_pretty(&set).context("Failed to serialize training set")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!("  Output: {}", style(path.display()).green());
        }
        None => println!("{json}"),
    }

    Ok(())
}
