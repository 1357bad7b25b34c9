mod code;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::code::{CodeError, GeneticCode};
use crate::input::{InputError, load_usage_table};
use crate::model::config::{AnalysisMode, CoaConfig, GeneSelection};
use crate::pipeline::stage1_contingency::{build_contingency, excluded_variables};
use crate::pipeline::stage7_optimal::detect_optimal_codons;
use crate::pipeline::stage8_report::{ReportError, ReportInput, write_reports};
use crate::pipeline::{CoaError, FitOutcome, fit_analysis};

#[derive(Debug, Parser)]
#[command(name = "kira-codoncoa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fit a correspondence analysis to a codon usage table.
    Run(RunArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Codon,
    Rscu,
    Amino,
}

impl From<ModeArg> for AnalysisMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Codon => AnalysisMode::CodonFrequency,
            ModeArg::Rscu => AnalysisMode::Rscu,
            ModeArg::Amino => AnalysisMode::AminoAcid,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Codon count table (plain or .gz).
    #[arg(long)]
    input: PathBuf,
    /// Output directory.
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = ModeArg::Codon)]
    mode: ModeArg,
    /// Axes to retain (default: mode maximum).
    #[arg(long)]
    axes: Option<usize>,
    /// Add per-gene and per-variable contribution tables.
    #[arg(long)]
    expert: bool,
    /// Built-in genetic code index (0 = universal).
    #[arg(long, default_value_t = 0)]
    code: usize,
    /// Keep codons of single-codon amino acids.
    #[arg(long)]
    keep_singletons: bool,
    /// Genes to project onto the fitted axes.
    #[arg(long)]
    supplementary: Option<PathBuf>,
    /// Genes taken from each end of axis 1, as a count or a percentage.
    #[arg(long, value_parser = GeneSelection::parse, default_value = "10%")]
    optimal_genes: GeneSelection,
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Code(#[from] CodeError),
    #[error(transparent)]
    Analysis(#[from] CoaError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            logging::init(if args.quiet { "warn" } else { "info" });
            if let Err(err) = run(&args) {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }
}

fn build_config(args: &RunArgs) -> CoaConfig {
    let mut config = CoaConfig::for_mode(args.mode.into());
    config.genetic_code = args.code;
    config.keep_singletons = args.keep_singletons;
    config.optimal_genes = args.optimal_genes;
    if let Some(axes) = args.axes {
        config = config.with_axes(axes);
    }
    if args.expert {
        config = config.expert();
    }
    config
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    let config = build_config(args);
    let code = GeneticCode::builtin(config.genetic_code)?;
    tracing::info!(
        mode = config.mode.label(),
        code = %code.label(),
        "starting correspondence analysis"
    );

    let started = Instant::now();
    let usage = load_usage_table(&args.input)?;
    let table = build_contingency(&usage, &code, &config)?;
    let excluded = excluded_variables(config.mode, &code, config.keep_singletons);

    let fitted = match fit_analysis(&table, &config)? {
        FitOutcome::Fitted(fitted) => fitted,
        FitOutcome::Skipped(reason) => {
            tracing::warn!(%reason, "analysis skipped; no output written");
            return Ok(());
        }
    };
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fit complete"
    );

    let supplementary = match &args.supplementary {
        Some(path) => {
            let started = Instant::now();
            let extra = load_usage_table(path)?;
            let extra_table = build_contingency(&extra, &code, &config)?;
            let projection = fitted.project_supplementary(&extra_table)?;
            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "supplementary projection complete"
            );
            Some((projection, path.display().to_string()))
        }
        None => None,
    };

    let optimal = if config.mode.is_codon_based() {
        detect_optimal_codons(&usage, &fitted, &code, config.optimal_genes)
    } else {
        None
    };

    let input = ReportInput {
        fitted: &fitted,
        code: &code,
        excluded: &excluded,
        input_path: args.input.display().to_string(),
        supplementary: supplementary.as_ref().map(|(p, path)| (p, path.clone())),
        optimal: optimal.as_ref(),
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out)?;

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
