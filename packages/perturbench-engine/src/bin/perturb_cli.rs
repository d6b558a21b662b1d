//! perturb-cli
//!
//! # Usage
//!
//! ```bash
//! # Level-3 obfuscation of one file (language from the extension)
//! perturb-cli obfuscate sample.py --level 3 --seed 7
//!
//! # Perturbation sweep as JSON records
//! cat Main.java | perturb-cli perturb --language java --max-pert 10
//!
//! # JSON Lines batch into sample_{idx}.json files
//! perturb-cli --config engine.yaml batch samples.jsonl --out out/ --levels 1,4
//! ```

use clap::{Parser, Subcommand};
use perturbench_engine::config::Validatable;
use perturbench_engine::{
    BatchRunner, EngineConfig, LanguageId, ObfuscationError, ObfuscationLevel, Obfuscator,
    PerturbationDriver, SimilarityMetric, SourceUnit,
};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "perturb-cli")]
#[command(about = "Source obfuscation and perturbation for code-model benchmarks", long_about = None)]
struct Cli {
    /// Engine configuration (YAML, version 1)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate one source file (or stdin) and print the result
    Obfuscate {
        /// Input file; stdin when absent
        input: Option<PathBuf>,

        /// python, java, javascript or c (default: from the file extension)
        #[arg(short, long)]
        language: Option<String>,

        /// Obfuscation level 1-4
        #[arg(long, default_value = "1")]
        level: u8,

        /// Distinct identifiers renamed at level 1
        #[arg(long)]
        budget: Option<usize>,

        /// Print per-level reports as JSON to stderr
        #[arg(long)]
        report: bool,
    },

    /// Run the rename-budget sweep and print JSON records
    Perturb {
        /// Input file; stdin when absent
        input: Option<PathBuf>,

        #[arg(short, long)]
        language: Option<String>,

        /// Upper bound on the number of variants
        #[arg(long)]
        max_pert: Option<usize>,

        /// cosine or jaccard
        #[arg(long, value_parser = ["cosine", "jaccard"])]
        metric: Option<String>,
    },

    /// Process a JSON Lines file of samples
    Batch {
        /// JSON Lines input ({"id"?, "text", "language"} per line)
        input: PathBuf,

        /// Output directory for sample_{idx}.json files
        #[arg(short, long, default_value = "perturbations")]
        out: PathBuf,

        /// Worker threads (0 = number of CPUs)
        #[arg(long)]
        workers: Option<usize>,

        /// Obfuscation levels to emit per sample
        #[arg(long, value_delimiter = ',')]
        levels: Vec<u8>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_yaml(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.batch.seed = Some(seed);
    }

    match cli.command {
        Commands::Obfuscate {
            input,
            language,
            level,
            budget,
            report,
        } => {
            if budget.is_some() {
                config.rename.budget = budget;
            }
            run_obfuscate(&config, input.as_deref(), language.as_deref(), level, report)?;
        }
        Commands::Perturb {
            input,
            language,
            max_pert,
            metric,
        } => {
            if let Some(max_pert) = max_pert {
                config.perturbation.max_pert = max_pert;
            }
            if let Some(metric) = metric {
                config.perturbation.metric = match metric.as_str() {
                    "jaccard" => SimilarityMetric::Jaccard,
                    _ => SimilarityMetric::Cosine,
                };
            }
            run_perturb(&config, input.as_deref(), language.as_deref())?;
        }
        Commands::Batch {
            input,
            out,
            workers,
            levels,
        } => {
            if let Some(workers) = workers {
                config.batch.workers = workers;
            }
            if !levels.is_empty() {
                config.batch.levels = levels;
            }
            run_batch(config, &input, &out)?;
        }
    }

    Ok(())
}

fn run_obfuscate(
    config: &EngineConfig,
    input: Option<&Path>,
    language: Option<&str>,
    level: u8,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let level = ObfuscationLevel::try_from(level)?;
    let unit = read_unit(input, language)?;

    let mut entropy = config.entropy(config.batch.seed);
    let outcome = Obfuscator::from_config(config).obfuscate(&unit, level, &mut entropy)?;

    if report {
        eprintln!("{}", serde_json::to_string_pretty(&outcome.reports)?);
    }
    print!("{}", outcome.unit.code());
    Ok(())
}

fn run_perturb(
    config: &EngineConfig,
    input: Option<&Path>,
    language: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let unit = read_unit(input, language)?;

    let driver = PerturbationDriver::new()
        .with_metric(config.perturbation.metric)
        .with_shingle_size(config.perturbation.shingle_size);
    let mut entropy = config.entropy(config.batch.seed);
    let records = driver.sweep(&unit, config.perturbation.max_pert, &mut entropy)?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn run_batch(config: EngineConfig, input: &Path, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let runner = BatchRunner::new(config)?;
    let samples = BatchRunner::read_samples(BufReader::new(std::fs::File::open(input)?))?;

    let outcome = runner.run_input(&samples)?;
    let written = BatchRunner::write_records(&outcome, out)?;
    tracing::info!(written, out = %out.display(), "records written");

    println!("{}", serde_json::to_string_pretty(&outcome.summary())?);
    Ok(())
}

/// Read the file (or stdin) and resolve its language
fn read_unit(input: Option<&Path>, language: Option<&str>) -> Result<SourceUnit, ObfuscationError> {
    let language = match (language, input) {
        (Some(tag), _) => tag.parse()?,
        (None, Some(path)) => {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
            LanguageId::from_extension(ext)
                .ok_or_else(|| ObfuscationError::UnsupportedLanguage(ext.to_string()))?
        }
        (None, None) => {
            return Err(ObfuscationError::UnsupportedLanguage(
                "<stdin> (pass --language)".to_string(),
            ))
        }
    };

    let code = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut code = String::new();
            std::io::stdin().read_to_string(&mut code)?;
            code
        }
    };
    Ok(SourceUnit::new(code, language))
}
