//! Batch runner
//!
//! Reads JSON Lines samples, runs the perturbation sweep plus the
//! configured obfuscation levels on a rayon pool and writes one
//! `sample_{idx}.json` per successful sample. A failing sample, or an
//! input line that is not a valid sample, is reported and the batch moves on.

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::level::ObfuscationLevel;
use super::obfuscator::Obfuscator;
use crate::config::{EngineConfig, Validatable};
use crate::errors::{ObfuscationError, Result};
use crate::features::parsing::LanguageId;
use crate::features::perturbation::{PerturbationDriver, PerturbationRecord};
use crate::features::renaming::IdentifierRenamer;
use crate::shared::models::SourceUnit;
use crate::shared::Entropy;

/// One input line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    /// Kept as a tag so an unknown language fails only its own sample
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelOutput {
    pub level: ObfuscationLevel,
    pub code: String,
}

/// Payload of `sample_{idx}.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub language: LanguageId,
    pub text: String,
    pub pert: Vec<PerturbationRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obfuscated: Vec<LevelOutput>,
}

/// Why a sample produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// Line is not a JSON sample
    Input,
    /// Sample content the engine cannot handle (language, syntax)
    Sample,
    Engine,
}

impl FailureCause {
    fn of(error: &ObfuscationError) -> Self {
        if error.is_sample_error() {
            FailureCause::Sample
        } else {
            FailureCause::Engine
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleFailure {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub cause: FailureCause,
    pub error: String,
}

/// Parsed JSON Lines input; indices count non-blank lines
#[derive(Debug, Clone, Default)]
pub struct SampleInput {
    pub samples: Vec<(usize, BenchmarkSample)>,
    pub rejected: Vec<SampleFailure>,
}

impl SampleInput {
    pub fn len(&self) -> usize {
        self.samples.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// `(input index, record)` in input order
    pub records: Vec<(usize, SampleRecord)>,
    pub failures: Vec<SampleFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<SampleFailure>,
}

impl BatchOutcome {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.records.len() + self.failures.len(),
            succeeded: self.records.len(),
            failed: self.failures.len(),
            failures: self.failures.clone(),
        }
    }
}

pub struct BatchRunner {
    config: EngineConfig,
    levels: Vec<ObfuscationLevel>,
    obfuscator: Obfuscator,
    driver: PerturbationDriver,
}

impl BatchRunner {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let levels = config
            .batch
            .levels
            .iter()
            .map(|&l| ObfuscationLevel::try_from(l))
            .collect::<Result<Vec<_>>>()?;
        let driver = PerturbationDriver::new()
            .with_metric(config.perturbation.metric)
            .with_shingle_size(config.perturbation.shingle_size)
            .with_renamer(IdentifierRenamer::new().allow_error_trees(config.parsing.allow_error_trees));

        Ok(Self {
            obfuscator: Obfuscator::from_config(&config),
            levels,
            driver,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse JSON Lines, skipping blank lines
    ///
    /// A line that does not decode becomes a rejected entry at its index;
    /// only read errors abort.
    pub fn read_samples(reader: impl BufRead) -> Result<SampleInput> {
        let mut input = SampleInput::default();
        let mut index = 0;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<BenchmarkSample>(&line) {
                Ok(sample) => input.samples.push((index, sample)),
                Err(e) => {
                    warn!(index, line = line_no + 1, error = %e, "malformed sample line");
                    input.rejected.push(SampleFailure {
                        index,
                        id: None,
                        cause: FailureCause::Input,
                        error: format!("line {}: {}", line_no + 1, e),
                    });
                }
            }
            index += 1;
        }
        Ok(input)
    }

    /// Run samples indexed by position
    pub fn run(&self, samples: &[BenchmarkSample]) -> Result<BatchOutcome> {
        let indexed: Vec<(usize, &BenchmarkSample)> = samples.iter().enumerate().collect();
        self.run_indexed(&indexed)
    }

    /// Run everything `read_samples` produced, carrying its rejected lines
    pub fn run_input(&self, input: &SampleInput) -> Result<BatchOutcome> {
        let indexed: Vec<(usize, &BenchmarkSample)> =
            input.samples.iter().map(|(i, s)| (*i, s)).collect();
        let mut outcome = self.run_indexed(&indexed)?;
        outcome.failures.extend(input.rejected.iter().cloned());
        outcome.failures.sort_by_key(|f| f.index);
        Ok(outcome)
    }

    fn run_indexed(&self, samples: &[(usize, &BenchmarkSample)]) -> Result<BatchOutcome> {
        let start = Instant::now();
        let workers = self.config.batch.worker_count();

        // Forked up front so each sample's stream depends only on its index
        let count = samples.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
        let mut base = self.base_entropy();
        let mut forks: Vec<Option<Entropy>> = (0..count).map(|_| Some(base.fork())).collect();
        let jobs: Vec<(usize, &BenchmarkSample, Entropy)> = samples
            .iter()
            .filter_map(|&(index, sample)| forks[index].take().map(|e| (index, sample, e)))
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| ObfuscationError::WorkerPool(e.to_string()))?;

        info!(samples = jobs.len(), workers, "batch started");

        let results: Vec<(usize, Option<String>, Result<SampleRecord>)> = pool.install(|| {
            jobs.into_par_iter()
                .map(|(index, sample, mut entropy)| {
                    (index, sample.id.clone(), self.process(sample, &mut entropy))
                })
                .collect()
        });

        let mut outcome = BatchOutcome::default();
        for (index, id, result) in results {
            match result {
                Ok(record) => outcome.records.push((index, record)),
                Err(e) => {
                    let cause = FailureCause::of(&e);
                    match cause {
                        FailureCause::Engine => error!(index, error = %e, "engine failed on sample"),
                        _ => warn!(index, error = %e, "sample failed"),
                    }
                    outcome.failures.push(SampleFailure {
                        index,
                        id,
                        cause,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            succeeded = outcome.records.len(),
            failed = outcome.failures.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch finished"
        );
        Ok(outcome)
    }

    /// Sweep plus configured levels for one sample
    pub fn process(&self, sample: &BenchmarkSample, entropy: &mut Entropy) -> Result<SampleRecord> {
        let language: LanguageId = sample.language.parse()?;
        let unit = SourceUnit::new(sample.text.as_str(), language);

        let pert = self
            .driver
            .sweep(&unit, self.config.perturbation.max_pert, entropy)?;

        let mut obfuscated = Vec::with_capacity(self.levels.len());
        for &level in &self.levels {
            let outcome = self.obfuscator.obfuscate(&unit, level, entropy)?;
            obfuscated.push(LevelOutput {
                level,
                code: outcome.unit.into_code(),
            });
        }

        debug!(id = ?sample.id, %language, variants = pert.len(), "sample processed");
        Ok(SampleRecord {
            id: sample.id.clone(),
            language,
            text: sample.text.clone(),
            pert,
            obfuscated,
        })
    }

    /// Write `sample_{idx}.json` for every record; returns the file count
    pub fn write_records(outcome: &BatchOutcome, dir: &Path) -> Result<usize> {
        std::fs::create_dir_all(dir)?;
        for (index, record) in &outcome.records {
            let file = std::fs::File::create(dir.join(format!("sample_{}.json", index)))?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(file), record)?;
        }
        Ok(outcome.records.len())
    }

    fn base_entropy(&self) -> Entropy {
        self.config.entropy(self.config.batch.seed)
    }
}
