//! Layered configuration: defaults, optional file, then `KOLMO_*` env vars.

use kolmo_annealer::{AnnealConfig, EnergyWeights};
use kolmo_chunker::ChunkParams;
use kolmo_condenser::CondenseStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CliError, CliResult};

/// Main kolmo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KolmoConfig {
    /// Document chunking
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Chunk-index condensation
    #[serde(default)]
    pub condense: CondenseConfig,

    /// Lesson-artifact compaction
    #[serde(default)]
    pub lessons: LessonsConfig,

    /// Prompt annealing
    #[serde(default)]
    pub anneal: AnnealSettings,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            overlap: default_overlap(),
        }
    }
}

impl ChunkingConfig {
    pub fn params(&self) -> ChunkParams {
        ChunkParams::new(self.max_chars, self.overlap)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondenseConfig {
    #[serde(default = "default_stream_threshold")]
    pub threshold: f64,
    #[serde(default = "default_shingle_len")]
    pub shingle_len: usize,
}

impl Default for CondenseConfig {
    fn default() -> Self {
        Self {
            threshold: default_stream_threshold(),
            shingle_len: default_shingle_len(),
        }
    }
}

impl CondenseConfig {
    pub fn strategy(&self) -> CondenseStrategy {
        CondenseStrategy::stream()
            .with_threshold(self.threshold)
            .with_shingle_len(self.shingle_len)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonsConfig {
    #[serde(default = "default_lessons_threshold")]
    pub threshold: f64,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for LessonsConfig {
    fn default() -> Self {
        Self {
            threshold: default_lessons_threshold(),
            extension: default_extension(),
        }
    }
}

impl LessonsConfig {
    pub fn strategy(&self) -> CondenseStrategy {
        CondenseStrategy::lessons().with_threshold(self.threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnealSettings {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Unset seeds the RNG from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Environment variable that carries the candidate prompt to the command.
    #[serde(default = "default_override_var")]
    pub override_var: String,
    /// Per-invocation oracle timeout. Unset waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub weights: EnergyWeights,
}

impl Default for AnnealSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            temperature: default_temperature(),
            seed: None,
            override_var: default_override_var(),
            timeout_secs: None,
            weights: EnergyWeights::default(),
        }
    }
}

impl AnnealSettings {
    pub fn anneal_config(&self) -> AnnealConfig {
        let mut config = AnnealConfig::default()
            .with_iterations(self.iterations)
            .with_temperature(self.temperature);
        config.seed = self.seed;
        config
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_max_chars() -> usize {
    2000
}

fn default_overlap() -> usize {
    200
}

fn default_stream_threshold() -> f64 {
    0.88
}

fn default_lessons_threshold() -> f64 {
    0.90
}

fn default_shingle_len() -> usize {
    kolmo_core::DEFAULT_SHINGLE_LEN
}

fn default_extension() -> String {
    "yml".to_string()
}

fn default_iterations() -> usize {
    100
}

fn default_temperature() -> f64 {
    1.0
}

fn default_override_var() -> String {
    kolmo_annealer::oracle::DEFAULT_OVERRIDE_VAR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl KolmoConfig {
    /// Load configuration, layering an optional file and `KOLMO_*`
    /// environment variables over the defaults.
    ///
    /// Nested keys use a double underscore: `KOLMO_CHUNKING__MAX_CHARS=500`.
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        Self::build(path).map_err(|e| CliError::Config(e.to_string()))
    }

    fn build(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&KolmoConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("KOLMO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Verbose logging and a short, replayable anneal.
    pub fn development() -> Self {
        Self {
            anneal: AnnealSettings {
                iterations: 20,
                seed: Some(0),
                ..Default::default()
            },
            logging: LoggingConfig {
                level: "debug".into(),
                json: false,
            },
            ..Default::default()
        }
    }

    /// JSON logs and a bounded oracle.
    pub fn production() -> Self {
        Self {
            anneal: AnnealSettings {
                timeout_secs: Some(60),
                ..Default::default()
            },
            logging: LoggingConfig {
                level: "info".into(),
                json: true,
            },
            ..Default::default()
        }
    }
}
