//! Sample-generation oracles.
//!
//! An oracle runs the downstream system with a candidate prompt in place
//! of the real one and returns what it produced for one sample input.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::OracleError;

/// Default environment variable carrying the candidate prompt.
pub const DEFAULT_OVERRIDE_VAR: &str = "PROMPT_OVERRIDE";

/// Trait for sample-generation providers (external command or simulated).
#[async_trait]
pub trait SampleOracle: Send + Sync {
    /// Produce the output for `sample` with `candidate` as the prompt.
    async fn invoke(&self, candidate: &str, sample: &str) -> Result<String, OracleError>;
}

/// Runs an external program once per invocation.
///
/// The candidate goes into the environment under `override_var`, the
/// sample is written to stdin, and the trimmed stdout is the output.
#[derive(Clone, Debug)]
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    override_var: String,
    timeout: Option<Duration>,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            override_var: DEFAULT_OVERRIDE_VAR.into(),
            timeout: None,
        }
    }

    /// Run `cmd` through a bash login shell.
    pub fn shell(cmd: impl Into<String>) -> Self {
        Self::new("bash", vec!["-lc".into(), cmd.into()])
    }

    pub fn with_override_var(mut self, var: impl Into<String>) -> Self {
        self.override_var = var.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn override_var(&self) -> &str {
        &self.override_var
    }

    async fn run(&self, candidate: &str, sample: &str) -> Result<String, OracleError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(&self.override_var, candidate)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OracleError::Spawn(format!("{}: {}", self.program, e)))?;

        let stdin = child.stdin.take();
        let input = sample.as_bytes().to_vec();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // A command that never reads stdin closes the pipe early.
                let _ = stdin.write_all(&input).await;
            }
        };
        let (_, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(|e| OracleError::Spawn(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            if output.status.success() {
                return Err(OracleError::EmptyOutput);
            }
            return Err(OracleError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !output.status.success() {
            debug!(status = %output.status, "oracle exited non-zero with output, accepting");
        }
        Ok(stdout)
    }
}

#[async_trait]
impl SampleOracle for CommandOracle {
    async fn invoke(&self, candidate: &str, sample: &str) -> Result<String, OracleError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(candidate, sample))
                .await
                .map_err(|_| OracleError::Timeout(limit.as_millis() as u64))?,
            None => self.run(candidate, sample).await,
        }
    }
}

#[derive(Clone, Debug)]
enum SimulatedMode {
    Echo,
    Fixed(String),
}

/// Deterministic in-process oracle for testing.
#[derive(Debug)]
pub struct SimulatedOracle {
    mode: SimulatedMode,
    calls: AtomicUsize,
}

impl SimulatedOracle {
    /// Output is the normalized candidate followed by the sample.
    pub fn echo() -> Self {
        Self {
            mode: SimulatedMode::Echo,
            calls: AtomicUsize::new(0),
        }
    }

    /// Output is always `output`, whatever the candidate.
    pub fn fixed(output: impl Into<String>) -> Self {
        Self {
            mode: SimulatedMode::Fixed(output.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedOracle {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl SampleOracle for SimulatedOracle {
    async fn invoke(&self, candidate: &str, sample: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let output = match &self.mode {
            SimulatedMode::Echo => {
                format!("{} {}", kolmo_core::normalize(candidate), sample.trim())
            }
            SimulatedMode::Fixed(output) => output.clone(),
        };
        let output = output.trim().to_string();
        if output.is_empty() {
            return Err(OracleError::EmptyOutput);
        }
        Ok(output)
    }
}

/// Failing oracle for testing error paths.
pub struct FailingOracle;

#[async_trait]
impl SampleOracle for FailingOracle {
    async fn invoke(&self, _candidate: &str, _sample: &str) -> Result<String, OracleError> {
        Err(OracleError::Failed {
            status: "exit status: 1".into(),
            stderr: "simulated oracle failure".into(),
        })
    }
}
