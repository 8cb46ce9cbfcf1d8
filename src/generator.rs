//! Generation pass facade: mapping specs in, artifacts out.
//!
//! One pass drives the whole pipeline synchronously: expansion, correlation,
//! synthesis and emission per profile, plus one summary artifact listing the
//! profiles processed. A profile that fails to expand is collected into the
//! pass's failures and the remaining profiles still generate; failures are
//! never silently dropped.

use crate::emit::NamespaceBuffer;
use crate::error::SynthesisError;
use crate::model::{GeneratedArtifact, MappingSpec};
use crate::run_counter::RunCounter;
use crate::synth;

/// File name of the per-pass summary artifact.
pub const SUMMARY_FILE_NAME: &str = "Generated.g.cs";

/// Host hand-off for finished artifacts: one synchronous `accept` per
/// artifact, no ordering requirement between artifacts of different
/// profiles.
pub trait ArtifactSink {
    fn accept(&mut self, artifact: &GeneratedArtifact);
}

/// In-memory sink, for tests and host-side inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub artifacts: Vec<GeneratedArtifact>,
}

impl ArtifactSink for MemorySink {
    fn accept(&mut self, artifact: &GeneratedArtifact) {
        self.artifacts.push(artifact.clone());
    }
}

/// Outcome of one generation pass.
#[derive(Debug)]
pub struct GenerationPass {
    pub run_id: u32,
    /// Per-profile artifacts in spec order, then the summary artifact.
    pub artifacts: Vec<GeneratedArtifact>,
    /// Failures that aborted individual profiles.
    pub failures: Vec<SynthesisError>,
}

impl GenerationPass {
    /// Hand every artifact to the sink, in generation order.
    pub fn emit_into(&self, sink: &mut dyn ArtifactSink) {
        for artifact in &self.artifacts {
            sink.accept(artifact);
        }
    }
}

/// Drives one full pass over a batch of mapping specs.
///
/// The run counter is taken by reference so tests can use a private counter
/// instead of the process-wide one; the timestamp override pins the header's
/// compile-time line for byte-stable output.
#[derive(Debug)]
pub struct Generator<'c> {
    counter: &'c RunCounter,
    timestamp: Option<String>,
}

impl Generator<'static> {
    /// Generator stamped by the process-wide counter.
    pub fn new() -> Self {
        Self {
            counter: RunCounter::process(),
            timestamp: None,
        }
    }
}

impl Default for Generator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> Generator<'c> {
    /// Generator stamped by a caller-supplied counter.
    pub fn with_counter(counter: &'c RunCounter) -> Self {
        Self {
            counter,
            timestamp: None,
        }
    }

    /// Pin the header's compile-time line (otherwise local wall-clock time).
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Run one generation pass over the given specs.
    ///
    /// The counter is incremented exactly once per pass, not per artifact;
    /// every artifact produced here carries the same run stamp.
    #[tracing::instrument(skip_all, fields(profile_count = specs.len()))]
    pub fn generate(&self, specs: &[MappingSpec]) -> GenerationPass {
        let run_id = self.counter.next();
        let timestamp = self.timestamp.clone().unwrap_or_else(current_timestamp);

        let mut artifacts = Vec::with_capacity(specs.len() + 1);
        let mut failures = Vec::new();
        let mut processed = Vec::new();
        for spec in specs {
            match synth::synthesize_profile(spec, run_id, &timestamp) {
                Ok(artifact) => {
                    tracing::debug!(
                        profile = %spec.profile_name,
                        file = %artifact.file_name,
                        "synthesized profile"
                    );
                    processed.push(spec.profile_name.clone());
                    artifacts.push(artifact);
                }
                Err(error) => {
                    tracing::warn!(profile = %spec.profile_name, %error, "profile aborted");
                    failures.push(error);
                }
            }
        }
        artifacts.push(summary_artifact(&processed, run_id, &timestamp));

        GenerationPass {
            run_id,
            artifacts,
            failures,
        }
    }
}

fn current_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One-line trace entry per processed profile, in pass order.
fn summary_artifact(processed: &[String], run_stamp: u32, timestamp: &str) -> GeneratedArtifact {
    let mut buffer = NamespaceBuffer::new(SUMMARY_FILE_NAME, run_stamp, timestamp);
    for name in processed {
        buffer.push_line(&format!("//    {name}"));
    }
    GeneratedArtifact {
        file_name: SUMMARY_FILE_NAME.to_string(),
        run_stamp,
        contents: buffer.render(),
    }
}
