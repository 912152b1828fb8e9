//! Pipeline orchestrator.

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
};

use eyre::{Result, eyre};
use serde::Serialize;
use tracing::{debug, warn};

use super::{CompilationContext, Diagnostic, Phase, PhaseInfo, TimeStats, phases};
use crate::{Host, ProjectContext, Registry, Renderer, Round};

/// Where the pipeline is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineState {
    Idle,
    Extracting,
    ResolvingCatalog,
    Validating,
    Processing,
    Rendering,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Extracting => "extracting",
            Self::ResolvingCatalog => "resolving-catalog",
            Self::Validating => "validating",
            Self::Processing => "processing",
            Self::Rendering => "rendering",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How a call to [`Pipeline::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The guard turned the round away; nothing ran.
    Skipped,
    /// Every phase ran. Rejected declarations may still have produced errors.
    Completed,
    /// An unexpected fault ended the run before rendering finished.
    Failed,
}

/// Result of one call to [`Pipeline::run`].
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Every diagnostic of the run, in the order it was recorded.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of artifacts the renderer produced.
    pub artifacts: usize,
}

impl RunOutcome {
    fn skipped() -> Self {
        Self {
            status: RunStatus::Skipped,
            diagnostics: Vec::new(),
            artifacts: 0,
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }
}

/// The pipeline orchestrator.
///
/// A pipeline owns the rule registry and project settings for one
/// compilation and does work at most once: final rounds, rounds without
/// markers and every round after the first accepted one are skipped with
/// no diagnostics and no renderer call.
///
/// # Example
///
/// ```ignore
/// let mut pipeline = Pipeline::new(Registry::standard(), project);
/// let outcome = pipeline.run(&host.round(), &mut host, &mut renderer);
/// assert_eq!(outcome.status, RunStatus::Completed);
/// ```
pub struct Pipeline {
    registry: Registry,
    project: ProjectContext,
    phases: Vec<Box<dyn Phase>>,
    state: PipelineState,
    has_run: bool,
    stats: TimeStats,
}

impl Pipeline {
    /// Create a pipeline with the built-in phases.
    pub fn new(registry: Registry, project: ProjectContext) -> Self {
        Self {
            registry,
            project,
            phases: phases::standard(),
            state: PipelineState::Idle,
            has_run: false,
            stats: TimeStats::new(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Phase timings of the last run.
    pub fn stats(&self) -> &TimeStats {
        &self.stats
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get information about the phases in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.phases.iter().map(|p| p.info()).collect()
    }

    /// Run the pipeline for one host round.
    ///
    /// Executes the phases in order:
    /// 1. ExtractPhase - collects marked declarations
    /// 2. ResolvePhase - builds the resource catalog
    /// 3. ValidatePhase - rejects invalid declarations
    /// 4. ProcessPhase - builds the generation model
    /// 5. RenderPhase - renders the model
    ///
    /// An error or panic in any phase skips the remaining phases and is
    /// reported as a single error diagnostic. All diagnostics are forwarded
    /// to the host before returning.
    pub fn run(
        &mut self,
        round: &Round,
        host: &mut dyn Host,
        renderer: &mut dyn Renderer,
    ) -> RunOutcome {
        if round.is_idle() || self.has_run {
            debug!(
                is_final = round.is_final,
                markers = round.markers.len(),
                has_run = self.has_run,
                "skipping round"
            );
            self.state = PipelineState::Done;
            return RunOutcome::skipped();
        }
        self.has_run = true;
        self.stats = TimeStats::new();
        self.stats.begin();

        let mut ctx =
            CompilationContext::new(round, &self.project, &self.registry, host, renderer);
        let mut fault = None;

        for phase in &self.phases {
            self.state = phase.state();
            debug!(phase = phase.name(), "running phase");

            self.stats.start(phase.name());
            let result = run_contained(phase.as_ref(), &mut ctx);
            self.stats.stop(phase.name());

            if let Err(err) = result {
                fault = Some((phase.name(), err));
                break;
            }
        }

        let status = match fault {
            Some((phase, err)) => {
                warn!(phase, error = %err, "pipeline failed");
                self.state = PipelineState::Failed;
                let mut diagnostic = Diagnostic::error(
                    phase,
                    format!("Unexpected error in {} phase: {:?}", phase, err),
                );
                diagnostic.location = ctx.fault_anchor();
                ctx.add_diagnostic(diagnostic);
                RunStatus::Failed
            }
            None => {
                self.state = PipelineState::Done;
                let message = format!("generated {} artifact(s)", ctx.artifacts);
                ctx.add_note("render", message);
                RunStatus::Completed
            }
        };

        self.stats.end();
        self.stats.log_stats();

        let CompilationContext {
            host,
            diagnostics,
            artifacts,
            ..
        } = ctx;
        for diagnostic in &diagnostics {
            host.report(diagnostic);
        }

        RunOutcome {
            status,
            diagnostics,
            artifacts,
        }
    }
}

/// Run a phase, turning a panic into an error.
fn run_contained(phase: &dyn Phase, ctx: &mut CompilationContext<'_>) -> Result<()> {
    panic::catch_unwind(AssertUnwindSafe(|| phase.run(ctx)))
        .unwrap_or_else(|payload| Err(eyre!("panicked: {}", panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload")
}
