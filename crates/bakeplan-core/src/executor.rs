//! Sequential plan execution against the external render engine.
//!
//! The engine owns the single active render device, so targets are submitted
//! strictly one at a time. A target failure is recorded and the batch
//! continues; cancellation is checked between targets and stops further
//! submissions without rolling back files already written. Routing
//! instructions are applied through [`RoutingGuard`], which restores the
//! original graph wiring on every exit path.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use bakeplan_spec::PlanWarning;

use crate::planner::{BakePlan, BakeTarget};
use crate::routing::RoutingInstruction;

/// Failure reported by the render engine for one target.
///
/// Recorded against that target only; the batch continues.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The engine rejected or failed the sample pass.
    #[error("render engine failed: {message}")]
    Engine { message: String },

    /// The engine could not write the output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine could not apply a routing instruction.
    #[error("routing failed on material {graph}: {message}")]
    Routing {
        graph: crate::host::GraphHandle,
        message: String,
    },
}

impl RenderError {
    /// Creates an engine failure with the given message.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

/// The external render engine collaborator.
///
/// One implementation drives the host's actual baker; tests substitute a
/// recording fake.
pub trait RenderEngine {
    /// Temporarily rewires the material graph per the instruction.
    fn apply_routing(&mut self, instruction: &RoutingInstruction) -> Result<(), RenderError>;

    /// Restores the original wiring for a previously applied instruction.
    ///
    /// Must be infallible in effect: the engine logs internally if the graph
    /// is already back in its original state.
    fn restore_routing(&mut self, instruction: &RoutingInstruction);

    /// Samples the routed socket into the target's output file.
    fn bake(&mut self, target: &BakeTarget) -> Result<(), RenderError>;
}

/// Cooperative cancellation flag, checked between targets.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Already-submitted work finishes; nothing new
    /// is submitted.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// True once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Applies a target's routing instructions on construction and restores them,
/// in reverse order, when dropped — on every exit path.
pub struct RoutingGuard<'a, E: RenderEngine + ?Sized> {
    engine: &'a mut E,
    applied: Vec<RoutingInstruction>,
}

impl<'a, E: RenderEngine + ?Sized> RoutingGuard<'a, E> {
    /// Applies all instructions. On a partial failure the already-applied
    /// prefix is restored before the error is returned.
    pub fn apply(
        engine: &'a mut E,
        instructions: &[RoutingInstruction],
    ) -> Result<Self, RenderError> {
        let mut applied = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            if let Err(err) = engine.apply_routing(instruction) {
                for done in applied.iter().rev() {
                    engine.restore_routing(done);
                }
                return Err(err);
            }
            applied.push(*instruction);
        }
        Ok(Self { engine, applied })
    }

    /// Runs the bake with the routing in place.
    pub fn bake(&mut self, target: &BakeTarget) -> Result<(), RenderError> {
        self.engine.bake(target)
    }
}

impl<E: RenderEngine + ?Sized> Drop for RoutingGuard<'_, E> {
    fn drop(&mut self) {
        for instruction in self.applied.iter().rev() {
            self.engine.restore_routing(instruction);
        }
    }
}

/// One failed target in the final report.
#[derive(Debug)]
pub struct TargetFailure {
    /// Index into the plan's target list.
    pub index: usize,
    pub output_path: PathBuf,
    pub error: RenderError,
}

/// Summary of one execution run: succeeded, failed, and skipped are all
/// surfaced; there is no silent partial success.
#[derive(Debug, Default)]
pub struct BakeRunReport {
    /// Output paths written successfully, in execution order.
    pub completed: Vec<PathBuf>,
    /// Targets that failed, with their errors.
    pub failed: Vec<TargetFailure>,
    /// Warnings carried over from planning.
    pub warnings: Vec<PlanWarning>,
    /// True when the run stopped early on cancellation.
    pub cancelled: bool,
    /// Total targets in the plan.
    pub total: usize,
}

impl BakeRunReport {
    /// True when every target completed.
    pub fn all_succeeded(&self) -> bool {
        !self.cancelled && self.failed.is_empty() && self.completed.len() == self.total
    }
}

/// Progress notification issued once per target, before it is submitted.
pub type ProgressFn<'a> = dyn FnMut(usize, usize, &BakeTarget) + 'a;

/// Executes a plan sequentially against the engine.
pub fn execute_plan<E: RenderEngine>(
    plan: &BakePlan,
    engine: &mut E,
    cancel: &CancelToken,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> BakeRunReport {
    let mut report = BakeRunReport {
        warnings: plan.warnings.clone(),
        total: plan.targets.len(),
        ..Default::default()
    };

    for (index, target) in plan.targets.iter().enumerate() {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        if let Some(progress) = progress.as_deref_mut() {
            progress(index, report.total, target);
        }

        let attempt = RoutingGuard::apply(engine, &target.routing)
            .and_then(|mut guard| guard.bake(target));
        match attempt {
            Ok(()) => report.completed.push(target.output_path.clone()),
            Err(error) => report.failed.push(TargetFailure {
                index,
                output_path: target.output_path.clone(),
                error,
            }),
        }
    }

    report
}
