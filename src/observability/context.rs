//! Thread-local run context for crash reports.
//!
//! Records which phase of report generation is active and which input file
//! is being processed, so the panic hook can say where things went wrong.
//! Context guards use RAII for automatic cleanup on drop.
//!
//! Each thread has its own context. Rayon workers start empty, so parallel
//! work goes through [`par_map_with_context`], which installs the caller's
//! snapshot on every worker for the duration of the job.

use rayon::iter::FromParallelIterator;
use rayon::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// Context snapshot for the current report run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    pub phase: Option<RunPhase>,
    pub input_file: Option<PathBuf>,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            input_file: None,
        }
    }
}

/// Stages of a report run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    ConfigLoading,
    InputLoading,
    MetricComputation,
    Classification,
    Rendering,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::InputLoading => write!(f, "input_loading"),
            Self::MetricComputation => write!(f, "metric_computation"),
            Self::Classification => write!(f, "classification"),
            Self::Rendering => write!(f, "rendering"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase. Returns a guard that restores the previous phase.
#[must_use]
pub fn set_phase(phase: RunPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the input file being processed.
#[must_use]
pub fn set_input_file(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().input_file = Some(path.into());
        ContextGuard { previous }
    })
}

#[must_use]
pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Install a context snapshot on this thread until the guard drops.
#[must_use]
pub fn restore_context(snapshot: RunContext) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.replace(snapshot);
        ContextGuard { previous }
    })
}

/// Map `f` over `items` in parallel with the caller's context visible on
/// every worker thread. Output order follows `items`.
pub fn par_map_with_context<T, R, C, F>(items: &[T], f: F) -> C
where
    T: Sync,
    R: Send,
    C: FromParallelIterator<R>,
    F: Fn(&T) -> R + Sync + Send,
{
    let snapshot = get_current_context();
    items
        .par_iter()
        .map_init(|| restore_context(snapshot.clone()), |_guard, item| f(item))
        .collect()
}
