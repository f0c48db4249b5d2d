//! Logging and crash-report infrastructure.
//!
//! - **Logging**: `tracing` subscriber configured from `RUST_LOG` or `-v`
//! - **Panic Hook**: structured crash report with run context
//! - **Context Tracking**: thread-local run phase and input file, carried
//!   into rayon workers

pub mod context;
pub mod logging;
pub mod panic_hook;

pub use context::{
    get_current_context, par_map_with_context, restore_context, set_input_file, set_phase,
    ContextGuard, RunContext, RunPhase,
};
pub use logging::{init_tracing, verbosity_directive};
pub use panic_hook::install_panic_hook;
