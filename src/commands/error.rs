use crate::core::Error;
use std::fmt::Write;

/// Text printed to stderr when a command fails.
///
/// Problems the user can fix (bad rows, bad config, unreadable input) get
/// the error chain and a hint. Anything else that comes from esgmap itself
/// is reported as a bug with its debug details.
pub fn render_error(err: &anyhow::Error) -> String {
    let mut out = String::new();
    match err.downcast_ref::<Error>() {
        Some(Error::DataValidation {
            entity,
            field,
            reason,
        }) => {
            let _ = writeln!(out, "error: invalid data for entity '{entity}', field {field}: {reason}");
            let _ = writeln!(out, "context: {err:#}");
            let _ = writeln!(out, "Correct the source data and run the report again.");
        }
        Some(error) if error.is_user_fixable() => {
            let _ = writeln!(out, "error: {err:#}");
            let _ = writeln!(out, "Check the input file and configuration, then run again.");
        }
        Some(error @ Error::InvariantViolation { .. }) => {
            let _ = writeln!(out, "internal error: {error}");
            let _ = writeln!(out, "context: {err:#}");
            let _ = writeln!(out, "details: {error:?}");
            let _ = writeln!(out, "This is a bug in esgmap, not a problem with your data.");
        }
        _ => {
            let _ = writeln!(out, "error: {err:#}");
        }
    }
    out
}
