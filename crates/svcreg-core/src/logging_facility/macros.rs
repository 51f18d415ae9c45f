//! Stage logging macros
//!
//! Every pipeline stage logs one `start` and one `end` (or `end_error`)
//! event carrying `component`, `op` and `event`. Errors also carry the
//! registry context held by `ExError`: kind, code, and the offending file.
//! Callers need `svcreg-core-types` and `tracing` in their dependency list.

/// Log the start of a stage
///
/// ```
/// # use svcreg_core::log_op_start;
/// log_op_start!("load_records", record_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = svcreg_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of a stage
///
/// ```
/// # use svcreg_core::log_op_end;
/// log_op_end!("detect_conflicts", duration_ms = 4, conflict_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = svcreg_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log a failed stage
///
/// Accepts anything convertible into `ExError`. The event carries the
/// error's kind and code, its message, and the record file it names (empty
/// for run-level errors without one).
///
/// ```
/// # use svcreg_core::{log_op_error, errors::RegistryError};
/// let err = RegistryError::Parse {
///     file: "servers/broken.json".to_string(),
///     message: "EOF while parsing".to_string(),
/// };
/// log_op_error!("load_records", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = svcreg_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            file = ex_err.file().unwrap_or_default(),
            $($($field)*,)?
            "{}",
            ex_err.message()
        );
    }};
}
