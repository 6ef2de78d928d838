//! Lifecycle macros for the pipeline boundary
//!
//! `pipeline` wraps `render`, `compose` and `build_descriptor` in one
//! start event and exactly one of end / end_error. Field keys match
//! `core_types::schema`: `component`, `op`, `event` on every event,
//! `duration_ms` on the closing one, `err.kind` and `err.code` on failures.
//! Extra fields (`directive_count`, `addon`, `digest`, ...) follow the fixed
//! ones.

/// Open a pipeline operation at info level
///
/// # Example
///
/// ```
/// # use stackweave_core::log_op_start;
/// log_op_start!("render");
/// log_op_start!("render", directive_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Close a pipeline operation that produced its document or descriptor
///
/// # Example
///
/// ```
/// # use stackweave_core::log_op_end;
/// log_op_end!("compose", duration_ms = 3, addon_count = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Close a pipeline operation that failed, at error level
///
/// Takes a `StackError` (or anything else convertible into `ExError`) and
/// records its kind and stable `ERR_*` code next to `duration_ms`.
///
/// ```
/// # use stackweave_core::{log_op_error, errors::StackError};
/// let err = StackError::DuplicateAddon { name: "x".to_string() };
/// log_op_error!("compose", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
