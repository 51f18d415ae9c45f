pub mod build;
pub mod validate;

use svcreg_core::errors::{ExError, ExErrorKind};
use svcreg_store::config::{load_config, RegistryConfig};

use crate::GlobalArgs;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_STORE_LOAD: i32 = 2;

/// A run-ending error plus the process exit code it maps to
#[derive(Debug)]
pub struct CommandFailure {
    pub error: anyhow::Error,
    pub exit_code: i32,
}

impl CommandFailure {
    pub fn new(error: impl Into<anyhow::Error>, exit_code: i32) -> Self {
        Self {
            error: error.into(),
            exit_code,
        }
    }
}

/// Exit code for a command outcome, or a failure that ends the run
pub type CommandResult = Result<i32, CommandFailure>;

/// Map an error to the validate exit-code policy: store failures exit 2
pub(crate) fn validate_failure(err: ExError) -> CommandFailure {
    let exit_code = match err.kind() {
        ExErrorKind::StoreLoad => EXIT_STORE_LOAD,
        _ => EXIT_FAILED,
    };
    CommandFailure::new(err, exit_code)
}

/// Build treats every error alike
pub(crate) fn build_failure(err: impl Into<anyhow::Error>) -> CommandFailure {
    CommandFailure::new(err, EXIT_FAILED)
}

pub(crate) fn load_registry_config(global: &GlobalArgs) -> Result<RegistryConfig, ExError> {
    load_config(&global.root, global.config.as_deref())
}
