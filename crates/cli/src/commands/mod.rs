//! Command implementations.

mod info;
mod send;
mod validate;

pub use info::run_info;
pub use send::run_send;
pub use validate::run_validate;

use std::path::Path;

use crate::error::{CliError, Result};

/// Fail early with a clear message when the job file is missing
pub(crate) fn ensure_job_file(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::config_not_found(path.display().to_string()))
    }
}
