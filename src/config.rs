//! Artifact path resolution.
//!
//! The artifact location is always caller-supplied; this module only
//! provides the deployment default. The data directory comes from the
//! `DANAGA_DATA_DIR` environment variable, falling back to a relative
//! `artifacts/` directory so nothing is tied to a developer machine.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the deployment data directory.
pub const DATA_DIR_ENV: &str = "DANAGA_DATA_DIR";

/// File name of the model artifact inside the data directory.
pub const ARTIFACT_FILE: &str = "model.bin";

/// Default artifact path: `$DANAGA_DATA_DIR/model.bin`, or
/// `artifacts/model.bin` when the variable is unset.
pub fn default_artifact_path() -> PathBuf {
    env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"))
        .join(ARTIFACT_FILE)
}
