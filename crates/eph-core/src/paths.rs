use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

pub(crate) const DATA_DIR_ENV: &str = "EPH_DATA_DIR";

const ENVS_DIR: &str = "ephemeral-envs";
const ENV_PREFIX: &str = "ephemeral-";

/// Root directory that cached environments live under.
///
/// `$EPH_DATA_DIR` wins when set; otherwise the platform's per-user data
/// directory.
pub fn data_root() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs_next::data_dir().ok_or_else(|| anyhow!("user data directory not found"))
}

/// Deterministic location for the environment with the given identity.
///
/// Creates the container directory eagerly. Whether the leaf itself exists is
/// the builder's decision, not checked here.
pub fn cached_env_dir(identity: &str) -> Result<PathBuf> {
    let root = data_root()?.join(ENVS_DIR);
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root.join(format!("{ENV_PREFIX}{identity}")))
}

/// Freshly created unique directory for a throwaway environment.
///
/// The directory always exists and is empty on return. It is handed over to
/// the caller and never deleted by us; the system temp reaper owns it from
/// here.
pub fn scratch_env_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(ENV_PREFIX)
        .tempdir()
        .context("failed to create temp directory")?;
    Ok(dir.keep())
}
