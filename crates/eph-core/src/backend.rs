use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use eph_domain::PackageSet;

use crate::errors::EnvError;

/// Constructs and tears down isolated runtime directories.
pub trait EnvironmentBackend {
    /// Creates a self-contained runtime at `env_dir`, leaving a runnable
    /// interpreter at its well-known relative path.
    fn build(&self, env_dir: &Path) -> Result<()>;

    /// Recursively deletes the environment at `env_dir`.
    fn destroy(&self, env_dir: &Path) -> Result<()>;
}

/// Installs a package set into an existing environment.
pub trait PackageInstaller {
    /// Installs the whole set as one batch; any failure fails the set.
    fn install(&self, env_dir: &Path, packages: &PackageSet, upgrade: bool) -> Result<()>;
}

pub(crate) fn interpreter_path(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("Scripts").join("python.exe")
    } else {
        env_dir.join("bin").join("python")
    }
}

/// `python -m venv` backend, driven through the interpreter found on `PATH`.
pub struct VenvBackend {
    base_interpreter: PathBuf,
}

impl VenvBackend {
    /// Locates the host interpreter once, so a missing `python3` fails
    /// before any directory is touched.
    pub fn discover() -> Result<Self> {
        let base_interpreter = which::which("python3")
            .or_else(|_| which::which("python"))
            .context("no python interpreter found on PATH")?;
        tracing::debug!(interpreter = %base_interpreter.display(), "using base interpreter");
        Ok(Self { base_interpreter })
    }
}

impl EnvironmentBackend for VenvBackend {
    fn build(&self, env_dir: &Path) -> Result<()> {
        tracing::debug!(env_dir = %env_dir.display(), "creating venv");
        let output = Command::new(&self.base_interpreter)
            .arg("-m")
            .arg("venv")
            .arg(env_dir)
            .output()
            .map_err(|err| EnvError::BuildFailed {
                path: env_dir.to_path_buf(),
                detail: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(EnvError::BuildFailed {
                path: env_dir.to_path_buf(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn destroy(&self, env_dir: &Path) -> Result<()> {
        tracing::debug!(env_dir = %env_dir.display(), "removing environment");
        fs::remove_dir_all(env_dir).map_err(|source| EnvError::DestroyFailed {
            path: env_dir.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

/// Batch `python -m pip install`, driven through the environment's own
/// interpreter.
pub struct PipInstaller;

impl PackageInstaller for PipInstaller {
    fn install(&self, env_dir: &Path, packages: &PackageSet, upgrade: bool) -> Result<()> {
        let interpreter = interpreter_path(env_dir);
        if !interpreter.is_file() {
            return Err(EnvError::MissingExecutable {
                name: "python interpreter",
                path: interpreter,
            }
            .into());
        }

        let mut command = Command::new(&interpreter);
        command.arg("-m").arg("pip").arg("install");
        if upgrade {
            command.arg("-U");
        }
        command.args(packages.names());

        tracing::debug!(packages = ?packages.names(), upgrade, "installing packages");
        let output = command
            .output()
            .with_context(|| format!("failed to run {}", interpreter.display()))?;
        if !output.status.success() {
            return Err(EnvError::InstallFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(())
    }
}
