use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;

use crate::errors::EnvError;

/// Variable the shell uses to recognize the environment it runs inside.
pub const ENV_DIR_VAR: &str = "VIRTUAL_ENV";

const SHELL_NAME: &str = "ipython";

fn shell_path(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("Scripts").join("ipython.exe")
    } else {
        env_dir.join("bin").join(SHELL_NAME)
    }
}

/// Path of the interactive shell inside the environment.
///
/// The one sanity check before handoff: a built environment without the
/// shell executable is a broken build.
pub fn locate_shell(env_dir: &Path) -> Result<PathBuf> {
    let path = shell_path(env_dir);
    if !path.is_file() {
        return Err(EnvError::MissingExecutable {
            name: SHELL_NAME,
            path,
        }
        .into());
    }
    Ok(path)
}

/// Current process environment with the environment-identity override set.
pub fn shell_env(env_dir: &Path) -> Vec<(OsString, OsString)> {
    let mut vars: Vec<(OsString, OsString)> = env::vars_os()
        .filter(|(key, _)| key.as_os_str() != OsStr::new(ENV_DIR_VAR))
        .collect();
    vars.push((
        OsString::from(ENV_DIR_VAR),
        env_dir.as_os_str().to_os_string(),
    ));
    vars
}

/// Replaces this process with the environment's interactive shell.
///
/// Does not return on success: on Unix the process image becomes the shell;
/// elsewhere the shell runs as a child and the parent exits with its code.
pub fn run_shell(env_dir: &Path) -> Result<()> {
    let shell = locate_shell(env_dir)?;
    let mut command = Command::new(&shell);
    command.env_clear().envs(shell_env(env_dir));
    tracing::debug!(shell = %shell.display(), "handing the terminal to the shell");
    exec(command, &shell)
}

#[cfg(unix)]
fn exec(mut command: Command, shell: &Path) -> Result<()> {
    use std::os::unix::process::CommandExt;

    let source = command.exec();
    Err(EnvError::ExecFailed {
        path: shell.to_path_buf(),
        source,
    }
    .into())
}

#[cfg(not(unix))]
fn exec(mut command: Command, shell: &Path) -> Result<()> {
    let status = command.status().map_err(|source| EnvError::ExecFailed {
        path: shell.to_path_buf(),
        source,
    })?;
    std::process::exit(status.code().unwrap_or(-1));
}
