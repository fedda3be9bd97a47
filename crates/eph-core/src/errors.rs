use std::io;
use std::path::PathBuf;

/// Fatal failures of the environment lifecycle.
///
/// Every variant aborts the invocation. Nothing here is retried or rolled
/// back; a directory left behind by a failed build stays as it is.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("cannot find {name} at {}", .path.display())]
    MissingExecutable { name: &'static str, path: PathBuf },
    #[error("environment creation failed at {}: {detail}", .path.display())]
    BuildFailed { path: PathBuf, detail: String },
    #[error("package install failed (exit code {code}): {stderr}")]
    InstallFailed { code: i32, stderr: String },
    #[error("failed to remove environment at {}", .path.display())]
    DestroyFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to exec {}", .path.display())]
    ExecFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
