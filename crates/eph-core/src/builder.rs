use std::path::PathBuf;

use anyhow::Result;
use eph_domain::PackageSet;

use crate::backend::{EnvironmentBackend, PackageInstaller};
use crate::progress::Spinner;

/// Everything one [`EnvBuilder::create`] call needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub env_dir: PathBuf,
    pub packages: PackageSet,
    pub recreate: bool,
    pub upgrade: bool,
}

/// Drives one environment from absent to ready.
///
/// Collaborators are injected so the lifecycle can be exercised without a
/// host interpreter.
pub struct EnvBuilder<'a> {
    backend: &'a dyn EnvironmentBackend,
    installer: &'a dyn PackageInstaller,
}

impl<'a> EnvBuilder<'a> {
    pub fn new(backend: &'a dyn EnvironmentBackend, installer: &'a dyn PackageInstaller) -> Self {
        Self { backend, installer }
    }

    /// Reuses, builds, or destroys-and-rebuilds the environment at
    /// `request.env_dir`.
    ///
    /// An existing directory with `recreate` unset is trusted as-is: no
    /// re-install, no content verification. All failures are fatal and leave
    /// whatever is on disk untouched.
    pub fn create(&self, request: &BuildRequest) -> Result<()> {
        let exists = request.env_dir.is_dir();
        if exists && !request.recreate {
            tracing::debug!(env_dir = %request.env_dir.display(), "reusing cached environment");
            return Ok(());
        }

        let _spinner = Spinner::start("building environment");
        if exists {
            self.backend.destroy(&request.env_dir)?;
        }
        self.backend.build(&request.env_dir)?;
        self.installer
            .install(&request.env_dir, &request.packages, request.upgrade)
    }
}
