#![deny(clippy::all, warnings)]

//! Shared plumbing for the `eph` and `eph-once` binaries.

use std::path::PathBuf;

use anyhow::Result;
use eph_core::{BuildRequest, EnvBuilder, PipInstaller, VenvBackend};
use eph_domain::PackageSet;

/// Installs the tracing subscriber for a binary; level follows `-v` counts.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = format!("eph_core={level},eph_cli={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Builds (or reuses) the environment at `env_dir` and hands the terminal
/// to the shell inside it.
///
/// Returns only on failure; on success the process image is replaced.
pub fn provision_and_exec(
    env_dir: PathBuf,
    packages: PackageSet,
    recreate: bool,
    upgrade: bool,
) -> Result<()> {
    let backend = VenvBackend::discover()?;
    let installer = PipInstaller;
    let builder = EnvBuilder::new(&backend, &installer);

    builder.create(&BuildRequest {
        env_dir: env_dir.clone(),
        packages,
        recreate,
        upgrade,
    })?;
    eph_core::run_shell(&env_dir)
}
