use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use eph_cli::{init_tracing, provision_and_exec};
use eph_domain::PackageSet;

/// Always-fresh variant: build into a temp directory, never reuse.
#[derive(Parser)]
#[command(
    name = "eph-once",
    version,
    about = "Throwaway IPython environments, fresh every run"
)]
struct EphOnceCli {
    /// Packages to make available inside the environment (case-insensitive,
    /// may repeat).
    package: Vec<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = EphOnceCli::parse();
    init_tracing(cli.verbose);

    let packages = PackageSet::normalize(&cli.package);
    let env_dir = eph_core::paths::scratch_env_dir().map_err(|err| eyre!("{err:?}"))?;
    tracing::debug!(env_dir = %env_dir.display(), "provisioning throwaway environment");

    // The scratch dir already exists; recreate forces the build over it
    // instead of tripping the reuse check.
    provision_and_exec(env_dir, packages, true, false).map_err(|err| eyre!("{err:?}"))
}
