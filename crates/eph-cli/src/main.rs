use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use eph_cli::{init_tracing, provision_and_exec};
use eph_domain::PackageSet;

/// Cached interactive environments, keyed by their package set.
#[derive(Parser)]
#[command(
    name = "eph",
    version,
    about = "Disposable IPython environments, cached by package set"
)]
struct EphCli {
    /// Packages to make available inside the environment (case-insensitive,
    /// may repeat).
    package: Vec<String>,

    /// Destroy and rebuild the cached environment for this package set.
    #[arg(short, long)]
    recreate: bool,

    /// Pass the upgrade flag to the installer.
    #[arg(short, long)]
    update: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = EphCli::parse();
    init_tracing(cli.verbose);

    let packages = PackageSet::normalize(&cli.package);
    let identity = packages.fingerprint();
    tracing::debug!(identity = %identity, packages = ?packages.names(), "resolved identity");

    let env_dir = eph_core::paths::cached_env_dir(&identity).map_err(|err| eyre!("{err:?}"))?;
    provision_and_exec(env_dir, packages, cli.recreate, cli.update).map_err(|err| eyre!("{err:?}"))
}
