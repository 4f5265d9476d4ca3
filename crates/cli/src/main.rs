use std::io;

use anyhow::Context;
use clap::Parser;

use invmgr_cli::args::{self, Cli};
use invmgr_cli::Session;
use invmgr_config::InvMgrConfig;
use invmgr_infra::FileItemStore;

fn main() {
    if let Err(error) = run() {
        eprintln!("invmgr error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = InvMgrConfig::load().context("failed to load configuration")?;
    cli.apply(&mut config);
    invmgr_observability::init(&args::log_settings(&config));

    let store = FileItemStore::new(&config.storage.data_file);
    let mut session = Session::open(store)
        .with_context(|| {
            format!(
                "failed to load items from {}",
                config.storage.data_file.display()
            )
        })?
        .with_autosave(config.storage.autosave);

    let stdin = io::stdin();
    session
        .run(stdin.lock(), io::stdout().lock())
        .context("console io failed")?;

    tracing::info!("session closed");
    Ok(())
}
