//! Fairdice
//!
//! Interactive provably-fair non-transitive dice game.
//! Protocol output goes to stdout; diagnostics and logs go to stderr.

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fairdice::cli::{render_probability_table, Args};
use fairdice::game::protocol::GameSession;
use fairdice::{DieSet, Outcome, VERSION};

fn main() -> anyhow::Result<()> {
    // Logs must not interleave with the protocol transcript on stdout.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let dice = match DieSet::parse(&args.dice) {
        Ok(dice) => dice,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Example: fairdice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3");
            std::process::exit(1);
        }
    };

    info!(version = VERSION, dice = dice.len(), policy = ?args.host_policy, "starting game");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = GameSession::new(
        dice,
        args.host_policy,
        render_probability_table,
        stdin.lock(),
        stdout.lock(),
    )?;

    match session.run()? {
        Outcome::Resolved(resolution) => {
            info!(?resolution, "game resolved");
        }
        Outcome::Aborted => {
            info!("game aborted by user");
        }
    }
    Ok(())
}
