mod account;
mod admin;
mod auth;
mod cli;
mod storage;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "userman", about = "A menu-driven user account manager")]
pub struct Args {
    #[arg(
        short,
        long,
        env = "USERMAN_FILE",
        default_value = "users.json",
        help = "Account data file"
    )]
    pub file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // A corrupt data file aborts here with a non-zero exit; silently
    // dropping records would lose persisted login counters.
    let (store, bootstrapped) = storage::load_with_bootstrap(&args.file)?;
    if bootstrapped {
        println!(
            "No admin found. Creating default admin '{}' / '{}'.",
            storage::DEFAULT_ADMIN_USER,
            storage::DEFAULT_ADMIN_PASSWORD
        );
    }

    let ctx = cli::Context {
        store,
        data_path: args.file,
    };
    cli::run_menu(ctx)
}
