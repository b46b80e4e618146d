mod cli;
mod config;
mod feed;
mod identity;
mod journey;
mod model;
mod storage;
mod timeline;
mod tracker;

use std::{env, io, process};

use tracing_subscriber::EnvFilter;

use cli::Session;
use storage::Storage;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let root = env::var_os("SHIPTRACK_HOME")
        .map(Into::into)
        .or_else(Storage::default_root)
        .unwrap_or_else(|| {
            eprintln!("Could not determine home directory.");
            process::exit(1);
        });

    let mut session = match Session::open(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&mut session) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
