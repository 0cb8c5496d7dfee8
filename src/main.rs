mod args;
mod vote;

use clap::Parser;
use log::{debug, LevelFilter};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = vote::run_vote(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
