mod cli;
mod commands;
mod config;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::commands::App;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(year) = cli.year {
        config.year = year;
    }
    if let Some(dir) = cli.cache_dir {
        config.cache.dir = dir;
    }
    let mut app = App::new(config);

    match cli.command {
        Command::Countries => commands::countries(),
        Command::List(args) => commands::list(&mut app, args),
        Command::Today(args) => commands::today(&mut app, args),
        Command::Next(args) => commands::next(&mut app, args),
        Command::Watch(args) => commands::watch(&mut app, args),
        Command::ClearCache(args) => commands::clear_cache(&mut app, args),
    }
}
