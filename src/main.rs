use std::env;
use std::process;

use clap::Parser;
use log::{error, info};

use ccombine::combine;
use ccombine::config::Config;
use ccombine::utils::init_logger;
use ccombine::version;

/// Concatenate every file in the current directory and strip C comments
#[derive(Parser)]
#[command(name = "ccombine", version = version::VERSION)]
struct Args {
    /// Print configuration file locations and current values, then exit
    #[arg(long)]
    show_config: bool,
}

fn main() {
    let args = Args::parse();
    if args.show_config {
        Config::help();
        return;
    }

    process::exit(execute())
}

fn execute() -> i32 {
    let config = match Config::load() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("FATAL ERROR: Can't load configuration {e}");
            return 2;
        }
    };
    if let Err(e) = init_logger(&config) {
        eprintln!("FATAL ERROR: Can't initialize logger {e}");
        return 3;
    }
    info!("ccombine {}", version::full_version());

    let dir = match env::current_dir() {
        Ok(v) => v,
        Err(e) => {
            error!("FATAL ERROR: Can't get working directory {e}");
            return 1;
        }
    };
    match combine::run(&config, &dir) {
        Ok(statistic) => {
            info!("{statistic}");
            0
        }
        Err(e) => {
            error!("FATAL ERROR: {e}");
            1
        }
    }
}
