use std::io;
use std::str::FromStr;
use std::time::Instant;

use crate::config::Config;

pub const DEFAULT_BUF_SIZE: usize = 1024 * 64;

pub fn log_level(config: &Config) -> log::LevelFilter {
    log::LevelFilter::from_str(&config.log_level).unwrap_or(log::LevelFilter::Info)
}

pub fn init_logger(config: &Config) -> Result<(), fern::InitError> {
    let started = Instant::now();

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{:?} [{}] {}",
                started.elapsed(),
                record.level(),
                message
            ))
        })
        // Output to stderr and, when configured, to the log file
        .chain(io::stderr())
        .level(log_level(config));

    if let Some(ref log_file) = config.log_file {
        dispatch = dispatch.chain(fern::log_file(log_file)?);
    }

    dispatch.apply()?;
    Ok(())
}

#[test]
fn test_log_level() {
    let mut config = Config::default();
    assert_eq!(log_level(&config), log::LevelFilter::Info);

    config.log_level = "debug".to_string();
    assert_eq!(log_level(&config), log::LevelFilter::Debug);

    config.log_level = "chatty".to_string();
    assert_eq!(log_level(&config), log::LevelFilter::Info);
}
