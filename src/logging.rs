use std::str::FromStr;

use log::LevelFilter;
use syslog::{BasicLogger, Facility, Formatter3164};

use crate::{config::Config, error::ExerciserError};

/// Routes the log facade to a syslog daemon.
pub fn init_syslog(config: &Config, pid: u32) -> Result<(), ExerciserError> {
    let formatter = Formatter3164 {
        facility: Facility::from_str(&config.syslog_facility).unwrap_or(Facility::LOG_USER),
        hostname: None,
        process: "greeter-exerciser".into(),
        pid,
    };
    let logger = syslog::unix_custom(formatter, &config.syslog_socket)?;
    log::set_boxed_logger(Box::new(BasicLogger::new(logger)))?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}
