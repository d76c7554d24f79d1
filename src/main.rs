use std::{fs::File, io::Write, process};

use greeter_exerciser::{
    config::get_config,
    error::ExerciserError,
    exerciser::{self, CallMode, Report},
    greeter::{hello_spec, setup_client},
    logging::init_syslog,
    VERSION,
};

#[tokio::main]
async fn main() -> Result<(), ExerciserError> {
    // parse config
    let config = get_config()?;

    // setup pidfile
    let pid = process::id();
    if let Some(pidfile) = &config.pidfile {
        let mut file = File::create(pidfile)?;
        file.write_all(pid.to_string().as_bytes())?;
    }

    // setup logging
    if config.use_syslog {
        if let Err(error) = init_syslog(&config, pid) {
            log::error!("Unable to initialize syslog. Is the syslog daemon running?");
            return Err(error);
        }
    } else {
        env_logger::init();
    }

    log::info!(
        "Starting greeter exerciser version {VERSION}, greeting {} at {}",
        config.name,
        config.grpc_url
    );

    let mut client = setup_client(&config).await?;

    let mut report = Report::default();
    for mode in [
        CallMode::Unary,
        CallMode::Bidi,
        CallMode::ServerStream,
        CallMode::ClientStream,
    ] {
        let spec = hello_spec(&config, mode);
        match exerciser::run(&mut client, &spec).await {
            Ok(result) => {
                log::info!("{result}");
                report.push(result);
            }
            Err(err) => {
                log::error!("Could not start the {mode} call: {err}");
                return Err(err);
            }
        }
    }

    log::info!(
        "Exercised {} call modes in {:?}",
        report.results().len(),
        report.total_elapsed()
    );

    Ok(())
}
