use std::{fs, path::PathBuf};

use clap::Parser;
use serde::Deserialize;
use toml;

use crate::error::ExerciserError;

#[derive(Debug, Parser, Clone, Deserialize)]
#[clap(about = "Multi-mode gRPC greeter exerciser")]
#[command(version)]
pub struct Config {
    /// Greeter server gRPC endpoint URL
    #[arg(
        long,
        short = 'g',
        env = "EXERCISER_GRPC_URL",
        default_value = "http://localhost:50051"
    )]
    pub grpc_url: String,

    /// Name to greet
    #[arg(long, short = 'n', env = "EXERCISER_NAME", default_value = "world")]
    pub name: String,

    /// How many calls (unary) or stream messages (streaming modes) to drive
    /// per mode
    #[arg(long, short = 'i', env = "EXERCISER_ITERATIONS", default_value = "1000")]
    pub iterations: usize,

    /// Time budget in seconds shared by all iterations of a single mode
    #[arg(long, short = 't', env = "EXERCISER_TIMEOUT", default_value = "1")]
    pub timeout: u64,

    /// Delay in milliseconds between consecutive bidirectional sends;
    /// unpaced when absent
    #[arg(long, env = "EXERCISER_SEND_INTERVAL_MS")]
    pub send_interval_ms: Option<u64>,

    /// Path to CA file
    #[arg(long, env = "EXERCISER_GRPC_CA")]
    pub grpc_ca: Option<PathBuf>,

    /// Write process ID (PID) to this file
    #[arg(long)]
    pub pidfile: Option<PathBuf>,

    /// Log to syslog
    #[arg(long, short = 's')]
    #[serde(default)]
    pub use_syslog: bool,

    /// Syslog facility
    #[arg(long, default_value = "LOG_USER")]
    pub syslog_facility: String,

    /// Syslog socket path
    #[arg(long, default_value = "/var/run/log")]
    pub syslog_socket: PathBuf,

    /// Configuration file path
    #[arg(long = "config", short)]
    #[serde(skip)]
    pub(crate) config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grpc_url: "http://localhost:50051".into(),
            name: "world".into(),
            iterations: 1000,
            timeout: 1,
            send_interval_ms: None,
            grpc_ca: None,
            pidfile: None,
            use_syslog: false,
            syslog_facility: String::new(),
            syslog_socket: PathBuf::new(),
            config_path: None,
        }
    }
}

pub fn get_config() -> Result<Config, ExerciserError> {
    // parse CLI arguments to get config file path
    let cli_config = Config::parse();

    // load config from file if one was specified
    if let Some(config_path) = cli_config.config_path {
        let config_toml = fs::read_to_string(config_path)
            .map_err(|err| ExerciserError::InvalidConfigFile(err.to_string()))?;
        let file_config: Config = toml::from_str(&config_toml)
            .map_err(|err| ExerciserError::InvalidConfigFile(err.message().to_string()))?;
        return Ok(file_config);
    }

    Ok(cli_config)
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Config::command().debug_assert();
}

#[test]
fn parse_config_file() {
    let config: Config = toml::from_str(
        r#"
        grpc_url = "http://greeter.example.com:50051"
        name = "tester"
        iterations = 5
        timeout = 2
        syslog_facility = "LOG_USER"
        syslog_socket = "/var/run/log"
        "#,
    )
    .unwrap();

    assert_eq!(config.grpc_url, "http://greeter.example.com:50051");
    assert_eq!(config.name, "tester");
    assert_eq!(config.iterations, 5);
    assert_eq!(config.timeout, 2);
    assert_eq!(config.send_interval_ms, None);
    assert!(!config.use_syslog);
}
