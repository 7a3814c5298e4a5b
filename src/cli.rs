//! Command-line interface for order-desk.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Everything except the help/version switches is optional so that unset
/// flags leave file and environment settings alone.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Base URL of the order data store.
    pub backend_url: Option<String>,
    /// Serve from seeded in-memory data instead of the REST store.
    pub in_memory: bool,
    /// Failed slot captures tolerated before escalating.
    pub max_retries: Option<u32>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                result.host = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("host", value))?,
                );
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                result.port = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("port", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('b') | Long("backend-url") => {
                let value: String = parser.value()?.parse()?;
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(ArgsError::InvalidValue("backend-url", value));
                }
                result.backend_url = Some(value);
            }
            Long("in-memory") => {
                result.in_memory = true;
            }
            Long("max-retries") => {
                let value: String = parser.value()?.parse()?;
                result.max_retries = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("max-retries", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"order-desk {version}
Conversational order-support desk (tracking, refunds, complaints, returns)

USAGE:
    order-desk [OPTIONS]

OPTIONS:
    -H, --host <ADDR>         Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>         Port to listen on [default: 4000]
    -c, --config <FILE>       Path to configuration file (JSON)
    -b, --backend-url <URL>   Order data store URL [default: http://localhost:3001]
        --in-memory           Use seeded in-memory demo data instead of the store
        --max-retries <N>     Failed order-id prompts before escalating [default: 1]
    -l, --log-level <LVL>     Log level (error, warn, info, debug, trace)
    -h, --help                Print help
    -V, --version             Print version

ENVIRONMENT VARIABLES:
    ORDER_DESK_HOST           Host address (overrides config)
    ORDER_DESK_PORT           Port number (overrides config)
    ORDER_DESK_BACKEND_URL    Data store URL (overrides config)
    ORDER_DESK_LOG_LEVEL      Log level (overrides config)
    RUST_LOG                  Alternative log level setting

EXAMPLES:
    # Start against a local json-server on port 3001
    order-desk

    # Try it out without a data store
    order-desk --in-memory

    # Start on all interfaces with a config file
    order-desk -H 0.0.0.0 -c /etc/order-desk/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("order-desk {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
