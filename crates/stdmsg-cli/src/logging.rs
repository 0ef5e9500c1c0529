//! Diagnostics for the `stdmsg` binary. Everything goes to stderr so stdout
//! carries only the encoded or decoded payload.

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Log output format (stderr)
    #[arg(
        long,
        value_name = "FORMAT",
        value_enum,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    /// Minimum log level (stderr); `RUST_LOG` takes precedence when set
    #[arg(
        long,
        value_name = "LEVEL",
        value_enum,
        default_value_t = LogLevel::Warn,
        global = true
    )]
    pub log_level: LogLevel,
}

impl LogArgs {
    /// `RUST_LOG` directives win so codec internals can be traced per module,
    /// e.g. `RUST_LOG=stdmsg_core::decoder=trace`.
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.directive()))
    }

    pub fn init(&self) {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(self.filter())
            .with_ansi(false)
            .with_target(false);

        let installed = match self.log_format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        if let Err(err) = installed {
            eprintln!("stdmsg: logging unavailable: {err}");
        }
    }
}
