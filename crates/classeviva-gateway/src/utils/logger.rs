use anyhow::Result;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logger() -> Result<()> {
    // Log level from environment (default: info)
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,classeviva_gateway=debug,classeviva_client=debug".to_string());

    // pretty | json
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    // Optional daily-rotated file next to stdout
    let file_appender = match std::env::var("LOG_DIR") {
        Ok(dir) => Some(
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("gateway")
                .filename_suffix("log")
                .build(dir)?,
        ),
        Err(_) => None,
    };

    let filter = EnvFilter::try_new(&log_level)?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stdout)
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .with(file_appender.map(|appender| {
                    fmt::layer()
                        .json()
                        .with_writer(appender)
                        .with_target(true)
                        .with_thread_ids(true)
                }))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stdout)
                        .with_target(true),
                )
                .with(file_appender.map(|appender| {
                    fmt::layer()
                        .with_writer(appender)
                        .with_target(true)
                        .with_ansi(false)
                }))
                .try_init()?;
        }
    }

    Ok(())
}
