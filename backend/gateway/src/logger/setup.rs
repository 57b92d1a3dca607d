//!
//! Setup of the global tracing subscriber.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::{Log, LogFormat};

/// Install the global tracing subscriber, writing to stdout through a
/// non-blocking worker.
///
/// The returned guard must stay alive for as long as logs should be
/// written; dropping it flushes and stops the background writer.
pub fn setup(
    config: &Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    // An explicit directive from the config wins, then RUST_LOG, then a
    // directive built from the configured level for the listed crates.
    let directive = config
        .console
        .filtering_directive
        .clone()
        .unwrap_or_else(|| {
            let level = config.console.level.into_level();
            let crate_directives = crates_to_filter
                .as_ref()
                .iter()
                .map(|krate| format!("{krate}={level}"))
                .collect::<Vec<_>>()
                .join(",");
            format!("warn,{crate_directives}")
        });
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.console.enabled {
        match config.console.log_format {
            LogFormat::Default => {
                subscriber
                    .with(fmt::layer().with_target(true).with_writer(writer))
                    .init();
            }
            LogFormat::Json => {
                subscriber
                    .with(
                        fmt::layer()
                            .json()
                            .with_current_span(true)
                            .with_span_list(true)
                            .with_target(true)
                            .with_writer(writer),
                    )
                    .init();
            }
        }
    } else {
        subscriber.init();
    }

    tracing::info!(service = service_name, filter = %directive, "tracing initialised");

    guard
}
