//!
//! Setup logging subsystem.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config;

/// Keeps the non-blocking log writers alive; logs buffered by them are flushed on drop.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

///
/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
///
/// Fails if a global subscriber has already been installed.
///
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    service_name: &str,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> Result<TelemetryGuard, tracing_subscriber::util::TryInitError> {
    let mut guards = Vec::new();

    // Use 'RUST_LOG' environment variable will override the config settings
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::TRACE.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let level = conf.console.level.into_level();
        let console_filter = match conf.console.filtering_directive.as_deref() {
            Some(directive) => directive
                .parse::<filter::Targets>()
                .unwrap_or_else(|_| filter::Targets::new().with_default(level)),
            None => crates_to_watch.into_iter().fold(
                filter::Targets::new().with_default(tracing::Level::WARN),
                |targets, acrate| targets.with_target(acrate.as_ref(), level),
            ),
        };

        match conf.console.log_format {
            config::LogFormat::Default => {
                let logging_layer = fmt::layer()
                    .with_timer(fmt::time::time())
                    .with_span_events(fmt::format::FmtSpan::ACTIVE)
                    .pretty()
                    .with_writer(console_writer);

                subscriber
                    .with(logging_layer.with_filter(console_filter))
                    .try_init()?;
            }
            config::LogFormat::Json => {
                let logging_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(console_writer);

                subscriber
                    .with(logging_layer.with_filter(console_filter))
                    .try_init()?;
            }
        }
    } else {
        subscriber.try_init()?;
    }

    tracing::debug!(service = service_name, "logger initialised");

    // Returning the WorkerGuard for logs to be printed until it is dropped
    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}
