use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::configuration::LoggerSettings;

pub fn init_tracing(settings: &LoggerSettings) -> WorkerGuard {
    // console layer for tracing-subscriber
    let console = fmt::Layer::new()
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .with_filter(EnvFilter::new(settings.level.clone()));

    // file appender layer for tracing-subscriber
    let file_appender =
        tracing_appender::rolling::daily(&settings.directory, &settings.file_name_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file = fmt::Layer::new()
        .with_writer(non_blocking)
        .json()
        .with_filter(EnvFilter::new(settings.level.clone()));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
    guard
}
